//! Workflow Data Model
//!
//! Core data structures describing a manifest: a workflow is an ordered list
//! of steps, each step holds the tasks the external executor runs.
//!
//! # Example JSON Format
//!
//! ```json
//! {
//!   "steps": [
//!     {
//!       "id": "download",
//!       "needs": [],
//!       "tasks": [
//!         {
//!           "type": "DownloadUrl",
//!           "url": "https://download.geofabrik.de/europe-latest.osm.pbf",
//!           "path": "europe-latest.osm.pbf"
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// A single operation understood by the downstream executor.
///
/// Serialized with a `type` discriminant first, followed by the variant's
/// fields in declaration order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Task {
    /// Fetch a remote resource to a local path.
    DownloadUrl { url: String, path: String },

    /// Load a local OpenStreetMap extract into a spatial database.
    ImportOpenStreetMap {
        file: String,
        database: String,
        #[serde(rename = "databaseSrid")]
        database_srid: u32,
    },

    /// Run a SQL script against a database.
    ExecuteSql { file: String, database: String },
}

impl Task {
    /// Returns the discriminant written to the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DownloadUrl { .. } => "DownloadUrl",
            Self::ImportOpenStreetMap { .. } => "ImportOpenStreetMap",
            Self::ExecuteSql { .. } => "ExecuteSql",
        }
    }

    /// Local file produced by this task, if any.
    pub fn produces(&self) -> Option<&str> {
        match self {
            Self::DownloadUrl { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    /// Local file read by this task, if any.
    pub fn consumes(&self) -> Option<&str> {
        match self {
            Self::ImportOpenStreetMap { file, .. } | Self::ExecuteSql { file, .. } => Some(file.as_str()),
            Self::DownloadUrl { .. } => None,
        }
    }
}

/// Represents a single step in a workflow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Unique identifier for this step
    pub id: String,

    /// IDs of steps that must complete before this step is ready
    #[serde(default)]
    pub needs: Vec<String>,

    /// Tasks run by this step
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Step {
    /// Creates a new Step with no dependencies and no tasks.
    ///
    /// # Example
    ///
    /// ```
    /// use planet_workflow::workflow::{Step, Task};
    ///
    /// let step = Step::new("index")
    ///     .depends_on("import")
    ///     .with_task(Task::ExecuteSql {
    ///         file: "indexes.sql".to_string(),
    ///         database: "jdbc:postgresql://localhost:5432/osm".to_string(),
    ///     });
    /// assert_eq!(step.tasks.len(), 1);
    /// ```
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into().trim().to_string(),
            needs: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Adds a dependency on another step.
    pub fn depends_on(mut self, step_id: impl Into<String>) -> Self {
        self.needs.push(step_id.into());
        self
    }

    /// Appends a task to this step.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Replaces the task list, keeping `id` and `needs`.
    pub fn with_tasks(&self, tasks: Vec<Task>) -> Self {
        Self {
            id: self.id.clone(),
            needs: self.needs.clone(),
            tasks,
        }
    }

    /// Returns a copy of this step with its dependency edges cleared.
    pub fn detached(&self) -> Self {
        Self {
            id: self.id.clone(),
            needs: Vec::new(),
            tasks: self.tasks.clone(),
        }
    }
}

/// Represents a complete workflow with multiple steps.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    /// Ordered list of steps in the workflow
    pub steps: Vec<Step>,
}

impl Workflow {
    /// Creates a new empty workflow.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Creates a workflow from a list of steps.
    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Gets a step by ID.
    pub fn get_step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Returns steps with no dependencies (entry points).
    pub fn root_steps(&self) -> Vec<&Step> {
        self.steps.iter().filter(|s| s.needs.is_empty()).collect()
    }

    /// Total number of tasks across all steps.
    pub fn task_count(&self) -> usize {
        self.steps.iter().map(|s| s.tasks.len()).sum()
    }

    /// Returns the number of steps in the workflow.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the workflow has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}
