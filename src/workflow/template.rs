//! Template Store
//!
//! Holds the canonical single-region workflow and the default list of
//! regions it is expanded over. Both are immutable for the whole run.

use once_cell::sync::Lazy;

use super::model::{Step, Task, Workflow};

/// Step that fetches the raw extracts.
pub const DOWNLOAD_STEP: &str = "download";

/// Step that loads the extracts into the database.
pub const IMPORT_STEP: &str = "import";

/// Step that builds indexes once every import has finished.
pub const INDEX_STEP: &str = "index";

/// Steps every prototype must hold, each with exactly one task.
pub const EXPECTED_STEPS: &[&str] = &[DOWNLOAD_STEP, IMPORT_STEP, INDEX_STEP];

/// Steps whose single prototype task is instantiated once per region.
pub const PARAMETERIZED_STEPS: &[&str] = &[DOWNLOAD_STEP, IMPORT_STEP];

/// Base URL of the extract mirror.
pub const DOWNLOAD_BASE_URL: &str = "https://download.geofabrik.de";

/// Connection string shared by the import and index tasks.
pub const DATABASE_URL: &str =
    "jdbc:postgresql://localhost:5432/baremaps?&user=baremaps&password=baremaps";

/// Spatial reference system the import reprojects into (web mercator).
pub const DATABASE_SRID: u32 = 3857;

/// SQL script run by the index step.
pub const INDEX_SCRIPT: &str = "indexes.sql";

/// Continents covered by the default planet build, in output order.
pub const DEFAULT_REGIONS: &[&str] = &[
    "africa",
    "antarctica",
    "asia",
    "australia-oceania",
    "central-america",
    "europe",
    "north-america",
    "south-america",
];

/// The single-region prototype workflow.
pub static PROTOTYPE: Lazy<Workflow> = Lazy::new(|| {
    Workflow::from_steps(vec![
        Step::new(DOWNLOAD_STEP).with_task(Task::DownloadUrl {
            url: format!("{}/europe/liechtenstein-latest.osm.pbf", DOWNLOAD_BASE_URL),
            path: "liechtenstein-latest.osm.pbf".to_string(),
        }),
        Step::new(IMPORT_STEP)
            .depends_on(DOWNLOAD_STEP)
            .with_task(Task::ImportOpenStreetMap {
                file: "liechtenstein-latest.osm.pbf".to_string(),
                database: DATABASE_URL.to_string(),
                database_srid: DATABASE_SRID,
            }),
        Step::new(INDEX_STEP)
            .depends_on(IMPORT_STEP)
            .with_task(Task::ExecuteSql {
                file: INDEX_SCRIPT.to_string(),
                database: DATABASE_URL.to_string(),
            }),
    ])
});

/// A prototype workflow paired with the regions to expand it over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    workflow: Workflow,
    regions: Vec<String>,
}

impl Template {
    /// Creates a template from an explicit workflow and region list.
    pub fn new(workflow: Workflow, regions: Vec<String>) -> Self {
        Self { workflow, regions }
    }

    /// The built-in prototype over the given regions.
    pub fn with_regions<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new((*PROTOTYPE).clone(), regions.into_iter().map(Into::into).collect())
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::with_regions(DEFAULT_REGIONS.iter().copied())
    }
}

/// Returns true if the step's prototype task is expanded per region.
pub fn is_parameterized(step_id: &str) -> bool {
    PARAMETERIZED_STEPS.contains(&step_id)
}

/// Task type a parameterized step's prototype must have.
pub fn prototype_kind(step_id: &str) -> Option<&'static str> {
    match step_id {
        DOWNLOAD_STEP => Some("DownloadUrl"),
        IMPORT_STEP => Some("ImportOpenStreetMap"),
        _ => None,
    }
}
