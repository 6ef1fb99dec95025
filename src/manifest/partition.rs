//! Manifest Partitioning
//!
//! Derives one self-contained manifest per step so a single stage can be run
//! in isolation. Each partition holds a copy of the step with `needs`
//! cleared, since there is no surrounding workflow left to depend on.

use log::debug;

use crate::workflow::Workflow;

/// A single-step manifest derived from an expanded workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepManifest {
    /// ID of the step this manifest was cut from
    pub step_id: String,

    /// Workflow holding exactly that step
    pub workflow: Workflow,
}

/// Splits `workflow` into one dependency-free manifest per step, in step order.
///
/// # Example
///
/// ```
/// use planet_workflow::manifest::partition;
/// use planet_workflow::workflow::{expand, Template};
///
/// let expanded = expand(&Template::default()).unwrap();
/// let parts = partition(&expanded);
/// assert_eq!(parts.len(), 3);
/// assert!(parts.iter().all(|p| p.workflow.steps[0].needs.is_empty()));
/// ```
pub fn partition(workflow: &Workflow) -> Vec<StepManifest> {
    workflow
        .steps
        .iter()
        .map(|step| {
            debug!(
                "Partition '{}': {} tasks, dropped needs {:?}",
                step.id,
                step.tasks.len(),
                step.needs
            );

            StepManifest {
                step_id: step.id.clone(),
                workflow: Workflow::from_steps(vec![step.detached()]),
            }
        })
        .collect()
}
