//! Workflow Expansion
//!
//! Projects the single-region prototype onto every configured region:
//! - `download` and `import` get one concrete task per region, in region order
//! - every other step is copied unchanged
//! - step ids and `needs` are never touched

use log::{debug, info, warn};

use super::model::{Step, Task, Workflow};
use super::parameterize::{parameterize, RegionTask};
use super::template::{
    is_parameterized, prototype_kind, Template, DOWNLOAD_STEP, EXPECTED_STEPS, IMPORT_STEP,
};
use crate::error::{Error, Result};

/// Returns the single prototype task of a template step.
fn single_task(step: &Step) -> Result<&Task> {
    match step.tasks.as_slice() {
        [task] => Ok(task),
        tasks => Err(Error::invalid_template(format!(
            "Step '{}' must hold exactly one prototype task, found {}",
            step.id,
            tasks.len()
        ))),
    }
}

/// Instantiates a parameterized step's prototype task once per region.
fn expand_step(step: &Step, regions: &[String]) -> Result<Vec<RegionTask>> {
    let prototype = single_task(step)?;

    if let Some(expected) = prototype_kind(&step.id) {
        if prototype.kind() != expected {
            return Err(Error::invalid_template(format!(
                "Step '{}' needs a {} prototype, found {}",
                step.id,
                expected,
                prototype.kind()
            )));
        }
    }

    info!(
        "Expanding step '{}' ({}) into {} tasks",
        step.id,
        prototype.kind(),
        regions.len()
    );

    regions
        .iter()
        .map(|region| parameterize(prototype, region))
        .collect()
}

/// Checks that download task *i* and import task *i* describe the same
/// region and that the import reads the file the download writes.
fn check_pairing(downloads: &[RegionTask], imports: &[RegionTask]) -> Result<()> {
    if downloads.len() != imports.len() {
        return Err(Error::invalid_template(format!(
            "{} download tasks but {} import tasks",
            downloads.len(),
            imports.len()
        )));
    }

    for (download, import) in downloads.iter().zip(imports) {
        let downloaded = download.task.produces();
        if download.region != import.region
            || downloaded.is_none()
            || downloaded != import.task.consumes()
        {
            return Err(Error::invalid_template(format!(
                "Import for '{}' does not read the file downloaded for '{}'",
                import.region, download.region
            )));
        }
    }

    Ok(())
}

/// Produces the fully expanded workflow from a template.
///
/// # Errors
///
/// Returns [`Error::InvalidTemplate`] if an expected step is missing, holds
/// other than exactly one task, or holds a prototype of the wrong type.
///
/// # Example
///
/// ```
/// use planet_workflow::workflow::{expand, Template};
///
/// let expanded = expand(&Template::with_regions(["europe", "asia"])).unwrap();
/// assert_eq!(expanded.get_step("download").unwrap().tasks.len(), 2);
/// assert_eq!(expanded.get_step("index").unwrap().tasks.len(), 1);
/// ```
pub fn expand(template: &Template) -> Result<Workflow> {
    let workflow = template.workflow();
    let regions = template.regions();

    for id in EXPECTED_STEPS {
        let step = workflow.get_step(id).ok_or_else(|| {
            Error::invalid_template(format!("Template has no '{}' step", id))
        })?;
        single_task(step)?;
    }

    if regions.is_empty() {
        warn!("No regions configured; per-region steps will have no tasks");
    }

    let mut downloads = Vec::new();
    let mut imports = Vec::new();
    let mut expanded_steps = Vec::with_capacity(workflow.steps.len());

    for step in &workflow.steps {
        if !is_parameterized(&step.id) {
            debug!("Copying step '{}' unchanged", step.id);
            expanded_steps.push(step.clone());
            continue;
        }

        let region_tasks = expand_step(step, regions)?;
        let tasks = region_tasks.iter().map(|rt| rt.task.clone()).collect();
        expanded_steps.push(step.with_tasks(tasks));

        match step.id.as_str() {
            DOWNLOAD_STEP => downloads = region_tasks,
            IMPORT_STEP => imports = region_tasks,
            _ => {}
        }
    }

    check_pairing(&downloads, &imports)?;

    let expanded = Workflow::from_steps(expanded_steps);
    info!(
        "Expansion complete: {} steps, {} tasks for {} regions",
        expanded.len(),
        expanded.task_count(),
        regions.len()
    );

    Ok(expanded)
}
