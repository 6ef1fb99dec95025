//! Task Parameterizer
//!
//! Turns a prototype task into the concrete task for one region by
//! substituting the region into fixed URL and file name patterns.

use log::debug;

use super::model::Task;
use super::template::DOWNLOAD_BASE_URL;
use crate::error::{Error, Result};

/// A concrete task tagged with the region it was produced for.
///
/// The region is kept alongside the task so download and import tasks can be
/// paired by region rather than by position. It is never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTask {
    pub region: String,
    pub task: Task,
}

/// Remote location of a region's extract.
pub fn extract_url(region: &str) -> String {
    format!("{}/{}-latest.osm.pbf", DOWNLOAD_BASE_URL, region)
}

/// Local file a region's extract is downloaded to and imported from.
pub fn extract_file(region: &str) -> String {
    format!("{}-latest.osm.pbf", region)
}

/// Produces the concrete task for `region` from a prototype task.
///
/// Only `DownloadUrl` and `ImportOpenStreetMap` are region-parameterized;
/// any other variant, or an empty region, is a template error.
///
/// # Example
///
/// ```
/// use planet_workflow::workflow::{parameterize, Task};
///
/// let prototype = Task::DownloadUrl {
///     url: "https://download.geofabrik.de/europe/liechtenstein-latest.osm.pbf".to_string(),
///     path: "liechtenstein-latest.osm.pbf".to_string(),
/// };
/// let concrete = parameterize(&prototype, "asia").unwrap();
/// assert_eq!(concrete.task.produces(), Some("asia-latest.osm.pbf"));
/// ```
pub fn parameterize(prototype: &Task, region: &str) -> Result<RegionTask> {
    if region.trim().is_empty() {
        return Err(Error::invalid_template(
            "region identifier must not be empty",
        ));
    }

    let task = match prototype {
        Task::DownloadUrl { .. } => Task::DownloadUrl {
            url: extract_url(region),
            path: extract_file(region),
        },
        Task::ImportOpenStreetMap {
            database,
            database_srid,
            ..
        } => Task::ImportOpenStreetMap {
            file: extract_file(region),
            database: database.clone(),
            database_srid: *database_srid,
        },
        other => {
            return Err(Error::invalid_template(format!(
                "{} tasks cannot be parameterized by region",
                other.kind()
            )));
        }
    };

    debug!("  {} task for '{}': {:?}", task.kind(), region, task);

    Ok(RegionTask {
        region: region.to_string(),
        task,
    })
}
