//! Planet Workflow - OpenStreetMap Import Manifest Generator
//!
//! Builds the workflow manifests that drive a planet-wide OpenStreetMap
//! import: download one extract per region, import each into a spatial
//! database, then build indexes. A single-region template is expanded over
//! a list of regions and written out as one combined manifest plus one
//! standalone manifest per step.
//!
//! # Architecture
//!
//! - [`workflow`]: Data model, built-in template and region expansion
//! - [`manifest`]: Partitioning and JSON document writing
//! - [`generator`]: Orchestrates a complete generation run
//! - [`config`]: Run configuration and YAML loading
//!
//! # Example
//!
//! ```rust,no_run
//! use planet_workflow::config::GeneratorConfig;
//! use planet_workflow::manifest::FsStore;
//! use planet_workflow::Generator;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GeneratorConfig::default();
//!     let store = FsStore::create(&config.output_dir)?;
//!
//!     let report = Generator::new(config, store).run()?;
//!     println!("Wrote {} manifests", report.documents.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod workflow;

// Re-export commonly used types
pub use config::{load_config, GeneratorConfig};
pub use error::{Error, Result};
pub use generator::{GenerationReport, Generator};
pub use workflow::model::{Step, Task, Workflow};
pub use workflow::{expand, Template};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "planet-workflow";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_app_name() {
        assert_eq!(APP_NAME, "planet-workflow");
    }

    #[test]
    fn test_module_exports_step() {
        let step = Step::new("index").depends_on("import");
        assert_eq!(step.id, "index");
        assert_eq!(step.needs, vec!["import"]);
    }

    #[test]
    fn test_module_exports_expand() {
        let workflow = expand(&Template::default()).unwrap();
        assert_eq!(workflow.len(), 3);
    }
}
