//! Generator Configuration
//!
//! Settings for a generation run: which regions to cover, where manifests
//! go and how they are named. Every field has a default, so an empty YAML
//! document is a valid configuration.
//!
//! # Example YAML Format
//!
//! ```yaml
//! regions:
//!   - europe
//!   - asia
//! output_dir: manifests
//! prefix: planet
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::workflow::template::DEFAULT_REGIONS;

/// Default manifest name prefix.
pub const DEFAULT_PREFIX: &str = "planet";

fn default_regions() -> Vec<String> {
    DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Regions to expand the template over, in output order
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,

    /// Directory manifests are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Prefix of every manifest name (`<prefix>-workflow.json`, ...)
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            output_dir: default_output_dir(),
            prefix: default_prefix(),
        }
    }
}

impl GeneratorConfig {
    /// Name of the combined manifest.
    pub fn workflow_manifest_name(&self) -> String {
        format!("{}-workflow.json", self.prefix)
    }

    /// Name of the standalone manifest for one step.
    pub fn step_manifest_name(&self, step_id: &str) -> String {
        format!("{}-{}.json", self.prefix, step_id)
    }

    /// Checks the configuration for values that would produce broken or
    /// colliding manifests.
    pub fn validate(&self) -> Result<()> {
        let prefix = self.prefix.trim();
        if prefix.is_empty() {
            return Err(Error::Config("prefix must not be empty".to_string()));
        }
        if prefix.contains(|c: char| c == '/' || c == '\\') {
            return Err(Error::Config(format!(
                "prefix '{}' must not contain path separators",
                self.prefix
            )));
        }

        let mut seen = HashSet::new();
        for region in &self.regions {
            if region.trim().is_empty() {
                return Err(Error::Config("region names must not be empty".to_string()));
            }
            if !seen.insert(region.as_str()) {
                return Err(Error::Config(format!("duplicate region '{}'", region)));
            }
        }

        debug!("Configuration valid: {} regions", self.regions.len());
        Ok(())
    }
}

/// Loads and validates a configuration from a YAML file.
pub fn load_config(path: impl AsRef<Path>) -> Result<GeneratorConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {}", path.display());

    let yaml_content = fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read configuration file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config: GeneratorConfig = serde_yaml::from_str(&yaml_content)?;
    config.validate()?;

    info!(
        "Configuration loaded: {} regions, output to {}",
        config.regions.len(),
        config.output_dir.display()
    );
    Ok(config)
}
