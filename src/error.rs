//! Error types for manifest generation.
//!
//! Every error is fatal to a generation run; components propagate them
//! unchanged to the top-level caller.

use thiserror::Error;

/// Result type alias for planet-workflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Manifest generation errors.
#[derive(Error, Debug)]
pub enum Error {
    /// The prototype workflow violates a structural invariant.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// The document store rejected a write.
    #[error("Failed to write manifest '{name}': {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Shorthand for building an [`Error::InvalidTemplate`].
    pub fn invalid_template(message: impl Into<String>) -> Self {
        Self::InvalidTemplate(message.into())
    }

    /// Short machine-readable code, used in CLI diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTemplate(_) => "INVALID_TEMPLATE",
            Self::Write { .. } => "WRITE_FAILED",
            Self::Serialize(_) => "SERIALIZE_FAILED",
            Self::Config(_) | Self::Yaml(_) => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_template_display() {
        let err = Error::invalid_template("missing step 'import'");
        assert_eq!(err.to_string(), "Invalid template: missing step 'import'");
        assert_eq!(err.code(), "INVALID_TEMPLATE");
    }

    #[test]
    fn test_write_error_display() {
        let err = Error::Write {
            name: "planet-workflow.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("planet-workflow.json"));
        assert!(err.to_string().contains("denied"));
        assert_eq!(err.code(), "WRITE_FAILED");
    }

    #[test]
    fn test_yaml_error_converts() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: [a list").unwrap_err();
        let err: Error = yaml_err.into();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}
