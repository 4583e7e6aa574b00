//! Error types for settings parsing, validation, and persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while parsing, validating, or persisting settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Integer field below its documented lower bound.
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        /// Settings key of the offending field.
        field: &'static str,
        /// Lower bound (inclusive).
        min: u64,
        /// Value that was supplied.
        value: u64,
    },

    /// Integer field above its documented upper bound.
    #[error("{field} must be at most {max}, got {value}")]
    AboveMaximum {
        /// Settings key of the offending field.
        field: &'static str,
        /// Upper bound (inclusive).
        max: u64,
        /// Value that was supplied.
        value: u64,
    },

    /// Environment variable line that is not `NAME = value` with a name
    /// matching `[a-zA-Z_][a-zA-Z0-9_]*`.
    #[error("malformed environment variable line: {line:?}")]
    MalformedEnvVar {
        /// The offending line.
        line: String,
    },

    /// VM argument token that does not start with a dash.
    #[error("VM argument {token:?} must start with '-'")]
    MalformedVmArg {
        /// The offending token.
        token: String,
    },

    /// Installation directory that does not exist or is not a directory.
    #[error("not a valid installation directory: {}", path.display())]
    InvalidHome {
        /// The rejected path.
        path: PathBuf,
    },

    /// Solver configuration line naming an unknown solver.
    #[error("unknown solver in {field}: {solver:?}")]
    UnknownSolver {
        /// Settings key of the offending field.
        field: &'static str,
        /// The unrecognized solver name.
        solver: String,
    },

    /// A flag that is only meaningful when another flag is enabled.
    #[error("{field} requires {requires} to be enabled")]
    MissingPrerequisite {
        /// Settings key of the dependent flag.
        field: &'static str,
        /// Settings key of the prerequisite flag.
        requires: &'static str,
    },

    /// Key in a flat settings snapshot that does not map to any field.
    #[error("unknown settings key: {key}")]
    UnknownKey {
        /// The unrecognized key.
        key: String,
    },

    /// Value that cannot be parsed into the field's type.
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue {
        /// Settings key of the offending field.
        field: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// Settings file with an extension no parser is registered for.
    #[error("unsupported settings format: {}", path.display())]
    UnsupportedFormat {
        /// Path of the rejected file.
        path: PathBuf,
    },

    /// One or more fields failed validation; nothing was committed.
    #[error("settings failed validation with {} error(s)", .0.len())]
    Validation(Vec<ConfigError>),

    /// I/O error while reading or writing a settings file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization error.
    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create an invalid-value error for a flat settings key.
    pub fn invalid_value<F: Into<String>, V: Into<String>>(field: F, value: V) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Check whether the error is a field-level validation failure, as
    /// opposed to an I/O or format problem.
    pub fn is_field_error(&self) -> bool {
        matches!(
            self,
            Self::BelowMinimum { .. }
                | Self::AboveMaximum { .. }
                | Self::MalformedEnvVar { .. }
                | Self::MalformedVmArg { .. }
                | Self::InvalidHome { .. }
                | Self::UnknownSolver { .. }
                | Self::MissingPrerequisite { .. }
                | Self::InvalidValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_are_classified() {
        let err = ConfigError::BelowMinimum {
            field: "smt2.timeout-ms",
            min: 200,
            value: 100,
        };
        assert!(err.is_field_error());

        let err = ConfigError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert!(!err.is_field_error());
    }

    #[test]
    fn validation_error_reports_count() {
        let err = ConfigError::Validation(vec![
            ConfigError::MalformedVmArg {
                token: "Xmx4g".to_string(),
            },
            ConfigError::BelowMinimum {
                field: "smt2.timeout-ms",
                min: 200,
                value: 0,
            },
        ]);
        assert_eq!(err.to_string(), "settings failed validation with 2 error(s)");
    }
}
