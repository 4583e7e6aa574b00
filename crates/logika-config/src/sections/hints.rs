//! Editor feedback settings: programming logic hints and coverage
//! highlighting.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Coverage intensity is an alpha channel value.
const MAX_COVERAGE_INTENSITY: u32 = 255;

/// Feedback surfaced in the editor while verification runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HintConfig {
    /// Generate programming logic hints (statement pre/post claims).
    pub enabled: bool,

    /// Render hints with Unicode operators instead of ASCII.
    pub unicode: bool,

    /// Maximum column when laying out hint text.
    pub max_column: u32,

    /// Display At(...) line and fresh-variable hints.
    pub lines_fresh: bool,

    /// Rewrite At(...) claims as Input(...)/Old(...).
    pub at_rewrite: bool,

    /// Include detailed justification explanations.
    pub detailed_info: bool,

    /// Highlight verification coverage in the editor.
    pub coverage: bool,

    /// Coverage highlight transparency (0..=255).
    pub coverage_intensity: u32,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            unicode: true,
            max_column: 100,
            lines_fresh: false,
            at_rewrite: true,
            detailed_info: true,
            coverage: true,
            coverage_intensity: 20,
        }
    }
}

impl HintConfig {
    /// Validate every field, appending one error per violation.
    pub fn validate_into(&self, errors: &mut Vec<ConfigError>) {
        if self.coverage_intensity > MAX_COVERAGE_INTENSITY {
            errors.push(ConfigError::AboveMaximum {
                field: "hints.coverage-intensity",
                max: MAX_COVERAGE_INTENSITY as u64,
                value: self.coverage_intensity as u64,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = HintConfig::default();
        let mut errors = Vec::new();
        config.validate_into(&mut errors);
        assert!(errors.is_empty());
        assert!(config.enabled);
        assert!(config.unicode);
        assert_eq!(config.max_column, 100);
    }

    #[test]
    fn coverage_intensity_is_an_alpha_value() {
        let config = HintConfig {
            coverage_intensity: 256,
            ..Default::default()
        };
        let mut errors = Vec::new();
        config.validate_into(&mut errors);
        assert!(matches!(
            errors[0],
            ConfigError::AboveMaximum {
                field: "hints.coverage-intensity",
                max: 255,
                value: 256,
            }
        ));
    }
}
