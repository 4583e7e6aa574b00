//! The top-level verification settings record.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::sections::{
    BranchParConfig, GeneralConfig, HintConfig, RewriteConfig, Smt2Config, VerifierConfig,
};

/// A settings section that can be reset to its defaults independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigSection {
    /// Platform settings.
    General,
    /// Editor feedback settings.
    Hints,
    /// Verification engine settings.
    Verifier,
    /// Rewrite engine settings.
    Rewrite,
    /// Branch parallelization settings.
    BranchPar,
    /// SMT2 solver settings, including the solver configuration lines.
    Smt2,
}

/// The complete, validated settings record consumed by the verification
/// engine at the start of a run.
///
/// Mutual exclusivity of each mode group (background trigger, branch
/// parallelization, bit-width, rounding mode, strict-pure treatment) is
/// structural: every group is an enum field holding exactly one variant.
///
/// # Example
///
/// ```rust
/// use logika_config::VerificationConfig;
///
/// let mut config = VerificationConfig::default();
/// config.smt2.timeout_ms = 150;
/// assert!(config.validate().is_err());
///
/// config.smt2.timeout_ms = 200;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct VerificationConfig {
    /// Platform settings.
    pub general: GeneralConfig,

    /// Editor feedback settings.
    pub hints: HintConfig,

    /// Verification engine settings.
    pub verifier: VerifierConfig,

    /// Rewrite engine settings.
    pub rewrite: RewriteConfig,

    /// Branch parallelization settings.
    pub branch_par: BranchParConfig,

    /// SMT2 solver settings.
    pub smt2: Smt2Config,
}

impl VerificationConfig {
    /// Create a settings record with the documented defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every field against its documented constraint.
    ///
    /// All violations are collected so a settings boundary can surface them
    /// at once; nothing should be persisted unless this returns `Ok`.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        self.general.validate_into(&mut errors);
        self.hints.validate_into(&mut errors);
        self.verifier.validate_into(&mut errors);
        self.branch_par.validate_into(&mut errors);
        self.smt2.validate_into(&mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding all violations into a single [`ConfigError`].
    pub fn validated(self) -> ConfigResult<Self> {
        match self.validate() {
            Ok(()) => Ok(self),
            Err(errors) => Err(ConfigError::Validation(errors)),
        }
    }

    /// Reset one section to its documented defaults; idempotent.
    pub fn restore_defaults(&mut self, section: ConfigSection) {
        match section {
            ConfigSection::General => self.general = GeneralConfig::default(),
            ConfigSection::Hints => self.hints = HintConfig::default(),
            ConfigSection::Verifier => self.verifier = VerifierConfig::default(),
            ConfigSection::Rewrite => self.rewrite = RewriteConfig::default(),
            ConfigSection::BranchPar => self.branch_par = BranchParConfig::default(),
            ConfigSection::Smt2 => self.smt2 = Smt2Config::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::BackgroundMode;

    #[test]
    fn default_config_validates() {
        assert!(VerificationConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_collects_all_violations() {
        let mut config = VerificationConfig::default();
        config.smt2.timeout_ms = 100;
        config.verifier.loop_bound = 0;
        config.general.vm_args = vec!["bad".to_string()];

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn restore_defaults_resets_only_the_section() {
        let mut config = VerificationConfig::default();
        config.general.background = BackgroundMode::Disabled;
        config.smt2.timeout_ms = 5000;

        config.restore_defaults(ConfigSection::General);
        assert_eq!(config.general, crate::sections::GeneralConfig::default());
        assert_eq!(config.smt2.timeout_ms, 5000);

        config.restore_defaults(ConfigSection::Smt2);
        assert_eq!(config.smt2, crate::sections::Smt2Config::default());
    }

    #[test]
    fn restore_defaults_is_idempotent() {
        let mut config = VerificationConfig::default();
        config.smt2.valid_configs = vec!["z3".to_string()];

        config.restore_defaults(ConfigSection::Smt2);
        let once = config.clone();
        config.restore_defaults(ConfigSection::Smt2);
        assert_eq!(config, once);
    }

    #[test]
    fn validated_folds_errors() {
        let mut config = VerificationConfig::default();
        config.smt2.timeout_ms = 0;
        let err = config.validated().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
    }
}
