//! Core verifier settings: satisfiability checking, caching, proof search
//! splitting, and interprocedural bounds.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// How @strictpure methods are treated during verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrictPureMode {
    /// Follow the active compositional/interprocedural mode.
    #[default]
    Default,
    /// Treat @strictpure methods as uninterpreted proof functions.
    Uninterpreted,
    /// Flip between compositional and interprocedural treatment.
    Flip,
}

impl StrictPureMode {
    /// Stable string form, as stored in flat settings snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Uninterpreted => "uninterpreted",
            Self::Flip => "flip",
        }
    }
}

impl std::str::FromStr for StrictPureMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "default" => Ok(Self::Default),
            "uninterpreted" => Ok(Self::Uninterpreted),
            "flip" => Ok(Self::Flip),
            other => Err(ConfigError::invalid_value("verifier.strict-pure-mode", other)),
        }
    }
}

/// How script verification requests are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScriptMode {
    /// Verify scripts automatically.
    #[default]
    Auto,
    /// Verify scripts only on request.
    Manual,
}

impl ScriptMode {
    /// Stable string form, as stored in flat settings snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

impl std::str::FromStr for ScriptMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            other => Err(ConfigError::invalid_value("verifier.script-mode", other)),
        }
    }
}

/// Verification engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct VerifierConfig {
    /// Check satisfiability of facts and contracts.
    pub check_sat: bool,

    /// Apply the solver timeout to satisfiability checks as well.
    pub sat_timeout: bool,

    /// Cache symbolic execution state transitions.
    pub transition_cache: bool,

    /// Check pattern match exhaustiveness.
    pub pattern_exhaustive: bool,

    /// Always add proof functions for pure methods.
    pub pure_fun: bool,

    /// Use method contracts in interprocedural verification.
    pub interp_contracts: bool,

    /// Loop unrolling bound for interprocedural verification.
    pub loop_bound: u32,

    /// Recursive call bound for interprocedural verification.
    pub call_bound: u32,

    /// Treatment of @strictpure methods.
    pub strict_pure_mode: StrictPureMode,

    /// Split verification on conditionals.
    pub split_conditionals: bool,

    /// Split verification on match cases.
    pub split_match_cases: bool,

    /// Split verification on contract cases.
    pub split_contract_cases: bool,

    /// Additionally verify information flow contracts.
    pub info_flow: bool,

    /// Script verification dispatch mode.
    pub script_mode: ScriptMode,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            check_sat: false,
            sat_timeout: false,
            transition_cache: true,
            pattern_exhaustive: true,
            pure_fun: false,
            interp_contracts: false,
            loop_bound: 3,
            call_bound: 3,
            strict_pure_mode: StrictPureMode::default(),
            split_conditionals: false,
            split_match_cases: false,
            split_contract_cases: false,
            info_flow: false,
            script_mode: ScriptMode::default(),
        }
    }
}

impl VerifierConfig {
    /// Validate every field, appending one error per violation.
    pub fn validate_into(&self, errors: &mut Vec<ConfigError>) {
        if self.loop_bound < 1 {
            errors.push(ConfigError::BelowMinimum {
                field: "verifier.loop-bound",
                min: 1,
                value: self.loop_bound as u64,
            });
        }
        if self.call_bound < 1 {
            errors.push(ConfigError::BelowMinimum {
                field: "verifier.call-bound",
                min: 1,
                value: self.call_bound as u64,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn defaults_are_valid() {
        let config = VerifierConfig::default();
        let mut errors = Vec::new();
        config.validate_into(&mut errors);
        assert!(errors.is_empty());
        assert!(config.transition_cache);
        assert!(config.pattern_exhaustive);
        assert_eq!(config.loop_bound, 3);
        assert_eq!(config.call_bound, 3);
    }

    #[test]
    fn bounds_must_be_positive() {
        let config = VerifierConfig {
            loop_bound: 0,
            call_bound: 0,
            ..Default::default()
        };
        let mut errors = Vec::new();
        config.validate_into(&mut errors);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| matches!(e, ConfigError::BelowMinimum { min: 1, .. })));
    }

    #[test]
    fn strict_pure_mode_round_trips() {
        for mode in [
            StrictPureMode::Default,
            StrictPureMode::Uninterpreted,
            StrictPureMode::Flip,
        ] {
            assert_eq!(StrictPureMode::from_str(mode.as_str()).unwrap(), mode);
        }
        assert!(StrictPureMode::from_str("interpreted").is_err());
    }

    #[test]
    fn script_mode_round_trips() {
        for mode in [ScriptMode::Auto, ScriptMode::Manual] {
            assert_eq!(ScriptMode::from_str(mode.as_str()).unwrap(), mode);
        }
    }
}
