//! Branch parallelization settings.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// When independent branches are verified concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BranchParMode {
    /// Verify branches sequentially.
    Disabled,
    /// Parallelize only when all branches return.
    WhenAllReturn,
    /// Parallelize all branches.
    #[default]
    All,
}

impl BranchParMode {
    /// Stable string form, as stored in flat settings snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::WhenAllReturn => "when-all-return",
            Self::All => "all",
        }
    }
}

impl std::str::FromStr for BranchParMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "disabled" => Ok(Self::Disabled),
            "when-all-return" => Ok(Self::WhenAllReturn),
            "all" => Ok(Self::All),
            other => Err(ConfigError::invalid_value("branch-par.mode", other)),
        }
    }
}

/// Branch parallelization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BranchParConfig {
    /// Parallelization mode.
    pub mode: BranchParMode,

    /// Worker cores for branch verification (1..=host CPU count).
    pub cores: usize,
}

impl Default for BranchParConfig {
    fn default() -> Self {
        Self {
            mode: BranchParMode::default(),
            cores: num_cpus::get().max(1),
        }
    }
}

impl BranchParConfig {
    /// Validate every field, appending one error per violation.
    pub fn validate_into(&self, errors: &mut Vec<ConfigError>) {
        let max_cores = num_cpus::get().max(1);
        if self.cores < 1 {
            errors.push(ConfigError::BelowMinimum {
                field: "branch-par.cores",
                min: 1,
                value: self.cores as u64,
            });
        } else if self.cores > max_cores {
            errors.push(ConfigError::AboveMaximum {
                field: "branch-par.cores",
                max: max_cores as u64,
                value: self.cores as u64,
            });
        }
    }
}
