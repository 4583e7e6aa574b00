//! Test utilities for settings testing.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::config::VerificationConfig;
use crate::error::ConfigResult;
use crate::sections::{BackgroundMode, BranchParMode};

/// Builder for assembling test settings records concisely.
pub struct TestConfigBuilder {
    config: VerificationConfig,
}

impl TestConfigBuilder {
    /// Start from the documented defaults.
    pub fn new() -> Self {
        Self {
            config: VerificationConfig::default(),
        }
    }

    /// Set the background analysis mode.
    pub fn background(mut self, mode: BackgroundMode) -> Self {
        self.config.general.background = mode;
        self
    }

    /// Set the solver timeout in milliseconds.
    pub fn timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.config.smt2.timeout_ms = timeout_ms;
        self
    }

    /// Set the branch parallelization mode and core count.
    pub fn branch_par(mut self, mode: BranchParMode, cores: usize) -> Self {
        self.config.branch_par.mode = mode;
        self.config.branch_par.cores = cores;
        self
    }

    /// Replace the solver configuration lines.
    pub fn solver_configs(mut self, valid: &[&str], sat: &[&str]) -> Self {
        self.config.smt2.valid_configs = valid.iter().map(|s| s.to_string()).collect();
        self.config.smt2.sat_configs = sat.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Enable logging, optionally verbose.
    pub fn logging(mut self, verbose: bool) -> Self {
        self.config.general.logging = true;
        self.config.general.verbose_logging = verbose;
        self
    }

    /// Finish and return the settings record.
    pub fn build(self) -> VerificationConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a settings record to a temporary TOML file for loader tests.
///
/// The file is deleted when the returned handle is dropped.
pub fn temp_settings_file(config: &VerificationConfig) -> ConfigResult<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("logika-settings-")
        .suffix(".toml")
        .tempfile()?;
    let contents = toml::to_string_pretty(config)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
