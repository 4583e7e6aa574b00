//! Migration from the legacy flat settings layout.
//!
//! Earlier releases persisted a boolean background toggle and per-solver
//! option strings (`cvc.valid-opts`, `z3.sat-opts`, ...) instead of the
//! tri-state background mode and ordered solver configuration lines used
//! today. [`migrate_legacy`] upgrades such a snapshot to the current schema,
//! collecting notes and warnings along the way.

use std::collections::BTreeMap;

use tracing::info;

use crate::config::VerificationConfig;
use crate::sections::{BackgroundMode, ScriptMode};

/// Outcome of a legacy settings migration.
#[derive(Debug, Clone)]
pub struct MigrationReport {
    /// Keys that were migrated, with a note on how.
    pub info: Vec<String>,

    /// Legacy keys that were dropped or could not be interpreted.
    pub warnings: Vec<String>,

    /// The upgraded settings record.
    pub config: VerificationConfig,
}

impl MigrationReport {
    fn new() -> Self {
        Self {
            info: Vec::new(),
            warnings: Vec::new(),
            config: VerificationConfig::default(),
        }
    }

    /// Whether every legacy key was interpreted.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn note(&mut self, key: &str, how: &str) {
        self.info.push(format!("'{}': {}", key, how));
    }

    fn warn(&mut self, key: &str, value: &str) {
        self.warnings
            .push(format!("could not interpret legacy key '{}' = {:?}", key, value));
    }
}

/// Upgrade a legacy flat snapshot to the current schema.
///
/// Unknown keys and unparseable values become warnings; the corresponding
/// fields keep their defaults so a partially corrupt legacy store still
/// yields a usable configuration.
pub fn migrate_legacy(legacy: &BTreeMap<String, String>) -> MigrationReport {
    let mut report = MigrationReport::new();
    let mut cvc_valid_opts = None;
    let mut cvc_sat_opts = None;
    let mut z3_valid_opts = None;
    let mut z3_sat_opts = None;

    for (key, value) in legacy {
        match key.as_str() {
            "background" => match value.as_str() {
                "true" => {
                    report.config.general.background = BackgroundMode::Idle;
                    report.note(key, "mapped to background mode 'idle'");
                }
                "false" => {
                    report.config.general.background = BackgroundMode::Disabled;
                    report.note(key, "mapped to background mode 'disabled'");
                }
                other => report.warn(key, other),
            },
            "idle" => match value.parse() {
                Ok(ms) => {
                    report.config.general.idle_delay_ms = ms;
                    report.note(key, "kept as idle delay");
                }
                Err(_) => report.warn(key, value),
            },
            "par" => match value.parse() {
                Ok(cores) => {
                    report.config.general.parallel_cores = cores;
                    report.note(key, "kept as parallel cores");
                }
                Err(_) => report.warn(key, value),
            },
            "timeout" => match value.parse() {
                Ok(ms) => {
                    report.config.smt2.timeout_ms = ms;
                    report.note(key, "kept as solver timeout");
                }
                Err(_) => report.warn(key, value),
            },
            "check-sat" => match value.parse() {
                Ok(flag) => {
                    report.config.verifier.check_sat = flag;
                    report.note(key, "kept");
                }
                Err(_) => report.warn(key, value),
            },
            "auto" => match value.parse() {
                Ok(true) => {
                    report.config.verifier.script_mode = ScriptMode::Auto;
                    report.note(key, "mapped to script mode 'auto'");
                }
                Ok(false) => {
                    report.config.verifier.script_mode = ScriptMode::Manual;
                    report.note(key, "mapped to script mode 'manual'");
                }
                Err(_) => report.warn(key, value),
            },
            "hint" => match value.parse() {
                Ok(flag) => {
                    report.config.hints.enabled = flag;
                    report.note(key, "kept");
                }
                Err(_) => report.warn(key, value),
            },
            "hint-unicode" => match value.parse() {
                Ok(flag) => {
                    report.config.hints.unicode = flag;
                    report.note(key, "kept");
                }
                Err(_) => report.warn(key, value),
            },
            "inscribe-summonings" => match value.parse() {
                Ok(flag) => {
                    report.config.smt2.inscribe_summonings = flag;
                    report.note(key, "kept");
                }
                Err(_) => report.warn(key, value),
            },
            "bits" => match value.parse() {
                Ok(width) => {
                    report.config.smt2.bit_width = width;
                    report.note(key, "kept as bit-width");
                }
                Err(_) => report.warn(key, value),
            },
            "use-real" => match value.parse() {
                Ok(flag) => {
                    report.config.smt2.fp_use_real = flag;
                    report.note(key, "kept");
                }
                Err(_) => report.warn(key, value),
            },
            "fp-rounding" => match value.parse() {
                Ok(mode) => {
                    report.config.smt2.fp_rounding = mode;
                    report.note(key, "kept as rounding mode");
                }
                Err(_) => report.warn(key, value),
            },
            "cvc.rlimit" => match value.parse() {
                Ok(rlimit) => {
                    report.config.smt2.rlimit = rlimit;
                    report.note(key, "promoted to shared solver resource limit");
                }
                Err(_) => report.warn(key, value),
            },
            "cvc.valid-opts" => cvc_valid_opts = Some(value.clone()),
            "cvc.sat-opts" => cvc_sat_opts = Some(value.clone()),
            "z3.valid-opts" => z3_valid_opts = Some(value.clone()),
            "z3.sat-opts" => z3_sat_opts = Some(value.clone()),
            _ => report
                .warnings
                .push(format!("dropped unknown legacy key '{}'", key)),
        }
    }

    if cvc_valid_opts.is_some() || z3_valid_opts.is_some() {
        report.config.smt2.valid_configs = solver_lines(&cvc_valid_opts, &z3_valid_opts);
        report
            .info
            .push("combined per-solver validity options into 'smt2.valid-configs'".to_string());
    }
    if cvc_sat_opts.is_some() || z3_sat_opts.is_some() {
        report.config.smt2.sat_configs = solver_lines(&cvc_sat_opts, &z3_sat_opts);
        report
            .info
            .push("combined per-solver satisfiability options into 'smt2.sat-configs'".to_string());
    }

    info!(
        migrated = report.info.len(),
        warnings = report.warnings.len(),
        "migrated legacy settings"
    );
    report
}

/// Build solver configuration lines from the legacy per-solver option
/// strings. Legacy options were space-separated; lines use commas.
fn solver_lines(cvc_opts: &Option<String>, z3_opts: &Option<String>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(opts) = cvc_opts {
        lines.push(solver_line("cvc4", opts));
    }
    if let Some(opts) = z3_opts {
        lines.push(solver_line("z3", opts));
    }
    lines
}

fn solver_line(solver: &str, opts: &str) -> String {
    let opts: Vec<&str> = opts.split_whitespace().collect();
    if opts.is_empty() {
        solver.to_string()
    } else {
        format!("{},{}", solver, opts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::{BitWidth, ScriptMode};

    fn legacy(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn boolean_background_becomes_mode() {
        let report = migrate_legacy(&legacy(&[("background", "false")]));
        assert_eq!(report.config.general.background, BackgroundMode::Disabled);
        assert!(report.is_clean());

        let report = migrate_legacy(&legacy(&[("background", "true")]));
        assert_eq!(report.config.general.background, BackgroundMode::Idle);
    }

    #[test]
    fn per_solver_options_become_config_lines() {
        let report = migrate_legacy(&legacy(&[
            ("cvc.valid-opts", "--full-saturate-quant"),
            ("z3.valid-opts", ""),
            ("z3.sat-opts", "-smt2 -in"),
        ]));
        assert_eq!(
            report.config.smt2.valid_configs,
            vec!["cvc4,--full-saturate-quant", "z3"]
        );
        assert_eq!(report.config.smt2.sat_configs, vec!["z3,-smt2,-in"]);
        assert!(report.is_clean());
    }

    #[test]
    fn scalar_settings_carry_over() {
        let report = migrate_legacy(&legacy(&[
            ("idle", "2500"),
            ("timeout", "3000"),
            ("bits", "32"),
            ("auto", "false"),
            ("cvc.rlimit", "1000000"),
        ]));
        assert_eq!(report.config.general.idle_delay_ms, 2500);
        assert_eq!(report.config.smt2.timeout_ms, 3000);
        assert_eq!(report.config.smt2.bit_width, BitWidth::Bits32);
        assert_eq!(report.config.verifier.script_mode, ScriptMode::Manual);
        assert_eq!(report.config.smt2.rlimit, 1_000_000);
    }

    #[test]
    fn unknown_and_bad_values_become_warnings() {
        let report = migrate_legacy(&legacy(&[
            ("devmode", "true"),
            ("idle", "soon"),
        ]));
        assert_eq!(report.warnings.len(), 2);
        assert!(!report.is_clean());
        // unparseable idle keeps the default
        assert_eq!(report.config.general.idle_delay_ms, 1500);
    }

    #[test]
    fn untouched_sections_keep_defaults() {
        let report = migrate_legacy(&legacy(&[("background", "true")]));
        assert_eq!(report.config.rewrite, Default::default());
        assert_eq!(report.config.branch_par, Default::default());
    }
}
