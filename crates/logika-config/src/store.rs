//! Flat key→value settings snapshot.
//!
//! Host settings stores persist a flat string map rather than a nested
//! document. [`SettingsMap`] flattens the schema to dotted keys
//! (`general.background`, `smt2.timeout-ms`, ...) with string values and
//! rebuilds a typed [`VerificationConfig`] from them, rejecting unknown keys
//! and untypable values.
//!
//! # Example
//!
//! ```rust
//! use logika_config::{SettingsMap, VerificationConfig};
//!
//! let config = VerificationConfig::default();
//! let map = SettingsMap::from_config(&config);
//! assert_eq!(map.get("smt2.timeout-ms"), Some("2000"));
//!
//! let restored = map.to_config().unwrap();
//! assert_eq!(restored, config);
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::VerificationConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::sections::{format_env_vars, format_vm_args, parse_env_vars, parse_vm_args};

const GENERAL_HOME: &str = "general.home";
const GENERAL_VM_ARGS: &str = "general.vm-args";
const GENERAL_ENV_VARS: &str = "general.env-vars";
const GENERAL_BACKGROUND: &str = "general.background";
const GENERAL_IDLE_DELAY_MS: &str = "general.idle-delay-ms";
const GENERAL_PARALLEL_CORES: &str = "general.parallel-cores";
const GENERAL_CACHE_FILE_INPUT: &str = "general.cache-file-input";
const GENERAL_CACHE_TYPE_INFO: &str = "general.cache-type-info";
const GENERAL_LAUNCH_AT_STARTUP: &str = "general.launch-at-startup";
const GENERAL_LOGGING: &str = "general.logging";
const GENERAL_VERBOSE_LOGGING: &str = "general.verbose-logging";

const HINTS_ENABLED: &str = "hints.enabled";
const HINTS_UNICODE: &str = "hints.unicode";
const HINTS_MAX_COLUMN: &str = "hints.max-column";
const HINTS_LINES_FRESH: &str = "hints.lines-fresh";
const HINTS_AT_REWRITE: &str = "hints.at-rewrite";
const HINTS_DETAILED_INFO: &str = "hints.detailed-info";
const HINTS_COVERAGE: &str = "hints.coverage";
const HINTS_COVERAGE_INTENSITY: &str = "hints.coverage-intensity";

const VERIFIER_CHECK_SAT: &str = "verifier.check-sat";
const VERIFIER_SAT_TIMEOUT: &str = "verifier.sat-timeout";
const VERIFIER_TRANSITION_CACHE: &str = "verifier.transition-cache";
const VERIFIER_PATTERN_EXHAUSTIVE: &str = "verifier.pattern-exhaustive";
const VERIFIER_PURE_FUN: &str = "verifier.pure-fun";
const VERIFIER_INTERP_CONTRACTS: &str = "verifier.interp-contracts";
const VERIFIER_LOOP_BOUND: &str = "verifier.loop-bound";
const VERIFIER_CALL_BOUND: &str = "verifier.call-bound";
const VERIFIER_STRICT_PURE_MODE: &str = "verifier.strict-pure-mode";
const VERIFIER_SPLIT_CONDITIONALS: &str = "verifier.split-conditionals";
const VERIFIER_SPLIT_MATCH_CASES: &str = "verifier.split-match-cases";
const VERIFIER_SPLIT_CONTRACT_CASES: &str = "verifier.split-contract-cases";
const VERIFIER_INFO_FLOW: &str = "verifier.info-flow";
const VERIFIER_SCRIPT_MODE: &str = "verifier.script-mode";

const REWRITE_MAX: &str = "rewrite.max-rewrites";
const REWRITE_TRACE: &str = "rewrite.trace";
const REWRITE_EVAL_TRACE: &str = "rewrite.eval-trace";
const REWRITE_PARALLEL: &str = "rewrite.parallel";

const BRANCH_PAR_MODE: &str = "branch-par.mode";
const BRANCH_PAR_CORES: &str = "branch-par.cores";

const SMT2_BIT_WIDTH: &str = "smt2.bit-width";
const SMT2_FP_USE_REAL: &str = "smt2.fp-use-real";
const SMT2_FP_ROUNDING: &str = "smt2.fp-rounding";
const SMT2_CACHE_QUERIES: &str = "smt2.cache-queries";
const SMT2_SEQUENTIALIZE: &str = "smt2.sequentialize";
const SMT2_SIMPLIFY: &str = "smt2.simplify";
const SMT2_INSCRIBE_SUMMONINGS: &str = "smt2.inscribe-summonings";
const SMT2_RAW_INSCRIPTION: &str = "smt2.raw-inscription";
const SMT2_ELIDE_ENCODING: &str = "smt2.elide-encoding";
const SMT2_VALID_CONFIGS: &str = "smt2.valid-configs";
const SMT2_SAT_CONFIGS: &str = "smt2.sat-configs";
const SMT2_RLIMIT: &str = "smt2.rlimit";
const SMT2_TIMEOUT_MS: &str = "smt2.timeout-ms";
const SMT2_SEARCH_PATH_CONDITIONS: &str = "smt2.search-path-conditions";

/// A flat, ordered key→value snapshot of the settings schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsMap {
    entries: BTreeMap<String, String>,
}

impl SettingsMap {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a settings record into dotted keys with string values.
    ///
    /// `general.home` is omitted when unset; every other key is always
    /// present.
    pub fn from_config(config: &VerificationConfig) -> Self {
        let mut map = Self::new();

        if let Some(home) = &config.general.home {
            map.put(GENERAL_HOME, home.display().to_string());
        }
        map.put(GENERAL_VM_ARGS, format_vm_args(&config.general.vm_args));
        map.put(GENERAL_ENV_VARS, format_env_vars(&config.general.env_vars));
        map.put(GENERAL_BACKGROUND, config.general.background.as_str());
        map.put(GENERAL_IDLE_DELAY_MS, config.general.idle_delay_ms.to_string());
        map.put(GENERAL_PARALLEL_CORES, config.general.parallel_cores.to_string());
        map.put(GENERAL_CACHE_FILE_INPUT, config.general.cache_file_input.to_string());
        map.put(GENERAL_CACHE_TYPE_INFO, config.general.cache_type_info.to_string());
        map.put(GENERAL_LAUNCH_AT_STARTUP, config.general.launch_at_startup.to_string());
        map.put(GENERAL_LOGGING, config.general.logging.to_string());
        map.put(GENERAL_VERBOSE_LOGGING, config.general.verbose_logging.to_string());

        map.put(HINTS_ENABLED, config.hints.enabled.to_string());
        map.put(HINTS_UNICODE, config.hints.unicode.to_string());
        map.put(HINTS_MAX_COLUMN, config.hints.max_column.to_string());
        map.put(HINTS_LINES_FRESH, config.hints.lines_fresh.to_string());
        map.put(HINTS_AT_REWRITE, config.hints.at_rewrite.to_string());
        map.put(HINTS_DETAILED_INFO, config.hints.detailed_info.to_string());
        map.put(HINTS_COVERAGE, config.hints.coverage.to_string());
        map.put(HINTS_COVERAGE_INTENSITY, config.hints.coverage_intensity.to_string());

        map.put(VERIFIER_CHECK_SAT, config.verifier.check_sat.to_string());
        map.put(VERIFIER_SAT_TIMEOUT, config.verifier.sat_timeout.to_string());
        map.put(VERIFIER_TRANSITION_CACHE, config.verifier.transition_cache.to_string());
        map.put(VERIFIER_PATTERN_EXHAUSTIVE, config.verifier.pattern_exhaustive.to_string());
        map.put(VERIFIER_PURE_FUN, config.verifier.pure_fun.to_string());
        map.put(VERIFIER_INTERP_CONTRACTS, config.verifier.interp_contracts.to_string());
        map.put(VERIFIER_LOOP_BOUND, config.verifier.loop_bound.to_string());
        map.put(VERIFIER_CALL_BOUND, config.verifier.call_bound.to_string());
        map.put(VERIFIER_STRICT_PURE_MODE, config.verifier.strict_pure_mode.as_str());
        map.put(VERIFIER_SPLIT_CONDITIONALS, config.verifier.split_conditionals.to_string());
        map.put(VERIFIER_SPLIT_MATCH_CASES, config.verifier.split_match_cases.to_string());
        map.put(VERIFIER_SPLIT_CONTRACT_CASES, config.verifier.split_contract_cases.to_string());
        map.put(VERIFIER_INFO_FLOW, config.verifier.info_flow.to_string());
        map.put(VERIFIER_SCRIPT_MODE, config.verifier.script_mode.as_str());

        map.put(REWRITE_MAX, config.rewrite.max_rewrites.to_string());
        map.put(REWRITE_TRACE, config.rewrite.trace.to_string());
        map.put(REWRITE_EVAL_TRACE, config.rewrite.eval_trace.to_string());
        map.put(REWRITE_PARALLEL, config.rewrite.parallel.to_string());

        map.put(BRANCH_PAR_MODE, config.branch_par.mode.as_str());
        map.put(BRANCH_PAR_CORES, config.branch_par.cores.to_string());

        map.put(SMT2_BIT_WIDTH, config.smt2.bit_width.as_str());
        map.put(SMT2_FP_USE_REAL, config.smt2.fp_use_real.to_string());
        map.put(SMT2_FP_ROUNDING, config.smt2.fp_rounding.as_str());
        map.put(SMT2_CACHE_QUERIES, config.smt2.cache_queries.to_string());
        map.put(SMT2_SEQUENTIALIZE, config.smt2.sequentialize.to_string());
        map.put(SMT2_SIMPLIFY, config.smt2.simplify.to_string());
        map.put(SMT2_INSCRIBE_SUMMONINGS, config.smt2.inscribe_summonings.to_string());
        map.put(SMT2_RAW_INSCRIPTION, config.smt2.raw_inscription.to_string());
        map.put(SMT2_ELIDE_ENCODING, config.smt2.elide_encoding.to_string());
        map.put(SMT2_VALID_CONFIGS, config.smt2.valid_configs.join("\n"));
        map.put(SMT2_SAT_CONFIGS, config.smt2.sat_configs.join("\n"));
        map.put(SMT2_RLIMIT, config.smt2.rlimit.to_string());
        map.put(SMT2_TIMEOUT_MS, config.smt2.timeout_ms.to_string());
        map.put(SMT2_SEARCH_PATH_CONDITIONS, config.smt2.search_path_conditions.to_string());

        map
    }

    /// Rebuild a typed settings record from the snapshot.
    ///
    /// Missing keys keep their default value; unknown keys and untypable
    /// values are rejected. The result is parse-level only; callers commit
    /// it through [`VerificationConfig::validate`].
    pub fn to_config(&self) -> ConfigResult<VerificationConfig> {
        let mut entries = self.entries.clone();
        let mut config = VerificationConfig::default();

        if let Some(home) = entries.remove(GENERAL_HOME) {
            config.general.home = Some(PathBuf::from(home));
        }
        if let Some(args) = entries.remove(GENERAL_VM_ARGS) {
            config.general.vm_args = parse_vm_args(&args)?;
        }
        if let Some(vars) = entries.remove(GENERAL_ENV_VARS) {
            config.general.env_vars = parse_env_vars(&vars)?;
        }
        if let Some(v) = entries.remove(GENERAL_BACKGROUND) {
            config.general.background = v.parse()?;
        }
        if let Some(v) = entries.remove(GENERAL_IDLE_DELAY_MS) {
            config.general.idle_delay_ms = parse_num(GENERAL_IDLE_DELAY_MS, &v)?;
        }
        if let Some(v) = entries.remove(GENERAL_PARALLEL_CORES) {
            config.general.parallel_cores = parse_num(GENERAL_PARALLEL_CORES, &v)?;
        }
        if let Some(v) = entries.remove(GENERAL_CACHE_FILE_INPUT) {
            config.general.cache_file_input = parse_bool(GENERAL_CACHE_FILE_INPUT, &v)?;
        }
        if let Some(v) = entries.remove(GENERAL_CACHE_TYPE_INFO) {
            config.general.cache_type_info = parse_bool(GENERAL_CACHE_TYPE_INFO, &v)?;
        }
        if let Some(v) = entries.remove(GENERAL_LAUNCH_AT_STARTUP) {
            config.general.launch_at_startup = parse_bool(GENERAL_LAUNCH_AT_STARTUP, &v)?;
        }
        if let Some(v) = entries.remove(GENERAL_LOGGING) {
            config.general.logging = parse_bool(GENERAL_LOGGING, &v)?;
        }
        if let Some(v) = entries.remove(GENERAL_VERBOSE_LOGGING) {
            config.general.verbose_logging = parse_bool(GENERAL_VERBOSE_LOGGING, &v)?;
        }

        if let Some(v) = entries.remove(HINTS_ENABLED) {
            config.hints.enabled = parse_bool(HINTS_ENABLED, &v)?;
        }
        if let Some(v) = entries.remove(HINTS_UNICODE) {
            config.hints.unicode = parse_bool(HINTS_UNICODE, &v)?;
        }
        if let Some(v) = entries.remove(HINTS_MAX_COLUMN) {
            config.hints.max_column = parse_num(HINTS_MAX_COLUMN, &v)?;
        }
        if let Some(v) = entries.remove(HINTS_LINES_FRESH) {
            config.hints.lines_fresh = parse_bool(HINTS_LINES_FRESH, &v)?;
        }
        if let Some(v) = entries.remove(HINTS_AT_REWRITE) {
            config.hints.at_rewrite = parse_bool(HINTS_AT_REWRITE, &v)?;
        }
        if let Some(v) = entries.remove(HINTS_DETAILED_INFO) {
            config.hints.detailed_info = parse_bool(HINTS_DETAILED_INFO, &v)?;
        }
        if let Some(v) = entries.remove(HINTS_COVERAGE) {
            config.hints.coverage = parse_bool(HINTS_COVERAGE, &v)?;
        }
        if let Some(v) = entries.remove(HINTS_COVERAGE_INTENSITY) {
            config.hints.coverage_intensity = parse_num(HINTS_COVERAGE_INTENSITY, &v)?;
        }

        if let Some(v) = entries.remove(VERIFIER_CHECK_SAT) {
            config.verifier.check_sat = parse_bool(VERIFIER_CHECK_SAT, &v)?;
        }
        if let Some(v) = entries.remove(VERIFIER_SAT_TIMEOUT) {
            config.verifier.sat_timeout = parse_bool(VERIFIER_SAT_TIMEOUT, &v)?;
        }
        if let Some(v) = entries.remove(VERIFIER_TRANSITION_CACHE) {
            config.verifier.transition_cache = parse_bool(VERIFIER_TRANSITION_CACHE, &v)?;
        }
        if let Some(v) = entries.remove(VERIFIER_PATTERN_EXHAUSTIVE) {
            config.verifier.pattern_exhaustive = parse_bool(VERIFIER_PATTERN_EXHAUSTIVE, &v)?;
        }
        if let Some(v) = entries.remove(VERIFIER_PURE_FUN) {
            config.verifier.pure_fun = parse_bool(VERIFIER_PURE_FUN, &v)?;
        }
        if let Some(v) = entries.remove(VERIFIER_INTERP_CONTRACTS) {
            config.verifier.interp_contracts = parse_bool(VERIFIER_INTERP_CONTRACTS, &v)?;
        }
        if let Some(v) = entries.remove(VERIFIER_LOOP_BOUND) {
            config.verifier.loop_bound = parse_num(VERIFIER_LOOP_BOUND, &v)?;
        }
        if let Some(v) = entries.remove(VERIFIER_CALL_BOUND) {
            config.verifier.call_bound = parse_num(VERIFIER_CALL_BOUND, &v)?;
        }
        if let Some(v) = entries.remove(VERIFIER_STRICT_PURE_MODE) {
            config.verifier.strict_pure_mode = v.parse()?;
        }
        if let Some(v) = entries.remove(VERIFIER_SPLIT_CONDITIONALS) {
            config.verifier.split_conditionals = parse_bool(VERIFIER_SPLIT_CONDITIONALS, &v)?;
        }
        if let Some(v) = entries.remove(VERIFIER_SPLIT_MATCH_CASES) {
            config.verifier.split_match_cases = parse_bool(VERIFIER_SPLIT_MATCH_CASES, &v)?;
        }
        if let Some(v) = entries.remove(VERIFIER_SPLIT_CONTRACT_CASES) {
            config.verifier.split_contract_cases = parse_bool(VERIFIER_SPLIT_CONTRACT_CASES, &v)?;
        }
        if let Some(v) = entries.remove(VERIFIER_INFO_FLOW) {
            config.verifier.info_flow = parse_bool(VERIFIER_INFO_FLOW, &v)?;
        }
        if let Some(v) = entries.remove(VERIFIER_SCRIPT_MODE) {
            config.verifier.script_mode = v.parse()?;
        }

        if let Some(v) = entries.remove(REWRITE_MAX) {
            config.rewrite.max_rewrites = parse_num(REWRITE_MAX, &v)?;
        }
        if let Some(v) = entries.remove(REWRITE_TRACE) {
            config.rewrite.trace = parse_bool(REWRITE_TRACE, &v)?;
        }
        if let Some(v) = entries.remove(REWRITE_EVAL_TRACE) {
            config.rewrite.eval_trace = parse_bool(REWRITE_EVAL_TRACE, &v)?;
        }
        if let Some(v) = entries.remove(REWRITE_PARALLEL) {
            config.rewrite.parallel = parse_bool(REWRITE_PARALLEL, &v)?;
        }

        if let Some(v) = entries.remove(BRANCH_PAR_MODE) {
            config.branch_par.mode = v.parse()?;
        }
        if let Some(v) = entries.remove(BRANCH_PAR_CORES) {
            config.branch_par.cores = parse_num(BRANCH_PAR_CORES, &v)?;
        }

        if let Some(v) = entries.remove(SMT2_BIT_WIDTH) {
            config.smt2.bit_width = v.parse()?;
        }
        if let Some(v) = entries.remove(SMT2_FP_USE_REAL) {
            config.smt2.fp_use_real = parse_bool(SMT2_FP_USE_REAL, &v)?;
        }
        if let Some(v) = entries.remove(SMT2_FP_ROUNDING) {
            config.smt2.fp_rounding = v.parse()?;
        }
        if let Some(v) = entries.remove(SMT2_CACHE_QUERIES) {
            config.smt2.cache_queries = parse_bool(SMT2_CACHE_QUERIES, &v)?;
        }
        if let Some(v) = entries.remove(SMT2_SEQUENTIALIZE) {
            config.smt2.sequentialize = parse_bool(SMT2_SEQUENTIALIZE, &v)?;
        }
        if let Some(v) = entries.remove(SMT2_SIMPLIFY) {
            config.smt2.simplify = parse_bool(SMT2_SIMPLIFY, &v)?;
        }
        if let Some(v) = entries.remove(SMT2_INSCRIBE_SUMMONINGS) {
            config.smt2.inscribe_summonings = parse_bool(SMT2_INSCRIBE_SUMMONINGS, &v)?;
        }
        if let Some(v) = entries.remove(SMT2_RAW_INSCRIPTION) {
            config.smt2.raw_inscription = parse_bool(SMT2_RAW_INSCRIPTION, &v)?;
        }
        if let Some(v) = entries.remove(SMT2_ELIDE_ENCODING) {
            config.smt2.elide_encoding = parse_bool(SMT2_ELIDE_ENCODING, &v)?;
        }
        if let Some(v) = entries.remove(SMT2_VALID_CONFIGS) {
            config.smt2.valid_configs = parse_lines(&v);
        }
        if let Some(v) = entries.remove(SMT2_SAT_CONFIGS) {
            config.smt2.sat_configs = parse_lines(&v);
        }
        if let Some(v) = entries.remove(SMT2_RLIMIT) {
            config.smt2.rlimit = parse_num(SMT2_RLIMIT, &v)?;
        }
        if let Some(v) = entries.remove(SMT2_TIMEOUT_MS) {
            config.smt2.timeout_ms = parse_num(SMT2_TIMEOUT_MS, &v)?;
        }
        if let Some(v) = entries.remove(SMT2_SEARCH_PATH_CONDITIONS) {
            config.smt2.search_path_conditions = parse_bool(SMT2_SEARCH_PATH_CONDITIONS, &v)?;
        }

        if let Some(key) = entries.into_keys().next() {
            return Err(ConfigError::UnknownKey { key });
        }

        Ok(config)
    }

    /// Insert or replace an entry.
    pub fn put<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up an entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for SettingsMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn parse_bool(field: &'static str, value: &str) -> ConfigResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ConfigError::invalid_value(field, other)),
    }
}

fn parse_num<T: FromStr>(field: &'static str, value: &str) -> ConfigResult<T> {
    value
        .parse()
        .map_err(|_| ConfigError::invalid_value(field, value))
}

fn parse_lines(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
