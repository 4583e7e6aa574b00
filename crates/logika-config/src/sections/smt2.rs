//! SMT2 solver settings: bit-width and floating-point encoding, query
//! handling, solver configuration lines, and resource limits.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Solvers a configuration line may name.
pub const KNOWN_SOLVERS: &[&str] = &["alt-ergo", "cvc4", "cvc5", "z3"];

/// Default validity-check solver configuration lines.
pub const DEFAULT_VALID_CONFIGS: &[&str] = &[
    "cvc4,--full-saturate-quant",
    "cvc5,--enable-induction,--full-saturate-quant",
    "z3",
];

/// Default satisfiability-check solver configuration lines.
pub const DEFAULT_SAT_CONFIGS: &[&str] = &["z3"];

/// Minimum solver timeout in milliseconds.
pub const MIN_TIMEOUT_MS: u32 = 200;

/// Default bit-width for integer encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BitWidth {
    /// Arbitrary-precision integers.
    #[default]
    #[serde(rename = "unbounded")]
    Unbounded,
    /// 8-bit bit-vectors.
    #[serde(rename = "8")]
    Bits8,
    /// 16-bit bit-vectors.
    #[serde(rename = "16")]
    Bits16,
    /// 32-bit bit-vectors.
    #[serde(rename = "32")]
    Bits32,
    /// 64-bit bit-vectors.
    #[serde(rename = "64")]
    Bits64,
}

impl BitWidth {
    /// Width in bits, or `None` for unbounded encoding.
    pub fn bits(&self) -> Option<u8> {
        match self {
            Self::Unbounded => None,
            Self::Bits8 => Some(8),
            Self::Bits16 => Some(16),
            Self::Bits32 => Some(32),
            Self::Bits64 => Some(64),
        }
    }

    /// Stable string form, as stored in flat settings snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unbounded => "unbounded",
            Self::Bits8 => "8",
            Self::Bits16 => "16",
            Self::Bits32 => "32",
            Self::Bits64 => "64",
        }
    }
}

impl std::str::FromStr for BitWidth {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "unbounded" => Ok(Self::Unbounded),
            "8" => Ok(Self::Bits8),
            "16" => Ok(Self::Bits16),
            "32" => Ok(Self::Bits32),
            "64" => Ok(Self::Bits64),
            other => Err(ConfigError::invalid_value("smt2.bit-width", other)),
        }
    }
}

/// IEEE 754 rounding mode for floating-point encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum FpRoundingMode {
    /// Round to nearest, ties to even.
    #[default]
    Rne,
    /// Round to nearest, ties away from zero.
    Rna,
    /// Round toward positive.
    Rtp,
    /// Round toward negative.
    Rtn,
    /// Round toward zero.
    Rtz,
}

impl FpRoundingMode {
    /// Stable string form, as stored in flat settings snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rne => "RNE",
            Self::Rna => "RNA",
            Self::Rtp => "RTP",
            Self::Rtn => "RTN",
            Self::Rtz => "RTZ",
        }
    }
}

impl std::str::FromStr for FpRoundingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "RNE" => Ok(Self::Rne),
            "RNA" => Ok(Self::Rna),
            "RTP" => Ok(Self::Rtp),
            "RTN" => Ok(Self::Rtn),
            "RTZ" => Ok(Self::Rtz),
            other => Err(ConfigError::invalid_value("smt2.fp-rounding", other)),
        }
    }
}

/// SMT2 solver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Smt2Config {
    /// Default bit-width for integer encoding.
    pub bit_width: BitWidth,

    /// Encode floating-point values as reals.
    pub fp_use_real: bool,

    /// Rounding mode for floating-point encoding.
    pub fp_rounding: FpRoundingMode,

    /// Cache solver queries.
    pub cache_queries: bool,

    /// Disable solver call parallelization.
    pub sequentialize: bool,

    /// Simplify queries before dispatching them.
    pub simplify: bool,

    /// Expose incantations used in summonings.
    pub inscribe_summonings: bool,

    /// Inscribe summonings without post-processing.
    pub raw_inscription: bool,

    /// Elide encoding details from inscriptions.
    pub elide_encoding: bool,

    /// Solver configuration lines for validity checks, in dispatch order.
    pub valid_configs: Vec<String>,

    /// Solver configuration lines for satisfiability checks, in dispatch
    /// order.
    pub sat_configs: Vec<String>,

    /// Solver resource limit (solver-specific unit).
    pub rlimit: u64,

    /// Solver timeout in milliseconds (>= 200).
    pub timeout_ms: u32,

    /// Search path conditions before calling solvers.
    pub search_path_conditions: bool,
}

impl Default for Smt2Config {
    fn default() -> Self {
        Self {
            bit_width: BitWidth::default(),
            fp_use_real: false,
            fp_rounding: FpRoundingMode::default(),
            cache_queries: true,
            sequentialize: false,
            simplify: false,
            inscribe_summonings: true,
            raw_inscription: false,
            elide_encoding: false,
            valid_configs: default_valid_configs(),
            sat_configs: default_sat_configs(),
            rlimit: 2_000_000,
            timeout_ms: 2000,
            search_path_conditions: false,
        }
    }
}

/// The documented default validity-check configuration lines.
pub fn default_valid_configs() -> Vec<String> {
    DEFAULT_VALID_CONFIGS.iter().map(|s| s.to_string()).collect()
}

/// The documented default satisfiability-check configuration lines.
pub fn default_sat_configs() -> Vec<String> {
    DEFAULT_SAT_CONFIGS.iter().map(|s| s.to_string()).collect()
}

impl Smt2Config {
    /// Reset the validity-check solver configuration lines to the defaults.
    pub fn restore_default_valid_configs(&mut self) {
        self.valid_configs = default_valid_configs();
    }

    /// Reset the satisfiability-check solver configuration lines to the
    /// defaults.
    pub fn restore_default_sat_configs(&mut self) {
        self.sat_configs = default_sat_configs();
    }

    /// Validate every field, appending one error per violation.
    pub fn validate_into(&self, errors: &mut Vec<ConfigError>) {
        if self.timeout_ms < MIN_TIMEOUT_MS {
            errors.push(ConfigError::BelowMinimum {
                field: "smt2.timeout-ms",
                min: MIN_TIMEOUT_MS as u64,
                value: self.timeout_ms as u64,
            });
        }
        validate_solver_configs("smt2.valid-configs", &self.valid_configs, errors);
        validate_solver_configs("smt2.sat-configs", &self.sat_configs, errors);
    }
}

/// Check that every configuration line names a known solver.
///
/// A line is `solver[,option...]`; only the solver name is checked here,
/// options are passed to the solver verbatim.
fn validate_solver_configs(field: &'static str, configs: &[String], errors: &mut Vec<ConfigError>) {
    for line in configs {
        let solver = line.split(',').next().unwrap_or("").trim();
        if !KNOWN_SOLVERS.contains(&solver) {
            errors.push(ConfigError::UnknownSolver {
                field,
                solver: solver.to_string(),
            });
        }
    }
}
