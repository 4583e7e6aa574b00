//! Rewrite engine settings.

use serde::{Deserialize, Serialize};

/// Settings for the term rewriting engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RewriteConfig {
    /// Maximum number of rewrites per obligation.
    pub max_rewrites: u32,

    /// Record a trace of applied rewrites.
    pub trace: bool,

    /// Record a trace of rewrite evaluations.
    pub eval_trace: bool,

    /// Run rewriting in parallel.
    pub parallel: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            max_rewrites: 100,
            trace: true,
            eval_trace: true,
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RewriteConfig::default();
        assert_eq!(config.max_rewrites, 100);
        assert!(config.trace);
        assert!(config.eval_trace);
        assert!(config.parallel);
    }
}
