//! Platform-level settings: installation directory, process environment,
//! background analysis scheduling, and front-end caching.

use std::collections::BTreeMap;
use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

lazy_static! {
    static ref ENV_NAME_RE: Regex =
        Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("env name pattern");
}

/// When background analysis runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    /// Never analyze in the background.
    Disabled,
    /// Re-analyze when a file is saved.
    Save,
    /// Re-analyze after the editor has been idle.
    #[default]
    Idle,
}

impl BackgroundMode {
    /// Stable string form, as stored in flat settings snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Save => "save",
            Self::Idle => "idle",
        }
    }
}

impl std::str::FromStr for BackgroundMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "disabled" => Ok(Self::Disabled),
            "save" => Ok(Self::Save),
            "idle" => Ok(Self::Idle),
            other => Err(ConfigError::invalid_value("general.background", other)),
        }
    }
}

/// Platform settings shared by every analysis kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneralConfig {
    /// Installation directory; must exist when set.
    pub home: Option<PathBuf>,

    /// JVM argument tokens; each starts with `-`.
    pub vm_args: Vec<String>,

    /// Extra environment for spawned tool processes.
    pub env_vars: BTreeMap<String, String>,

    /// Background analysis trigger.
    pub background: BackgroundMode,

    /// Idle delay in milliseconds; only used when `background` is `Idle`.
    pub idle_delay_ms: u32,

    /// Worker cores for background analysis (1..=host CPU count).
    pub parallel_cores: usize,

    /// Cache file contents between runs.
    pub cache_file_input: bool,

    /// Cache resolved type information between runs.
    pub cache_type_info: bool,

    /// Start the tool process when the host application starts.
    pub launch_at_startup: bool,

    /// Write a tool log.
    pub logging: bool,

    /// Verbose log output; requires `logging`.
    pub verbose_logging: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            home: None,
            vm_args: Vec::new(),
            env_vars: BTreeMap::new(),
            background: BackgroundMode::default(),
            idle_delay_ms: 1500,
            parallel_cores: num_cpus::get().max(1),
            cache_file_input: true,
            cache_type_info: true,
            launch_at_startup: false,
            logging: false,
            verbose_logging: false,
        }
    }
}

impl GeneralConfig {
    /// Validate every field, appending one error per violation.
    pub fn validate_into(&self, errors: &mut Vec<ConfigError>) {
        if let Some(home) = &self.home {
            if !home.is_dir() {
                errors.push(ConfigError::InvalidHome { path: home.clone() });
            }
        }
        for token in &self.vm_args {
            if !token.starts_with('-') {
                errors.push(ConfigError::MalformedVmArg {
                    token: token.clone(),
                });
            }
        }
        for name in self.env_vars.keys() {
            if !ENV_NAME_RE.is_match(name) {
                errors.push(ConfigError::MalformedEnvVar {
                    line: name.clone(),
                });
            }
        }
        let max_cores = num_cpus::get().max(1);
        if self.parallel_cores < 1 {
            errors.push(ConfigError::BelowMinimum {
                field: "general.parallel-cores",
                min: 1,
                value: self.parallel_cores as u64,
            });
        } else if self.parallel_cores > max_cores {
            errors.push(ConfigError::AboveMaximum {
                field: "general.parallel-cores",
                max: max_cores as u64,
                value: self.parallel_cores as u64,
            });
        }
        if self.verbose_logging && !self.logging {
            errors.push(ConfigError::MissingPrerequisite {
                field: "general.verbose-logging",
                requires: "general.logging",
            });
        }
    }
}

/// Parse a space-separated VM argument string into tokens.
///
/// Every token must start with `-`; blank input yields an empty list.
///
/// # Example
///
/// ```rust
/// let args = logika_config::parse_vm_args("-Xss4m -Xmx2g").unwrap();
/// assert_eq!(args, vec!["-Xss4m", "-Xmx2g"]);
/// assert!(logika_config::parse_vm_args("Xmx2g").is_err());
/// ```
pub fn parse_vm_args(text: &str) -> ConfigResult<Vec<String>> {
    let mut args = Vec::new();
    for token in text.split_whitespace() {
        if !token.starts_with('-') {
            return Err(ConfigError::MalformedVmArg {
                token: token.to_string(),
            });
        }
        args.push(token.to_string());
    }
    Ok(args)
}

/// Join VM argument tokens back into the space-separated editor form.
pub fn format_vm_args(args: &[String]) -> String {
    args.join(" ")
}

/// Parse `NAME = value` lines into an environment map.
///
/// Blank lines are skipped. Names must match `[a-zA-Z_][a-zA-Z0-9_]*`;
/// values are taken verbatim after trimming.
pub fn parse_env_vars(text: &str) -> ConfigResult<BTreeMap<String, String>> {
    let mut vars = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((name, value)) = line.split_once('=') else {
            return Err(ConfigError::MalformedEnvVar {
                line: line.to_string(),
            });
        };
        let name = name.trim();
        if !ENV_NAME_RE.is_match(name) {
            return Err(ConfigError::MalformedEnvVar {
                line: line.to_string(),
            });
        }
        vars.insert(name.to_string(), value.trim().to_string());
    }
    Ok(vars)
}

/// Format an environment map back into `NAME = value` lines.
pub fn format_env_vars(vars: &BTreeMap<String, String>) -> String {
    vars.iter()
        .map(|(name, value)| format!("{} = {}", name, value))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let config = GeneralConfig::default();
        let mut errors = Vec::new();
        config.validate_into(&mut errors);
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        assert_eq!(config.background, BackgroundMode::Idle);
        assert_eq!(config.idle_delay_ms, 1500);
        assert!(config.cache_file_input);
        assert!(config.cache_type_info);
    }

    #[test]
    fn vm_args_must_start_with_dash() {
        assert_eq!(
            parse_vm_args("-Xss4m  -ea").unwrap(),
            vec!["-Xss4m", "-ea"]
        );
        assert!(parse_vm_args("").unwrap().is_empty());
        assert!(matches!(
            parse_vm_args("-Xss4m Xmx2g"),
            Err(ConfigError::MalformedVmArg { token }) if token == "Xmx2g"
        ));
    }

    #[test]
    fn env_vars_reject_bad_names() {
        let vars = parse_env_vars("PATH_EXTRA = /opt/bin\n\nSIREUM_CACHE=off").unwrap();
        assert_eq!(vars["PATH_EXTRA"], "/opt/bin");
        assert_eq!(vars["SIREUM_CACHE"], "off");

        assert!(parse_env_vars("1BAD = x").is_err());
        assert!(parse_env_vars("NO-DASHES = x").is_err());
        assert!(parse_env_vars("MISSING_EQUALS").is_err());
    }

    #[test]
    fn env_vars_format_one_per_line() {
        let mut vars = BTreeMap::new();
        vars.insert("A".to_string(), "1".to_string());
        vars.insert("B_2".to_string(), "two".to_string());
        assert_eq!(format_env_vars(&vars), "A = 1\nB_2 = two");
        assert_eq!(parse_env_vars(&format_env_vars(&vars)).unwrap(), vars);
    }

    #[test]
    fn home_must_be_a_directory() {
        let temp = TempDir::new().expect("temp dir");
        let mut config = GeneralConfig {
            home: Some(temp.path().to_path_buf()),
            ..Default::default()
        };
        let mut errors = Vec::new();
        config.validate_into(&mut errors);
        assert!(errors.is_empty());

        config.home = Some(temp.path().join("does-not-exist"));
        config.validate_into(&mut errors);
        assert!(matches!(errors[0], ConfigError::InvalidHome { .. }));
    }

    #[test]
    fn cores_are_bounded_by_host() {
        let mut config = GeneralConfig {
            parallel_cores: num_cpus::get() + 1,
            ..Default::default()
        };
        let mut errors = Vec::new();
        config.validate_into(&mut errors);
        assert!(matches!(errors[0], ConfigError::AboveMaximum { .. }));

        config.parallel_cores = 0;
        errors.clear();
        config.validate_into(&mut errors);
        assert!(matches!(errors[0], ConfigError::BelowMinimum { .. }));
    }

    #[test]
    fn verbose_requires_logging() {
        let config = GeneralConfig {
            verbose_logging: true,
            ..Default::default()
        };
        let mut errors = Vec::new();
        config.validate_into(&mut errors);
        assert!(matches!(
            errors[0],
            ConfigError::MissingPrerequisite {
                field: "general.verbose-logging",
                ..
            }
        ));
    }
}
