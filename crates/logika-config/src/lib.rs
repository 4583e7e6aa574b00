//! # Logika Configuration Library
//!
//! The validated settings schema for the Logika verification tool: every
//! user-adjustable option with its type, default, and constraint, decoupled
//! from any presentation layer. The verification engine consumes a fully
//! validated [`VerificationConfig`] snapshot at the start of each run.
//!
//! ## Features
//!
//! - Typed sections per concern (platform, hints, verifier, rewriting,
//!   branch parallelization, SMT2 solvers)
//! - Field-level validation that collects every violation
//! - Multi-format file persistence (TOML, JSON, optional YAML)
//! - Flat key→value snapshots for host settings stores
//! - Migration from the legacy flat layout
//!
//! ## Quick Start
//!
//! ```rust
//! use logika_config::{ConfigSection, VerificationConfig};
//!
//! let mut config = VerificationConfig::default();
//! config.smt2.timeout_ms = 1000;
//! config.validate().expect("all fields valid");
//!
//! config.restore_defaults(ConfigSection::Smt2);
//! assert_eq!(config.smt2.timeout_ms, 2000);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod loader;
mod migration;
mod sections;
mod store;

// Include test_utils when test-utils feature is enabled
#[cfg(feature = "test-utils")]
mod test_utils;

pub use config::*;
pub use error::*;
pub use loader::*;
pub use migration::*;
pub use sections::*;
pub use store::*;

// Export test utilities when feature is enabled
#[cfg(feature = "test-utils")]
pub use test_utils::*;
