//! Per-concern configuration sections of the verification settings schema.

pub mod general;
pub mod hints;
pub mod parallel;
pub mod rewrite;
pub mod smt2;
pub mod verifier;

pub use general::*;
pub use hints::*;
pub use parallel::*;
pub use rewrite::*;
pub use smt2::*;
pub use verifier::*;
