//! Test harness for the rounded-square pad add-in.
//!
//! Provides scenario builders that drive the real host dispatch path and
//! verification oracles that return pass/fail verdicts instead of panicking,
//! so one run reports every broken invariant of a placed profile.
//!
//! # Key Components
//!
//! - [`helpers`]: scenario builders (via dispatch or the builder directly)
//! - [`oracle`]: verification functions returning pass/fail verdicts

pub mod helpers;
pub mod oracle;

pub use helpers::{HarnessError, PadScenario};
pub use oracle::OracleVerdict;
