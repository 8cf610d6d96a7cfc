//! Hardware diagnostics.
//!
//! 1. **Self-test:** Hardware versus host results for every configured unit.
//! 2. **Histogram:** Distribution capture for the random unit.

/// Random distribution capture.
pub mod histogram;

/// Hardware versus host comparison.
pub mod selftest;

pub use histogram::Histogram;
pub use selftest::{Finding, SelfTestReport, UnitReport};
