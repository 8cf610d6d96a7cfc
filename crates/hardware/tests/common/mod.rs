//! Shared test infrastructure.

/// Simulated coprocessor construction and tracing setup.
pub mod harness;

/// Mock and recording register transports.
pub mod mocks;
