//! Memory-mapped floating-point coprocessor library.
//!
//! This crate drives a set of single-precision accelerators reached through 32-bit
//! registers, with the following:
//! 1. **Transport:** Volatile register access, either raw pointers or a `/dev/mem` mapping.
//! 2. **Units:** Register layout and one-request clients for add, multiply, divide,
//!    square root and random sampling.
//! 3. **Estimators:** Leibniz series and Monte-Carlo circle-area estimates of π.
//! 4. **SoC:** A simulated coprocessor (bus and devices) for running without hardware.
//! 5. **Diagnostics:** Hardware versus host self-test and random distribution capture.

/// Common types (addresses, float codec, errors).
pub mod common;
/// Coprocessor configuration (memory map, estimator sizes, simulation settings).
pub mod config;
/// Self-test and random distribution diagnostics.
pub mod diag;
/// π estimators.
pub mod pi;
/// Simulated coprocessor (builder, bus, devices, traits).
pub mod soc;
/// Request counting and reporting.
pub mod stats;
/// Register transports.
pub mod transport;
/// Register layout, unit clients and the coprocessor handle.
pub mod units;

pub use crate::common::{Error, Result};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
pub use crate::pi::Estimate;
/// Simulated coprocessor; construct with `System::new`.
pub use crate::soc::System;
pub use crate::units::Coprocessor;
