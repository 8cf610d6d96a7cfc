//! Simulated coprocessor.
//!
//! This module organises the software model of the programmable-logic side: the bus,
//! the simulated accelerators, and the builder that assembles them from configuration.

/// System builder for assembling the simulated accelerators.
pub mod builder;

/// Simulated accelerator devices.
pub mod devices;

/// Simulated bus interconnect and routing.
pub mod interconnect;

/// Device trait definition for MMIO access.
pub mod traits;

pub use builder::System;
pub use interconnect::Bus;
