//! Simulated accelerator devices.
//!
//! Software stand-ins for the programmable-logic accelerators. They compute with host
//! single-precision arithmetic, which makes them the ideal reference units for exercising
//! the driver and estimators without hardware.

/// Adder, multiplier and divider.
pub mod binary_unit;

/// Uniform random source.
pub mod random_unit;

/// Square root.
pub mod sqrt_unit;

pub use binary_unit::FloatBinaryUnit;
pub use random_unit::FloatRandomUnit;
pub use sqrt_unit::FloatSqrtUnit;

pub use crate::soc::traits::Device;
