//! Error types for the coprocessor driver.
//!
//! The arithmetic path itself is infallible: accelerators are always-ready combinational
//! peripherals and whatever bit pattern they return is passed through. Errors only arise
//! from the environment around it:
//! 1. **Configuration:** a unit the operation needs is not present, or the memory map is invalid.
//! 2. **Loading:** the configuration file cannot be read or parsed.
//! 3. **Mapping:** `/dev/mem` windows cannot be opened or mapped.

use thiserror::Error;

use super::addr::PhysAddr;
use crate::units::UnitKind;

/// Errors raised while assembling or driving the coprocessor.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration provides no base address for this accelerator kind.
    #[error("no {0} unit is configured")]
    UnitUnavailable(UnitKind),

    /// The configuration is syntactically valid but describes an impossible memory map.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file is not valid JSON for [`Config`](crate::Config).
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Reading a configuration file or opening a device node failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Mapping the register window at `addr` through `/dev/mem` failed.
    #[error("failed to map register window at {addr}: {source}")]
    DevMem {
        /// Page-aligned base of the window that could not be mapped.
        addr: PhysAddr,
        /// Underlying OS error.
        source: std::io::Error,
    },
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
