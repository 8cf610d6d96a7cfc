//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by every simulated accelerator. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Access:** 32-bit read/write at device-relative offsets, the only width the accelerators decode.
//!
//! All implementors must be `Send + Sync` so a simulated coprocessor can be moved to a worker thread.

/// Trait for memory-mapped devices attached to the simulated bus.
pub trait Device: Send + Sync {
    /// Returns a short name for this device (e.g., `"FloatAdder"`).
    fn name(&self) -> &str;
    /// Returns (base_address, size_in_bytes) for this device's register window.
    fn address_range(&self) -> (u64, u64);
    /// Reads the 32-bit register at the given device-relative offset.
    fn read_u32(&mut self, offset: u64) -> u32;
    /// Writes the 32-bit register at the given device-relative offset.
    fn write_u32(&mut self, offset: u64, val: u32);
}
