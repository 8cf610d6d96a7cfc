//! Simulated floating-point square-root unit.
//!
//! # Memory Map
//!
//! * `0x00`: A (read/write, latched operand)
//! * `0x04`: unused, reads as zero
//! * `0x08`: O (read only, `sqrt(A)`)

use crate::common::{decode, encode};
use crate::soc::devices::Device;
use crate::units::{BLOCK_SPAN, Register};

/// Simulated square-root unit.
#[derive(Debug)]
pub struct FloatSqrtUnit {
    /// Base physical address of the device.
    base_addr: u64,
    a: u32,
}

impl FloatSqrtUnit {
    /// Creates a unit at `base_addr` with a zero operand.
    pub const fn new(base_addr: u64) -> Self {
        Self { base_addr, a: 0 }
    }
}

impl Device for FloatSqrtUnit {
    fn name(&self) -> &str {
        "FloatSqrt"
    }

    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, BLOCK_SPAN)
    }

    fn read_u32(&mut self, offset: u64) -> u32 {
        match Register::from_offset(offset) {
            Some(Register::A) => self.a,
            Some(Register::O) => encode(decode(self.a).sqrt()),
            Some(Register::B) | None => 0,
        }
    }

    fn write_u32(&mut self, offset: u64, val: u32) {
        if Register::from_offset(offset) == Some(Register::A) {
            self.a = val;
        }
    }
}
