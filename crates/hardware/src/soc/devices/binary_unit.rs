//! Simulated binary floating-point unit (adder, multiplier, divider).
//!
//! Models the AXI-Lite accelerator as a combinational function of its latched operands.
//!
//! # Memory Map
//!
//! * `0x00`: A (read/write, latched operand)
//! * `0x04`: B (read/write, latched operand)
//! * `0x08`: O (read only, `A op B` in single precision)

use crate::common::{decode, encode};
use crate::soc::devices::Device;
use crate::units::{BLOCK_SPAN, BinaryOp, Register};

/// Simulated add, multiply or divide unit.
#[derive(Debug)]
pub struct FloatBinaryUnit {
    /// Base physical address of the device.
    base_addr: u64,
    op: BinaryOp,
    a: u32,
    b: u32,
}

impl FloatBinaryUnit {
    /// Creates a unit performing `op` at `base_addr` with both operands zero.
    pub const fn new(base_addr: u64, op: BinaryOp) -> Self {
        Self {
            base_addr,
            op,
            a: 0,
            b: 0,
        }
    }

    fn output(&self) -> u32 {
        encode(self.op.apply(decode(self.a), decode(self.b)))
    }
}

impl Device for FloatBinaryUnit {
    fn name(&self) -> &str {
        match self.op {
            BinaryOp::Add => "FloatAdder",
            BinaryOp::Multiply => "FloatMultiplier",
            BinaryOp::Divide => "FloatDivider",
        }
    }

    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, BLOCK_SPAN)
    }

    fn read_u32(&mut self, offset: u64) -> u32 {
        match Register::from_offset(offset) {
            Some(Register::A) => self.a,
            Some(Register::B) => self.b,
            Some(Register::O) => self.output(),
            None => 0,
        }
    }

    /// Latches A or B; writes to O and reserved slots are ignored.
    fn write_u32(&mut self, offset: u64, val: u32) {
        match Register::from_offset(offset) {
            Some(Register::A) => self.a = val,
            Some(Register::B) => self.b = val,
            Some(Register::O) | None => {}
        }
    }
}
