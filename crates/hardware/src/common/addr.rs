//! Physical register addresses.
//!
//! Accelerator registers live in the processor's physical address space. This module provides:
//! 1. **Type Safety:** A `PhysAddr` newtype so register addresses are not confused with offsets or data words.
//! 2. **Address Arithmetic:** Offsetting a block base by a register offset.
//! 3. **Alignment:** Word-alignment checks used by configuration validation.

use std::fmt;

/// A physical address on the processor's memory-mapped I/O bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Returns the address `offset` bytes above this one, wrapping at the top of the
    /// 64-bit space.
    ///
    /// # Arguments
    ///
    /// * `offset` - Byte offset to add.
    #[inline(always)]
    #[must_use]
    pub const fn offset(self, offset: u64) -> Self {
        Self(self.0.wrapping_add(offset))
    }

    /// Returns `true` if the address is aligned to a 32-bit word.
    pub const fn is_word_aligned(&self) -> bool {
        self.0 & 0x3 == 0
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
