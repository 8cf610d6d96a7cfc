//! Identity-mapped volatile register access.
//!
//! On bare-metal firmware the accelerator registers are visible at their physical
//! addresses, so a register access is a single volatile load or store through a raw
//! pointer. Volatile accesses are never elided, merged or reordered with respect to each
//! other, which gives the strict program-order contract the accelerators rely on.

use std::ptr;

use super::RegisterTransport;
use crate::common::PhysAddr;

/// Volatile access to identity-mapped device registers.
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Creates a transport that dereferences physical addresses directly.
    ///
    /// # Safety
    ///
    /// Every address later passed to [`RegisterTransport::write32`] or
    /// [`RegisterTransport::read32`] must be a 4-byte-aligned device register that is
    /// mapped at its physical address for the lifetime of this value, with no other code
    /// accessing the same registers concurrently.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterTransport for Mmio {
    #[inline(always)]
    fn write32(&mut self, addr: PhysAddr, value: u32) {
        // SAFETY: `Mmio::new` requires every address to be an aligned, mapped register.
        unsafe { ptr::write_volatile(addr.val() as usize as *mut u32, value) }
    }

    #[inline(always)]
    fn read32(&mut self, addr: PhysAddr) -> u32 {
        // SAFETY: `Mmio::new` requires every address to be an aligned, mapped register.
        unsafe { ptr::read_volatile(addr.val() as usize as *const u32) }
    }
}
