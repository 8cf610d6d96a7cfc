//! Register transport.
//!
//! The lowest layer of the driver: raw 32-bit loads and stores at physical addresses.
//! 1. **Contract:** `write32` stores a word, `read32` returns the word the device presents.
//! 2. **Ordering:** Accesses happen exactly once, in program order, with no caching or buffering.
//! 3. **Backends:** Identity-mapped volatile access (`Mmio`), Linux `/dev/mem` windows
//!    (`DevMem`), and the simulated interconnect ([`Bus`](crate::soc::interconnect::Bus)).
//!
//! There is no failure model at this layer. Devices are assumed present and always ready.

use crate::common::PhysAddr;

/// Identity-mapped volatile register access for bare-metal firmware.
pub mod mmio;

/// `/dev/mem` backed register windows for Linux userspace.
#[cfg(unix)]
pub mod devmem;

pub use mmio::Mmio;

#[cfg(unix)]
pub use devmem::DevMem;

/// Strictly ordered 32-bit register access.
///
/// Both methods take `&mut self`: reading a register may change device state (the random
/// unit advances on every read of its output), and exclusive access is what keeps one
/// request's write-then-read sequence from interleaving with another's.
pub trait RegisterTransport {
    /// Stores `value` at `addr`.
    fn write32(&mut self, addr: PhysAddr, value: u32);

    /// Loads the 32-bit word the device presents at `addr`.
    fn read32(&mut self, addr: PhysAddr) -> u32;
}

impl<T: RegisterTransport + ?Sized> RegisterTransport for &mut T {
    #[inline(always)]
    fn write32(&mut self, addr: PhysAddr, value: u32) {
        (**self).write32(addr, value);
    }

    #[inline(always)]
    fn read32(&mut self, addr: PhysAddr) -> u32 {
        (**self).read32(addr)
    }
}

impl<T: RegisterTransport + ?Sized> RegisterTransport for Box<T> {
    #[inline(always)]
    fn write32(&mut self, addr: PhysAddr, value: u32) {
        (**self).write32(addr, value);
    }

    #[inline(always)]
    fn read32(&mut self, addr: PhysAddr) -> u32 {
        (**self).read32(addr)
    }
}
