//! Simulated interconnect for accelerator register access.
//!
//! This module implements the bus that routes physical register accesses to devices. It provides:
//! 1. **Device registration:** Devices are added by address range and sorted for lookup.
//! 2. **Access routing:** 32-bit read/write by address with a last-device hint for throughput.
//! 3. **Transport:** The bus is a [`RegisterTransport`], so a coprocessor can drive it exactly
//!    as it drives real registers.

use tracing::warn;

use super::traits::Device;
use crate::common::PhysAddr;
use crate::transport::RegisterTransport;

/// Simulated system bus; routes accesses to devices by physical address.
pub struct Bus {
    /// Registered devices, sorted by base address.
    devices: Vec<Box<dyn Device>>,
    last_device_idx: usize,
    /// Accesses that no device claimed.
    unclaimed: u64,
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for dev in &self.devices {
            let (base, size) = dev.address_range();
            let _ = list.entry(&format_args!("{} @ {:#x}+{:#x}", dev.name(), base, size));
        }
        list.finish()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    /// Creates an empty bus; add devices with `add_device`.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            last_device_idx: 0,
            unclaimed: 0,
        }
    }

    /// Registers a device on the bus; devices are sorted by base address for lookup.
    ///
    /// # Arguments
    ///
    /// * `dev` - The device to add.
    pub fn add_device(&mut self, dev: Box<dyn Device>) {
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.last_device_idx = 0;
    }

    /// Names of the registered devices in address order.
    pub fn device_names(&self) -> Vec<&str> {
        self.devices.iter().map(|d| d.name()).collect()
    }

    /// Returns whether the given physical address is claimed by any device.
    pub fn is_valid_address(&self, paddr: u64) -> bool {
        self.devices.iter().any(|dev| {
            let (start, size) = dev.address_range();
            paddr >= start && paddr - start < size
        })
    }

    /// Number of accesses that fell outside every device.
    pub const fn unclaimed_accesses(&self) -> u64 {
        self.unclaimed
    }

    fn find_device(&mut self, paddr: u64) -> Option<(&mut Box<dyn Device>, u64)> {
        if self.last_device_idx < self.devices.len() {
            let (start, size) = self.devices[self.last_device_idx].address_range();
            if paddr >= start && paddr - start < size {
                return Some((&mut self.devices[self.last_device_idx], paddr - start));
            }
        }

        for (i, dev) in self.devices.iter_mut().enumerate() {
            let (start, size) = dev.address_range();
            if paddr >= start && paddr - start < size {
                self.last_device_idx = i;
                return Some((dev, paddr - start));
            }
        }
        None
    }

    /// Reads four bytes at the given physical address; returns 0 if no device claims it.
    pub fn read_u32(&mut self, paddr: u64) -> u32 {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.read_u32(offset)
        } else {
            self.unclaimed += 1;
            warn!("bus: read from unclaimed address {:#x}", paddr);
            0
        }
    }

    /// Writes four bytes at the given physical address; no-op if no device claims it.
    pub fn write_u32(&mut self, paddr: u64, val: u32) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u32(offset, val);
        } else {
            self.unclaimed += 1;
            warn!("bus: write of {:#010x} to unclaimed address {:#x}", val, paddr);
        }
    }
}

impl RegisterTransport for Bus {
    #[inline]
    fn write32(&mut self, addr: PhysAddr, value: u32) {
        self.write_u32(addr.val(), value);
    }

    #[inline]
    fn read32(&mut self, addr: PhysAddr) -> u32 {
        self.read_u32(addr.val())
    }
}
