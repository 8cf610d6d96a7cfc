//! `/dev/mem` register windows.
//!
//! When the driver runs as a Linux process on the processing system rather than as
//! bare-metal firmware, accelerator registers are reached by mapping the physical pages
//! that contain them through `/dev/mem`. This module:
//! 1. **Maps:** One shared, uncached page window per distinct accelerator page (`O_SYNC`).
//! 2. **Translates:** Physical register addresses to pointers inside the owning window.
//! 3. **Accesses:** Volatile 32-bit loads and stores, exactly as the identity-mapped backend.
//!
//! Windows are unmapped when the `DevMem` is dropped.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;
use std::ptr;

use tracing::{debug, error};

use super::RegisterTransport;
use crate::common::{Error, PhysAddr, Result};
use crate::units::{AddressBlock, BLOCK_SPAN};

/// Default device node for physical memory.
pub const DEV_MEM_PATH: &str = "/dev/mem";

/// One mapped run of physical pages.
struct Window {
    /// Page-aligned physical base of the mapping.
    base: u64,
    /// Mapping length in bytes (a whole number of pages).
    len: usize,
    /// Start of the mapping in this process.
    ptr: *mut u8,
}

impl Window {
    fn contains(&self, addr: u64, width: u64) -> bool {
        addr >= self.base && addr - self.base <= (self.len as u64).saturating_sub(width)
    }
}

/// Register access through `/dev/mem` page mappings.
pub struct DevMem {
    windows: Vec<Window>,
    file: File,
}

impl std::fmt::Debug for DevMem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for w in &self.windows {
            let _ = list.entry(&format_args!("{:#x}+{:#x} @ {:p}", w.base, w.len, w.ptr));
        }
        list.finish()
    }
}

// SAFETY: DevMem exclusively owns its mappings. The pointers stay valid until Drop and
// carry no thread affinity; all access goes through `&mut self`.
unsafe impl Send for DevMem {}

impl DevMem {
    /// Maps the pages holding each accelerator block in `bases` through `/dev/mem`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the device node cannot be opened and [`Error::DevMem`]
    /// if a window cannot be mapped.
    pub fn open(bases: impl IntoIterator<Item = PhysAddr>) -> Result<Self> {
        Self::open_path(DEV_MEM_PATH, bases)
    }

    /// Like [`DevMem::open`] but maps from an arbitrary device node (e.g. a UIO node).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if `path` cannot be opened and [`Error::DevMem`] if a window
    /// cannot be mapped.
    pub fn open_path(path: impl AsRef<Path>, bases: impl IntoIterator<Item = PhysAddr>) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(path.as_ref())?;

        let page = page_size();
        // Built up in place so that windows mapped before a failure are unmapped by Drop.
        let mut mem = Self {
            windows: Vec::new(),
            file,
        };
        for base in bases {
            let start = base.val() & !(page - 1);
            let end = AddressBlock::new(base)
                .end()
                .and_then(|end| end.checked_next_multiple_of(page))
                .ok_or_else(|| Error::DevMem {
                    addr: base,
                    source: io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "register block wraps the address space",
                    ),
                })?;
            if mem.windows.iter().any(|w| w.contains(base.val(), BLOCK_SPAN)) {
                continue;
            }
            let len = (end - start) as usize;
            let ptr = map_window(&mem.file, start, len)?;
            debug!(
                "mapped {} window {:#x}..{:#x} at {:p}",
                path.as_ref().display(),
                start,
                end,
                ptr
            );
            mem.windows.push(Window {
                base: start,
                len,
                ptr,
            });
        }

        Ok(mem)
    }

    /// Returns the number of distinct page windows mapped.
    pub const fn window_count(&self) -> usize {
        self.windows.len()
    }

    fn register_ptr(&self, addr: PhysAddr) -> Option<*mut u32> {
        if !addr.is_word_aligned() {
            return None;
        }
        self.windows
            .iter()
            .find(|w| w.contains(addr.val(), 4))
            // SAFETY: `contains` guarantees the word lies inside the mapping.
            .map(|w| unsafe { w.ptr.add((addr.val() - w.base) as usize) }.cast::<u32>())
    }
}

impl RegisterTransport for DevMem {
    fn write32(&mut self, addr: PhysAddr, value: u32) {
        match self.register_ptr(addr) {
            // SAFETY: the pointer is aligned and inside a live shared mapping.
            Some(reg) => unsafe { ptr::write_volatile(reg, value) },
            None => error!("dropped write of {value:#010x} to unmapped register {addr}"),
        }
    }

    fn read32(&mut self, addr: PhysAddr) -> u32 {
        match self.register_ptr(addr) {
            // SAFETY: the pointer is aligned and inside a live shared mapping.
            Some(reg) => unsafe { ptr::read_volatile(reg) },
            None => {
                error!("read from unmapped register {addr}");
                0
            }
        }
    }
}

impl Drop for DevMem {
    fn drop(&mut self) {
        for w in &self.windows {
            // SAFETY: each window was returned by a successful mmap of exactly `len` bytes
            // and is unmapped once.
            let _ = unsafe { libc::munmap(w.ptr.cast(), w.len) };
        }
    }
}

fn page_size() -> u64 {
    // SAFETY: sysconf has no preconditions.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 { size as u64 } else { 4096 }
}

fn map_window(file: &File, start: u64, len: usize) -> Result<*mut u8> {
    let offset = libc::off_t::try_from(start).map_err(|_| Error::DevMem {
        addr: PhysAddr::new(start),
        source: io::Error::from(io::ErrorKind::InvalidInput),
    })?;

    // SAFETY: a fresh shared mapping of an open descriptor; the result is checked against
    // MAP_FAILED before use.
    let ptr = unsafe {
        libc::mmap(
            ptr::null_mut(),
            len,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_SHARED,
            file.as_raw_fd(),
            offset,
        )
    };
    if ptr == libc::MAP_FAILED {
        return Err(Error::DevMem {
            addr: PhysAddr::new(start),
            source: io::Error::last_os_error(),
        });
    }
    Ok(ptr.cast())
}
