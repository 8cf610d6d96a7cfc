//! # Page Window Tests
//!
//! `DevMem::open_path` maps any file that supports `mmap`, so a sparse temporary file
//! plays the part of `/dev/mem`. Windows are page-aligned; the bases below are 64 KiB
//! aligned so they hold for every common page size.

use coproc_core::common::{Error, PhysAddr};
use coproc_core::transport::{DevMem, RegisterTransport};

const FILE_LEN: u64 = 0x40000;
const BASE: u64 = 0x10000;

fn backing_file() -> tempfile::NamedTempFile {
    let file = tempfile::NamedTempFile::new().expect("temp file");
    file.as_file().set_len(FILE_LEN).expect("set_len");
    file
}

#[test]
fn test_registers_in_one_page_share_a_window() {
    let file = backing_file();
    let io = DevMem::open_path(
        file.path(),
        [PhysAddr::new(BASE), PhysAddr::new(BASE + 0x10), PhysAddr::new(BASE + 0x20)],
    )
    .expect("map");
    assert_eq!(io.window_count(), 1);
}

#[test]
fn test_distant_blocks_get_separate_windows() {
    let file = backing_file();
    let io = DevMem::open_path(file.path(), [PhysAddr::new(BASE), PhysAddr::new(BASE + 0x20000)])
        .expect("map");
    assert_eq!(io.window_count(), 2);
}

#[test]
fn test_writes_reach_the_backing_file() {
    let file = backing_file();
    {
        let mut io = DevMem::open_path(file.path(), [PhysAddr::new(BASE)]).expect("map");
        io.write32(PhysAddr::new(BASE + 4), 0x4040_0000);
        assert_eq!(io.read32(PhysAddr::new(BASE + 4)), 0x4040_0000);
    }
    let bytes = std::fs::read(file.path()).expect("read back");
    let at = (BASE + 4) as usize;
    assert_eq!(&bytes[at..at + 4], &0x4040_0000u32.to_ne_bytes());
}

#[test]
fn test_unmapped_access_reads_zero_and_drops_writes() {
    let file = backing_file();
    let mut io = DevMem::open_path(file.path(), [PhysAddr::new(BASE)]).expect("map");
    io.write32(PhysAddr::new(0x30000), 0xffff_ffff);
    assert_eq!(io.read32(PhysAddr::new(0x30000)), 0);
    // Misaligned addresses are never dereferenced.
    assert_eq!(io.read32(PhysAddr::new(BASE + 2)), 0);
}

#[test]
fn test_missing_device_node() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = DevMem::open_path(dir.path().join("mem"), [PhysAddr::new(BASE)]).expect_err("absent");
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_block_wrapping_the_address_space_is_refused() {
    let file = backing_file();
    let err = DevMem::open_path(file.path(), [PhysAddr::new(u64::MAX - 3)]).expect_err("wraps");
    assert!(matches!(err, Error::DevMem { addr, .. } if addr == PhysAddr::new(u64::MAX - 3)));
}
