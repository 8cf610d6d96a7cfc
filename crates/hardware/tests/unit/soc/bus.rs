//! # Bus Routing Tests

use coproc_core::common::{PhysAddr, encode};
use coproc_core::soc::Bus;
use coproc_core::soc::devices::{FloatBinaryUnit, FloatSqrtUnit};
use coproc_core::transport::RegisterTransport;
use coproc_core::units::BinaryOp;
use pretty_assertions::assert_eq;

fn two_device_bus() -> Bus {
    let mut bus = Bus::new();
    bus.add_device(Box::new(FloatSqrtUnit::new(0x2000)));
    bus.add_device(Box::new(FloatBinaryUnit::new(0x1000, BinaryOp::Add)));
    bus
}

#[test]
fn test_devices_sorted_by_base() {
    let bus = two_device_bus();
    assert_eq!(bus.device_names(), vec!["FloatAdder", "FloatSqrt"]);
}

#[test]
fn test_address_claims() {
    let bus = two_device_bus();
    assert!(bus.is_valid_address(0x1000));
    assert!(bus.is_valid_address(0x100C));
    assert!(!bus.is_valid_address(0x1010));
    assert!(bus.is_valid_address(0x2008));
    assert!(!bus.is_valid_address(0x0));
}

#[test]
fn test_accesses_route_by_address() {
    let mut bus = two_device_bus();
    bus.write32(PhysAddr::new(0x1000), encode(1.0));
    bus.write32(PhysAddr::new(0x1004), encode(2.0));
    bus.write32(PhysAddr::new(0x2000), encode(16.0));
    assert_eq!(bus.read32(PhysAddr::new(0x1008)), encode(3.0));
    assert_eq!(bus.read32(PhysAddr::new(0x2008)), encode(4.0));
    assert_eq!(bus.unclaimed_accesses(), 0);
}

#[test]
fn test_unclaimed_accesses_are_counted() {
    let mut bus = two_device_bus();
    bus.write32(PhysAddr::new(0x3000), 1);
    assert_eq!(bus.read32(PhysAddr::new(0x3000)), 0);
    assert_eq!(bus.unclaimed_accesses(), 2);
}

#[test]
fn test_empty_bus() {
    let mut bus = Bus::default();
    assert!(bus.device_names().is_empty());
    assert_eq!(bus.read_u32(0x1000), 0);
    assert_eq!(bus.unclaimed_accesses(), 1);
}

#[test]
fn test_device_at_top_of_address_space() {
    let base = u64::MAX - 3;
    let mut bus = Bus::new();
    bus.add_device(Box::new(FloatBinaryUnit::new(base, BinaryOp::Add)));
    bus.write32(PhysAddr::new(base), encode(1.0));
    assert_eq!(bus.read32(PhysAddr::new(base)), encode(1.0));
    assert!(bus.is_valid_address(u64::MAX));
    assert!(!bus.is_valid_address(0x1000));
    assert_eq!(bus.read32(PhysAddr::new(0x1000)), 0);
    assert_eq!(bus.unclaimed_accesses(), 1);
}
