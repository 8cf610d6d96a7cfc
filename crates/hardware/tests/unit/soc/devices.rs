//! # Simulated Device Tests

use coproc_core::common::encode;
use coproc_core::soc::devices::{Device, FloatBinaryUnit, FloatRandomUnit, FloatSqrtUnit};
use coproc_core::units::{BLOCK_SPAN, BinaryOp, REG_A, REG_B, REG_O};
use rstest::rstest;

#[rstest]
#[case(BinaryOp::Add, "FloatAdder")]
#[case(BinaryOp::Multiply, "FloatMultiplier")]
#[case(BinaryOp::Divide, "FloatDivider")]
fn test_binary_unit_identity(#[case] op: BinaryOp, #[case] name: &str) {
    let dev = FloatBinaryUnit::new(0x43C0_0000, op);
    assert_eq!(dev.name(), name);
    assert_eq!(dev.address_range(), (0x43C0_0000, BLOCK_SPAN));
}

#[test]
fn test_binary_unit_latches_operands() {
    let mut dev = FloatBinaryUnit::new(0, BinaryOp::Divide);
    dev.write_u32(REG_A, encode(7.0));
    dev.write_u32(REG_B, encode(2.0));
    assert_eq!(dev.read_u32(REG_A), encode(7.0));
    assert_eq!(dev.read_u32(REG_B), encode(2.0));
    assert_eq!(dev.read_u32(REG_O), encode(3.5));
    // O is recomputed from the latched operands on every read.
    assert_eq!(dev.read_u32(REG_O), encode(3.5));
}

#[test]
fn test_binary_unit_ignores_writes_to_output_and_reserved() {
    let mut dev = FloatBinaryUnit::new(0, BinaryOp::Add);
    dev.write_u32(REG_O, encode(99.0));
    dev.write_u32(0xC, encode(99.0));
    assert_eq!(dev.read_u32(REG_O), encode(0.0));
    assert_eq!(dev.read_u32(0xC), 0);
}

#[test]
fn test_sqrt_unit() {
    let mut dev = FloatSqrtUnit::new(0x100);
    assert_eq!(dev.name(), "FloatSqrt");
    assert_eq!(dev.address_range(), (0x100, BLOCK_SPAN));
    dev.write_u32(REG_A, encode(2.25));
    dev.write_u32(REG_B, encode(100.0));
    assert_eq!(dev.read_u32(REG_A), encode(2.25));
    assert_eq!(dev.read_u32(REG_B), 0);
    assert_eq!(dev.read_u32(REG_O), encode(1.5));
}

#[test]
fn test_random_unit_only_decodes_output() {
    let mut dev = FloatRandomUnit::from_values(0, &[0.125]);
    assert_eq!(dev.name(), "FloatRandom");
    dev.write_u32(REG_A, encode(5.0));
    assert_eq!(dev.read_u32(REG_A), 0);
    assert_eq!(dev.read_u32(REG_O), encode(0.125));
}

#[test]
fn test_seeded_random_units_are_reproducible() {
    let mut a = FloatRandomUnit::new(0, 42);
    let mut b = FloatRandomUnit::new(0, 42);
    let mut c = FloatRandomUnit::new(0, 43);
    let sa: Vec<u32> = (0..16).map(|_| a.read_u32(REG_O)).collect();
    let sb: Vec<u32> = (0..16).map(|_| b.read_u32(REG_O)).collect();
    let sc: Vec<u32> = (0..16).map(|_| c.read_u32(REG_O)).collect();
    assert_eq!(sa, sb);
    assert_ne!(sa, sc);
}

#[test]
fn test_raw_words_replayed_verbatim() {
    let mut dev = FloatRandomUnit::from_words(0, vec![0x7fc0_0001, 0x3f80_0000]);
    assert_eq!(dev.read_u32(REG_O), 0x7fc0_0001);
    assert_eq!(dev.read_u32(REG_O), 0x3f80_0000);
    assert_eq!(dev.read_u32(REG_O), 0x7fc0_0001);
}
