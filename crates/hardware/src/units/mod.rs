//! Arithmetic unit clients.
//!
//! Each accelerator is a small register block: operand registers `A` and `B` and an
//! output register `O` at fixed offsets from the unit's base address. This module provides:
//! 1. **Layout:** `Register` offsets and `AddressBlock`, shared by every accelerator kind.
//! 2. **Kinds:** `UnitKind` and the `UnitMap` of configured base addresses.
//! 3. **Clients:** One typed client per kind whose single call performs the whole
//!    write-then-read request, so a request can never be split or interleaved.
//! 4. **Coprocessor:** Owner of the transport that hands out clients and counts requests.

use std::fmt;

use crate::common::PhysAddr;

/// Add, multiply and divide clients.
pub mod binary;

/// Coprocessor: transport owner and client factory.
pub mod coprocessor;

/// Random source client.
pub mod random;

/// Square-root client.
pub mod sqrt;

pub use binary::{BinaryOp, BinaryUnit};
pub use coprocessor::Coprocessor;
pub use random::RandomUnit;
pub use sqrt::SqrtUnit;

/// Byte offset of operand register `A`.
pub const REG_A: u64 = 0x0;
/// Byte offset of operand register `B`.
pub const REG_B: u64 = 0x4;
/// Byte offset of output register `O`.
pub const REG_O: u64 = 0x8;
/// Bytes decoded by one accelerator: four word slots, the last one reserved.
pub const BLOCK_SPAN: u64 = 0x10;
/// End of the Zynq-7000 32-bit physical address space; every block must lie below it.
pub const ADDRESS_LIMIT: u64 = 1 << 32;

/// One of the three registers in an accelerator block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Register {
    /// First operand.
    A,
    /// Second operand (binary units only).
    B,
    /// Result.
    O,
}

impl Register {
    /// All registers in address order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::O];

    /// Byte offset of this register from the block base.
    pub const fn offset(self) -> u64 {
        match self {
            Self::A => REG_A,
            Self::B => REG_B,
            Self::O => REG_O,
        }
    }

    /// Maps a block-relative byte offset back to its register.
    pub const fn from_offset(offset: u64) -> Option<Self> {
        match offset {
            REG_A => Some(Self::A),
            REG_B => Some(Self::B),
            REG_O => Some(Self::O),
            _ => None,
        }
    }
}

/// Kinds of accelerator the coprocessor may provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
    /// Floating-point adder (`O = A + B`).
    Add,
    /// Floating-point multiplier (`O = A * B`).
    Multiply,
    /// Floating-point divider (`O = A / B`).
    Divide,
    /// Floating-point square root (`O = sqrt(A)`).
    Sqrt,
    /// Uniform random source on `[0, 1)` (`O` only).
    Random,
}

impl UnitKind {
    /// Every kind, in the order used for indexing and reports.
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Multiply,
        Self::Divide,
        Self::Sqrt,
        Self::Random,
    ];

    /// Dense index of this kind into per-kind arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short lowercase name (`"add"`, `"sqrt"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Sqrt => "sqrt",
            Self::Random => "random",
        }
    }

    /// Registers the unit decodes; the rest of its block is unused.
    pub const fn registers(self) -> &'static [Register] {
        match self {
            Self::Add | Self::Multiply | Self::Divide => &[Register::A, Register::B, Register::O],
            Self::Sqrt => &[Register::A, Register::O],
            Self::Random => &[Register::O],
        }
    }

    /// Number of operand registers written per request.
    pub const fn operand_count(self) -> usize {
        self.registers().len() - 1
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The register block of one accelerator: a base address plus the fixed offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AddressBlock {
    base: PhysAddr,
}

impl AddressBlock {
    /// Creates a block at `base`.
    pub const fn new(base: PhysAddr) -> Self {
        Self { base }
    }

    /// Base address of the block.
    pub const fn base(&self) -> PhysAddr {
        self.base
    }

    /// Absolute address of `reg` within this block.
    #[inline(always)]
    pub const fn register(&self, reg: Register) -> PhysAddr {
        self.base.offset(reg.offset())
    }

    /// One past the last byte of the block, or `None` if it would wrap past `u64::MAX`.
    pub const fn end(&self) -> Option<u64> {
        self.base.val().checked_add(BLOCK_SPAN)
    }

    /// Returns `true` if the block lies entirely below [`ADDRESS_LIMIT`].
    pub const fn is_addressable(&self) -> bool {
        matches!(self.end(), Some(end) if end <= ADDRESS_LIMIT)
    }

    /// Returns `true` if the byte ranges of `self` and `other` intersect.
    pub const fn overlaps(&self, other: &Self) -> bool {
        let (a, b) = (self.base.val(), other.base.val());
        a < b.saturating_add(BLOCK_SPAN) && b < a.saturating_add(BLOCK_SPAN)
    }
}

/// Base addresses of the accelerators present on a particular build of the coprocessor.
///
/// Different bitstreams carry different subsets of units, so every kind is optional.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitMap {
    blocks: [Option<AddressBlock>; 5],
}

impl UnitMap {
    /// Creates a map with no units.
    pub const fn new() -> Self {
        Self { blocks: [None; 5] }
    }

    /// Returns the map with `kind` placed at `base`.
    #[must_use]
    pub const fn with(mut self, kind: UnitKind, base: PhysAddr) -> Self {
        self.blocks[kind.index()] = Some(AddressBlock::new(base));
        self
    }

    /// Places or removes the unit of `kind`.
    pub const fn set(&mut self, kind: UnitKind, block: Option<AddressBlock>) {
        self.blocks[kind.index()] = block;
    }

    /// Block of `kind`, if configured.
    pub const fn get(&self, kind: UnitKind) -> Option<AddressBlock> {
        self.blocks[kind.index()]
    }

    /// Configured units in [`UnitKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (UnitKind, AddressBlock)> + '_ {
        UnitKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|block| (kind, block)))
    }
}
