//! Binary accelerator client (add, multiply, divide).
//!
//! A request writes `A`, writes `B`, then reads `O`. The three accesses are issued from a
//! single call that consumes the client, while the client holds the transport mutably, so
//! nothing can touch the unit between the operand writes and the result read.

use std::fmt;

use super::{AddressBlock, Register, UnitKind};
use crate::common::{decode, encode};
use crate::transport::RegisterTransport;

/// Operation performed by a binary accelerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a * b`
    Multiply,
    /// `a / b`
    Divide,
}

impl BinaryOp {
    /// All binary operations.
    pub const ALL: [Self; 3] = [Self::Add, Self::Multiply, Self::Divide];

    /// Accelerator kind that implements this operation.
    pub const fn kind(self) -> UnitKind {
        match self {
            Self::Add => UnitKind::Add,
            Self::Multiply => UnitKind::Multiply,
            Self::Divide => UnitKind::Divide,
        }
    }

    /// Host single-precision reference result.
    ///
    /// Used by the simulated units and by the self-test; the driver itself never computes
    /// with it.
    #[inline(always)]
    pub fn apply(self, a: f32, b: f32) -> f32 {
        match self {
            Self::Add => a + b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
        }
    }

    /// Infix symbol for reports.
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind(), f)
    }
}

/// Client for one binary accelerator; good for exactly one request.
pub struct BinaryUnit<'io, T: ?Sized> {
    io: &'io mut T,
    block: AddressBlock,
    op: BinaryOp,
}

impl<T: ?Sized> fmt::Debug for BinaryUnit<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryUnit")
            .field("op", &self.op)
            .field("block", &self.block)
            .finish_non_exhaustive()
    }
}

impl<'io, T: RegisterTransport + ?Sized> BinaryUnit<'io, T> {
    /// Binds a client for `op` at `block` to `io`.
    pub const fn new(io: &'io mut T, block: AddressBlock, op: BinaryOp) -> Self {
        Self { io, block, op }
    }

    /// Operation this client performs.
    pub const fn op(&self) -> BinaryOp {
        self.op
    }

    /// Writes `a` and `b` to the operand registers and returns the unit's output.
    ///
    /// The result is whatever pattern the hardware presents; nothing is checked or
    /// normalised.
    pub fn compute(self, a: f32, b: f32) -> f32 {
        let (a_bits, b_bits) = (encode(a), encode(b));
        self.io.write32(self.block.register(Register::A), a_bits);
        self.io.write32(self.block.register(Register::B), b_bits);
        let o_bits = self.io.read32(self.block.register(Register::O));
        if cfg!(any(debug_assertions, feature = "always-trace")) {
            tracing::trace!(
                "{}: A={:#010x} B={:#010x} O={:#010x}",
                self.op,
                a_bits,
                b_bits,
                o_bits
            );
        }
        decode(o_bits)
    }
}
