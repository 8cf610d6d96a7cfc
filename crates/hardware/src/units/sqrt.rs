//! Square-root accelerator client.
//!
//! The unit decodes only `A` and `O`; `B` is never written.

use std::fmt;

use super::{AddressBlock, Register};
use crate::common::{decode, encode};
use crate::transport::RegisterTransport;

/// Client for the square-root accelerator; good for exactly one request.
pub struct SqrtUnit<'io, T: ?Sized> {
    io: &'io mut T,
    block: AddressBlock,
}

impl<T: ?Sized> fmt::Debug for SqrtUnit<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqrtUnit")
            .field("block", &self.block)
            .finish_non_exhaustive()
    }
}

impl<'io, T: RegisterTransport + ?Sized> SqrtUnit<'io, T> {
    /// Binds a client at `block` to `io`.
    pub const fn new(io: &'io mut T, block: AddressBlock) -> Self {
        Self { io, block }
    }

    /// Writes `a` to the operand register and returns the unit's output.
    pub fn compute(self, a: f32) -> f32 {
        let a_bits = encode(a);
        self.io.write32(self.block.register(Register::A), a_bits);
        let o_bits = self.io.read32(self.block.register(Register::O));
        if cfg!(any(debug_assertions, feature = "always-trace")) {
            tracing::trace!("sqrt: A={:#010x} O={:#010x}", a_bits, o_bits);
        }
        decode(o_bits)
    }
}
