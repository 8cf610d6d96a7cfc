//! Random source client.
//!
//! The random unit has no operands. Every read of `O` yields a fresh sample, uniform on
//! `[0, 1)` by the hardware's contract; the driver cannot verify the distribution and
//! treats the unit as an opaque entropy source.

use std::fmt;

use super::{AddressBlock, Register};
use crate::common::decode;
use crate::transport::RegisterTransport;

/// Client for the random source; good for exactly one sample.
pub struct RandomUnit<'io, T: ?Sized> {
    io: &'io mut T,
    block: AddressBlock,
}

impl<T: ?Sized> fmt::Debug for RandomUnit<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomUnit")
            .field("block", &self.block)
            .finish_non_exhaustive()
    }
}

impl<'io, T: RegisterTransport + ?Sized> RandomUnit<'io, T> {
    /// Binds a client at `block` to `io`.
    pub const fn new(io: &'io mut T, block: AddressBlock) -> Self {
        Self { io, block }
    }

    /// Reads one sample without decoding it.
    pub fn next_bits(self) -> u32 {
        let o_bits = self.io.read32(self.block.register(Register::O));
        if cfg!(any(debug_assertions, feature = "always-trace")) {
            tracing::trace!("random: O={:#010x}", o_bits);
        }
        o_bits
    }

    /// Reads one sample.
    #[allow(clippy::should_implement_trait)]
    pub fn next(self) -> f32 {
        decode(self.next_bits())
    }
}
