//! Common types shared by every layer of the driver.
//!
//! 1. **Addresses:** Strong type for physical register addresses.
//! 2. **Codec:** Bit-exact conversion between `f32` values and 32-bit register words.
//! 3. **Errors:** The crate error enum and `Result` alias.

/// Physical address type.
pub mod addr;

/// IEEE-754 single-precision bit codec.
pub mod codec;

/// Error type and result alias.
pub mod error;

pub use addr::PhysAddr;
pub use codec::{decode, encode};
pub use error::{Error, Result};
