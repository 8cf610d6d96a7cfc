//! Float bit codec.
//!
//! Every accelerator register carries the raw IEEE-754 single-precision bit pattern of its
//! logical value. These two functions are the only place the crate crosses between the
//! numeric and the wire representation. They are a reinterpretation, not a numeric cast:
//! every 32-bit pattern (NaN payloads, infinities, negative zero, subnormals) survives a
//! round trip unchanged.

/// Returns the raw bit pattern of `f` as it is written to an operand register.
#[inline(always)]
pub const fn encode(f: f32) -> u32 {
    f.to_bits()
}

/// Returns the single-precision value whose bit pattern is `bits`.
#[inline(always)]
pub const fn decode(bits: u32) -> f32 {
    f32::from_bits(bits)
}
