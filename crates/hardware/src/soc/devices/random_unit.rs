//! Simulated random source.
//!
//! Every read of `O` produces a new sample. Samples come either from a xorshift64
//! generator (uniform on `[0, 1)` with 24 bits of resolution, so every sample is an exact
//! single-precision value) or from a scripted sequence that is replayed in order and
//! wraps around.
//!
//! # Memory Map
//!
//! * `0x08`: O (read only, next sample)
//!
//! All other offsets read as zero and ignore writes.

use crate::common::encode;
use crate::soc::devices::Device;
use crate::units::{BLOCK_SPAN, REG_O};

/// 2^-24: spacing of the generator's outputs.
const SAMPLE_SCALE: f32 = 1.0 / 16_777_216.0;

/// Where the random unit's samples come from.
#[derive(Debug, Clone)]
enum Source {
    Xorshift { state: u64 },
    Sequence { words: Vec<u32>, pos: usize },
}

/// Simulated random unit.
#[derive(Debug, Clone)]
pub struct FloatRandomUnit {
    /// Base physical address of the device.
    base_addr: u64,
    source: Source,
}

impl FloatRandomUnit {
    /// Creates a generator-backed unit. A zero seed is replaced by a fixed non-zero one.
    pub const fn new(base_addr: u64, seed: u64) -> Self {
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self {
            base_addr,
            source: Source::Xorshift { state },
        }
    }

    /// Creates a unit that replays `values` in order, wrapping around.
    ///
    /// An empty slice produces zeros.
    pub fn from_values(base_addr: u64, values: &[f32]) -> Self {
        Self::from_words(base_addr, values.iter().copied().map(encode).collect())
    }

    /// Creates a unit that replays raw register words in order, wrapping around.
    pub fn from_words(base_addr: u64, words: Vec<u32>) -> Self {
        Self {
            base_addr,
            source: Source::Sequence { words, pos: 0 },
        }
    }

    fn next_word(&mut self) -> u32 {
        match &mut self.source {
            Source::Xorshift { state } => {
                let mut x = *state;
                x ^= x << 13;
                x ^= x >> 7;
                x ^= x << 17;
                *state = x;
                encode((x >> 40) as f32 * SAMPLE_SCALE)
            }
            Source::Sequence { words, pos } => {
                if words.is_empty() {
                    return 0;
                }
                let word = words[*pos];
                *pos = (*pos + 1) % words.len();
                word
            }
        }
    }
}

impl Device for FloatRandomUnit {
    fn name(&self) -> &str {
        "FloatRandom"
    }

    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, BLOCK_SPAN)
    }

    fn read_u32(&mut self, offset: u64) -> u32 {
        if offset == REG_O { self.next_word() } else { 0 }
    }

    fn write_u32(&mut self, _offset: u64, _val: u32) {}
}
