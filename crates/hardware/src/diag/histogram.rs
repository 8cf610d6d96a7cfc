//! Random unit distribution capture.
//!
//! Samples the random unit and buckets the values into equal-width bins over `[0, 1)`.
//! The raw words can also be dumped one hexadecimal word per line for offline plotting.

use std::fmt;
use std::io::{self, Write};

use crate::common::{Result, decode};
use crate::transport::RegisterTransport;
use crate::units::Coprocessor;

/// Width in characters of the longest bar in the rendered histogram.
const BAR_WIDTH: u64 = 50;

/// Reads `count` raw samples from the random unit.
///
/// # Errors
///
/// [`Error::UnitUnavailable`](crate::common::Error::UnitUnavailable) if no random unit is
/// configured.
pub fn sample_words<T: RegisterTransport>(cp: &mut Coprocessor<T>, count: u32) -> Result<Vec<u32>> {
    let mut words = Vec::with_capacity(count as usize);
    for _ in 0..count {
        words.push(cp.random()?.next_bits());
    }
    Ok(words)
}

/// Writes `words` as eight-digit lowercase hex, one per line.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_hex(out: &mut impl Write, words: &[u32]) -> io::Result<()> {
    for word in words {
        writeln!(out, "{word:08x}")?;
    }
    Ok(())
}

/// Equal-width histogram of samples over `[0, 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    /// Sample count per bin; bin `i` covers `[i / n, (i + 1) / n)`.
    pub bins: Vec<u64>,
    /// Samples that were NaN, negative, or `>= 1`.
    pub out_of_range: u64,
}

impl Histogram {
    /// Buckets raw sample words into `bins` bins (at least one).
    pub fn from_words(words: &[u32], bins: usize) -> Self {
        let n = bins.max(1);
        let mut hist = Self {
            bins: vec![0; n],
            out_of_range: 0,
        };
        for &word in words {
            let v = decode(word);
            if (0.0..1.0).contains(&v) {
                let idx = ((f64::from(v) * n as f64) as usize).min(n - 1);
                hist.bins[idx] += 1;
            } else {
                hist.out_of_range += 1;
            }
        }
        hist
    }

    /// Samples that landed in a bin.
    pub fn in_range(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Pearson's chi-squared statistic against a uniform distribution over the bins.
    ///
    /// With `k` bins the statistic has `k - 1` degrees of freedom; values far above `k`
    /// suggest the source is not uniform. Returns `0.0` when no sample is in range.
    pub fn chi_squared(&self) -> f64 {
        let total = self.in_range();
        if total == 0 {
            return 0.0;
        }
        let expected = total as f64 / self.bins.len() as f64;
        self.bins
            .iter()
            .map(|&observed| {
                let d = observed as f64 - expected;
                d * d / expected
            })
            .sum()
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.bins.len();
        let peak = self.bins.iter().copied().max().unwrap_or(0).max(1);
        for (i, &count) in self.bins.iter().enumerate() {
            let lo = i as f64 / n as f64;
            let bar = "#".repeat((count * BAR_WIDTH / peak) as usize);
            writeln!(f, "[{lo:.3}, {:.3})  {count:>8}  {bar}", (i + 1) as f64 / n as f64)?;
        }
        writeln!(f, "out of range: {}", self.out_of_range)?;
        write!(
            f,
            "chi-squared: {:.2} ({} degrees of freedom)",
            self.chi_squared(),
            n.saturating_sub(1)
        )
    }
}
