//! π estimators built from accelerator requests.
//!
//! Both estimators express their arithmetic purely as coprocessor requests; every
//! intermediate value is the hardware's single-precision result. The host only prepares
//! operands (integer-to-float conversion, sign flips) and makes the final comparison.
//!
//! 1. **Leibniz:** `4 * (1 - 1/3 + 1/5 - 1/7 + ...)`, fixed term count.
//! 2. **Monte-Carlo:** ratio of random points in `[-1, 1)²` that fall inside the unit circle.

use std::fmt;
use std::time::Duration;

use crate::common::encode;

/// Alternating-series estimator.
pub mod leibniz;

/// Circle-ratio estimator.
pub mod monte_carlo;

pub use leibniz::Leibniz;
pub use monte_carlo::{MonteCarlo, MonteCarloEstimate};

/// Which algorithm produced an estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// Leibniz alternating series.
    Leibniz,
    /// Monte-Carlo circle-area ratio.
    MonteCarlo,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Leibniz => "Leibniz",
            Self::MonteCarlo => "Circle Area",
        })
    }
}

/// Result of one estimator run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Estimate {
    /// Algorithm used.
    pub method: Method,
    /// The estimate, exactly as the final hardware request returned it.
    pub value: f32,
    /// Series terms summed or points sampled.
    pub iterations: u32,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl Estimate {
    /// Raw bit pattern of [`value`](Self::value).
    pub const fn bits(&self) -> u32 {
        encode(self.value)
    }

    /// Absolute difference from π in double precision.
    pub fn abs_error(&self) -> f64 {
        (f64::from(self.value) - std::f64::consts::PI).abs()
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Calculated PI ({}): {} ({:#010x})",
            self.method,
            self.value,
            self.bits()
        )
    }
}
