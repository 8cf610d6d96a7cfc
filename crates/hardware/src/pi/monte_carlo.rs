//! Monte-Carlo circle-ratio estimator.
//!
//! Draws points uniformly from the square `[-1, 1)²` and counts those within distance 1
//! of the origin; the inside fraction approaches `π / 4`.
//!
//! Per sample: two random reads, `x = -1 + 2 * rx` and `y = -1 + 2 * ry` on the multiplier
//! and adder, `x² + y²` on the multiplier and adder, then a square root. The root is not
//! needed to decide containment (`x² + y² <= 1` is equivalent) but keeps the square-root
//! unit in the exercised path. The `<= 1.0` comparison is done on the host; both sides are
//! plain single-precision values so the comparison is exact.

use std::time::Instant;

use tracing::debug;

use super::{Estimate, Method};
use crate::common::Result;
use crate::transport::RegisterTransport;
use crate::units::{Coprocessor, UnitKind};

/// Units the estimator issues requests to.
pub const REQUIRED_UNITS: [UnitKind; 5] = UnitKind::ALL;

/// Monte-Carlo circle-ratio estimator with a fixed sample count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonteCarlo {
    /// Number of points to sample.
    pub samples: u32,
}

/// A Monte-Carlo estimate together with the raw hit count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonteCarloEstimate {
    /// The π estimate.
    pub estimate: Estimate,
    /// Sampled points that fell inside the unit circle.
    pub inside: u32,
}

impl MonteCarlo {
    /// Creates an estimator sampling `samples` points.
    pub const fn new(samples: u32) -> Self {
        Self { samples }
    }

    /// Samples the circle on `cp`.
    ///
    /// With zero samples the final ratio is `0 / 0`, and the estimate is whatever the
    /// divider returns for it.
    ///
    /// # Errors
    ///
    /// [`Error::UnitUnavailable`](crate::common::Error::UnitUnavailable) if any of the five
    /// units is missing.
    pub fn run<T: RegisterTransport>(&self, cp: &mut Coprocessor<T>) -> Result<MonteCarloEstimate> {
        cp.require(&REQUIRED_UNITS)?;
        debug!("monte-carlo: sampling {} points", self.samples);
        let start = Instant::now();

        let mut inside: u32 = 0;
        for _ in 0..self.samples {
            let rx = cp.next_random()?;
            let ry = cp.next_random()?;
            let x = to_signed_unit(cp, rx)?;
            let y = to_signed_unit(cp, ry)?;

            let xx = cp.multiply(x, x)?;
            let yy = cp.multiply(y, y)?;
            let dist_sq = cp.add(xx, yy)?;
            let dist = cp.square_root(dist_sq)?;
            if dist <= 1.0 {
                inside += 1;
            }
        }

        let ratio = cp.divide(inside as f32, self.samples as f32)?;
        let value = cp.multiply(4.0, ratio)?;

        let estimate = Estimate {
            method: Method::MonteCarlo,
            value,
            iterations: self.samples,
            elapsed: start.elapsed(),
        };
        debug!(
            "monte-carlo: {}/{} inside, {} ({:#010x}) after {:?}",
            inside,
            self.samples,
            estimate.value,
            estimate.bits(),
            estimate.elapsed
        );
        Ok(MonteCarloEstimate { estimate, inside })
    }
}

/// Maps `r` from `[0, 1)` to `[-1, 1)` as `-1 + 2r` on the hardware.
fn to_signed_unit<T: RegisterTransport>(cp: &mut Coprocessor<T>, r: f32) -> Result<f32> {
    let doubled = cp.multiply(r, 2.0)?;
    cp.add(-1.0, doubled)
}
