//! Leibniz series estimator.
//!
//! `π = 4 * Σ (-1)^i / (2i + 1)`. Each term is one divider request (`1 / (2i + 1)`),
//! each partial sum one adder request, and the final scaling one multiplier request.
//! The term count is fixed; there is no convergence test.

use std::time::Instant;

use tracing::debug;

use super::{Estimate, Method};
use crate::common::Result;
use crate::transport::RegisterTransport;
use crate::units::{Coprocessor, UnitKind};

/// Units the estimator issues requests to.
pub const REQUIRED_UNITS: [UnitKind; 3] = [UnitKind::Add, UnitKind::Multiply, UnitKind::Divide];

/// Leibniz series estimator with a fixed number of terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Leibniz {
    /// Number of series terms to sum.
    pub iterations: u32,
}

impl Leibniz {
    /// Creates an estimator summing `iterations` terms.
    pub const fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Runs the series on `cp`.
    ///
    /// # Errors
    ///
    /// [`Error::UnitUnavailable`](crate::common::Error::UnitUnavailable) if the adder,
    /// multiplier or divider is missing. Numeric anomalies are never errors; they propagate.
    pub fn run<T: RegisterTransport>(&self, cp: &mut Coprocessor<T>) -> Result<Estimate> {
        cp.require(&REQUIRED_UNITS)?;
        debug!("leibniz: summing {} terms", self.iterations);
        let start = Instant::now();

        let mut sum = 0.0f32;
        let mut negative = false;
        for i in 0..self.iterations {
            let divisor = (2 * u64::from(i) + 1) as f32;
            let term = cp.divide(1.0, divisor)?;
            sum = cp.add(sum, if negative { -term } else { term })?;
            negative = !negative;
        }
        let value = cp.multiply(sum, 4.0)?;

        let estimate = Estimate {
            method: Method::Leibniz,
            value,
            iterations: self.iterations,
            elapsed: start.elapsed(),
        };
        debug!(
            "leibniz: {} ({:#010x}) after {:?}",
            estimate.value,
            estimate.bits(),
            estimate.elapsed
        );
        Ok(estimate)
    }
}
