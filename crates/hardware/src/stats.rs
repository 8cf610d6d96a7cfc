//! Accelerator request statistics.
//!
//! The coprocessor counts every request it issues, per unit kind. It provides:
//! 1. **Counters:** Requests per accelerator and the total.
//! 2. **Timing:** Wall-clock time since the counters were last reset, and request rate.
//! 3. **Reporting:** A fixed-width summary block for the CLI.

use std::time::{Duration, Instant};

use crate::units::UnitKind;

/// Per-unit request counters.
#[derive(Clone, Debug)]
pub struct RequestStats {
    start_time: Instant,
    requests: [u64; 5],
}

impl Default for RequestStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            requests: [0; 5],
        }
    }
}

impl RequestStats {
    /// Records one request to a unit of `kind`.
    #[inline(always)]
    pub const fn record(&mut self, kind: UnitKind) {
        self.requests[kind.index()] += 1;
    }

    /// Requests issued to the unit of `kind`.
    pub const fn get(&self, kind: UnitKind) -> u64 {
        self.requests[kind.index()]
    }

    /// Requests issued to all units.
    pub fn total(&self) -> u64 {
        self.requests.iter().sum()
    }

    /// Time since construction or the last [`reset`](Self::reset).
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Clears the counters and restarts the clock.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Prints the summary block to stdout.
    pub fn print(&self) {
        let seconds = self.elapsed().as_secs_f64();
        let total = self.total();
        println!("==========================================================");
        println!("ACCELERATOR REQUESTS");
        println!("==========================================================");
        for kind in UnitKind::ALL {
            let count = self.get(kind);
            let share = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            println!("  {:<10} {:>14} ({:>5.1}%)", kind.name(), count, share);
        }
        println!("  {:<10} {:>14}", "total", total);
        println!("  {:<10} {:>14.3} s", "time", seconds);
        if seconds > 0.0 {
            println!("  {:<10} {:>14.0} req/s", "rate", total as f64 / seconds);
        }
    }
}
