//! The coprocessor: one transport, the units it reaches, and request accounting.
//!
//! `Coprocessor` is the only way the estimators talk to hardware. It owns the transport,
//! so handing out a client borrows the whole coprocessor mutably; two requests can never
//! be in flight at once. Each accessor fails with [`Error::UnitUnavailable`] when the
//! configured memory map has no unit of that kind.

use super::{AddressBlock, BinaryOp, BinaryUnit, RandomUnit, SqrtUnit, UnitKind, UnitMap};
use crate::common::{Error, Result};
use crate::config::Config;
use crate::stats::RequestStats;
use crate::transport::RegisterTransport;

/// A set of memory-mapped floating-point units reached through one transport.
#[derive(Debug)]
pub struct Coprocessor<T> {
    io: T,
    units: UnitMap,
    stats: RequestStats,
}

impl<T: RegisterTransport> Coprocessor<T> {
    /// Creates a coprocessor over `io` with the units in `units`.
    pub fn new(io: T, units: UnitMap) -> Self {
        Self {
            io,
            units,
            stats: RequestStats::default(),
        }
    }

    /// Creates a coprocessor over `io` with the units described by `config`.
    pub fn from_config(io: T, config: &Config) -> Self {
        Self::new(io, config.units.unit_map())
    }

    /// Units this coprocessor can reach.
    pub const fn units(&self) -> &UnitMap {
        &self.units
    }

    /// Returns `true` if a unit of `kind` is configured.
    pub const fn has(&self, kind: UnitKind) -> bool {
        self.units.get(kind).is_some()
    }

    /// Register block of the unit of `kind`.
    ///
    /// # Errors
    ///
    /// [`Error::UnitUnavailable`] if no such unit is configured.
    pub fn block(&self, kind: UnitKind) -> Result<AddressBlock> {
        self.units.get(kind).ok_or(Error::UnitUnavailable(kind))
    }

    /// Checks that every kind in `kinds` is configured.
    ///
    /// # Errors
    ///
    /// [`Error::UnitUnavailable`] naming the first missing kind.
    pub fn require(&self, kinds: &[UnitKind]) -> Result<()> {
        kinds.iter().try_for_each(|&kind| self.block(kind).map(|_| ()))
    }

    /// Client for one request to the binary unit implementing `op`.
    ///
    /// # Errors
    ///
    /// [`Error::UnitUnavailable`] if that unit is not configured.
    pub fn binary(&mut self, op: BinaryOp) -> Result<BinaryUnit<'_, T>> {
        let block = self.block(op.kind())?;
        self.stats.record(op.kind());
        Ok(BinaryUnit::new(&mut self.io, block, op))
    }

    /// Client for one request to the square-root unit.
    ///
    /// # Errors
    ///
    /// [`Error::UnitUnavailable`] if no square-root unit is configured.
    pub fn sqrt(&mut self) -> Result<SqrtUnit<'_, T>> {
        let block = self.block(UnitKind::Sqrt)?;
        self.stats.record(UnitKind::Sqrt);
        Ok(SqrtUnit::new(&mut self.io, block))
    }

    /// Client for one sample from the random unit.
    ///
    /// # Errors
    ///
    /// [`Error::UnitUnavailable`] if no random unit is configured.
    pub fn random(&mut self) -> Result<RandomUnit<'_, T>> {
        let block = self.block(UnitKind::Random)?;
        self.stats.record(UnitKind::Random);
        Ok(RandomUnit::new(&mut self.io, block))
    }

    /// `a + b` on the adder.
    ///
    /// # Errors
    ///
    /// [`Error::UnitUnavailable`] if no adder is configured.
    #[inline]
    pub fn add(&mut self, a: f32, b: f32) -> Result<f32> {
        Ok(self.binary(BinaryOp::Add)?.compute(a, b))
    }

    /// `a * b` on the multiplier.
    ///
    /// # Errors
    ///
    /// [`Error::UnitUnavailable`] if no multiplier is configured.
    #[inline]
    pub fn multiply(&mut self, a: f32, b: f32) -> Result<f32> {
        Ok(self.binary(BinaryOp::Multiply)?.compute(a, b))
    }

    /// `a / b` on the divider.
    ///
    /// # Errors
    ///
    /// [`Error::UnitUnavailable`] if no divider is configured.
    #[inline]
    pub fn divide(&mut self, a: f32, b: f32) -> Result<f32> {
        Ok(self.binary(BinaryOp::Divide)?.compute(a, b))
    }

    /// `sqrt(a)` on the square-root unit.
    ///
    /// # Errors
    ///
    /// [`Error::UnitUnavailable`] if no square-root unit is configured.
    #[inline]
    pub fn square_root(&mut self, a: f32) -> Result<f32> {
        Ok(self.sqrt()?.compute(a))
    }

    /// One sample from the random unit.
    ///
    /// # Errors
    ///
    /// [`Error::UnitUnavailable`] if no random unit is configured.
    #[inline]
    pub fn next_random(&mut self) -> Result<f32> {
        Ok(self.random()?.next())
    }

    /// Request counters.
    pub const fn stats(&self) -> &RequestStats {
        &self.stats
    }

    /// Clears the request counters.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// The underlying transport.
    pub const fn transport(&self) -> &T {
        &self.io
    }

    /// The underlying transport, mutably.
    ///
    /// Raw accesses through this reference bypass the request discipline; they are meant
    /// for inspecting simulated devices between requests.
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.io
    }

    /// Consumes the coprocessor and returns the transport.
    pub fn into_inner(self) -> T {
        self.io
    }
}
