//! Accelerator self-test.
//!
//! Runs a fixed set of operands through every configured unit and compares the hardware's
//! bit patterns with the host's single-precision results. Also checks that operand
//! registers read back what was written and that random samples lie in `[0, 1)`.
//!
//! Two NaN results are treated as equal whatever their payloads; the accelerators are not
//! required to reproduce the host's NaN encoding.

use std::fmt;

use tracing::{debug, warn};

use crate::common::{Result, decode, encode};
use crate::transport::RegisterTransport;
use crate::units::{BinaryOp, Coprocessor, Register, UnitKind};

/// Operand pairs checked on each binary unit.
pub const BINARY_OPERANDS: [(f32, f32); 12] = [
    (2.0, 3.0),
    (1.0, 3.0),
    (-1.5, 0.25),
    (0.1, 0.2),
    (1.0e-3, 7.0),
    (123_456.79, -0.5),
    (f32::MAX, 0.5),
    (f32::MIN_POSITIVE, 2.0),
    (0.0, -0.0),
    (-0.0, -0.0),
    (f32::INFINITY, 1.0),
    (1.0, 1.0e-30),
];

/// Operands checked on the square-root unit.
pub const SQRT_OPERANDS: [f32; 8] = [0.0, -0.0, 0.25, 2.0, 4.0, 1.0e-6, 1.0e30, f32::INFINITY];

/// A single disagreement found by the self-test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finding {
    /// The unit's output differs from the host result.
    Mismatch {
        /// Operand `A` bit pattern.
        a: u32,
        /// Operand `B` bit pattern, for binary units.
        b: Option<u32>,
        /// Pattern read from `O`.
        hardware: u32,
        /// Host result pattern.
        host: u32,
    },
    /// An operand register did not read back the value just written.
    Readback {
        /// Register that was read back.
        register: Register,
        /// Pattern written.
        wrote: u32,
        /// Pattern read.
        read: u32,
    },
    /// A random sample fell outside `[0, 1)`.
    OutOfRange {
        /// Sample bit pattern.
        sample: u32,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mismatch {
                a,
                b: Some(b),
                hardware,
                host,
            } => write!(f, "A: {a:08x}  B: {b:08x}  FPGA: {hardware:08x}  ARM: {host:08x}"),
            Self::Mismatch {
                a,
                b: None,
                hardware,
                host,
            } => write!(f, "A: {a:08x}  FPGA: {hardware:08x}  ARM: {host:08x}"),
            Self::Readback {
                register,
                wrote,
                read,
            } => write!(f, "{register:?} wrote {wrote:08x} read back {read:08x}"),
            Self::OutOfRange { sample } => {
                write!(f, "sample {sample:08x} ({}) outside [0, 1)", decode(*sample))
            }
        }
    }
}

/// Self-test results for one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitReport {
    /// Unit tested.
    pub kind: UnitKind,
    /// Requests checked.
    pub checked: u32,
    /// Disagreements found.
    pub findings: Vec<Finding>,
}

impl UnitReport {
    const fn new(kind: UnitKind) -> Self {
        Self {
            kind,
            checked: 0,
            findings: Vec::new(),
        }
    }

    /// Returns `true` if no disagreement was found.
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Self-test results for every configured unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelfTestReport {
    /// Per-unit results, in [`UnitKind::ALL`] order.
    pub units: Vec<UnitReport>,
    /// Kinds absent from the configuration.
    pub skipped: Vec<UnitKind>,
}

impl SelfTestReport {
    /// Returns `true` if every tested unit passed.
    pub fn passed(&self) -> bool {
        self.units.iter().all(UnitReport::passed)
    }

    /// Total disagreements across all units.
    pub fn finding_count(&self) -> usize {
        self.units.iter().map(|u| u.findings.len()).sum()
    }
}

impl fmt::Display for SelfTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for unit in &self.units {
            let verdict = if unit.passed() { "ok" } else { "FAILED" };
            writeln!(
                f,
                "{:<10} {:>6} checked  {:>4} findings  {}",
                unit.kind.name(),
                unit.checked,
                unit.findings.len(),
                verdict
            )?;
            for finding in &unit.findings {
                writeln!(f, "    {finding}")?;
            }
        }
        for kind in &self.skipped {
            writeln!(f, "{:<10} not configured", kind.name())?;
        }
        Ok(())
    }
}

/// Runs the self-test on every configured unit of `cp`.
///
/// # Errors
///
/// Only [`Error::UnitUnavailable`](crate::common::Error::UnitUnavailable), which cannot
/// occur for units reported as configured.
pub fn run<T: RegisterTransport>(cp: &mut Coprocessor<T>, random_samples: u32) -> Result<SelfTestReport> {
    let mut report = SelfTestReport::default();
    for kind in UnitKind::ALL {
        if !cp.has(kind) {
            report.skipped.push(kind);
            continue;
        }
        let unit = match kind {
            UnitKind::Add => check_binary(cp, BinaryOp::Add)?,
            UnitKind::Multiply => check_binary(cp, BinaryOp::Multiply)?,
            UnitKind::Divide => check_binary(cp, BinaryOp::Divide)?,
            UnitKind::Sqrt => check_sqrt(cp)?,
            UnitKind::Random => check_random(cp, random_samples)?,
        };
        if unit.passed() {
            debug!("selftest: {} passed {} checks", kind, unit.checked);
        } else {
            warn!("selftest: {} has {} findings", kind, unit.findings.len());
        }
        report.units.push(unit);
    }
    Ok(report)
}

fn same_result(hardware: u32, host: u32) -> bool {
    hardware == host || (decode(hardware).is_nan() && decode(host).is_nan())
}

/// Reads back the operand registers of `kind` and records any that differ from `wrote`.
fn readback<T: RegisterTransport>(
    cp: &mut Coprocessor<T>,
    kind: UnitKind,
    wrote: &[u32],
    findings: &mut Vec<Finding>,
) -> Result<()> {
    debug_assert_eq!(wrote.len(), kind.operand_count());
    let block = cp.block(kind)?;
    for (&register, &expected) in kind.registers().iter().zip(wrote) {
        let read = cp.transport_mut().read32(block.register(register));
        if read != expected {
            findings.push(Finding::Readback {
                register,
                wrote: expected,
                read,
            });
        }
    }
    Ok(())
}

fn check_binary<T: RegisterTransport>(cp: &mut Coprocessor<T>, op: BinaryOp) -> Result<UnitReport> {
    let mut report = UnitReport::new(op.kind());
    for (a, b) in BINARY_OPERANDS {
        let hardware = encode(cp.binary(op)?.compute(a, b));
        let host = encode(op.apply(a, b));
        report.checked += 1;
        if !same_result(hardware, host) {
            report.findings.push(Finding::Mismatch {
                a: encode(a),
                b: Some(encode(b)),
                hardware,
                host,
            });
        }
        readback(cp, op.kind(), &[encode(a), encode(b)], &mut report.findings)?;
    }
    Ok(report)
}

fn check_sqrt<T: RegisterTransport>(cp: &mut Coprocessor<T>) -> Result<UnitReport> {
    let mut report = UnitReport::new(UnitKind::Sqrt);
    for a in SQRT_OPERANDS {
        let hardware = encode(cp.square_root(a)?);
        let host = encode(a.sqrt());
        report.checked += 1;
        if !same_result(hardware, host) {
            report.findings.push(Finding::Mismatch {
                a: encode(a),
                b: None,
                hardware,
                host,
            });
        }
        readback(cp, UnitKind::Sqrt, &[encode(a)], &mut report.findings)?;
    }
    Ok(report)
}

fn check_random<T: RegisterTransport>(cp: &mut Coprocessor<T>, samples: u32) -> Result<UnitReport> {
    let mut report = UnitReport::new(UnitKind::Random);
    for _ in 0..samples {
        let sample = cp.random()?.next_bits();
        report.checked += 1;
        if !(0.0..1.0).contains(&decode(sample)) {
            report.findings.push(Finding::OutOfRange { sample });
        }
    }
    Ok(report)
}
