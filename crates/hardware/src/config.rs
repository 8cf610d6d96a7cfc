//! Configuration for the coprocessor driver.
//!
//! This module defines the configuration structures used to describe a coprocessor build
//! and parameterise the estimators. It provides:
//! 1. **Defaults:** Base addresses of the reference bitstream and the reference iteration counts.
//! 2. **Structures:** Hierarchical config for units, estimators, the simulator and diagnostics.
//! 3. **Loading:** JSON parsing and semantic validation of the memory map.
//!
//! Every field has a default, so `{}` is a valid configuration and `Config::default()` is
//! what the CLI uses when no file is given.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{Error, PhysAddr, Result};
use crate::units::{ADDRESS_LIMIT, AddressBlock, UnitKind, UnitMap};

/// Default configuration constants.
mod defaults {
    /// Base address of the floating-point adder.
    ///
    /// The reference block design places every accelerator in the Zynq-7000 `M_AXI_GP0`
    /// window at the addresses Vivado assigns by default, 64 KiB apart.
    pub const ADDER_BASE: u64 = 0x43C0_0000;

    /// Base address of the floating-point multiplier.
    pub const MULTIPLIER_BASE: u64 = 0x43C1_0000;

    /// Base address of the floating-point divider.
    pub const DIVIDER_BASE: u64 = 0x43C2_0000;

    /// Base address of the floating-point square root.
    pub const SQRT_BASE: u64 = 0x43C3_0000;

    /// Base address of the random source.
    pub const RANDOM_BASE: u64 = 0x43C4_0000;

    /// Terms summed by the Leibniz estimator.
    pub const LEIBNIZ_ITERATIONS: u32 = 1_000_000;

    /// Points sampled by the Monte-Carlo estimator.
    pub const MONTE_CARLO_SAMPLES: u32 = 1_000_000;

    /// Seed of the simulated random unit.
    pub const RANDOM_SEED: u64 = 0x2545_F491_4F6C_DD1D;

    /// Equal-width bins of the random distribution histogram.
    pub const HISTOGRAM_BINS: usize = 50;

    /// Samples captured for the random distribution histogram.
    pub const RANDOM_SAMPLES: u32 = 26_000;
}

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Accelerator base addresses.
    #[serde(default)]
    pub units: UnitsConfig,

    /// Estimator iteration counts.
    #[serde(default)]
    pub estimators: EstimatorConfig,

    /// Behaviour of the simulated coprocessor.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Self-test and random capture settings.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigParse`] for malformed JSON or unknown fields, [`Error::InvalidConfig`]
    /// if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, otherwise as [`Config::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks the memory map and diagnostic settings for consistency.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] if a base address is not word-aligned, a register block
    /// extends past the 32-bit physical address space, two register blocks overlap, the
    /// histogram has no bins, or the simulated random sequence is empty.
    pub fn validate(&self) -> Result<()> {
        let map = self.units.unit_map();
        let blocks: Vec<(UnitKind, AddressBlock)> = map.iter().collect();

        for (kind, block) in &blocks {
            if !block.base().is_word_aligned() {
                return Err(Error::InvalidConfig(format!(
                    "{kind} base address {} is not word-aligned",
                    block.base()
                )));
            }
            if !block.is_addressable() {
                return Err(Error::InvalidConfig(format!(
                    "{kind} block at {} extends past the {:#x} address limit",
                    block.base(),
                    ADDRESS_LIMIT
                )));
            }
        }

        for (i, (kind_a, a)) in blocks.iter().enumerate() {
            for (kind_b, b) in &blocks[i + 1..] {
                if a.overlaps(b) {
                    return Err(Error::InvalidConfig(format!(
                        "{kind_a} block at {} overlaps {kind_b} block at {}",
                        a.base(),
                        b.base()
                    )));
                }
            }
        }

        if self.diagnostics.histogram_bins == 0 {
            return Err(Error::InvalidConfig(
                "diagnostics.histogram_bins must be at least 1".to_string(),
            ));
        }

        if self.simulation.random_sequence.as_ref().is_some_and(Vec::is_empty) {
            return Err(Error::InvalidConfig(
                "simulation.random_sequence must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Accelerator base addresses.
///
/// A unit set to `null` is absent from this build of the coprocessor.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitsConfig {
    /// Adder base address.
    #[serde(default = "UnitsConfig::default_adder")]
    pub adder: Option<u64>,

    /// Multiplier base address.
    #[serde(default = "UnitsConfig::default_multiplier")]
    pub multiplier: Option<u64>,

    /// Divider base address.
    #[serde(default = "UnitsConfig::default_divider")]
    pub divider: Option<u64>,

    /// Square-root base address.
    #[serde(default = "UnitsConfig::default_sqrt")]
    pub sqrt: Option<u64>,

    /// Random source base address.
    #[serde(default = "UnitsConfig::default_random")]
    pub random: Option<u64>,
}

impl UnitsConfig {
    const fn default_adder() -> Option<u64> {
        Some(defaults::ADDER_BASE)
    }

    const fn default_multiplier() -> Option<u64> {
        Some(defaults::MULTIPLIER_BASE)
    }

    const fn default_divider() -> Option<u64> {
        Some(defaults::DIVIDER_BASE)
    }

    const fn default_sqrt() -> Option<u64> {
        Some(defaults::SQRT_BASE)
    }

    const fn default_random() -> Option<u64> {
        Some(defaults::RANDOM_BASE)
    }

    /// Base address configured for `kind`.
    pub const fn base(&self, kind: UnitKind) -> Option<u64> {
        match kind {
            UnitKind::Add => self.adder,
            UnitKind::Multiply => self.multiplier,
            UnitKind::Divide => self.divider,
            UnitKind::Sqrt => self.sqrt,
            UnitKind::Random => self.random,
        }
    }

    /// The configured units as a [`UnitMap`].
    pub fn unit_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        for kind in UnitKind::ALL {
            map.set(kind, self.base(kind).map(|b| AddressBlock::new(PhysAddr::new(b))));
        }
        map
    }
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            adder: Self::default_adder(),
            multiplier: Self::default_multiplier(),
            divider: Self::default_divider(),
            sqrt: Self::default_sqrt(),
            random: Self::default_random(),
        }
    }
}

/// Iteration counts for the π estimators.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Number of series terms summed by the Leibniz estimator.
    #[serde(default = "EstimatorConfig::default_leibniz_iterations")]
    pub leibniz_iterations: u32,

    /// Number of points sampled by the Monte-Carlo estimator.
    #[serde(default = "EstimatorConfig::default_monte_carlo_samples")]
    pub monte_carlo_samples: u32,
}

impl EstimatorConfig {
    const fn default_leibniz_iterations() -> u32 {
        defaults::LEIBNIZ_ITERATIONS
    }

    const fn default_monte_carlo_samples() -> u32 {
        defaults::MONTE_CARLO_SAMPLES
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            leibniz_iterations: defaults::LEIBNIZ_ITERATIONS,
            monte_carlo_samples: defaults::MONTE_CARLO_SAMPLES,
        }
    }
}

/// Behaviour of the simulated coprocessor.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Seed for the simulated random unit's generator.
    #[serde(default = "SimulationConfig::default_random_seed")]
    pub random_seed: u64,

    /// Values the simulated random unit replays in order, cycling, instead of generating.
    #[serde(default)]
    pub random_sequence: Option<Vec<f32>>,
}

impl SimulationConfig {
    const fn default_random_seed() -> u64 {
        defaults::RANDOM_SEED
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            random_seed: defaults::RANDOM_SEED,
            random_sequence: None,
        }
    }
}

/// Self-test and random capture settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Equal-width bins over `[0, 1)` for the random histogram.
    #[serde(default = "DiagnosticsConfig::default_histogram_bins")]
    pub histogram_bins: usize,

    /// Samples drawn when capturing the random distribution.
    #[serde(default = "DiagnosticsConfig::default_random_samples")]
    pub random_samples: u32,
}

impl DiagnosticsConfig {
    const fn default_histogram_bins() -> usize {
        defaults::HISTOGRAM_BINS
    }

    const fn default_random_samples() -> u32 {
        defaults::RANDOM_SAMPLES
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            histogram_bins: defaults::HISTOGRAM_BINS,
            random_samples: defaults::RANDOM_SAMPLES,
        }
    }
}
