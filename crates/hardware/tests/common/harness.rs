//! Simulated coprocessors for tests.

use coproc_core::config::Config;
use coproc_core::soc::{Bus, System};
use coproc_core::units::{Coprocessor, UnitKind};

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// Coprocessor over the simulator with the default memory map and seeded random unit.
pub fn sim_coprocessor() -> Coprocessor<Bus> {
    sim_with(&Config::default())
}

/// Coprocessor over the simulator described by `config`.
pub fn sim_with(config: &Config) -> Coprocessor<Bus> {
    init_tracing();
    System::new(config).into_coprocessor()
}

/// Coprocessor whose random unit replays `values`.
pub fn scripted(values: &[f32]) -> Coprocessor<Bus> {
    let mut config = Config::default();
    config.simulation.random_sequence = Some(values.to_vec());
    sim_with(&config)
}

/// Coprocessor with every unit present except `missing`.
pub fn without(missing: UnitKind) -> Coprocessor<Bus> {
    let mut config = Config::default();
    match missing {
        UnitKind::Add => config.units.adder = None,
        UnitKind::Multiply => config.units.multiplier = None,
        UnitKind::Divide => config.units.divider = None,
        UnitKind::Sqrt => config.units.sqrt = None,
        UnitKind::Random => config.units.random = None,
    }
    sim_with(&config)
}
