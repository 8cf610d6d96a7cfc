//! Simulated coprocessor construction.
//!
//! This module builds the simulated programmable-logic side from configuration. It performs:
//! 1. **Bus setup:** Creates the interconnect.
//! 2. **Device registration:** Instantiates one simulated accelerator per configured unit.
//! 3. **Random source:** Seeds the random unit or loads its scripted sequence.

use tracing::debug;

use crate::config::Config;
use crate::soc::devices::{FloatBinaryUnit, FloatRandomUnit, FloatSqrtUnit};
use crate::soc::interconnect::Bus;
use crate::units::{BinaryOp, Coprocessor, UnitKind, UnitMap};

/// A simulated coprocessor: the bus with its devices and the map used to reach them.
#[derive(Debug)]
pub struct System {
    /// Interconnect holding the simulated accelerators.
    pub bus: Bus,
    /// Units present on the bus.
    pub units: UnitMap,
}

impl System {
    /// Builds the simulated accelerators described by `config`.
    ///
    /// Units configured as absent get no device; accesses to their addresses are unclaimed.
    pub fn new(config: &Config) -> Self {
        let units = config.units.unit_map();
        let mut bus = Bus::new();

        for (kind, block) in units.iter() {
            let base = block.base().val();
            match kind {
                UnitKind::Add => bus.add_device(Box::new(FloatBinaryUnit::new(base, BinaryOp::Add))),
                UnitKind::Multiply => {
                    bus.add_device(Box::new(FloatBinaryUnit::new(base, BinaryOp::Multiply)));
                }
                UnitKind::Divide => {
                    bus.add_device(Box::new(FloatBinaryUnit::new(base, BinaryOp::Divide)));
                }
                UnitKind::Sqrt => bus.add_device(Box::new(FloatSqrtUnit::new(base))),
                UnitKind::Random => {
                    let random = match &config.simulation.random_sequence {
                        Some(values) => FloatRandomUnit::from_values(base, values),
                        None => FloatRandomUnit::new(base, config.simulation.random_seed),
                    };
                    bus.add_device(Box::new(random));
                }
            }
            debug!("sim: {} unit at {}", kind, block.base());
        }

        Self { bus, units }
    }

    /// Wraps the bus in a coprocessor addressing the simulated units.
    pub fn into_coprocessor(self) -> Coprocessor<Bus> {
        Coprocessor::new(self.bus, self.units)
    }
}
