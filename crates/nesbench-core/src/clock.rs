//! Clock toggling, cycle counting and the power-on sequence
//!
//! The core is evaluated after every half period: clock low, evaluate,
//! clock high, evaluate. The cycle counter advances once per full period
//! on the rising half and is mirrored to the core's diagnostic counter
//! pin.

use crate::pins::{CorePins, HardwareCore};

/// Full periods driven with reset asserted and chip enable low
pub const RESET_HOLD_CYCLES: u64 = 1;

/// Full periods driven after releasing reset, before chip enable rises
pub const RESET_RELEASE_CYCLES: u64 = 2;

/// Toggles the clock and owns the cycle counter
#[derive(Debug, Clone)]
pub struct ClockDriver {
    cycles: u64,
}

impl ClockDriver {
    /// Create a driver with the counter at zero
    pub fn new() -> Self {
        Self { cycles: 0 }
    }

    /// Full periods driven since the last counter reset
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Drive one full clock period: falling half, rising half, count.
    pub fn step<C: HardwareCore>(&mut self, core: &mut C, pins: &mut CorePins) {
        pins.clk = false;
        core.eval(pins);
        pins.clk = true;
        core.eval(pins);
        self.cycles += 1;
        pins.cycle_count = self.cycles as u32;
    }

    /// Drive a fixed number of full periods
    pub fn run_for_cycles<C: HardwareCore>(
        &mut self,
        core: &mut C,
        pins: &mut CorePins,
        cycles: u64,
    ) {
        for _ in 0..cycles {
            self.step(core, pins);
        }
    }

    /// Zero the cycle counter and its pin mirror
    pub fn reset_cycle_count(&mut self, pins: &mut CorePins) {
        log::debug!("resetting cycle counter: {} -> 0", self.cycles);
        self.cycles = 0;
        pins.cycle_count = 0;
    }

    /// Run the power-on sequence: hold reset with chip enable low, release
    /// reset, then raise chip enable and zero the cycle counter.
    pub fn power_on<C: HardwareCore>(&mut self, core: &mut C, pins: &mut CorePins) {
        pins.reset = true;
        pins.ce = false;
        self.run_for_cycles(core, pins, RESET_HOLD_CYCLES);

        pins.reset = false;
        self.run_for_cycles(core, pins, RESET_RELEASE_CYCLES);

        pins.ce = true;
        self.reset_cycle_count(pins);
    }
}

impl Default for ClockDriver {
    fn default() -> Self {
        Self::new()
    }
}
