//! Session object tying the bench components together
//!
//! A session owns the hardware core, its pin set, the cartridge backing
//! store and the clock/bus/video components. All mutable bench state lives
//! here, so several independent sessions can run side by side and tests
//! stay deterministic.

use crate::bus::BusAdapter;
use crate::cartridge::CartridgeImage;
use crate::clock::ClockDriver;
use crate::pins::{CorePins, HardwareCore};
use crate::video::FrameAssembler;

/// One simulation session: a hardware core plus the bench state driving it
#[derive(Debug)]
pub struct Session<C> {
    core: C,
    pins: CorePins,
    image: CartridgeImage,
    bus: BusAdapter,
    clock: ClockDriver,
    video: FrameAssembler,
}

impl<C: HardwareCore> Session<C> {
    /// Create a session for a core and a loaded cartridge
    pub fn new(core: C, image: CartridgeImage) -> Self {
        Self {
            core,
            pins: CorePins::new(),
            image,
            bus: BusAdapter::new(),
            clock: ClockDriver::new(),
            video: FrameAssembler::new(),
        }
    }

    /// Drive the power-on sequence and hand the mapper flags to the core.
    ///
    /// Afterwards the cycle counter reads zero and the core is enabled for
    /// continuous operation.
    pub fn power_on(&mut self) {
        self.pins.mapper_flags = self.image.mapper_flags().bits();
        self.clock.power_on(&mut self.core, &mut self.pins);
    }

    /// Drive one full clock period.
    ///
    /// Order per cycle: answer the previous cycle's read request, toggle
    /// the clock through both halves, service the new bus request, sample
    /// the video output.
    pub fn step_cycle(&mut self) {
        self.bus.supply_pending(&mut self.pins, &self.image);
        self.clock.step(&mut self.core, &mut self.pins);
        self.bus.service(&self.pins, &mut self.image);
        self.video.sample(&self.pins);
    }

    /// Drive a fixed number of full periods
    pub fn run_cycles(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.step_cycle();
        }
    }

    /// Drive cycles until the next frame completes, up to `max_cycles`.
    ///
    /// Returns true when a frame completed within the budget.
    pub fn run_until_frame(&mut self, max_cycles: u64) -> bool {
        let target = self.video.frame_count() + 1;
        for _ in 0..max_cycles {
            self.step_cycle();
            if self.video.frame_count() >= target {
                return true;
            }
        }
        false
    }

    /// Drive the joypad port pins
    pub fn set_joypads(&mut self, joypad1: u8, joypad2: u8) {
        self.pins.joypad1 = joypad1;
        self.pins.joypad2 = joypad2;
    }

    /// The most recently completed frame
    pub fn frame(&self) -> &[u32] {
        self.video.completed()
    }

    /// Completed frames since power-on
    pub fn frame_count(&self) -> u64 {
        self.video.frame_count()
    }

    /// Full clock periods since the power-on sequence finished
    pub fn cycles(&self) -> u64 {
        self.clock.cycles()
    }

    /// Get the hardware core
    pub fn core(&self) -> &C {
        &self.core
    }

    /// Get the hardware core mutably
    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    /// Get the current pin state
    pub fn pins(&self) -> &CorePins {
        &self.pins
    }

    /// Get the cartridge backing store
    pub fn image(&self) -> &CartridgeImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{build_test_rom, ScriptedCore};

    #[test]
    fn test_joypad_pins() {
        let image = CartridgeImage::from_rom(&build_test_rom(1, 1)).unwrap();
        let mut session = Session::new(ScriptedCore::new(Vec::new()), image);
        session.set_joypads(0x81, 0x10);
        assert_eq!(session.pins().joypad1, 0x81);
        assert_eq!(session.pins().joypad2, 0x10);
    }

    #[test]
    fn test_cycle_counter_advances() {
        let image = CartridgeImage::from_rom(&build_test_rom(1, 1)).unwrap();
        let mut session = Session::new(ScriptedCore::new(Vec::new()), image);
        session.power_on();
        assert_eq!(session.cycles(), 0);
        session.run_cycles(10);
        assert_eq!(session.cycles(), 10);
        assert_eq!(session.pins().cycle_count, 10);
    }
}
