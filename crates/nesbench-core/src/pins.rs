//! Pin-level interface to the hardware core
//!
//! The hardware core is an opaque clocked state machine. The bench drives
//! its clock, reset and input pins, evaluates it after every clock toggle,
//! and reads back the bus request and video output pins it asserts.

/// Color output asserted by the core for the current raster position.
///
/// Depending on the core build, the video stage emits either three raw
/// 2-bit color channels or a luma/hue pair indexing the 64-entry system
/// palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSignal {
    /// Raw 2-bit red/green/blue channels
    Rgb { red: u8, green: u8, blue: u8 },
    /// Luma (2 bits) and hue (4 bits) pair
    Composite { luma: u8, hue: u8 },
}

impl Default for ColorSignal {
    fn default() -> Self {
        ColorSignal::Rgb {
            red: 0,
            green: 0,
            blue: 0,
        }
    }
}

/// The full pin set exchanged with the hardware core on every evaluation.
#[derive(Debug, Clone, Default)]
pub struct CorePins {
    // Driven by the bench.
    /// Clock signal, toggled every half period
    pub clk: bool,
    /// Reset, held high during the initial power-on phase
    pub reset: bool,
    /// Chip enable, raised once the power-on sequence completes
    pub ce: bool,
    /// Diagnostic mirror of the bench cycle counter
    pub cycle_count: u32,
    /// Mapper flags word, driven once before simulation starts
    pub mapper_flags: u16,
    /// Data byte answering a CPU read, valid one cycle after the request
    pub cpu_data_in: u8,
    /// Data byte answering a video read, valid one cycle after the request
    pub ppu_data_in: u8,
    /// Joypad 1 button state
    pub joypad1: u8,
    /// Joypad 2 button state
    pub joypad2: u8,

    // Driven by the core.
    /// Memory address for the current bus request
    pub mem_addr: u32,
    /// CPU read intent
    pub cpu_read: bool,
    /// Video read intent
    pub ppu_read: bool,
    /// Write intent
    pub mem_write: bool,
    /// Data byte for a write request
    pub mem_write_data: u8,
    /// Current raster scanline
    pub scanline: u16,
    /// Current dot within the scanline
    pub dot: u16,
    /// Color output for the current raster position
    pub color: ColorSignal,
}

impl CorePins {
    /// Create a pin set with everything deasserted
    pub fn new() -> Self {
        Self::default()
    }
}

/// A clocked hardware core evaluated once per clock toggle.
///
/// `eval` is called twice per full clock period, once after the falling
/// half and once after the rising half, mirroring how a synchronous
/// simulation settles its combinational outputs after every edge.
pub trait HardwareCore {
    /// Settle the core's outputs for the current pin state
    fn eval(&mut self, pins: &mut CorePins);
}
