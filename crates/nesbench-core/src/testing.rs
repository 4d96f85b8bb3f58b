//! Scripted and pattern-generating cores for tests and demos
//!
//! The bench is generic over the hardware core; the cores here stand in
//! for a real pin-level simulation. [`ScriptedCore`] replays a fixed
//! per-cycle list of bus operations and records what it sees on its
//! data-in pins. [`PatternCore`] walks NTSC-like raster counters and emits
//! a palette test pattern, which is enough to exercise the whole frame
//! path end to end.

use crate::pins::{ColorSignal, CorePins, HardwareCore};

/// Dots per scanline, including the horizontal blanking period
pub const DOTS_PER_LINE: u16 = 341;

/// Scanlines per frame, including the vertical blanking period
pub const LINES_PER_FRAME: u16 = 262;

/// Full clock periods per frame for the bundled cores
pub const CYCLES_PER_FRAME: u64 = DOTS_PER_LINE as u64 * LINES_PER_FRAME as u64;

/// Build a minimal cartridge file: header plus a patterned payload.
///
/// Program bytes hold the low byte of their payload offset, so tests can
/// predict what any program/character read returns.
pub fn build_test_rom(prg_pages: u8, chr_pages: u8) -> Vec<u8> {
    let payload_len =
        prg_pages as usize * crate::cartridge::PRG_PAGE_LEN + chr_pages as usize * crate::cartridge::CHR_PAGE_LEN;
    let mut rom = Vec::with_capacity(crate::cartridge::HEADER_LEN + payload_len);
    rom.extend_from_slice(b"NES\x1A");
    rom.push(prg_pages);
    rom.push(chr_pages);
    rom.push(0); // flags: mirroring, mapper low nibble
    rom.push(0); // flags: mapper high nibble
    rom.extend_from_slice(&[0u8; 8]);
    rom.extend((0..payload_len).map(|offset| offset as u8));
    rom
}

/// One bus operation asserted on a rising edge
#[derive(Debug, Clone, Copy)]
pub enum ScriptOp {
    /// No request this cycle
    Idle,
    /// CPU read at the given address
    ReadCpu(u32),
    /// Video read at the given address
    ReadVideo(u32),
    /// Write at the given address
    Write(u32, u8),
}

/// Data-in pin values observed on one live rising edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSample {
    /// Live cycle index, counted from the end of the power-on sequence
    pub cycle: u64,
    /// CPU data-in pin at evaluation time
    pub cpu_data_in: u8,
    /// Video data-in pin at evaluation time
    pub ppu_data_in: u8,
}

/// Replays a fixed script of bus operations, one per live cycle.
///
/// The data-in pins are recorded before each operation is asserted, so a
/// test can check exactly which cycle a requested byte became visible.
/// The script pauses while reset is held or chip enable is low, and pads
/// with [`ScriptOp::Idle`] once exhausted.
#[derive(Debug)]
pub struct ScriptedCore {
    script: Vec<ScriptOp>,
    position: usize,
    samples: Vec<PinSample>,
    prev_clk: bool,
}

impl ScriptedCore {
    /// Create a core that will replay `script`
    pub fn new(script: Vec<ScriptOp>) -> Self {
        Self {
            script,
            position: 0,
            samples: Vec::new(),
            prev_clk: false,
        }
    }

    /// Pin samples recorded so far, one per live cycle
    pub fn samples(&self) -> &[PinSample] {
        &self.samples
    }
}

impl HardwareCore for ScriptedCore {
    fn eval(&mut self, pins: &mut CorePins) {
        let rising = pins.clk && !self.prev_clk;
        self.prev_clk = pins.clk;
        if !rising {
            return;
        }

        if pins.reset || !pins.ce {
            pins.cpu_read = false;
            pins.ppu_read = false;
            pins.mem_write = false;
            return;
        }

        self.samples.push(PinSample {
            cycle: self.samples.len() as u64,
            cpu_data_in: pins.cpu_data_in,
            ppu_data_in: pins.ppu_data_in,
        });

        let op = self.script.get(self.position).copied().unwrap_or(ScriptOp::Idle);
        self.position += 1;

        pins.cpu_read = false;
        pins.ppu_read = false;
        pins.mem_write = false;
        match op {
            ScriptOp::Idle => {}
            ScriptOp::ReadCpu(addr) => {
                pins.mem_addr = addr;
                pins.cpu_read = true;
            }
            ScriptOp::ReadVideo(addr) => {
                pins.mem_addr = addr;
                pins.ppu_read = true;
            }
            ScriptOp::Write(addr, value) => {
                pins.mem_addr = addr;
                pins.mem_write = true;
                pins.mem_write_data = value;
            }
        }
    }
}

/// A raster generator standing in for the real video pipeline.
///
/// Walks 341x262 dot/scanline counters one dot per clock period, emits a
/// luma/hue test pattern across the visible window, and issues a program
/// fetch every eighth dot to keep bus traffic flowing.
#[derive(Debug)]
pub struct PatternCore {
    prev_clk: bool,
    dot: u16,
    line: u16,
    fetch_addr: u32,
}

impl PatternCore {
    /// Create a core at raster position (0, 0)
    pub fn new() -> Self {
        Self {
            prev_clk: false,
            dot: 0,
            line: 0,
            fetch_addr: 0,
        }
    }
}

impl HardwareCore for PatternCore {
    fn eval(&mut self, pins: &mut CorePins) {
        let rising = pins.clk && !self.prev_clk;
        self.prev_clk = pins.clk;
        if !rising {
            return;
        }

        if pins.reset || !pins.ce {
            self.dot = 0;
            self.line = 0;
            self.fetch_addr = 0;
            pins.cpu_read = false;
            pins.ppu_read = false;
            pins.mem_write = false;
            return;
        }

        pins.scanline = self.line;
        pins.dot = self.dot;
        pins.color = ColorSignal::Composite {
            luma: ((self.line / 64) & 0x03) as u8,
            hue: ((self.dot / 16) & 0x0F) as u8,
        };

        pins.cpu_read = false;
        pins.ppu_read = false;
        pins.mem_write = false;
        if self.dot % 8 == 0 {
            pins.mem_addr = self.fetch_addr;
            pins.cpu_read = true;
            self.fetch_addr = (self.fetch_addr + 1) & 0x3FFF;
        }

        self.dot += 1;
        if self.dot == DOTS_PER_LINE {
            self.dot = 0;
            self.line += 1;
            if self.line == LINES_PER_FRAME {
                self.line = 0;
            }
        }
    }
}

impl Default for PatternCore {
    fn default() -> Self {
        Self::new()
    }
}
