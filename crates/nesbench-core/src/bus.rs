//! Address decoding and bus servicing
//!
//! The hardware core asserts one memory address per rising edge together
//! with at most one of the CPU-read, video-read or write intents. The
//! address space is partitioned into fixed high windows, matched most
//! significant range first:
//!
//! ```text
//! >= 0x10C000  cartridge RAM (unsupported, diagnostic only)
//! >= 0x108000  CPU work RAM
//! >= 0x104000  video RAM
//! >= 0x100000  character ROM
//! else         program data, offset = address
//! ```
//!
//! Reads follow the one-cycle latency of a synchronous memory: a request
//! observed at cycle N is answered on the matching data-in pin at the
//! start of cycle N+1, before that cycle's evaluation. Writes land within
//! their own cycle.

use crate::cartridge::CartridgeImage;
use crate::pins::CorePins;

/// Start of the character ROM window
pub const CHR_WINDOW_BASE: u32 = 0x0010_0000;

/// Start of the video RAM window
pub const VRAM_WINDOW_BASE: u32 = 0x0010_4000;

/// Start of the CPU work RAM window
pub const WRAM_WINDOW_BASE: u32 = 0x0010_8000;

/// Start of the unsupported cartridge RAM window
pub const CART_RAM_WINDOW_BASE: u32 = 0x0010_C000;

/// Address mask inside the character ROM window
pub const CHR_ADDR_MASK: u32 = 0x1FFF;

/// Address mask inside the video RAM window
pub const VRAM_ADDR_MASK: u32 = 0x0FFF;

/// Address mask inside the work RAM window
pub const WRAM_ADDR_MASK: u32 = 0x0FFF;

/// Backing region selected by address decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Program data (PRG + CHR pages), linear from offset 0
    Program,
    /// Character ROM pages, based past the program pages
    CharacterRom,
    /// Video RAM
    VideoRam,
    /// CPU work RAM
    WorkRam,
    /// Cartridge RAM, unsupported
    CartridgeRam,
}

/// One address window: everything at or above `base` (up to the next
/// higher window) selects `region`, with the low bits masked by `mask`.
struct Window {
    base: u32,
    mask: u32,
    region: Region,
}

/// Decode windows in fixed priority order, highest base first.
const WINDOWS: [Window; 4] = [
    Window {
        base: CART_RAM_WINDOW_BASE,
        mask: 0,
        region: Region::CartridgeRam,
    },
    Window {
        base: WRAM_WINDOW_BASE,
        mask: WRAM_ADDR_MASK,
        region: Region::WorkRam,
    },
    Window {
        base: VRAM_WINDOW_BASE,
        mask: VRAM_ADDR_MASK,
        region: Region::VideoRam,
    },
    Window {
        base: CHR_WINDOW_BASE,
        mask: CHR_ADDR_MASK,
        region: Region::CharacterRom,
    },
];

fn region_base(region: Region, image: &CartridgeImage) -> usize {
    match region {
        Region::Program => 0,
        Region::CharacterRom => image.prg_rom_len(),
        Region::VideoRam => image.video_ram_base(),
        Region::WorkRam => image.work_ram_base(),
        Region::CartridgeRam => image.total_len(),
    }
}

/// Resolve an address into a backing region and storage offset.
pub fn decode(address: u32, image: &CartridgeImage) -> (Region, usize) {
    for window in WINDOWS.iter() {
        if address >= window.base {
            let offset = region_base(window.region, image) + (address & window.mask) as usize;
            return (window.region, offset);
        }
    }
    (Region::Program, address as usize)
}

/// Kind of a pending read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadKind {
    Cpu,
    Video,
}

/// One-cycle memory of an outstanding read request.
///
/// At most one read is outstanding at any time: the latch is set when a
/// read intent is observed and consumed on the following cycle when the
/// datum is placed on the matching input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRead {
    Idle,
    Pending { kind: ReadKind, offset: usize },
}

/// Decodes bus requests against the cartridge image and tracks the
/// pending read latch.
#[derive(Debug, Clone)]
pub struct BusAdapter {
    pending: PendingRead,
}

impl BusAdapter {
    /// Create an adapter with no outstanding request
    pub fn new() -> Self {
        Self {
            pending: PendingRead::Idle,
        }
    }

    /// Current latch state
    pub fn pending(&self) -> PendingRead {
        self.pending
    }

    /// Answer the previous cycle's read request, if any.
    ///
    /// Called at the start of a cycle, before the core is evaluated, so
    /// the datum is visible exactly one cycle after the request.
    pub fn supply_pending(&mut self, pins: &mut CorePins, image: &CartridgeImage) {
        if let PendingRead::Pending { kind, offset } = self.pending {
            let byte = image.read(offset);
            match kind {
                ReadKind::Cpu => pins.cpu_data_in = byte,
                ReadKind::Video => pins.ppu_data_in = byte,
            }
            self.pending = PendingRead::Idle;
        }
    }

    /// Inspect the request pins after evaluation: perform a write
    /// immediately, or latch a read for the next cycle.
    pub fn service(&mut self, pins: &CorePins, image: &mut CartridgeImage) {
        if pins.mem_write {
            let (region, offset) = decode(pins.mem_addr, image);
            if region == Region::CartridgeRam {
                log::warn!(
                    "unsupported cartridge RAM write at address {:#08X}",
                    pins.mem_addr
                );
            } else {
                image.write(offset, pins.mem_write_data);
            }
            self.pending = PendingRead::Idle;
        } else if pins.cpu_read || pins.ppu_read {
            let (region, offset) = decode(pins.mem_addr, image);
            if region == Region::CartridgeRam {
                log::warn!(
                    "unsupported cartridge RAM read at address {:#08X}",
                    pins.mem_addr
                );
                self.pending = PendingRead::Idle;
            } else {
                let kind = if pins.cpu_read {
                    ReadKind::Cpu
                } else {
                    ReadKind::Video
                };
                self.pending = PendingRead::Pending { kind, offset };
            }
        } else {
            self.pending = PendingRead::Idle;
        }
    }
}

impl Default for BusAdapter {
    fn default() -> Self {
        Self::new()
    }
}
