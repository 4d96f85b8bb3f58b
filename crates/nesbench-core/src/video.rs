//! Frame assembly and color decoding
//!
//! One color sample is consumed per rising clock edge. Samples inside the
//! visible raster window land in the in-progress frame buffer; samples in
//! the border and blanking periods are discarded. When the raster position
//! reaches the frame boundary the buffer pair swaps, exactly once per
//! completed frame, so the presentation side never reads the buffer being
//! written.

use crate::pins::{ColorSignal, CorePins};

/// Visible frame width in dots
pub const SCREEN_WIDTH: usize = 256;

/// Visible frame height in scanlines
pub const SCREEN_HEIGHT: usize = 240;

/// System color palette (64 colors), indexed by `luma * 16 + hue`.
/// Each color is represented as (R, G, B).
pub const SYSTEM_PALETTE: [(u8, u8, u8); 64] = [
    (84, 84, 84),
    (0, 30, 116),
    (8, 16, 144),
    (48, 0, 136),
    (68, 0, 100),
    (92, 0, 48),
    (84, 4, 0),
    (60, 24, 0),
    (32, 42, 0),
    (8, 58, 0),
    (0, 64, 0),
    (0, 60, 0),
    (0, 50, 60),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
    (152, 150, 152),
    (8, 76, 196),
    (48, 50, 236),
    (92, 30, 228),
    (136, 20, 176),
    (160, 20, 100),
    (152, 34, 32),
    (120, 60, 0),
    (84, 90, 0),
    (40, 114, 0),
    (8, 124, 0),
    (0, 118, 40),
    (0, 102, 120),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
    (236, 238, 236),
    (76, 154, 236),
    (120, 124, 236),
    (176, 98, 236),
    (228, 84, 236),
    (236, 88, 180),
    (236, 106, 100),
    (212, 136, 32),
    (160, 170, 0),
    (116, 196, 0),
    (76, 208, 32),
    (56, 204, 108),
    (56, 180, 204),
    (60, 60, 60),
    (0, 0, 0),
    (0, 0, 0),
    (236, 238, 236),
    (168, 204, 236),
    (188, 188, 236),
    (212, 178, 236),
    (236, 174, 236),
    (236, 174, 212),
    (236, 180, 176),
    (228, 196, 144),
    (204, 210, 120),
    (180, 222, 120),
    (168, 226, 144),
    (152, 226, 180),
    (160, 214, 228),
    (160, 162, 160),
    (0, 0, 0),
    (0, 0, 0),
];

/// Decode the core's color output into 8-bit RGB components.
///
/// Raw 2-bit channels scale linearly to the full range; luma/hue pairs
/// index the system palette.
pub fn decode_color(color: &ColorSignal) -> (u8, u8, u8) {
    match *color {
        ColorSignal::Rgb { red, green, blue } => ((red & 3) * 85, (green & 3) * 85, (blue & 3) * 85),
        ColorSignal::Composite { luma, hue } => {
            SYSTEM_PALETTE[(luma as usize & 0x03) * 16 + (hue as usize & 0x0F)]
        }
    }
}

/// Pack RGB components into a fully opaque pixel (alpha, blue, green, red).
pub fn pack_pixel(red: u8, green: u8, blue: u8) -> u32 {
    0xFF00_0000 | (u32::from(blue) << 16) | (u32::from(green) << 8) | u32::from(red)
}

/// Assembles the core's per-cycle color samples into double-buffered
/// frames.
#[derive(Debug, Clone)]
pub struct FrameAssembler {
    /// Front/back pixel buffer pair
    buffers: [Vec<u32>; 2],
    /// Index of the buffer currently being written
    back: usize,
    /// Completed frames since power-on
    frame_count: u64,
    /// Edge-detect latch for the frame boundary position
    at_boundary: bool,
}

impl FrameAssembler {
    /// Create an assembler with two blank buffers
    pub fn new() -> Self {
        Self {
            buffers: [
                vec![pack_pixel(0, 0, 0); SCREEN_WIDTH * SCREEN_HEIGHT],
                vec![pack_pixel(0, 0, 0); SCREEN_WIDTH * SCREEN_HEIGHT],
            ],
            back: 0,
            frame_count: 0,
            at_boundary: false,
        }
    }

    /// Completed frames since power-on
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The most recently completed frame
    pub fn completed(&self) -> &[u32] {
        &self.buffers[self.back ^ 1]
    }

    /// Consume the raster position and color output for one rising edge.
    ///
    /// Visible-window samples are written into the in-progress buffer; the
    /// buffer pair swaps when the raster position enters the frame
    /// boundary (scanline = frame height, dot = 0).
    pub fn sample(&mut self, pins: &CorePins) {
        let line = pins.scanline as usize;
        let dot = pins.dot as usize;

        if line < SCREEN_HEIGHT && dot < SCREEN_WIDTH {
            let (red, green, blue) = decode_color(&pins.color);
            self.buffers[self.back][line * SCREEN_WIDTH + dot] = pack_pixel(red, green, blue);
        }

        let boundary = line == SCREEN_HEIGHT && dot == 0;
        if boundary && !self.at_boundary {
            self.back ^= 1;
            self.frame_count += 1;
        }
        self.at_boundary = boundary;
    }
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster_pins(scanline: u16, dot: u16, color: ColorSignal) -> CorePins {
        let mut pins = CorePins::new();
        pins.scanline = scanline;
        pins.dot = dot;
        pins.color = color;
        pins
    }

    #[test]
    fn test_rgb_channel_scaling() {
        let color = ColorSignal::Rgb {
            red: 3,
            green: 2,
            blue: 1,
        };
        assert_eq!(decode_color(&color), (255, 170, 85));
    }

    #[test]
    fn test_composite_indexes_palette() {
        // luma 2, hue 5 selects entry 37.
        let color = ColorSignal::Composite { luma: 2, hue: 5 };
        assert_eq!(decode_color(&color), SYSTEM_PALETTE[37]);
    }

    #[test]
    fn test_pixel_packing() {
        assert_eq!(pack_pixel(0x11, 0x22, 0x33), 0xFF33_2211);
    }

    #[test]
    fn test_visible_sample_lands_in_back_buffer() {
        let mut assembler = FrameAssembler::new();
        let pins = raster_pins(10, 20, ColorSignal::Rgb { red: 3, green: 0, blue: 0 });
        assembler.sample(&pins);
        // Not swapped yet: the write is invisible to the completed buffer.
        assert_eq!(assembler.completed()[10 * SCREEN_WIDTH + 20], pack_pixel(0, 0, 0));

        let boundary = raster_pins(SCREEN_HEIGHT as u16, 0, ColorSignal::default());
        assembler.sample(&boundary);
        assert_eq!(
            assembler.completed()[10 * SCREEN_WIDTH + 20],
            pack_pixel(255, 0, 0)
        );
    }

    #[test]
    fn test_blanking_samples_discarded() {
        let mut assembler = FrameAssembler::new();
        let before = assembler.completed().to_vec();

        assembler.sample(&raster_pins(241, 100, ColorSignal::Rgb { red: 3, green: 3, blue: 3 }));
        assembler.sample(&raster_pins(100, 300, ColorSignal::Rgb { red: 3, green: 3, blue: 3 }));

        let boundary = raster_pins(SCREEN_HEIGHT as u16, 0, ColorSignal::default());
        assembler.sample(&boundary);
        assert_eq!(assembler.completed(), &before[..]);
    }

    #[test]
    fn test_boundary_swaps_exactly_once() {
        let mut assembler = FrameAssembler::new();
        let boundary = raster_pins(SCREEN_HEIGHT as u16, 0, ColorSignal::default());
        // The core can hold the raster position across several bench
        // cycles; only the transition into the boundary may swap.
        assembler.sample(&boundary);
        assembler.sample(&boundary);
        assembler.sample(&boundary);
        assert_eq!(assembler.frame_count(), 1);

        // Leaving and re-entering the boundary swaps again.
        assembler.sample(&raster_pins(0, 0, ColorSignal::default()));
        assembler.sample(&boundary);
        assert_eq!(assembler.frame_count(), 2);
    }

    #[test]
    fn test_boundary_requires_dot_zero() {
        let mut assembler = FrameAssembler::new();
        assembler.sample(&raster_pins(SCREEN_HEIGHT as u16, 5, ColorSignal::default()));
        assert_eq!(assembler.frame_count(), 0);
    }
}
