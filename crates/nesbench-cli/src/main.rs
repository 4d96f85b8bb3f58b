//! NES Bench CLI - headless runner for the hardware core bench
//!
//! Runs the simulation for a fixed number of frames with no window, then
//! optionally dumps the last completed frame to a PNG file and prints the
//! session state.

use clap::Parser;
use image::RgbaImage;
use nesbench_core::cartridge::CartridgeImage;
use nesbench_core::session::Session;
use nesbench_core::testing::{PatternCore, CYCLES_PER_FRAME};
use nesbench_core::video::{SCREEN_HEIGHT, SCREEN_WIDTH};
use std::fs;
use std::path::{Path, PathBuf};

/// Cycle budget for one frame before the run is treated as stalled
const MAX_FRAME_CYCLES: u64 = 2 * CYCLES_PER_FRAME;

/// NES hardware core bench, headless frontend
#[derive(Parser, Debug)]
#[command(name = "nesbench-cli")]
#[command(about = "Run the NES hardware core bench without a window", long_about = None)]
struct Args {
    /// Path to the cartridge file
    #[arg(short, long)]
    rom: PathBuf,

    /// Number of frames to run
    #[arg(short, long, default_value = "60")]
    frames: u64,

    /// Write the last completed frame to this PNG file
    #[arg(short = 'o', long)]
    dump_frame: Option<PathBuf>,

    /// Print session state after the run
    #[arg(short = 's', long)]
    dump_state: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let rom_data = match fs::read(&args.rom) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Failed to read cartridge file: {}", e);
            std::process::exit(1);
        }
    };

    let image = match CartridgeImage::from_rom(&rom_data) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Failed to load cartridge: {}", e);
            std::process::exit(1);
        }
    };

    println!("Loaded cartridge:");
    println!("  Program data: {} bytes", image.program_len());
    println!("  Total backing store: {} bytes", image.total_len());
    println!("  Mapper: {}", image.header().mapper);
    println!("  Mapper flags: {:#06X}", image.mapper_flags().bits());

    let mut session = Session::new(PatternCore::new(), image);
    session.power_on();

    println!("\nRunning {} frames...", args.frames);

    for _ in 0..args.frames {
        if !session.run_until_frame(MAX_FRAME_CYCLES) {
            eprintln!(
                "No frame completed within {} cycles, giving up",
                MAX_FRAME_CYCLES
            );
            std::process::exit(1);
        }
        log::debug!(
            "frame {} complete at cycle {}",
            session.frame_count(),
            session.cycles()
        );
    }

    println!(
        "Completed {} frames in {} cycles.",
        session.frame_count(),
        session.cycles()
    );

    if let Some(path) = &args.dump_frame {
        if let Err(e) = save_frame(session.frame(), path) {
            eprintln!("Failed to write frame image: {}", e);
            std::process::exit(1);
        }
        println!("Wrote frame to {}", path.display());
    }

    if args.dump_state {
        dump_session_state(&session);
    }
}

/// Write a completed frame (packed alpha-blue-green-red) as a PNG
fn save_frame(frame: &[u32], path: &Path) -> Result<(), image::ImageError> {
    let mut out = RgbaImage::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
    for (index, pixel) in frame.iter().enumerate() {
        let x = (index % SCREEN_WIDTH) as u32;
        let y = (index / SCREEN_WIDTH) as u32;
        let red = (pixel & 0xFF) as u8;
        let green = ((pixel >> 8) & 0xFF) as u8;
        let blue = ((pixel >> 16) & 0xFF) as u8;
        let alpha = ((pixel >> 24) & 0xFF) as u8;
        out.put_pixel(x, y, image::Rgba([red, green, blue, alpha]));
    }
    out.save(path)
}

fn dump_session_state<C: nesbench_core::pins::HardwareCore>(session: &Session<C>) {
    let pins = session.pins();
    println!("\nSession state:");
    println!("  Cycles: {}", session.cycles());
    println!("  Frames: {}", session.frame_count());
    println!("  Scanline: {}", pins.scanline);
    println!("  Dot: {}", pins.dot);
    println!("  Bus address: {:#08X}", pins.mem_addr);
}
