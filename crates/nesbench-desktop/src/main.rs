//! NES Bench Desktop - windowed presentation loop for the hardware core bench
//!
//! Drives the simulation in cycle batches, samples the keyboard into the
//! two joypad ports at every frame boundary (or sampling interval), and
//! publishes each completed frame to a minifb window.

use clap::Parser;
use minifb::{Key, Window, WindowOptions};
use nesbench_core::cartridge::CartridgeImage;
use nesbench_core::input::{
    Joypad, BUTTON_A, BUTTON_B, BUTTON_DOWN, BUTTON_LEFT, BUTTON_RIGHT, BUTTON_SELECT,
    BUTTON_START, BUTTON_UP,
};
use nesbench_core::session::Session;
use nesbench_core::testing::PatternCore;
use nesbench_core::video::{SCREEN_HEIGHT, SCREEN_WIDTH};
use std::fs;
use std::path::PathBuf;

/// Cycles driven between event drains when no frame boundary arrives first
const SAMPLE_INTERVAL_CYCLES: u64 = 10_000;

/// NES hardware core bench, desktop frontend
#[derive(Parser, Debug)]
#[command(name = "nesbench-desktop")]
#[command(about = "Run the NES hardware core bench in a window", long_about = None)]
struct Args {
    /// Path to the cartridge file
    #[arg(short, long)]
    rom: PathBuf,

    /// Window scale factor (1-4)
    #[arg(short, long, default_value = "2")]
    scale: usize,
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

    let scale = args.scale.clamp(1, 4);
    let mut window = match Window::new(
        "NES Bench",
        SCREEN_WIDTH * scale,
        SCREEN_HEIGHT * scale,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    ) {
        Ok(window) => window,
        Err(e) => {
            eprintln!("Failed to create window: {}", e);
            std::process::exit(1);
        }
    };

    println!("\nStarting simulation...");
    println!("Press ESC or close the window to exit.");

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let frame_done = session.run_until_frame(SAMPLE_INTERVAL_CYCLES);

        session.set_joypads(joypad_state(&window), 0);

        if frame_done {
            if let Err(e) = window.update_with_buffer(session.frame(), SCREEN_WIDTH, SCREEN_HEIGHT)
            {
                eprintln!("Failed to update window: {}", e);
                break;
            }
        } else {
            window.update();
        }
    }

    println!(
        "Session closed after {} frames ({} cycles).",
        session.frame_count(),
        session.cycles()
    );
}

/// Translate the currently held keys into a joypad port byte
fn joypad_state(window: &Window) -> u8 {
    let mut pad = Joypad::new();
    pad.set(BUTTON_A, window.is_key_down(Key::X));
    pad.set(BUTTON_B, window.is_key_down(Key::Z));
    pad.set(BUTTON_SELECT, window.is_key_down(Key::RightShift));
    pad.set(BUTTON_START, window.is_key_down(Key::Enter));
    pad.set(BUTTON_UP, window.is_key_down(Key::Up));
    pad.set(BUTTON_DOWN, window.is_key_down(Key::Down));
    pad.set(BUTTON_LEFT, window.is_key_down(Key::Left));
    pad.set(BUTTON_RIGHT, window.is_key_down(Key::Right));
    pad.bits()
}
