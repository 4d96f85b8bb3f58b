//! Session-level integration tests

use nesbench_core::cartridge::CartridgeImage;
use nesbench_core::session::Session;
use nesbench_core::testing::{build_test_rom, PatternCore, ScriptedCore, CYCLES_PER_FRAME};

#[test]
fn test_power_on_leaves_core_enabled() {
    let image = CartridgeImage::from_rom(&build_test_rom(1, 1)).unwrap();
    let mut session = Session::new(PatternCore::new(), image);
    session.power_on();

    let pins = session.pins();
    assert!(!pins.reset);
    assert!(pins.ce);
    assert_eq!(session.cycles(), 0);
    assert_eq!(pins.cycle_count, 0);
}

#[test]
fn test_power_on_drives_mapper_flags() {
    let image = CartridgeImage::from_rom(&build_test_rom(1, 1)).unwrap();
    let mut session = Session::new(PatternCore::new(), image);
    session.power_on();
    assert_eq!(session.pins().mapper_flags, 0x8000);
}

#[test]
fn test_script_only_runs_after_power_on() {
    // The scripted core pauses while reset is held, so the power-on
    // cycles consume no script entries.
    let image = CartridgeImage::from_rom(&build_test_rom(1, 1)).unwrap();
    let mut session = Session::new(ScriptedCore::new(Vec::new()), image);
    session.power_on();
    assert!(session.core().samples().is_empty());

    session.run_cycles(4);
    assert_eq!(session.core().samples().len(), 4);
}

#[test]
fn test_run_until_frame_gives_up_without_raster_motion() {
    // A core that never moves its raster position never completes a
    // frame; the budget bounds the loop.
    let image = CartridgeImage::from_rom(&build_test_rom(1, 1)).unwrap();
    let mut session = Session::new(ScriptedCore::new(Vec::new()), image);
    session.power_on();

    assert!(!session.run_until_frame(1000));
    assert_eq!(session.frame_count(), 0);
    assert_eq!(session.cycles(), 1000);
}

#[test]
fn test_frames_and_cycles_stay_in_step() {
    let image = CartridgeImage::from_rom(&build_test_rom(1, 1)).unwrap();
    let mut session = Session::new(PatternCore::new(), image);
    session.power_on();

    for expected in 1..=3u64 {
        assert!(session.run_until_frame(2 * CYCLES_PER_FRAME));
        assert_eq!(session.frame_count(), expected);
    }
}

#[test]
fn test_pattern_core_reaches_program_data() {
    // The pattern core fetches program bytes while it scans; after a
    // frame the CPU data-in pin holds a byte of the patterned payload.
    let image = CartridgeImage::from_rom(&build_test_rom(1, 1)).unwrap();
    let mut session = Session::new(PatternCore::new(), image);
    session.power_on();
    assert!(session.run_until_frame(2 * CYCLES_PER_FRAME));

    let fetched = session.pins().cpu_data_in;
    let addr_low = session.pins().mem_addr as u8;
    // The payload holds the low byte of its own offset, and fetch
    // addresses advance by one, so the answered byte trails the pin
    // address by exactly one.
    assert_eq!(fetched, addr_low.wrapping_sub(1));
}
