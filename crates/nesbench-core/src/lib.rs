//! NES Bench Core - host-side logic for driving a simulated NES hardware core
//!
//! This crate sits between a cycle-accurate, pin-level hardware core and the
//! outside world. It owns the cartridge backing storage, decodes the memory
//! addresses the core asserts each clock edge, honors the one-cycle read
//! latency of a synchronous memory bus, and assembles the core's pixel
//! output into double-buffered frames. It contains no GUI or I/O
//! dependencies.

#![forbid(unsafe_code)]

/// Pin-level interface to the hardware core
pub mod pins;
/// Cartridge image loading and mapper flags
pub mod cartridge;
/// Address decoding and bus servicing
pub mod bus;
/// Clock toggling, cycle counting and the power-on sequence
pub mod clock;
/// Frame assembly and color decoding
pub mod video;
/// Joypad button state
pub mod input;
/// Session object tying the bench components together
pub mod session;
/// Scripted and pattern-generating cores for tests and demos
pub mod testing;
