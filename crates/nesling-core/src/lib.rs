//! nesling system integration.
//!
//! Wires the CPU, PPU, APU and cartridge mapper behind one [`Nes`]
//! console value:
//!
//! ```no_run
//! use nesling_core::Nes;
//!
//! let rom = std::fs::read("game.nes").expect("read ROM");
//! let mut nes = Nes::new(&rom).expect("boot");
//!
//! loop {
//!     nes.set_buttons(0, 0); // frontend input byte
//!     nes.step_frame();
//!     let _pixels = nes.frame().pixels(); // 256x240 ARGB
//!     let mut audio = [0i16; 1024];
//!     let _n = nes.read_audio(&mut audio);
//! }
//! ```

mod bus;
mod console;
pub mod input;

pub use bus::NesBus;
pub use console::{Nes, NesError, NesOptions, CPU_CYCLES_PER_FRAME, CPU_HZ_NTSC, FRAME_RATE};
pub use input::{Button, Controller};

// Re-exports for frontends.
pub use nesling_apu::{Apu, Region, SampleSink};
pub use nesling_cpu::{Cpu, CpuBus, Status};
pub use nesling_mappers::{create_mapper, Mapper, Mirroring, Rom, RomError};
pub use nesling_ppu::{Frame, Ppu, HEIGHT, WIDTH};
