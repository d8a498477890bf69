//! The console aggregate and its stepping loop.
//!
//! One [`Nes`] value owns the CPU, bus (PPU, APU, mapper, RAM,
//! controllers) and the framebuffer, so multiple instances can coexist
//! and nothing hides in globals. The ordering contract per step is:
//! one CPU instruction, then `3 * delta` PPU dots, then `delta` APU
//! cycles, so the PPU and APU observe the instruction's side effects.

use nesling_apu::{Apu, Region};
use nesling_cpu::Cpu;
use nesling_mappers::{create_mapper, Rom, RomError};
use nesling_ppu::Frame;

use crate::bus::NesBus;

/// NTSC CPU clock in Hz.
pub const CPU_HZ_NTSC: u32 = 1_789_773;
/// Target frame cadence.
pub const FRAME_RATE: f64 = 60.0988;
/// CPU cycles in one NTSC frame, rounded.
pub const CPU_CYCLES_PER_FRAME: u64 = 29_780;

/// `step_frame` gives up after this many frames' worth of cycles
/// without a frame edge, so a wedged program cannot hang the host.
const WATCHDOG_FRAMES: u64 = 10;

/// Console construction errors.
#[derive(Debug, thiserror::Error)]
pub enum NesError {
    /// ROM image failed to parse or uses unsupported hardware.
    #[error(transparent)]
    Rom(#[from] RomError),
}

/// Tunables the host may set before power-on.
#[derive(Debug, Clone, Copy)]
pub struct NesOptions {
    /// Console region (drives APU clocking).
    pub region: Region,
    /// Audio output rate in Hz.
    pub sample_rate_hz: u32,
    /// Capacity of the audio sample ring.
    pub buffer_frames: usize,
}

impl Default for NesOptions {
    fn default() -> Self {
        Self {
            region: Region::Ntsc,
            sample_rate_hz: 48_000,
            buffer_frames: 1024,
        }
    }
}

/// A powered NES console.
pub struct Nes {
    cpu: Cpu,
    bus: NesBus,
    frame: Frame,
}

impl Nes {
    /// Boot from raw iNES file bytes with default options.
    ///
    /// # Errors
    ///
    /// Fails when the image does not parse or names an unsupported
    /// mapper; no partial console is built.
    pub fn new(rom_bytes: &[u8]) -> Result<Self, NesError> {
        Self::with_options(rom_bytes, NesOptions::default())
    }

    /// Boot from raw iNES file bytes.
    ///
    /// # Errors
    ///
    /// Same as [`Nes::new`].
    pub fn with_options(rom_bytes: &[u8], options: NesOptions) -> Result<Self, NesError> {
        let rom = Rom::load(rom_bytes)?;
        Self::from_rom(&rom, options)
    }

    /// Boot from an already-parsed ROM.
    ///
    /// # Errors
    ///
    /// Fails for unsupported mappers.
    pub fn from_rom(rom: &Rom, options: NesOptions) -> Result<Self, NesError> {
        let mapper = create_mapper(rom)?;
        log::info!(
            "power-on: mapper {} ({}), {:?}",
            mapper.id(),
            mapper.name(),
            options.region
        );
        let apu = Apu::new(options.region, options.sample_rate_hz, options.buffer_frames);
        let mut bus = NesBus::new(mapper, apu);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        Ok(Self {
            cpu,
            bus,
            frame: Frame::new(),
        })
    }

    /// Reset the whole machine, as the front-panel button would.
    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
    }

    /// Execute one CPU instruction and bring the PPU and APU up to
    /// date. Returns the CPU cycles consumed.
    pub fn step(&mut self) -> u64 {
        // Interrupt lines are sampled at instruction boundaries.
        if self.bus.irq_level() {
            self.cpu.assert_irq();
        } else {
            self.cpu.clear_irq();
        }

        let mut delta = self.cpu.step(&mut self.bus);

        // An OAM DMA triggered by this instruction stalls the CPU; the
        // stall is real time for the PPU and APU as well.
        let stall = self.bus.take_dma_stall();
        if stall > 0 {
            self.cpu.cycles += u64::from(stall);
            delta += u64::from(stall);
        }

        self.bus.tick(delta);

        // Collect NMI edges raised by register writes or the VBlank dot.
        if self.bus.ppu.take_nmi() {
            self.cpu.raise_nmi();
        }

        delta
    }

    /// Run until the PPU finishes the current frame, then render it.
    /// Returns the CPU cycles consumed.
    pub fn step_frame(&mut self) -> u64 {
        let target = self.bus.ppu.frame() + 1;
        let start = self.cpu.cycles;
        let budget = WATCHDOG_FRAMES * CPU_CYCLES_PER_FRAME;

        while self.bus.ppu.frame() < target {
            self.step();
            if self.cpu.cycles - start > budget {
                log::warn!("frame watchdog tripped after {budget} cycles");
                break;
            }
        }

        self.bus.render_frame(&mut self.frame);
        self.cpu.cycles - start
    }

    /// Run `count` frames.
    pub fn run_frames(&mut self, count: u64) {
        for _ in 0..count {
            self.step_frame();
        }
    }

    /// Run approximately `seconds` of emulated time, measured in CPU
    /// cycles.
    pub fn run_seconds(&mut self, seconds: f64) {
        if seconds <= 0.0 {
            return;
        }
        let budget = (seconds * f64::from(CPU_HZ_NTSC)) as u64;
        let start = self.cpu.cycles;
        while self.cpu.cycles - start < budget {
            self.step();
        }
    }

    /// The most recently rendered frame. Borrow it between
    /// `step_frame` calls only.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Completed-frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.bus.ppu.frame()
    }

    /// Total CPU cycles since power-on.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cpu.cycles
    }

    /// Push a frontend button byte for controller `port` (0 or 1).
    pub fn set_buttons(&mut self, port: usize, buttons: u8) {
        self.bus.set_buttons(port, buttons);
    }

    /// Pull up to `out.len()` audio samples from the APU ring.
    pub fn read_audio(&self, out: &mut [i16]) -> usize {
        self.bus.apu.read_samples(out)
    }

    /// Install an audio push sink.
    pub fn set_audio_sink(&mut self, sink: Option<nesling_apu::SampleSink>) {
        self.bus.apu.set_sink(sink);
    }

    /// CPU state, for tests and debuggers.
    #[must_use]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Mutable CPU access, for test harnesses that place the PC.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// System bus, for tests and debuggers.
    #[must_use]
    pub fn bus(&self) -> &NesBus {
        &self.bus
    }

    /// Mutable bus access.
    pub fn bus_mut(&mut self) -> &mut NesBus {
        &mut self.bus
    }
}
