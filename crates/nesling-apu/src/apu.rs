//! The APU aggregate: registers, sequencing, mixing, resampling.
//!
//! `step(cycles)` consumes CPU-cycle deltas from the console loop. It
//! advances the frame sequencer, runs the channel timers, and drains an
//! accumulator against `cpu_hz / sample_rate` to emit mono samples into
//! the ring (and an optional push sink).

use crate::frame_counter::FrameCounter;
use crate::mixer;
use crate::pulse::Pulse;
use crate::ring::SampleRing;
use crate::stub::StubChannel;
use crate::sweep::PulseId;

/// Console region; selects the CPU clock feeding the APU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    /// NTSC: 1.789773 MHz CPU.
    #[default]
    Ntsc,
    /// PAL: 1.662607 MHz CPU.
    Pal,
}

impl Region {
    /// CPU clock rate in Hz.
    #[must_use]
    pub const fn cpu_hz(self) -> u32 {
        match self {
            Self::Ntsc => 1_789_773,
            Self::Pal => 1_662_607,
        }
    }
}

/// Push-sink callback receiving each mixed sample as it is produced.
pub type SampleSink = Box<dyn FnMut(&[i16]) + Send>;

/// Audio processing unit.
pub struct Apu {
    region: Region,
    sample_rate: u32,

    pulse1: Pulse,
    pulse2: Pulse,
    triangle: StubChannel,
    noise: StubChannel,
    dmc: StubChannel,
    frame_counter: FrameCounter,

    /// Last value written to each of $4000-$4017, for inspection.
    regs: [u8; 0x18],

    cycles_per_sample: f64,
    sample_accumulator: f64,
    ring: SampleRing,
    sink: Option<SampleSink>,

    /// Debug mutes, one per channel in $4015 bit order.
    mutes: [bool; 5],
}

impl Apu {
    /// Build an APU for `region`, producing `sample_rate` Hz mono audio
    /// into a ring of at least `buffer_frames` samples.
    #[must_use]
    pub fn new(region: Region, sample_rate: u32, buffer_frames: usize) -> Self {
        let sample_rate = if sample_rate == 0 { 48_000 } else { sample_rate };
        Self {
            region,
            sample_rate,
            pulse1: Pulse::new(PulseId::One),
            pulse2: Pulse::new(PulseId::Two),
            triangle: StubChannel::new(),
            noise: StubChannel::new(),
            dmc: StubChannel::new(),
            frame_counter: FrameCounter::new(),
            regs: [0; 0x18],
            cycles_per_sample: f64::from(region.cpu_hz()) / f64::from(sample_rate),
            sample_accumulator: 0.0,
            ring: SampleRing::new(buffer_frames),
            sink: None,
            mutes: [false; 5],
        }
    }

    /// Back to power-on state. The ring and sink survive reset.
    pub fn reset(&mut self) {
        self.pulse1 = Pulse::new(PulseId::One);
        self.pulse2 = Pulse::new(PulseId::Two);
        self.triangle = StubChannel::new();
        self.noise = StubChannel::new();
        self.dmc = StubChannel::new();
        self.frame_counter = FrameCounter::new();
        self.regs = [0; 0x18];
        self.sample_accumulator = 0.0;
    }

    /// Register write, $4000-$4017. All writes are total; addresses
    /// outside the APU's slice of the range are ignored.
    pub fn write(&mut self, addr: u16, value: u8) {
        if !(0x4000..=0x4017).contains(&addr) {
            return;
        }
        self.regs[(addr - 0x4000) as usize] = value;

        match addr {
            0x4000 => self.pulse1.write_ctrl(value),
            0x4001 => self.pulse1.write_sweep(value),
            0x4002 => self.pulse1.write_timer_lo(value),
            0x4003 => self.pulse1.write_timer_hi(value),

            0x4004 => self.pulse2.write_ctrl(value),
            0x4005 => self.pulse2.write_sweep(value),
            0x4006 => self.pulse2.write_timer_lo(value),
            0x4007 => self.pulse2.write_timer_hi(value),

            0x4008 => self.triangle.set_halt(value & 0x80 != 0),
            0x400B => self.triangle.write_length(value),

            0x400C => self.noise.set_halt(value & 0x20 != 0),
            0x400F => self.noise.write_length(value),

            0x4015 => {
                self.pulse1.set_enabled(value & 0x01 != 0);
                self.pulse2.set_enabled(value & 0x02 != 0);
                self.triangle.set_enabled(value & 0x04 != 0);
                self.noise.set_enabled(value & 0x08 != 0);
                self.dmc.set_enabled(value & 0x10 != 0);
            }
            0x4017 => self.frame_counter.write_ctrl(value),
            _ => {}
        }
    }

    /// $4015 read: per-channel length-nonzero bits plus the frame IRQ
    /// flag, which the read clears.
    pub fn read_status(&mut self) -> u8 {
        let value = self.peek_status();
        self.frame_counter.clear_irq();
        value
    }

    /// $4015 without the IRQ-clearing side effect.
    #[must_use]
    pub fn peek_status(&self) -> u8 {
        let mut value = 0u8;
        if self.pulse1.active() {
            value |= 0x01;
        }
        if self.pulse2.active() {
            value |= 0x02;
        }
        if self.triangle.active() {
            value |= 0x04;
        }
        if self.noise.active() {
            value |= 0x08;
        }
        if self.dmc.active() {
            value |= 0x10;
        }
        if self.frame_counter.irq_pending() {
            value |= 0x40;
        }
        value
    }

    /// Advance by a CPU-cycle delta from the console loop.
    pub fn step(&mut self, cycles: u32) {
        if cycles == 0 {
            return;
        }

        let ticks = self.frame_counter.step(cycles);
        for _ in 0..ticks.quarters {
            self.pulse1.clock_quarter();
            self.pulse2.clock_quarter();
        }
        for _ in 0..ticks.halves {
            self.pulse1.clock_half();
            self.pulse2.clock_half();
            self.triangle.clock_half();
            self.noise.clock_half();
        }

        self.pulse1.step_timer(cycles);
        self.pulse2.step_timer(cycles);

        self.sample_accumulator += f64::from(cycles);
        while self.sample_accumulator >= self.cycles_per_sample {
            self.sample_accumulator -= self.cycles_per_sample;
            let sample = self.mix_sample();
            if !self.ring.push(sample) {
                log::trace!("sample ring full, dropping");
            }
            if let Some(sink) = self.sink.as_mut() {
                sink(&[sample]);
            }
        }
    }

    fn mix_sample(&self) -> i16 {
        let level = |muted: bool, value: u8| if muted { 0 } else { value };
        let mixed = mixer::mix(
            level(self.mutes[0], self.pulse1.output()),
            level(self.mutes[1], self.pulse2.output()),
            level(self.mutes[2], self.triangle.output()),
            level(self.mutes[3], self.noise.output()),
            level(self.mutes[4], self.dmc.output()),
        );
        mixer::to_i16(mixed)
    }

    /// Frame-IRQ level for the console's interrupt poll.
    #[must_use]
    pub fn irq_pending(&self) -> bool {
        self.frame_counter.irq_pending()
    }

    /// Pull up to `out.len()` samples from the ring.
    pub fn read_samples(&self, out: &mut [i16]) -> usize {
        self.ring.pop_into(out)
    }

    /// Samples currently buffered.
    #[must_use]
    pub fn samples_available(&self) -> usize {
        self.ring.len()
    }

    /// The ring itself, for hosts that drain from an audio thread.
    #[must_use]
    pub fn ring(&self) -> &SampleRing {
        &self.ring
    }

    /// Install a push sink invoked for every produced sample.
    pub fn set_sink(&mut self, sink: Option<SampleSink>) {
        self.sink = sink;
    }

    /// Mute or unmute one channel at the mixer (0 = pulse 1 .. 4 = DMC).
    pub fn set_channel_mute(&mut self, channel: usize, muted: bool) {
        if let Some(slot) = self.mutes.get_mut(channel) {
            *slot = muted;
        }
    }

    /// Last written value of a $4000-$4017 register.
    #[must_use]
    pub fn reg_latch(&self, addr: u16) -> u8 {
        self.regs
            .get(addr.wrapping_sub(0x4000) as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Configured region.
    #[must_use]
    pub fn region(&self) -> Region {
        self.region
    }

    /// Configured output rate.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
