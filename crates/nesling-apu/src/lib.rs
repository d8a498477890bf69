//! 2A03 APU emulation for nesling.
//!
//! Drives two pulse channels through a frame sequencer, with
//! length-only stand-ins for triangle/noise/DMC, a non-linear mixer,
//! and a lock-free sample ring a host audio thread can drain. The
//! console feeds [`Apu::step`] CPU-cycle deltas after every
//! instruction.

mod apu;
mod envelope;
mod frame_counter;
mod length_counter;
mod mixer;
mod pulse;
mod ring;
mod stub;
mod sweep;
mod timer;

pub use apu::{Apu, Region, SampleSink};
pub use frame_counter::{FrameCounter, FrameTicks, SequencerMode};
pub use mixer::{mix, to_i16};
pub use pulse::Pulse;
pub use ring::SampleRing;
pub use sweep::PulseId;
