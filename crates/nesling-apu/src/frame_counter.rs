//! Frame sequencer.
//!
//! A CPU-cycle counter crossing fixed marks drives quarter-frame and
//! half-frame clocks. The 4-step sequence ends at 14916 cycles and can
//! raise the frame IRQ there; the 5-step sequence ends at 18641 and
//! never does. The counter is stepped in batches, so mark crossings
//! are detected by before/after comparison.

/// NTSC 4-step mark positions in CPU cycles.
const STEP_MARKS: [u32; 4] = [3729, 7457, 11186, 14916];
/// End of the 5-step sequence.
const FIVE_STEP_END: u32 = 18641;

/// Sequencer mode selected by $4017 bit 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerMode {
    /// Four steps, frame IRQ at the end.
    #[default]
    FourStep,
    /// Five steps, no IRQ.
    FiveStep,
}

/// Clocks produced by one batch of cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameTicks {
    /// Envelope (and linear counter) clocks.
    pub quarters: u8,
    /// Length counter and sweep clocks.
    pub halves: u8,
}

/// Frame counter state.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCounter {
    cycle: u32,
    mode: SequencerMode,
    irq_inhibit: bool,
    irq_flag: bool,
}

impl FrameCounter {
    /// Power-on state: 4-step, IRQ allowed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cycle: 0,
            mode: SequencerMode::FourStep,
            irq_inhibit: false,
            irq_flag: false,
        }
    }

    /// $4017 write: `MI-- ----`. Resets the sequence position.
    pub fn write_ctrl(&mut self, value: u8) {
        self.mode = if value & 0x80 != 0 {
            SequencerMode::FiveStep
        } else {
            SequencerMode::FourStep
        };
        self.irq_inhibit = value & 0x40 != 0;
        if self.irq_inhibit {
            self.irq_flag = false;
        }
        self.cycle = 0;
    }

    /// Advance by `cycles` CPU cycles, reporting the clocks crossed.
    pub fn step(&mut self, cycles: u32) -> FrameTicks {
        let mut ticks = FrameTicks::default();
        let before = self.cycle;
        self.cycle += cycles;

        for (index, &mark) in STEP_MARKS.iter().enumerate() {
            if before < mark && self.cycle >= mark {
                ticks.quarters += 1;
                if index == 1 || index == 3 {
                    ticks.halves += 1;
                }
                if index == 3 && self.mode == SequencerMode::FourStep && !self.irq_inhibit {
                    self.irq_flag = true;
                }
            }
        }

        let end = match self.mode {
            SequencerMode::FourStep => STEP_MARKS[3],
            SequencerMode::FiveStep => FIVE_STEP_END,
        };
        if self.cycle >= end {
            self.cycle -= end;
        }
        ticks
    }

    /// Sticky frame-IRQ flag.
    #[must_use]
    pub fn irq_pending(&self) -> bool {
        self.irq_flag
    }

    /// Clear the IRQ flag ($4015 read side effect).
    pub fn clear_irq(&mut self) {
        self.irq_flag = false;
    }

    /// Current mode, for diagnostics.
    #[must_use]
    pub fn mode(&self) -> SequencerMode {
        self.mode
    }
}
