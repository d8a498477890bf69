//! CPU status register (P) flags.
//!
//! ```text
//! 7  6  5  4  3  2  1  0
//! N  V  U  B  D  I  Z  C
//! ```
//!
//! The unused bit U reads back as 1 and is forced set in every byte
//! pushed to the stack. B distinguishes software interrupts: it is set
//! in the pushed copy for PHP/BRK and clear for hardware IRQ/NMI.

use bitflags::bitflags;

bitflags! {
    /// Processor status flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Status: u8 {
        /// Carry.
        const C = 1 << 0;
        /// Zero.
        const Z = 1 << 1;
        /// Interrupt disable (IRQ only; NMI is not maskable).
        const I = 1 << 2;
        /// Decimal mode. Latched but ignored by ADC/SBC on the NES.
        const D = 1 << 3;
        /// Break marker, only meaningful in stacked copies of P.
        const B = 1 << 4;
        /// Unused, always 1.
        const U = 1 << 5;
        /// Signed overflow.
        const V = 1 << 6;
        /// Negative (bit 7 of the last result).
        const N = 1 << 7;
    }
}

impl Status {
    /// Register value after reset: I and U set.
    pub const RESET: Self = Self::I.union(Self::U);

    /// Set or clear the Z and N flags from a result byte.
    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        self.set(Self::Z, value == 0);
        self.set(Self::N, value & 0x80 != 0);
    }

    /// Byte image pushed to the stack. U is forced set; B is set only
    /// when `brk` (PHP and BRK pushes).
    #[inline]
    #[must_use]
    pub const fn to_pushed_byte(self, brk: bool) -> u8 {
        let mut bits = self.bits() | Self::U.bits();
        if brk {
            bits |= Self::B.bits();
        }
        bits
    }

    /// Rebuild P from a byte pulled off the stack. B is discarded and U
    /// forced set, matching PLP/RTI.
    #[inline]
    #[must_use]
    pub fn from_pulled_byte(value: u8) -> Self {
        Self::from_bits_truncate((value & !Self::B.bits()) | Self::U.bits())
    }
}
