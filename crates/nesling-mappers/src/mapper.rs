//! The cartridge mapper capability set.
//!
//! A mapper interposes on every CPU access in $4020-$FFFF and every PPU
//! pattern-table access, and may drive the CPU's IRQ line. The system
//! bus polls `irq_asserted` at instruction boundaries rather than
//! handing the mapper a callback into the CPU.

/// Nametable arrangement selected by the cartridge (or by the mapper at
/// runtime, for MMC3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mirroring {
    /// AABB: $2000/$2400 share a page, $2800/$2C00 the other.
    #[default]
    Horizontal,
    /// ABAB: $2000/$2800 share a page, $2400/$2C00 the other.
    Vertical,
    /// AAAA: everything maps to the first 1 KiB page.
    SingleScreenLower,
    /// BBBB: everything maps to the second 1 KiB page.
    SingleScreenUpper,
    /// ABCD: needs 4 KiB of VRAM; falls back to vertical over 2 KiB.
    FourScreen,
}

/// Cartridge mapper interface.
pub trait Mapper {
    /// CPU read in $4020-$FFFF. Covers PRG-RAM at $6000-$7FFF and
    /// banked PRG-ROM at $8000-$FFFF.
    fn cpu_read(&mut self, addr: u16) -> u8;

    /// CPU write in $4020-$FFFF: PRG-RAM stores or mapper registers.
    fn cpu_write(&mut self, addr: u16, value: u8);

    /// CPU-space read without side effects, for debuggers.
    fn cpu_peek(&self, addr: u16) -> u8;

    /// PPU pattern-table read ($0000-$1FFF).
    fn chr_read(&mut self, addr: u16) -> u8;

    /// PPU pattern-table write; only effective with CHR-RAM.
    fn chr_write(&mut self, addr: u16, value: u8);

    /// Pattern-table read without side effects. The renderer uses this
    /// so drawing a frame never disturbs IRQ edge detection.
    fn chr_peek(&self, addr: u16) -> u8;

    /// Current nametable mirroring.
    fn mirroring(&self) -> Mirroring;

    /// Scanline notification from PPU timing (dot 260 of visible lines
    /// with rendering enabled). Stands in for an A12 rising edge on
    /// mappers that count them.
    fn scanline_tick(&mut self) {}

    /// Level of the mapper's IRQ output. Once asserted it stays high
    /// until the mapper's own acknowledge register clears it.
    fn irq_asserted(&self) -> bool {
        false
    }

    /// iNES mapper id.
    fn id(&self) -> u8;

    /// Human-readable mapper name for diagnostics.
    fn name(&self) -> &'static str;

    /// Return the mapper to its power-on register state. ROM contents
    /// and PRG-RAM are preserved.
    fn reset(&mut self) {}
}
