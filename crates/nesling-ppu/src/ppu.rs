//! The PPU aggregate: register file, internal memory, and timing.
//!
//! The CPU sees eight registers at $2000-$2007 whose reads and writes
//! carry side effects on the Loopy scroll state, the PPUDATA read
//! buffer and the NMI line. Pattern-table traffic and the mapper
//! scanline hook go through the [`PpuBus`] capability the system bus
//! provides per call, which keeps cartridge banking out of this crate.

use crate::oam::Oam;
use crate::registers::{PpuCtrl, PpuMask, PpuStatus};
use crate::scroll::Scroll;
use crate::timing::{DotEvent, Timing};
use crate::vram::Vram;
use crate::Mirroring;

/// What the PPU needs from the rest of the machine.
pub trait PpuBus {
    /// Pattern-table read; on MMC3 this drives the A12 edge detector.
    fn chr_read(&mut self, addr: u16) -> u8;

    /// Pattern-table write (CHR-RAM carts only).
    fn chr_write(&mut self, addr: u16, value: u8);

    /// Pattern-table read without side effects, for the renderer.
    fn chr_peek(&self, addr: u16) -> u8;

    /// Scanline notification for mappers that count them.
    fn scanline_tick(&mut self);
}

/// Picture processing unit.
pub struct Ppu {
    ctrl: PpuCtrl,
    mask: PpuMask,
    status: PpuStatus,
    scroll: Scroll,
    vram: Vram,
    oam: Oam,
    /// PPUDATA "one read late" buffer for non-palette addresses.
    read_buffer: u8,
    timing: Timing,
    /// NMI edge waiting for the bus to collect.
    nmi_edge: bool,
}

impl Ppu {
    /// Build a PPU with the cartridge's initial mirroring.
    #[must_use]
    pub fn new(mirroring: Mirroring) -> Self {
        Self {
            ctrl: PpuCtrl::empty(),
            mask: PpuMask::empty(),
            status: PpuStatus::empty(),
            scroll: Scroll::new(),
            vram: Vram::new(mirroring),
            oam: Oam::new(),
            read_buffer: 0,
            timing: Timing::new(),
            nmi_edge: false,
        }
    }

    /// Power-on/reset state. Mirroring is preserved.
    pub fn reset(&mut self) {
        self.ctrl = PpuCtrl::empty();
        self.mask = PpuMask::empty();
        self.status = PpuStatus::empty();
        self.scroll = Scroll::new();
        self.vram.reset();
        self.oam.reset();
        self.read_buffer = 0;
        self.timing.reset();
        self.nmi_edge = false;
    }

    /// Track a mapper-driven mirroring change.
    pub fn set_mirroring(&mut self, mirroring: Mirroring) {
        self.vram.set_mirroring(mirroring);
    }

    /// Read a CPU-visible register ($2000-$2007, pre-mirrored to 0-7).
    pub fn read_register(&mut self, index: u16, bus: &mut impl PpuBus) -> u8 {
        match index & 7 {
            0 => self.ctrl.bits(),
            1 => self.mask.bits(),
            2 => {
                let value = self.status.bits();
                self.status.remove(PpuStatus::VBLANK);
                self.scroll.reset_toggle();
                value
            }
            3 => self.oam.addr(),
            4 => self.oam.read(),
            // Write-only scroll/address ports.
            5 | 6 => {
                log::trace!("read from write-only PPU port {}", index & 7);
                0
            }
            _ => self.read_data(bus),
        }
    }

    /// Write a CPU-visible register.
    pub fn write_register(&mut self, index: u16, value: u8, bus: &mut impl PpuBus) {
        match index & 7 {
            0 => {
                let was_enabled = self.ctrl.nmi_enabled();
                self.ctrl = PpuCtrl::from_bits_truncate(value);
                self.scroll.write_ctrl(value);
                // Enabling NMI mid-VBlank raises one immediately.
                if !was_enabled
                    && self.ctrl.nmi_enabled()
                    && self.status.contains(PpuStatus::VBLANK)
                {
                    self.nmi_edge = true;
                }
            }
            1 => self.mask = PpuMask::from_bits_truncate(value),
            2 => {} // status is read-only
            3 => self.oam.set_addr(value),
            4 => self.oam.write(value),
            5 => self.scroll.write_scroll(value),
            6 => self.scroll.write_addr(value),
            _ => {
                let addr = self.scroll.addr();
                self.mem_write(bus, addr, value);
                self.scroll.increment(self.ctrl.vram_increment());
            }
        }
    }

    /// $2007 read: buffered below the palette, direct at the palette
    /// with the buffer refilled from the nametable underneath.
    fn read_data(&mut self, bus: &mut impl PpuBus) -> u8 {
        let addr = self.scroll.addr() & 0x3FFF;
        let value = if addr >= 0x3F00 {
            self.read_buffer = self.vram.read_nametable(addr - 0x1000);
            self.vram.read_palette(addr)
        } else {
            let buffered = self.read_buffer;
            self.read_buffer = self.mem_read(bus, addr);
            buffered
        };
        self.scroll.increment(self.ctrl.vram_increment());
        value
    }

    /// PPU address space read (14-bit).
    pub(crate) fn mem_read(&mut self, bus: &mut impl PpuBus, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => bus.chr_read(addr),
            0x2000..=0x3EFF => self.vram.read_nametable(addr),
            _ => self.vram.read_palette(addr),
        }
    }

    /// PPU address space write (14-bit).
    pub(crate) fn mem_write(&mut self, bus: &mut impl PpuBus, addr: u16, value: u8) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => bus.chr_write(addr, value),
            0x2000..=0x3EFF => self.vram.write_nametable(addr, value),
            _ => self.vram.write_palette(addr, value),
        }
    }

    /// Advance `dots` PPU dots, firing VBlank edges and the mapper
    /// scanline hook as they are crossed.
    pub fn tick(&mut self, dots: u32, bus: &mut impl PpuBus) {
        for _ in 0..dots {
            match self.timing.advance() {
                DotEvent::VblankSet => {
                    self.status.insert(PpuStatus::VBLANK);
                    if self.ctrl.nmi_enabled() {
                        self.nmi_edge = true;
                    }
                }
                DotEvent::VblankClear => {
                    self.status.remove(
                        PpuStatus::VBLANK | PpuStatus::SPRITE_ZERO_HIT | PpuStatus::SPRITE_OVERFLOW,
                    );
                }
                DotEvent::ScanlineHook => {
                    if self.mask.rendering_enabled() {
                        bus.scanline_tick();
                    }
                }
                DotEvent::None => {}
            }
        }
    }

    /// Collect a pending NMI edge, clearing it.
    pub fn take_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi_edge)
    }

    /// Completed-frame counter.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.timing.frame()
    }

    /// Current scanline, for diagnostics.
    #[must_use]
    pub fn scanline(&self) -> u16 {
        self.timing.scanline()
    }

    /// Current dot, for diagnostics.
    #[must_use]
    pub fn dot(&self) -> u16 {
        self.timing.dot()
    }

    /// One byte of OAM DMA traffic: same path as a $2004 write.
    pub fn write_oam(&mut self, value: u8) {
        self.oam.write(value);
    }

    /// OAM contents and cursor.
    #[must_use]
    pub fn oam(&self) -> &Oam {
        &self.oam
    }

    /// Nametable and palette memory.
    #[must_use]
    pub fn vram(&self) -> &Vram {
        &self.vram
    }

    /// Latched PPUCTRL.
    #[must_use]
    pub fn ctrl(&self) -> PpuCtrl {
        self.ctrl
    }

    /// Latched PPUMASK.
    #[must_use]
    pub fn mask(&self) -> PpuMask {
        self.mask
    }

    /// PPUSTATUS without the read side effects.
    #[must_use]
    pub fn status_peek(&self) -> PpuStatus {
        self.status
    }

    /// Scroll register snapshot (v, t, x, w).
    #[must_use]
    pub fn scroll(&self) -> Scroll {
        self.scroll
    }
}
