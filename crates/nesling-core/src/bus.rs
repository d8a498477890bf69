//! System bus: routes every CPU access to its owner.
//!
//! ```text
//! $0000-$1FFF  2 KiB RAM, mirrored
//! $2000-$3FFF  PPU registers, mirrored every 8
//! $4000-$4017  APU and I/O ($4014 OAM DMA, $4016/$4017 controllers)
//! $4018-$401F  disabled test registers
//! $4020-$FFFF  cartridge via the active mapper
//! ```

use nesling_apu::Apu;
use nesling_cpu::CpuBus;
use nesling_mappers::{Mapper, Mirroring};
use nesling_ppu::{Frame, Ppu, PpuBus};

use crate::input::Controller;

/// Adapter giving the PPU its view of the cartridge: CHR plus the
/// scanline hook.
struct MapperPpuBus<'a> {
    mapper: &'a mut dyn Mapper,
}

impl PpuBus for MapperPpuBus<'_> {
    fn chr_read(&mut self, addr: u16) -> u8 {
        self.mapper.chr_read(addr)
    }

    fn chr_write(&mut self, addr: u16, value: u8) {
        self.mapper.chr_write(addr, value);
    }

    fn chr_peek(&self, addr: u16) -> u8 {
        self.mapper.chr_peek(addr)
    }

    fn scanline_tick(&mut self) {
        self.mapper.scanline_tick();
    }
}

/// Translate the mapper crate's mirroring into the PPU crate's copy.
fn ppu_mirroring(mirroring: Mirroring) -> nesling_ppu::Mirroring {
    match mirroring {
        Mirroring::Horizontal => nesling_ppu::Mirroring::Horizontal,
        Mirroring::Vertical => nesling_ppu::Mirroring::Vertical,
        Mirroring::SingleScreenLower => nesling_ppu::Mirroring::SingleScreenLower,
        Mirroring::SingleScreenUpper => nesling_ppu::Mirroring::SingleScreenUpper,
        Mirroring::FourScreen => nesling_ppu::Mirroring::FourScreen,
    }
}

/// The NES system bus.
pub struct NesBus {
    /// 2 KiB internal RAM.
    pub ram: [u8; 0x800],
    /// Picture processing unit.
    pub ppu: Ppu,
    /// Audio processing unit.
    pub apu: Apu,
    /// Active cartridge mapper.
    pub mapper: Box<dyn Mapper>,
    controllers: [Controller; 2],

    /// Stall cycles from an OAM DMA, waiting to be credited to the CPU.
    dma_stall: u16,
    /// Mirror of the CPU cycle counter, for DMA start parity.
    cpu_cycles: u64,

    // Instrumentation for tests.
    dma_writes: u32,
    spritebuf_writes: u32,
}

impl NesBus {
    /// Wire a bus around a mapper and a configured APU.
    #[must_use]
    pub fn new(mapper: Box<dyn Mapper>, apu: Apu) -> Self {
        let mirroring = ppu_mirroring(mapper.mirroring());
        Self {
            ram: [0; 0x800],
            ppu: Ppu::new(mirroring),
            apu,
            mapper,
            controllers: [Controller::new(), Controller::new()],
            dma_stall: 0,
            cpu_cycles: 0,
            dma_writes: 0,
            spritebuf_writes: 0,
        }
    }

    /// Reset RAM, PPU, APU, mapper and controllers.
    pub fn reset(&mut self) {
        self.ram.fill(0);
        self.ppu.reset();
        self.ppu.set_mirroring(ppu_mirroring(self.mapper.mirroring()));
        self.apu.reset();
        self.mapper.reset();
        for pad in &mut self.controllers {
            pad.reset();
        }
        self.dma_stall = 0;
        self.cpu_cycles = 0;
        self.dma_writes = 0;
        self.spritebuf_writes = 0;
    }

    /// Advance the PPU by `3 * cpu_cycles` dots and the APU by
    /// `cpu_cycles`, after a CPU instruction retires.
    pub fn tick(&mut self, cpu_cycles: u64) {
        self.cpu_cycles += cpu_cycles;
        self.ppu.set_mirroring(ppu_mirroring(self.mapper.mirroring()));

        let mut ppu_bus = MapperPpuBus {
            mapper: &mut *self.mapper,
        };
        self.ppu.tick(cpu_cycles as u32 * 3, &mut ppu_bus);
        self.apu.step(cpu_cycles as u32);
    }

    /// Render the PPU's current state into `frame`.
    pub fn render_frame(&mut self, frame: &mut Frame) {
        self.ppu.set_mirroring(ppu_mirroring(self.mapper.mirroring()));
        let ppu_bus = MapperPpuBus {
            mapper: &mut *self.mapper,
        };
        self.ppu.render_frame(&ppu_bus, frame);
    }

    /// Level of the IRQ line into the CPU: mapper or APU frame IRQ.
    #[must_use]
    pub fn irq_level(&self) -> bool {
        self.mapper.irq_asserted() || self.apu.irq_pending()
    }

    /// Take the stall cycles of a just-triggered OAM DMA (0 if none).
    pub fn take_dma_stall(&mut self) -> u16 {
        std::mem::take(&mut self.dma_stall)
    }

    /// Frontend input: replace the button byte of `port` (0 or 1).
    pub fn set_buttons(&mut self, port: usize, buttons: u8) {
        if let Some(pad) = self.controllers.get_mut(port) {
            pad.set_buttons(buttons);
        }
    }

    /// Controller state, for tests and diagnostics.
    #[must_use]
    pub fn controller(&self, port: usize) -> &Controller {
        &self.controllers[port]
    }

    /// Writes to $4014 so far.
    #[must_use]
    pub fn dma_write_count(&self) -> u32 {
        self.dma_writes
    }

    /// Writes landing in the $0200-$02FF sprite shadow buffer so far.
    #[must_use]
    pub fn spritebuf_write_count(&self) -> u32 {
        self.spritebuf_writes
    }

    /// OAM DMA: copy 256 bytes from `page << 8` through the PPU's
    /// OAMADDR cursor, exactly as 256 writes to $2004 would. The CPU
    /// is stalled 513 cycles, 514 when the DMA starts on an odd cycle.
    fn oam_dma(&mut self, page: u8) {
        self.dma_writes += 1;
        let base = u16::from(page) << 8;
        for offset in 0..=255u16 {
            let value = self.dma_read(base + offset);
            self.ppu.write_oam(value);
        }
        self.dma_stall = 513 + u16::from(self.cpu_cycles % 2 == 1);
    }

    /// Side-effect-free fetch path for DMA sources (RAM and PRG).
    fn dma_read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x4020..=0xFFFF => self.mapper.cpu_read(addr),
            _ => 0,
        }
    }
}

impl CpuBus for NesBus {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => {
                self.ppu.set_mirroring(ppu_mirroring(self.mapper.mirroring()));
                let mut ppu_bus = MapperPpuBus {
                    mapper: &mut *self.mapper,
                };
                self.ppu.read_register(addr & 7, &mut ppu_bus)
            }
            0x4015 => self.apu.read_status(),
            0x4016 => self.controllers[0].read(),
            0x4017 => self.controllers[1].read(),
            // Write-only or disabled I/O.
            0x4000..=0x401F => 0,
            0x4020..=0xFFFF => self.mapper.cpu_read(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => {
                if let 0x0200..=0x02FF = addr & 0x07FF {
                    self.spritebuf_writes += 1;
                }
                self.ram[(addr & 0x07FF) as usize] = value;
            }
            0x2000..=0x3FFF => {
                self.ppu.set_mirroring(ppu_mirroring(self.mapper.mirroring()));
                let mut ppu_bus = MapperPpuBus {
                    mapper: &mut *self.mapper,
                };
                self.ppu.write_register(addr & 7, value, &mut ppu_bus);
            }
            0x4014 => self.oam_dma(value),
            0x4016 => {
                // One strobe line feeds both ports.
                for pad in &mut self.controllers {
                    pad.write_strobe(value);
                }
            }
            0x4000..=0x4013 | 0x4015 | 0x4017 => self.apu.write(addr, value),
            0x4018..=0x401F => {}
            0x4020..=0xFFFF => self.mapper.cpu_write(addr, value),
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => 0,
            0x4015 => self.apu.peek_status(),
            0x4000..=0x401F => 0,
            0x4020..=0xFFFF => self.mapper.cpu_peek(addr),
        }
    }
}
