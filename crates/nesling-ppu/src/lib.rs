//! Ricoh 2C02 PPU emulation for nesling.
//!
//! The crate owns everything on the PPU side of the machine: the
//! CPU-visible register file with its latch semantics, the Loopy
//! scroll state, nametable VRAM and palette RAM with cartridge
//! mirroring, OAM, the dot/scanline clock, and a whole-frame ARGB
//! renderer. Pattern tables live on the cartridge; the system bus
//! provides them through [`PpuBus`].

mod oam;
mod palette;
mod ppu;
mod registers;
mod render;
mod scroll;
mod timing;
mod vram;

pub use oam::{Oam, Sprite};
pub use palette::{argb, NES_PALETTE};
pub use ppu::{Ppu, PpuBus};
pub use registers::{PpuCtrl, PpuMask, PpuStatus};
pub use render::{Frame, HEIGHT, WIDTH};
pub use scroll::Scroll;
pub use timing::{Timing, DOTS_PER_SCANLINE, SCANLINES_PER_FRAME};
pub use vram::{Mirroring, Vram};
