//! Cartridge handling for nesling: iNES parsing and mapper hardware.
//!
//! [`Rom::load`] slices an iNES 1.0 image into PRG/CHR, and
//! [`create_mapper`] turns it into the boxed [`Mapper`] the system bus
//! routes cartridge traffic through. Two mappers are implemented:
//! NROM (0) and MMC3 (4).

mod mapper;
mod mmc3;
mod nrom;
mod rom;

pub use mapper::{Mapper, Mirroring};
pub use mmc3::Mmc3;
pub use nrom::Nrom;
pub use rom::{Rom, RomError, RomHeader};

/// Instantiate the mapper a ROM image asks for.
///
/// # Errors
///
/// Returns [`RomError::UnsupportedMapper`] for any mapper id other
/// than 0 or 4.
pub fn create_mapper(rom: &Rom) -> Result<Box<dyn Mapper>, RomError> {
    match rom.header.mapper {
        0 => Ok(Box::new(Nrom::new(rom))),
        4 => Ok(Box::new(Mmc3::new(rom))),
        other => Err(RomError::UnsupportedMapper(other)),
    }
}
