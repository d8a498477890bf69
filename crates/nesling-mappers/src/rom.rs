//! iNES 1.0 ROM file parsing.
//!
//! Layout: 16-byte header ("NES\x1A"), optional 512-byte trainer, PRG
//! banks (16 KiB units), CHR banks (8 KiB units; zero banks means the
//! cartridge supplies 8 KiB of CHR-RAM instead).

use crate::mapper::Mirroring;

/// Errors produced while parsing a ROM image. A failed load installs no
/// partial cartridge state.
#[derive(Debug, thiserror::Error)]
pub enum RomError {
    /// File shorter than the 16-byte header.
    #[error("ROM file too small: expected at least 16 bytes, got {0}")]
    FileTooSmall(usize),

    /// Header does not start with "NES\x1A".
    #[error("invalid iNES magic: got {0:02X?}")]
    BadMagic([u8; 4]),

    /// Header declares zero PRG banks.
    #[error("PRG-ROM size cannot be zero")]
    EmptyPrg,

    /// Declared PRG/CHR sizes run past the end of the file.
    #[error("ROM file truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes the header promised.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },

    /// Mapper id the emulator does not implement.
    #[error("mapper {0} not supported")]
    UnsupportedMapper(u8),
}

/// Parsed 16-byte iNES header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomHeader {
    /// PRG-ROM size in bytes.
    pub prg_size: usize,
    /// CHR-ROM size in bytes; 0 means 8 KiB CHR-RAM.
    pub chr_size: usize,
    /// Mapper id from the flag nibbles.
    pub mapper: u8,
    /// Nametable arrangement requested by the cartridge.
    pub mirroring: Mirroring,
    /// 512-byte trainer present before PRG data.
    pub has_trainer: bool,
    /// Battery-backed PRG-RAM flag (flag 6 bit 1).
    pub has_battery: bool,
}

impl RomHeader {
    const MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

    /// Parse the header from the start of `data`.
    ///
    /// # Errors
    ///
    /// Fails on a short buffer, bad magic, or zero PRG banks.
    pub fn parse(data: &[u8]) -> Result<Self, RomError> {
        if data.len() < 16 {
            return Err(RomError::FileTooSmall(data.len()));
        }
        let magic = [data[0], data[1], data[2], data[3]];
        if magic != Self::MAGIC {
            return Err(RomError::BadMagic(magic));
        }

        let prg_size = data[4] as usize * 16 * 1024;
        let chr_size = data[5] as usize * 8 * 1024;
        if prg_size == 0 {
            return Err(RomError::EmptyPrg);
        }

        let flag6 = data[6];
        let flag7 = data[7];
        let mapper = (flag7 & 0xF0) | (flag6 >> 4);

        // Bit 3 (four-screen) overrides the H/V bit.
        let mirroring = if flag6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flag6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        Ok(Self {
            prg_size,
            chr_size,
            mapper,
            mirroring,
            has_trainer: flag6 & 0x04 != 0,
            has_battery: flag6 & 0x02 != 0,
        })
    }
}

/// A loaded cartridge image: header plus PRG/CHR slices.
#[derive(Debug, Clone)]
pub struct Rom {
    /// Parsed header.
    pub header: RomHeader,
    /// PRG-ROM bytes.
    pub prg: Vec<u8>,
    /// CHR-ROM bytes; empty when the cartridge uses CHR-RAM.
    pub chr: Vec<u8>,
}

impl Rom {
    /// Parse a complete ROM file.
    ///
    /// # Errors
    ///
    /// Fails on header errors or when the file is shorter than the
    /// declared PRG/CHR payload.
    pub fn load(data: &[u8]) -> Result<Self, RomError> {
        let header = RomHeader::parse(data)?;

        let mut offset = 16;
        if header.has_trainer {
            offset += 512;
        }

        let expected = offset + header.prg_size + header.chr_size;
        if data.len() < expected {
            return Err(RomError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let prg = data[offset..offset + header.prg_size].to_vec();
        offset += header.prg_size;
        let chr = data[offset..offset + header.chr_size].to_vec();

        log::debug!(
            "loaded iNES image: mapper {}, PRG {} KiB, CHR {} KiB, {:?} mirroring",
            header.mapper,
            header.prg_size / 1024,
            header.chr_size / 1024,
            header.mirroring
        );

        Ok(Self { header, prg, chr })
    }
}
