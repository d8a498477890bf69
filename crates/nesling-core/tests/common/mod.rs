//! Shared helpers: build small iNES images in memory.
#![allow(dead_code)] // not every test binary uses every helper

/// Assemble an iNES 1.0 image.
///
/// `prg_banks` are 16 KiB units, `chr_banks` 8 KiB units.
#[must_use]
pub fn build_ines(prg_banks: u8, chr_banks: u8, mapper: u8, flag6_low: u8, prg: &[u8]) -> Vec<u8> {
    let prg_size = usize::from(prg_banks) * 16 * 1024;
    assert!(prg.len() <= prg_size);

    let mut image = vec![0x4E, 0x45, 0x53, 0x1A];
    image.push(prg_banks);
    image.push(chr_banks);
    image.push((mapper << 4) | flag6_low);
    image.push(mapper & 0xF0);
    image.extend_from_slice(&[0; 8]);

    let mut prg_data = prg.to_vec();
    prg_data.resize(prg_size, 0xEA); // pad with NOPs
    image.extend_from_slice(&prg_data);
    image.extend(std::iter::repeat(0).take(usize::from(chr_banks) * 8 * 1024));
    image
}

/// 32 KiB NROM cart: `program` at $8000, vectors pointing at `reset`,
/// `nmi` and `irq`, everything else NOP.
#[must_use]
pub fn nrom_cart(program: &[(u16, &[u8])], reset: u16, nmi: u16, irq: u16) -> Vec<u8> {
    let mut prg = vec![0xEA; 32 * 1024];
    for &(addr, bytes) in program {
        let offset = usize::from(addr - 0x8000);
        prg[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
    let vectors = [
        (0x7FFA, nmi),
        (0x7FFC, reset),
        (0x7FFE, irq),
    ];
    for (offset, vector) in vectors {
        prg[offset] = (vector & 0xFF) as u8;
        prg[offset + 1] = (vector >> 8) as u8;
    }
    build_ines(2, 1, 0, 0, &prg)
}

/// A cart that parks the CPU in a NOP slide from reset.
#[must_use]
pub fn idle_cart() -> Vec<u8> {
    nrom_cart(&[], 0x8000, 0x8000, 0x8000)
}
