//! End-to-end scenarios across the assembled console.

mod common;

use common::{idle_cart, nrom_cart};
use nesling_core::{CpuBus, Nes};

#[test]
fn frame_stepping_advances_exactly_one_frame() {
    let mut nes = Nes::new(&idle_cart()).unwrap();
    for expected in 1..=3 {
        nes.step_frame();
        assert_eq!(nes.frame_count(), expected);
    }
}

#[test]
fn each_step_costs_at_least_two_cycles() {
    let mut nes = Nes::new(&idle_cart()).unwrap();
    for _ in 0..100 {
        let delta = nes.step();
        assert!(delta >= 2);
    }
}

#[test]
fn reset_is_idempotent() {
    let mut nes = Nes::new(&idle_cart()).unwrap();
    nes.run_frames(1);
    nes.reset();
    let first = (nes.cycles(), nes.cpu().pc, nes.cpu().sp, nes.cpu().status);
    nes.reset();
    let second = (nes.cycles(), nes.cpu().pc, nes.cpu().sp, nes.cpu().status);
    assert_eq!(first, second);
}

#[test]
fn oam_dma_copies_a_page_and_stalls_the_cpu() {
    // LDA #$02; STA $4014; then NOPs.
    let cart = nrom_cart(
        &[(0x8000, &[0xA9, 0x02, 0x8D, 0x14, 0x40])],
        0x8000,
        0x9000,
        0x9000,
    );
    let mut nes = Nes::new(&cart).unwrap();

    // Fill the conventional sprite shadow page.
    for i in 0..=255u16 {
        nes.bus_mut().write(0x0200 + i, i as u8);
    }
    let oamaddr_before = nes.bus().ppu.oam().addr();

    nes.step(); // LDA
    let dma_cost = nes.step(); // STA $4014 + stall
    assert!(
        (517..=518).contains(&dma_cost),
        "expected 4 + 513/514 cycles, got {dma_cost}"
    );

    let oam = nes.bus().ppu.oam().bytes();
    for i in 0..256 {
        assert_eq!(oam[i], i as u8);
    }
    assert_eq!(nes.bus().ppu.oam().addr(), oamaddr_before);
    assert_eq!(nes.bus().dma_write_count(), 1);
    assert_eq!(nes.bus().spritebuf_write_count(), 256);
}

#[test]
fn vblank_nmi_reaches_the_handler() {
    // Arm NMI from the program, then spin; the handler marks $0010.
    let cart = nrom_cart(
        &[
            (
                0x8000,
                // LDA #$80; STA $2000; JMP $8008 (spin in place)
                &[0xA9, 0x80, 0x8D, 0x00, 0x20, 0x4C, 0x08, 0x80, 0x4C, 0x08, 0x80],
            ),
            (0x9000, &[0xA9, 0x01, 0x85, 0x10, 0x40]), // LDA #1; STA $10; RTI
        ],
        0x8000,
        0x9000, // NMI vector
        0x8000,
    );
    let mut nes = Nes::new(&cart).unwrap();

    for _ in 0..40_000 {
        nes.step();
        if nes.bus().peek(0x0010) == 1 {
            break;
        }
    }
    assert_eq!(nes.bus().peek(0x0010), 1, "NMI handler never ran");
}

#[test]
fn arming_nmi_during_vblank_takes_it_promptly() {
    let cart = nrom_cart(
        &[
            (0x8000, &[0x4C, 0x00, 0x80]), // spin so the handler stays cold
            (0x9000, &[0xA9, 0x01, 0x85, 0x10, 0x40]),
        ],
        0x8000,
        0x9000,
        0x8000,
    );
    let mut nes = Nes::new(&cart).unwrap();

    // Idle until the VBlank flag is up, without any $2002 read that
    // would clear it.
    for _ in 0..40_000 {
        if nes.bus().ppu.status_peek().bits() & 0x80 != 0 {
            break;
        }
        nes.step();
    }
    assert_ne!(nes.bus().ppu.status_peek().bits() & 0x80, 0);

    // The 0->1 transition of PPUCTRL bit 7 must raise the NMI at once;
    // the handler runs within the next couple of steps.
    nes.bus_mut().write(0x2000, 0x80);
    let mut handled = false;
    for _ in 0..4 {
        nes.step();
        if nes.bus().peek(0x0010) == 1 {
            handled = true;
            break;
        }
    }
    assert!(handled, "NMI armed during VBlank was not taken promptly");
}

#[test]
fn controller_shift_register_serializes_buttons() {
    let mut nes = Nes::new(&idle_cart()).unwrap();
    nes.set_buttons(0, 0b0000_1000); // Start only

    let bus = nes.bus_mut();
    bus.write(0x4016, 1);
    bus.write(0x4016, 0);

    let mut bits = [0u8; 9];
    for slot in &mut bits {
        *slot = bus.read(0x4016) & 1;
    }
    assert_eq!(bits[..8], [0, 0, 0, 1, 0, 0, 0, 0]);
    assert_eq!(bits[8], 1); // post-exhaustion reads return 1

    // Both ports share the strobe; port 1 reads its own byte.
    nes.set_buttons(1, 0b0000_0001);
    let bus = nes.bus_mut();
    bus.write(0x4016, 1);
    bus.write(0x4016, 0);
    assert_eq!(bus.read(0x4017) & 1, 1);
}

#[test]
fn palette_writes_alias_and_round_trip() {
    let mut nes = Nes::new(&idle_cart()).unwrap();
    let bus = nes.bus_mut();

    // Write $3F10; it must alias $3F00.
    bus.write(0x2006, 0x3F);
    bus.write(0x2006, 0x10);
    bus.write(0x2007, 0x2A);
    assert_eq!(bus.ppu.vram().read_palette(0x3F00), 0x2A);
    assert_eq!(bus.ppu.vram().read_palette(0x3F10), 0x2A);

    // Every palette slot round-trips its 6-bit value.
    for slot in 0..0x20u16 {
        bus.write(0x2006, 0x3F);
        bus.write(0x2006, slot as u8);
        bus.write(0x2007, (slot as u8) & 0x3F);
    }
    for slot in 0..0x20u16 {
        bus.write(0x2006, 0x3F);
        bus.write(0x2006, slot as u8);
        let value = bus.read(0x2007); // palette reads are unbuffered
        // The $3F10/$14/$18/$1C writes aliased onto $00/$04/$08/$0C,
        // so those four base slots ended up holding the later value.
        let expected = if slot % 4 == 0 {
            (slot & 0x0F) as u8 + 0x10
        } else {
            slot as u8
        };
        assert_eq!(value, expected, "palette slot {slot:#04X}");
    }
}

#[test]
fn nametable_write_then_buffered_read_round_trip() {
    let mut nes = Nes::new(&idle_cart()).unwrap();
    let bus = nes.bus_mut();

    bus.write(0x2006, 0x21);
    bus.write(0x2006, 0x08);
    bus.write(0x2007, 0xDE);
    bus.write(0x2007, 0xAD);

    bus.write(0x2006, 0x21);
    bus.write(0x2006, 0x08);
    let _dummy = bus.read(0x2007);
    assert_eq!(bus.read(0x2007), 0xDE);
    assert_eq!(bus.read(0x2007), 0xAD);
}

#[test]
fn status_read_resets_the_shared_write_toggle() {
    let mut nes = Nes::new(&idle_cart()).unwrap();
    let bus = nes.bus_mut();

    bus.write(0x2006, 0x21); // first half of a pair
    let _ = bus.read(0x2002); // toggle reset
    bus.write(0x2006, 0x23);
    bus.write(0x2006, 0x45);
    // The pair restarted cleanly after the status read.
    assert_eq!(bus.ppu.scroll().addr(), 0x2345);
}

#[test]
fn register_mirrors_reach_the_same_ppu_ports() {
    let mut nes = Nes::new(&idle_cart()).unwrap();
    let bus = nes.bus_mut();

    // $3F26 mirrors $2006 ($3F26 & 7 == 6).
    bus.write(0x3F26, 0x21);
    bus.write(0x3F26, 0x00);
    bus.write(0x200F, 0x77); // mirrors $2007
    bus.write(0x2006, 0x21);
    bus.write(0x2006, 0x00);
    let _ = bus.read(0x2007);
    assert_eq!(bus.read(0x2007), 0x77);
}

#[test]
fn audio_samples_accumulate_during_a_frame() {
    let mut nes = Nes::new(&idle_cart()).unwrap();
    nes.step_frame();
    // ~1/60 s at 48 kHz is about 800 samples.
    let mut buffer = [0i16; 2048];
    let produced = nes.read_audio(&mut buffer);
    assert!(
        (700..=900).contains(&produced),
        "expected ~800 samples, got {produced}"
    );
}

#[test]
fn run_seconds_spends_a_cycle_budget() {
    let mut nes = Nes::new(&idle_cart()).unwrap();
    let start = nes.cycles();
    nes.run_seconds(0.01);
    let spent = nes.cycles() - start;
    let budget = 17_897; // 0.01 s of NTSC CPU
    assert!(spent >= budget);
    assert!(spent < budget + 100); // overshoot bounded by one instruction
}
