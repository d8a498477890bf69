//! Cycle-accounting scenarios on a flat RAM bus.

use nesling_cpu::{Cpu, CpuBus, Status};
use proptest::prelude::*;

struct Ram {
    mem: [u8; 0x10000],
}

impl Ram {
    fn new() -> Self {
        Self { mem: [0; 0x10000] }
    }
}

impl CpuBus for Ram {
    fn read(&mut self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.mem[addr as usize] = value;
    }

    fn peek(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }
}

fn boot(program: &[u8], origin: u16) -> (Cpu, Ram) {
    let mut ram = Ram::new();
    ram.mem[origin as usize..origin as usize + program.len()].copy_from_slice(program);
    ram.mem[0xFFFC] = (origin & 0xFF) as u8;
    ram.mem[0xFFFD] = (origin >> 8) as u8;
    let mut cpu = Cpu::new();
    cpu.reset(&mut ram);
    (cpu, ram)
}

#[test]
fn reset_vector_scenario() {
    let (cpu, _) = boot(&[0xEA], 0x8000);
    assert_eq!(cpu.pc, 0x8000);
    assert_eq!(cpu.sp, 0xFD);
    assert!(cpu.status.contains(Status::I));
    assert!(cpu.status.contains(Status::U));
    assert_eq!(cpu.cycles, 7);
}

#[test]
fn double_reset_is_idempotent() {
    let (mut cpu, mut ram) = boot(&[0xEA], 0x8000);
    cpu.step(&mut ram);
    cpu.reset(&mut ram);
    let (a, x, y, sp, pc, p, cycles) = (
        cpu.a, cpu.x, cpu.y, cpu.sp, cpu.pc, cpu.status, cpu.cycles,
    );
    cpu.reset(&mut ram);
    assert_eq!(
        (a, x, y, sp, pc, p, cycles),
        (cpu.a, cpu.x, cpu.y, cpu.sp, cpu.pc, cpu.status, cpu.cycles)
    );
}

#[test]
fn indirect_indexed_page_cross_scenario() {
    // Zero page $10/$11 holds pointer $90FE; LDY #$02 puts the
    // effective address at $9100, one page over.
    let (mut cpu, mut ram) = boot(&[0xA0, 0x02, 0xB1, 0x10], 0x8000);
    ram.mem[0x0010] = 0xFE;
    ram.mem[0x0011] = 0x90;
    ram.mem[0x9100] = 0x3C;

    cpu.step(&mut ram); // LDY
    let spent = cpu.step(&mut ram); // LDA ($10),Y
    assert_eq!(cpu.a, 0x3C);
    assert!(spent >= 6, "expected base 5 + page-cross 1, got {spent}");
}

#[test]
fn branch_penalty_scenarios() {
    // Taken branch, same page.
    let (mut cpu, mut ram) = boot(&[0xA9, 0x00, 0xF0, 0x7D], 0x8000);
    cpu.step(&mut ram);
    let taken_same_page = cpu.step(&mut ram);
    assert!(taken_same_page >= 3);

    // Taken branch whose target lies on a different page.
    let (mut cpu, mut ram) = boot(&[0xF0, 0x7F], 0x80FC);
    cpu.status.insert(Status::Z);
    let taken_cross = cpu.step(&mut ram);
    assert!(taken_cross >= 4);
}

#[test]
fn jsr_rts_stack_discipline() {
    let (mut cpu, mut ram) = boot(&[0x20, 0x05, 0xB0, 0xEA], 0x8000);
    ram.mem[0xB005] = 0x60; // RTS
    let sp0 = cpu.sp;

    cpu.step(&mut ram);
    assert_eq!(cpu.pc, 0xB005);
    // The stacked address is that of the JSR's final byte, high byte first.
    assert_eq!(ram.mem[0x0100 + usize::from(sp0)], 0x80);
    assert_eq!(ram.mem[0x0100 + usize::from(sp0) - 1], 0x02);

    cpu.step(&mut ram);
    assert_eq!(cpu.sp, sp0);
    assert_eq!(cpu.pc, 0x8003); // one byte past the JSR
}

#[test]
fn every_step_costs_at_least_two_cycles() {
    // Sweep all 256 opcodes from a fresh CPU each time; whatever the
    // byte decodes to, a step may never cost less than two cycles.
    for opcode in 0..=255u8 {
        let (mut cpu, mut ram) = boot(&[opcode, 0x00, 0x00], 0x8000);
        cpu.status.remove(Status::I); // allow nothing; no IRQ is wired
        let before = cpu.cycles;
        cpu.step(&mut ram);
        assert!(
            cpu.cycles - before >= 2,
            "opcode {opcode:02X} cost {} cycles",
            cpu.cycles - before
        );
    }
}

proptest! {
    #[test]
    fn adc_matches_wide_arithmetic(a: u8, operand: u8, carry: bool) {
        let (mut cpu, mut ram) = boot(&[0x69, operand], 0x8000);
        cpu.a = a;
        cpu.status.set(Status::C, carry);
        cpu.step(&mut ram);

        let wide = u16::from(a) + u16::from(operand) + u16::from(carry);
        prop_assert_eq!(cpu.a, (wide & 0xFF) as u8);
        prop_assert_eq!(cpu.status.contains(Status::C), wide > 0xFF);
        prop_assert_eq!(cpu.status.contains(Status::Z), wide & 0xFF == 0);
        let signed_overflow = (!(a ^ operand) & (a ^ cpu.a)) & 0x80 != 0;
        prop_assert_eq!(cpu.status.contains(Status::V), signed_overflow);
    }

    #[test]
    fn u_flag_survives_every_opcode(opcode: u8) {
        let (mut cpu, mut ram) = boot(&[opcode, 0x10, 0x20], 0x8000);
        cpu.step(&mut ram);
        prop_assert!(cpu.status.contains(Status::U));
    }
}

#[test]
fn pushed_status_always_has_u_set() {
    // PHP path.
    let (mut cpu, mut ram) = boot(&[0x08], 0x8000);
    cpu.step(&mut ram);
    assert_eq!(ram.mem[0x01FD] & 0x20, 0x20);

    // BRK path.
    let (mut cpu, mut ram) = boot(&[0x00], 0x8000);
    ram.mem[0xFFFE] = 0x00;
    ram.mem[0xFFFF] = 0x90;
    cpu.step(&mut ram);
    assert_eq!(ram.mem[0x01FB] & 0x20, 0x20);

    // NMI path: B must be clear, U set.
    let (mut cpu, mut ram) = boot(&[0xEA], 0x8000);
    ram.mem[0xFFFA] = 0x00;
    ram.mem[0xFFFB] = 0x90;
    cpu.raise_nmi();
    cpu.step(&mut ram);
    assert_eq!(ram.mem[0x01FB] & 0x30, 0x20);
}
