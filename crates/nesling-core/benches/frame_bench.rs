//! Frame-stepping throughput on an idle NOP cart.

use criterion::{criterion_group, criterion_main, Criterion};
use nesling_core::Nes;

fn idle_cart() -> Vec<u8> {
    let mut prg = vec![0xEA; 32 * 1024];
    prg[0x7FFC] = 0x00;
    prg[0x7FFD] = 0x80;

    let mut image = vec![0x4E, 0x45, 0x53, 0x1A, 2, 1, 0, 0];
    image.extend_from_slice(&[0; 8]);
    image.extend_from_slice(&prg);
    image.extend(std::iter::repeat(0).take(8 * 1024));
    image
}

fn bench_step_frame(c: &mut Criterion) {
    let mut nes = Nes::new(&idle_cart()).unwrap();
    c.bench_function("step_frame_nop_cart", |b| {
        b.iter(|| nes.step_frame());
    });
}

fn bench_step_instruction(c: &mut Criterion) {
    let mut nes = Nes::new(&idle_cart()).unwrap();
    c.bench_function("step_instruction_nop_cart", |b| {
        b.iter(|| nes.step());
    });
}

criterion_group!(benches, bench_step_frame, bench_step_instruction);
criterion_main!(benches);
