//! Non-linear channel mixer.
//!
//! Uses the two standard lookup tables derived from the console's
//! resistor network:
//!
//! ```text
//! pulse_out = 95.52 / (8128 / (p1 + p2) + 100)
//! tnd_out   = 163.67 / (24329 / (3*t + 2*n + d) + 100)
//! ```

#[allow(clippy::cast_precision_loss)] // table indices are tiny
const PULSE_TABLE: [f32; 31] = {
    let mut table = [0.0f32; 31];
    let mut i = 1;
    while i < 31 {
        table[i] = 95.52 / (8128.0 / (i as f32) + 100.0);
        i += 1;
    }
    table
};

#[allow(clippy::cast_precision_loss)]
const TND_TABLE: [f32; 203] = {
    let mut table = [0.0f32; 203];
    let mut i = 1;
    while i < 203 {
        table[i] = 163.67 / (24329.0 / (i as f32) + 100.0);
        i += 1;
    }
    table
};

/// Mix channel levels (each 0-15, DMC 0-127) to a [0, 1] float.
#[must_use]
pub fn mix(pulse1: u8, pulse2: u8, triangle: u8, noise: u8, dmc: u8) -> f32 {
    let pulse = PULSE_TABLE[(usize::from(pulse1) + usize::from(pulse2)).min(30)];
    let tnd_index = 3 * usize::from(triangle) + 2 * usize::from(noise) + usize::from(dmc);
    let tnd = TND_TABLE[tnd_index.min(202)];
    pulse + tnd
}

/// Clamp to [-1, 1] and convert to a signed 16-bit sample.
#[must_use]
pub fn to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 32767.0) as i16
}
