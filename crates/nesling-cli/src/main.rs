//! Headless nesling runner.
//!
//! Boots a ROM, runs a frame or time budget, and reports cycle/frame
//! totals. Windowing, audio output and gamepad polling belong to
//! richer frontends; this binary drives the core alone, which is
//! enough for regression runs and timing checks.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use nesling_core::{Nes, NesOptions, FRAME_RATE};

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "nesling", about = "NES emulator", version)]
struct Cli {
    /// iNES ROM image to run.
    rom: PathBuf,

    /// Run exactly N frames.
    #[arg(short = 'f', long = "frames", conflicts_with = "seconds")]
    frames: Option<u64>,

    /// Run approximately SECS emulated seconds.
    #[arg(short = 's', long = "seconds")]
    seconds: Option<f64>,

    /// Initial window scale (forwarded to windowed frontends).
    #[arg(long)]
    scale: Option<u32>,

    /// Config file location (default: ./nesling.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run as fast as possible instead of pacing to ~60 Hz.
    #[arg(long)]
    no_pacing: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("nesling: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("nesling.toml"));
    let mut config = Config::load_or_default(&config_path).map_err(|e| e.to_string())?;
    if let Some(scale) = cli.scale {
        config.scale = scale;
    }
    log::debug!(
        "config: title={:?} scale={} vsync={} integer_scale={}",
        config.title,
        config.scale,
        config.vsync,
        config.integer_scale
    );

    let rom_bytes = std::fs::read(&cli.rom)
        .map_err(|e| format!("cannot read {}: {e}", cli.rom.display()))?;

    let options = NesOptions {
        region: config.region.into(),
        sample_rate_hz: config.sample_rate_hz,
        buffer_frames: config.buffer_frames,
    };
    let mut nes = Nes::with_options(&rom_bytes, options).map_err(|e| e.to_string())?;

    if let Some(seconds) = cli.seconds {
        let seconds = seconds.max(0.0);
        nes.run_seconds(seconds);
        println!(
            "ran ~{seconds:.3} emulated seconds, frame={} cycles={}",
            nes.frame_count(),
            nes.cycles()
        );
        return Ok(());
    }

    let frames = cli.frames.unwrap_or(1);
    let frame_budget = Duration::from_secs_f64(1.0 / FRAME_RATE);
    let mut drained = [0i16; 4096];

    for _ in 0..frames {
        let frame_start = Instant::now();
        nes.step_frame();
        // Keep the ring from overflowing while nobody plays the audio.
        let _ = nes.read_audio(&mut drained);

        if !cli.no_pacing {
            let elapsed = frame_start.elapsed();
            if elapsed < frame_budget {
                std::thread::sleep(frame_budget - elapsed);
            }
        }
    }

    println!(
        "ran {frames} frame(s), frame={} cycles={}",
        nes.frame_count(),
        nes.cycles()
    );
    Ok(())
}
