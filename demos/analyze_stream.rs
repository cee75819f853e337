//! Example: Analyze a synthesized stream frame by frame
//!
//! Synthesizes a two-partial tone with a slow glide, runs the per-frame
//! sine model pipeline over it, and prints the evolving track slots.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use sinemodel_dsp::{analyze_frame, SineModelConfig, SineTracks};

const SAMPLE_RATE: f32 = 44100.0;
const FRAME_SIZE: usize = 2048;
const HOP_SIZE: usize = 512;
const NUM_FRAMES: usize = 40;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let config = SineModelConfig {
        magnitude_threshold: 50.0,
        ..Default::default()
    };
    let mut tracks = SineTracks::new(10);

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(FRAME_SIZE);

    for frame in 0..NUM_FRAMES {
        // 440 Hz gliding upward plus a steady 1320 Hz partial.
        let glide = 440.0 + 2.0 * frame as f32;
        let offset = frame * HOP_SIZE;

        let mut buffer: Vec<Complex<f32>> = (0..FRAME_SIZE)
            .map(|n| {
                let t = (offset + n) as f32 / SAMPLE_RATE;
                let sample = (2.0 * std::f32::consts::PI * glide * t).sin()
                    + 0.5 * (2.0 * std::f32::consts::PI * 1320.0 * t).sin();
                let window = 0.5
                    - 0.5
                        * (2.0 * std::f32::consts::PI * n as f32 / (FRAME_SIZE - 1) as f32).cos();
                Complex::new(sample * window, 0.0)
            })
            .collect();
        fft.process(&mut buffer);
        buffer.truncate(FRAME_SIZE / 2 + 1);

        let peaks = analyze_frame(&buffer, &mut tracks, &config)?;

        let slots: Vec<String> = tracks
            .frequencies()
            .iter()
            .zip(tracks.magnitudes())
            .filter(|(&f, _)| f > 0.0)
            .map(|(&f, &m)| format!("{:.1} Hz ({:.0})", f, m))
            .collect();
        println!(
            "frame {:2}: {} peaks, active tracks: [{}]",
            frame,
            peaks.len(),
            slots.join(", ")
        );
    }

    Ok(())
}
