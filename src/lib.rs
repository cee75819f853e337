//! # Sinemodel DSP
//!
//! A sinusoidal-modeling analysis core: decomposes short-time spectral
//! frames into time-varying sine waves for analysis, transformation, or
//! resynthesis.
//!
//! ## Features
//!
//! - **Track continuation**: greedy, magnitude-prioritized assignment of
//!   each frame's spectral peaks to continuing or newly spawned tracks
//! - **Phase interpolation**: sub-bin phase reconstruction from the
//!   discrete phase spectrum, with a wrap-discontinuity guard
//! - **Peak detection**: local-maxima search with parabolic sub-bin
//!   interpolation, feeding the two components above
//!
//! ## Quick Start
//!
//! ```no_run
//! use sinemodel_dsp::{analyze_frame, SineModelConfig, SineTracks};
//! use rustfft::num_complex::Complex;
//!
//! let config = SineModelConfig::default();
//! let mut tracks = SineTracks::new(config.max_peaks);
//!
//! // One-sided complex spectrum (DC through Nyquist) for each frame.
//! let spectrum: Vec<Complex<f32>> = vec![]; // Your STFT frame
//!
//! let peaks = analyze_frame(&spectrum, &mut tracks, &config)?;
//! println!("{} peaks, {} active tracks", peaks.len(), tracks.active_count());
//! # Ok::<(), sinemodel_dsp::SineModelError>(())
//! ```
//!
//! ## Architecture
//!
//! The per-frame pipeline:
//!
//! ```text
//! Complex spectrum → Polar conversion → Peak detection → Phase
//! interpolation → Track continuation → Updated tracks
//! ```
//!
//! The two core components compose only through the caller: track
//! continuation consumes peaks and the caller-owned track array; phase
//! interpolation consumes the raw phase spectrum and peak frequencies.
//! Both are synchronous pure computations with no I/O. Track continuation
//! has a strict sequential dependency across frames (frame N's output is
//! frame N+1's input), so calls must be serialized per stream; phase
//! interpolation has no cross-frame state.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod spectrum;
pub mod tracking;

pub use config::{PeakOrder, SineModelConfig};
pub use error::SineModelError;
pub use spectrum::SpectralPeaks;
pub use tracking::{SineTracks, TrackFrame};

use rustfft::num_complex::Complex;

/// Analyze one spectral frame and continue the stream's tracks
///
/// Runs the full per-frame pipeline: converts the complex spectrum to
/// magnitude/phase form, detects sinusoidal peaks, interpolates each
/// peak's phase at its sub-bin position, and continues the caller-owned
/// track array in place.
///
/// # Arguments
///
/// * `spectrum` - One-sided complex spectrum (DC through Nyquist)
/// * `tracks` - The stream's track array, updated in place
/// * `config` - Analysis configuration
///
/// # Returns
///
/// The detected peaks for this frame, with phases filled in.
///
/// # Errors
///
/// Returns `SineModelError` on invalid configuration or a spectrum with
/// fewer than 2 bins; the track array is left unchanged on error.
pub fn analyze_frame(
    spectrum: &[Complex<f32>],
    tracks: &mut SineTracks,
    config: &SineModelConfig,
) -> Result<SpectralPeaks, SineModelError> {
    config.validate()?;

    log::debug!(
        "Analyzing frame: {} bins, {} track slots",
        spectrum.len(),
        tracks.len()
    );

    if spectrum.len() < 2 {
        return Err(SineModelError::InvalidInput(format!(
            "Spectrum too short: {} bins",
            spectrum.len()
        )));
    }

    let (magnitudes, phase_spectrum) = spectrum::polar::cartesian_to_polar(spectrum);

    let mut peaks = spectrum::peaks::detect_peaks(&magnitudes, config)?;

    peaks.phases = tracking::phase::interpolate_peak_phases(
        &phase_spectrum,
        &peaks.frequencies,
        config.nyquist(),
    )?;

    tracks.advance(&peaks, config.freq_dev_offset, config.freq_dev_slope)?;

    Ok(peaks)
}
