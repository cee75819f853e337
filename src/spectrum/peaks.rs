//! Spectral peak detection with sub-bin interpolation
//!
//! Finds local maxima in a magnitude spectrum and refines their position
//! and height by parabolic interpolation over the three bins around each
//! maximum, then applies the configured frequency range, magnitude
//! threshold, peak cap, and ordering.

use crate::config::{PeakOrder, SineModelConfig};
use crate::error::SineModelError;
use crate::spectrum::SpectralPeaks;

const EPSILON: f32 = 1e-10;

/// Detect sinusoidal peaks in a magnitude spectrum
///
/// # Arguments
///
/// * `magnitudes` - One-sided magnitude spectrum (DC through Nyquist)
/// * `config` - Analysis configuration (range, threshold, cap, ordering)
///
/// # Returns
///
/// `SpectralPeaks` with interpolated frequencies and magnitudes; phases
/// are zero-filled and left for the phase estimator.
///
/// # Errors
///
/// Returns `SineModelError::InvalidInput` if the configuration is
/// invalid, the spectrum is too short (fewer than 2 bins), or it contains
/// non-finite values.
pub fn detect_peaks(
    magnitudes: &[f32],
    config: &SineModelConfig,
) -> Result<SpectralPeaks, SineModelError> {
    config.validate()?;

    log::debug!(
        "Detecting peaks: {} bins, range=[{:.1}, {:.1}] Hz, threshold={:.3}",
        magnitudes.len(),
        config.min_frequency,
        config.max_frequency,
        config.magnitude_threshold
    );

    if magnitudes.len() < 2 {
        return Err(SineModelError::InvalidInput(format!(
            "Magnitude spectrum too short: {} bins",
            magnitudes.len()
        )));
    }

    if magnitudes.iter().any(|m| !m.is_finite()) {
        return Err(SineModelError::NumericalError(
            "Magnitude spectrum contains non-finite values".to_string(),
        ));
    }

    let nyquist = config.nyquist();
    // Bin spacing: the last bin of the one-sided spectrum sits at Nyquist.
    let bin_hz = nyquist / (magnitudes.len() - 1) as f32;
    let max_frequency = config.max_frequency.min(nyquist);

    let mut frequencies = Vec::new();
    let mut mags = Vec::new();

    // Interior bins only; DC and Nyquist are never reported as peaks.
    for i in 1..(magnitudes.len() - 1) {
        let m = magnitudes[i];
        if m <= config.magnitude_threshold {
            continue;
        }
        if !(m > magnitudes[i - 1] && m >= magnitudes[i + 1]) {
            continue;
        }

        let (pos, height) = interpolate_parabolic(magnitudes, i);
        let frequency = pos * bin_hz;

        if frequency < config.min_frequency || frequency > max_frequency {
            continue;
        }
        if frequency <= 0.0 {
            // 0 Hz denotes an empty track slot downstream; DC is excluded.
            continue;
        }

        frequencies.push(frequency);
        mags.push(height);
    }

    // Candidates arrive in ascending frequency. Apply the cap in the
    // requested order, then keep that order in the output.
    let mut order: Vec<usize> = (0..frequencies.len()).collect();
    if config.order_by == PeakOrder::Magnitude {
        order.sort_by(|&a, &b| {
            mags[b]
                .partial_cmp(&mags[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
    order.truncate(config.max_peaks);

    let frequencies: Vec<f32> = order.iter().map(|&i| frequencies[i]).collect();
    let magnitudes_out: Vec<f32> = order.iter().map(|&i| mags[i]).collect();
    let phases = vec![0.0; frequencies.len()];

    log::debug!("Detected {} peaks", frequencies.len());

    Ok(SpectralPeaks {
        frequencies,
        magnitudes: magnitudes_out,
        phases,
    })
}

/// Parabolic refinement of a local maximum at bin `i`
///
/// Fits a parabola through bins `i-1`, `i`, `i+1` and returns the refined
/// fractional bin position and peak height. Falls back to the raw bin when
/// the three points are degenerate (flat neighborhood).
fn interpolate_parabolic(magnitudes: &[f32], i: usize) -> (f32, f32) {
    let left = magnitudes[i - 1];
    let center = magnitudes[i];
    let right = magnitudes[i + 1];

    let denom = left - 2.0 * center + right;
    if denom.abs() < EPSILON {
        return (i as f32, center);
    }

    let delta = 0.5 * (left - right) / denom;
    // A true local maximum keeps delta within half a bin; clamp against
    // numerically pathological neighborhoods.
    let delta = delta.clamp(-0.5, 0.5);
    let height = center - 0.25 * (left - right) * delta;

    (i as f32 + delta, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SineModelConfig {
        SineModelConfig {
            sample_rate: 1000.0,
            max_peaks: 10,
            min_frequency: 0.0,
            max_frequency: 500.0,
            magnitude_threshold: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_peak_interpolated() {
        // 11 bins over 0..500 Hz -> 50 Hz per bin. Symmetric triple around
        // bin 4 biased right: the parabola lands between bins 4 and 5.
        let mut magnitudes = vec![0.0f32; 11];
        magnitudes[3] = 0.4;
        magnitudes[4] = 1.0;
        magnitudes[5] = 0.8;

        let peaks = detect_peaks(&magnitudes, &test_config()).unwrap();
        assert_eq!(peaks.len(), 1);
        assert!(
            peaks.frequencies[0] > 200.0 && peaks.frequencies[0] < 250.0,
            "interpolated frequency should sit right of bin 4: {}",
            peaks.frequencies[0]
        );
        assert!(peaks.magnitudes[0] >= 1.0);
        assert_eq!(peaks.phases, vec![0.0]);
    }

    #[test]
    fn test_symmetric_peak_exact_bin() {
        let mut magnitudes = vec![0.0f32; 11];
        magnitudes[4] = 0.5;
        magnitudes[5] = 1.0;
        magnitudes[6] = 0.5;

        let peaks = detect_peaks(&magnitudes, &test_config()).unwrap();
        assert_eq!(peaks.len(), 1);
        assert!((peaks.frequencies[0] - 250.0).abs() < 1e-3);
        assert!((peaks.magnitudes[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_filters_peaks() {
        let mut magnitudes = vec![0.0f32; 11];
        magnitudes[3] = 0.1;
        magnitudes[7] = 0.9;

        let config = SineModelConfig {
            magnitude_threshold: 0.5,
            ..test_config()
        };
        let peaks = detect_peaks(&magnitudes, &config).unwrap();
        assert_eq!(peaks.len(), 1);
        assert!(peaks.magnitudes[0] >= 0.9);
    }

    #[test]
    fn test_frequency_range_filter() {
        let mut magnitudes = vec![0.0f32; 11];
        magnitudes[2] = 1.0; // 100 Hz
        magnitudes[8] = 1.0; // 400 Hz

        let config = SineModelConfig {
            min_frequency: 150.0,
            max_frequency: 450.0,
            ..test_config()
        };
        let peaks = detect_peaks(&magnitudes, &config).unwrap();
        assert_eq!(peaks.len(), 1);
        assert!((peaks.frequencies[0] - 400.0).abs() < 1.0);
    }

    #[test]
    fn test_max_peaks_cap_keeps_strongest_in_magnitude_order() {
        let mut magnitudes = vec![0.0f32; 21];
        magnitudes[3] = 0.3;
        magnitudes[7] = 0.9;
        magnitudes[11] = 0.6;
        magnitudes[15] = 0.1;

        let config = SineModelConfig {
            max_peaks: 2,
            order_by: PeakOrder::Magnitude,
            ..test_config()
        };
        let peaks = detect_peaks(&magnitudes, &config).unwrap();
        assert_eq!(peaks.len(), 2);
        assert!(peaks.magnitudes[0] >= peaks.magnitudes[1]);
        assert!(peaks.magnitudes[1] >= 0.6);
    }

    #[test]
    fn test_frequency_order_ascending() {
        let mut magnitudes = vec![0.0f32; 21];
        magnitudes[5] = 0.2;
        magnitudes[10] = 0.9;
        magnitudes[15] = 0.5;

        let peaks = detect_peaks(&magnitudes, &test_config()).unwrap();
        assert_eq!(peaks.len(), 3);
        for i in 1..peaks.len() {
            assert!(
                peaks.frequencies[i - 1] < peaks.frequencies[i],
                "peaks should be in ascending frequency order"
            );
        }
    }

    #[test]
    fn test_flat_spectrum_has_no_peaks() {
        let magnitudes = vec![0.5f32; 16];
        let peaks = detect_peaks(&magnitudes, &test_config()).unwrap();
        assert!(peaks.is_empty());
    }

    #[test]
    fn test_short_spectrum_rejected() {
        let result = detect_peaks(&[1.0], &test_config());
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_spectrum_rejected() {
        let magnitudes = vec![0.0, f32::NAN, 0.0, 0.0];
        let result = detect_peaks(&magnitudes, &test_config());
        assert!(result.is_err());
    }
}
