//! Sub-bin phase interpolation
//!
//! Estimates the phase of a spectral peak at a non-integer bin position by
//! linear interpolation over the discrete phase spectrum. Spectral phase
//! is circular (it wraps at +/-PI), so interpolating across a wrap
//! discontinuity produces nonsense: when the gap between the two bins
//! exceeds PI a wrap is suspected and the nearest-bin phase is returned
//! unmodified instead. This trades a small bias for avoiding gross phase
//! errors.

use std::f32::consts::PI;

use crate::error::SineModelError;

/// Interpolate the phase of each peak from the discrete phase spectrum
///
/// For each peak frequency the fractional bin position is
/// `pos = len * frequency / nyquist`, the nearest bin is `round(pos)`
/// (clamped to the last bin), and the signed offset `a = pos - idx`
/// selects the neighbor to interpolate toward. Each peak is an
/// independent, stateless computation; no ordering is assumed.
///
/// # Arguments
///
/// * `phase_spectrum` - Discrete phase spectrum in radians (DC..Nyquist)
/// * `peak_frequencies` - Peak frequencies in Hz, each in `[0, nyquist]`
/// * `nyquist` - Nyquist frequency in Hz
///
/// # Returns
///
/// One interpolated phase per peak frequency, in input order.
///
/// # Errors
///
/// Returns `SineModelError::InvalidInput` if the phase spectrum is empty,
/// the Nyquist frequency is not a positive finite value, or a peak
/// frequency falls outside `[0, nyquist]`.
pub fn interpolate_peak_phases(
    phase_spectrum: &[f32],
    peak_frequencies: &[f32],
    nyquist: f32,
) -> Result<Vec<f32>, SineModelError> {
    if phase_spectrum.is_empty() {
        return Err(SineModelError::InvalidInput(
            "Empty phase spectrum".to_string(),
        ));
    }

    if !nyquist.is_finite() || nyquist <= 0.0 {
        return Err(SineModelError::InvalidInput(format!(
            "Invalid Nyquist frequency: {}",
            nyquist
        )));
    }

    log::debug!(
        "Interpolating phases: {} peaks over {} bins",
        peak_frequencies.len(),
        phase_spectrum.len()
    );

    let len = phase_spectrum.len();
    let last = len - 1;
    let mut phases = Vec::with_capacity(peak_frequencies.len());

    for &frequency in peak_frequencies {
        if !frequency.is_finite() || frequency < 0.0 || frequency > nyquist {
            return Err(SineModelError::InvalidInput(format!(
                "Peak frequency out of range [0, {}]: {}",
                nyquist, frequency
            )));
        }

        let pos = len as f32 * (frequency / nyquist);
        // round() reaches len at exactly Nyquist; clamp to the last bin
        // and let the boundary branch serve it.
        let idx = (pos.round() as usize).min(last);
        let a = pos - idx as f32;

        let phase = if a < 0.0 && idx > 0 {
            let gap = (phase_spectrum[idx - 1] - phase_spectrum[idx]).abs();
            if gap > PI {
                phase_spectrum[idx]
            } else {
                -a * phase_spectrum[idx - 1] + (1.0 + a) * phase_spectrum[idx]
            }
        } else if idx < last {
            let gap = (phase_spectrum[idx + 1] - phase_spectrum[idx]).abs();
            if gap > PI {
                phase_spectrum[idx]
            } else {
                a * phase_spectrum[idx + 1] + (1.0 - a) * phase_spectrum[idx]
            }
        } else {
            // Last bin: no neighbor available.
            phase_spectrum[idx]
        };

        phases.push(phase);
    }

    Ok(phases)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NYQUIST: f32 = 22050.0;

    #[test]
    fn test_zero_frequency_returns_first_bin_exactly() {
        let spectrum = vec![0.7, 0.9, 1.1, 1.3];
        let phases = interpolate_peak_phases(&spectrum, &[0.0], NYQUIST).unwrap();
        assert_eq!(phases, vec![0.7]);
    }

    #[test]
    fn test_nyquist_frequency_returns_last_bin_exactly() {
        let spectrum = vec![0.1, 0.2, 0.3, 0.4];
        let phases = interpolate_peak_phases(&spectrum, &[NYQUIST], NYQUIST).unwrap();
        assert_eq!(phases, vec![0.4]);
    }

    #[test]
    fn test_integer_bin_position_is_exact() {
        let spectrum = vec![0.1, 0.5, 0.9, 1.3];
        // pos = 4 * f / nyquist = 2.0 exactly.
        let f = NYQUIST * 2.0 / 4.0;
        let phases = interpolate_peak_phases(&spectrum, &[f], NYQUIST).unwrap();
        assert!((phases[0] - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_interpolation_toward_upper_neighbor() {
        // Smooth spectrum, fractional position 1.25: a = 0.25 toward bin 2.
        let spectrum = vec![0.0, 1.0, 2.0, 3.0];
        let f = NYQUIST * 1.25 / 4.0;
        let phases = interpolate_peak_phases(&spectrum, &[f], NYQUIST).unwrap();
        let expected = 0.25 * 2.0 + 0.75 * 1.0;
        assert!(
            (phases[0] - expected).abs() < 1e-4,
            "expected {}, got {}",
            expected,
            phases[0]
        );
    }

    #[test]
    fn test_interpolation_toward_lower_neighbor() {
        // Fractional position 1.75: nearest bin 2, a = -0.25 toward bin 1.
        let spectrum = vec![0.0, 1.0, 2.0, 3.0];
        let f = NYQUIST * 1.75 / 4.0;
        let phases = interpolate_peak_phases(&spectrum, &[f], NYQUIST).unwrap();
        let expected = 0.25 * 1.0 + 0.75 * 2.0;
        assert!(
            (phases[0] - expected).abs() < 1e-4,
            "expected {}, got {}",
            expected,
            phases[0]
        );
    }

    #[test]
    fn test_wrap_suppression_upper_neighbor() {
        // Jump larger than PI between bins 1 and 2: a peak whose fractional
        // position falls between them takes the nearest bin unmodified.
        let spectrum = vec![0.0, 3.0, -3.0, 0.0];
        let f = NYQUIST * 1.25 / 4.0;
        let phases = interpolate_peak_phases(&spectrum, &[f], NYQUIST).unwrap();
        assert_eq!(phases[0], 3.0);
    }

    #[test]
    fn test_wrap_suppression_lower_neighbor() {
        let spectrum = vec![0.0, 3.0, -3.0, 0.0];
        // Fractional position 1.75: nearest bin 2, lower neighbor gap > PI.
        let f = NYQUIST * 1.75 / 4.0;
        let phases = interpolate_peak_phases(&spectrum, &[f], NYQUIST).unwrap();
        assert_eq!(phases[0], -3.0);
    }

    #[test]
    fn test_multiple_peaks_preserve_order() {
        let spectrum = vec![0.1, 0.2, 0.3, 0.4];
        let f1 = NYQUIST * 1.0 / 4.0;
        let f2 = NYQUIST * 3.0 / 4.0;
        let phases = interpolate_peak_phases(&spectrum, &[f2, f1], NYQUIST).unwrap();
        assert_eq!(phases.len(), 2);
        assert!((phases[0] - 0.4).abs() < 1e-6);
        assert!((phases[1] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_empty_peak_list() {
        let spectrum = vec![0.1, 0.2];
        let phases = interpolate_peak_phases(&spectrum, &[], NYQUIST).unwrap();
        assert!(phases.is_empty());
    }

    #[test]
    fn test_empty_spectrum_rejected() {
        assert!(interpolate_peak_phases(&[], &[100.0], NYQUIST).is_err());
    }

    #[test]
    fn test_out_of_range_frequency_rejected() {
        let spectrum = vec![0.1, 0.2, 0.3];
        assert!(interpolate_peak_phases(&spectrum, &[-1.0], NYQUIST).is_err());
        assert!(interpolate_peak_phases(&spectrum, &[NYQUIST + 1.0], NYQUIST).is_err());
    }

    #[test]
    fn test_invalid_nyquist_rejected() {
        let spectrum = vec![0.1, 0.2];
        assert!(interpolate_peak_phases(&spectrum, &[0.0], 0.0).is_err());
        assert!(interpolate_peak_phases(&spectrum, &[0.0], f32::NAN).is_err());
    }
}
