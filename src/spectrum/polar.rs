//! Cartesian to polar spectrum conversion

use rustfft::num_complex::Complex;

/// Convert a complex spectrum into parallel magnitude and phase arrays
///
/// # Arguments
///
/// * `spectrum` - One-sided complex spectrum (DC through Nyquist)
///
/// # Returns
///
/// `(magnitudes, phases)` with the same length as the input. Magnitudes
/// are linear; phases are in radians, in `[-PI, PI]`.
pub fn cartesian_to_polar(spectrum: &[Complex<f32>]) -> (Vec<f32>, Vec<f32>) {
    let magnitudes = spectrum.iter().map(|c| c.norm()).collect();
    let phases = spectrum.iter().map(|c| c.arg()).collect();
    (magnitudes, phases)
}
