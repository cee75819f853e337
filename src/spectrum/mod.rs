//! Spectrum-domain processing
//!
//! Converts a complex spectrum into magnitude/phase form and detects
//! sinusoidal peaks with sub-bin precision:
//! - Cartesian to polar conversion
//! - Spectral peak detection with parabolic interpolation

pub mod peaks;
pub mod polar;

use serde::{Deserialize, Serialize};

/// Detected spectral peaks for one analysis frame
///
/// Parallel arrays: element `i` of each vector describes the same peak.
/// Phases are zero until the phase estimator has run for the frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectralPeaks {
    /// Peak frequencies in Hz, interpolated to sub-bin precision
    pub frequencies: Vec<f32>,

    /// Peak magnitudes (linear), interpolated to sub-bin precision
    pub magnitudes: Vec<f32>,

    /// Peak phases in radians
    pub phases: Vec<f32>,
}

impl SpectralPeaks {
    /// Number of peaks in the frame
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True if the frame contains no peaks
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}
