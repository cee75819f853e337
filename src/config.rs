//! Configuration parameters for sine model analysis

use serde::{Deserialize, Serialize};

use crate::error::SineModelError;

/// Ordering of the peaks returned by peak detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeakOrder {
    /// Ascending frequency
    Frequency,
    /// Descending magnitude
    Magnitude,
}

/// Sine model analysis configuration parameters
#[derive(Debug, Clone)]
pub struct SineModelConfig {
    /// Sample rate of the audio signal in Hz (default: 44100.0)
    pub sample_rate: f32,

    /// Maximum number of peaks returned per frame (default: 100)
    pub max_peaks: usize,

    /// Minimum frequency of the evaluated range in Hz (default: 0.0)
    pub min_frequency: f32,

    /// Maximum frequency of the evaluated range in Hz (default: 5000.0)
    pub max_frequency: f32,

    /// Peaks below this magnitude are discarded (default: 0.0)
    pub magnitude_threshold: f32,

    /// Ordering of the detected peaks (default: Frequency)
    pub order_by: PeakOrder,

    /// Minimum frequency deviation tolerated at 0 Hz when continuing
    /// tracks, in Hz (default: 20.0)
    pub freq_dev_offset: f32,

    /// Slope increase of the tolerated frequency deviation per Hz of
    /// peak frequency (default: 0.01)
    pub freq_dev_slope: f32,
}

impl Default for SineModelConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            max_peaks: 100,
            min_frequency: 0.0,
            max_frequency: 5000.0,
            magnitude_threshold: 0.0,
            order_by: PeakOrder::Frequency,
            freq_dev_offset: 20.0,
            freq_dev_slope: 0.01,
        }
    }
}

impl SineModelConfig {
    /// Nyquist frequency implied by the configured sample rate
    pub fn nyquist(&self) -> f32 {
        self.sample_rate / 2.0
    }

    /// Validate configuration parameters
    ///
    /// Configuration errors fail fast here, at configuration time, rather
    /// than surfacing during per-frame compute.
    ///
    /// # Errors
    ///
    /// Returns `SineModelError::InvalidInput` if any parameter is out of
    /// its documented range.
    pub fn validate(&self) -> Result<(), SineModelError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(SineModelError::InvalidInput(format!(
                "Invalid sample rate: {}",
                self.sample_rate
            )));
        }

        if self.max_peaks == 0 {
            return Err(SineModelError::InvalidInput(
                "max_peaks must be at least 1".to_string(),
            ));
        }

        if !self.min_frequency.is_finite() || self.min_frequency < 0.0 {
            return Err(SineModelError::InvalidInput(format!(
                "Invalid minimum frequency: {}",
                self.min_frequency
            )));
        }

        if !self.max_frequency.is_finite() || self.max_frequency <= self.min_frequency {
            return Err(SineModelError::InvalidInput(format!(
                "Invalid frequency range: [{}, {}]",
                self.min_frequency, self.max_frequency
            )));
        }

        if !self.magnitude_threshold.is_finite() {
            return Err(SineModelError::InvalidInput(format!(
                "Invalid magnitude threshold: {}",
                self.magnitude_threshold
            )));
        }

        if !self.freq_dev_offset.is_finite() || self.freq_dev_offset < 0.0 {
            return Err(SineModelError::InvalidInput(format!(
                "Invalid frequency deviation offset: {}",
                self.freq_dev_offset
            )));
        }

        if !self.freq_dev_slope.is_finite() || self.freq_dev_slope < 0.0 {
            return Err(SineModelError::InvalidInput(format!(
                "Invalid frequency deviation slope: {}",
                self.freq_dev_slope
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SineModelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_peaks, 100);
        assert_eq!(config.order_by, PeakOrder::Frequency);
        assert!((config.nyquist() - 22050.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_sample_rate() {
        let config = SineModelConfig {
            sample_rate: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_frequency_range() {
        let config = SineModelConfig {
            min_frequency: 5000.0,
            max_frequency: 100.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_deviation_parameters() {
        let config = SineModelConfig {
            freq_dev_offset: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SineModelConfig {
            freq_dev_slope: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_peaks_rejected() {
        let config = SineModelConfig {
            max_peaks: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
