//! Sinusoidal track continuation and phase reconstruction
//!
//! Two independent per-frame components:
//! - Track continuation: assigns detected peaks to continuing or newly
//!   spawned tracks across frames
//! - Phase interpolation: estimates peak phase at sub-bin frequency
//!   positions from the discrete phase spectrum

pub mod continuation;
pub mod phase;

pub use continuation::continue_tracks;
pub use phase::interpolate_peak_phases;

use serde::{Deserialize, Serialize};

use crate::error::SineModelError;
use crate::spectrum::SpectralPeaks;

/// One frame of track slots as parallel arrays
///
/// Slot index is track identity: a track continues across frames by
/// keeping the same index. A slot frequency of exactly 0.0 means the slot
/// is empty for that frame; callers must guarantee 0 Hz is never a
/// legitimate peak frequency (peak detection excludes DC).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackFrame {
    /// Track frequencies in Hz; 0.0 denotes an empty slot
    pub frequencies: Vec<f32>,

    /// Track magnitudes (linear)
    pub magnitudes: Vec<f32>,

    /// Track phases in radians
    pub phases: Vec<f32>,
}

impl TrackFrame {
    /// All-empty frame with `num_tracks` zeroed slots
    pub fn zeroed(num_tracks: usize) -> Self {
        Self {
            frequencies: vec![0.0; num_tracks],
            magnitudes: vec![0.0; num_tracks],
            phases: vec![0.0; num_tracks],
        }
    }

    /// Number of track slots
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True if the frame has no slots at all
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// Caller-owned track slot array for one audio stream
///
/// Created once before the first frame and kept for the duration of the
/// stream; `advance` rewrites its contents in place each frame. The slot
/// array only grows, never shrinks, across frames. Each independent audio
/// stream must own its own instance; sharing one across concurrent frame
/// processing is not supported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SineTracks {
    frame: TrackFrame,
}

impl SineTracks {
    /// Create an all-empty track array with `num_tracks` slots
    pub fn new(num_tracks: usize) -> Self {
        Self {
            frame: TrackFrame::zeroed(num_tracks),
        }
    }

    /// Number of track slots
    pub fn len(&self) -> usize {
        self.frame.len()
    }

    /// True if the array has no slots
    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    /// Number of slots currently carrying an active track
    pub fn active_count(&self) -> usize {
        self.frame.frequencies.iter().filter(|&&f| f > 0.0).count()
    }

    /// Current track frequencies; 0.0 denotes an empty slot
    pub fn frequencies(&self) -> &[f32] {
        &self.frame.frequencies
    }

    /// Current track magnitudes
    pub fn magnitudes(&self) -> &[f32] {
        &self.frame.magnitudes
    }

    /// Current track phases
    pub fn phases(&self) -> &[f32] {
        &self.frame.phases
    }

    /// Current frame of track slots
    pub fn frame(&self) -> &TrackFrame {
        &self.frame
    }

    /// Continue tracks into the current frame's peaks, in place
    ///
    /// Runs one step of track continuation and persists the result as the
    /// incoming state for the next frame. See [`continue_tracks`] for the
    /// matching semantics.
    ///
    /// # Errors
    ///
    /// Propagates contract violations from [`continue_tracks`]; the track
    /// state is left unchanged on error.
    pub fn advance(
        &mut self,
        peaks: &SpectralPeaks,
        freq_dev_offset: f32,
        freq_dev_slope: f32,
    ) -> Result<(), SineModelError> {
        let next = continue_tracks(peaks, &self.frame, freq_dev_offset, freq_dev_slope)?;
        debug_assert!(next.len() >= self.frame.len());
        self.frame = next;
        Ok(())
    }
}
