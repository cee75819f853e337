//! Sinusoidal track continuation
//!
//! Assigns each frame's detected peaks to either a continuing track from
//! the previous frame or a newly spawned track. Matching is greedy and
//! magnitude-prioritized: louder peaks get first choice of which track to
//! continue, which keeps perceptually dominant partials on their tracks
//! and reduces audible track switching in resynthesis. This is not an
//! optimal bipartite assignment; per-frame peak and track counts are small
//! and the pass must run once per frame in a streaming pipeline.

use crate::error::SineModelError;
use crate::spectrum::SpectralPeaks;
use crate::tracking::TrackFrame;

/// Continue the previous frame's tracks into the current frame's peaks
///
/// One pure continuation step:
/// 1. Peaks are taken in descending magnitude order. Each peak claims the
///    unmatched incoming track whose frequency is nearest to it, provided
///    the distance is below `freq_dev_offset + freq_dev_slope * peak_freq`.
///    A track matches at most one peak and a peak at most one track.
/// 2. Matched slots take the peak's (frequency, magnitude, phase).
/// 3. Active incoming tracks that no peak claimed keep their previous
///    values; they are not treated as empty in the fill phase.
/// 4. Leftover peaks fill slots that were empty on entry, strongest first.
///    Peaks beyond the available empty slots append new slots, so the
///    output never has fewer slots than the input.
///
/// # Arguments
///
/// * `peaks` - Detected peaks for the current frame (any order)
/// * `incoming` - Previous frame's track slots; frequency 0.0 = empty slot
/// * `freq_dev_offset` - Tolerated frequency deviation at 0 Hz, in Hz
/// * `freq_dev_slope` - Tolerance increase per Hz of peak frequency
///
/// # Returns
///
/// The updated track frame. Slot indices below `incoming.len()` keep their
/// identity; appended slots are new tracks.
///
/// # Errors
///
/// Returns `SineModelError::InvalidInput` on contract violations: ragged
/// parallel arrays, negative or non-finite frequencies, negative
/// magnitudes, or non-finite tolerance parameters. Degenerate inputs
/// (no peaks, all-empty incoming tracks) are not errors.
pub fn continue_tracks(
    peaks: &SpectralPeaks,
    incoming: &TrackFrame,
    freq_dev_offset: f32,
    freq_dev_slope: f32,
) -> Result<TrackFrame, SineModelError> {
    validate_inputs(peaks, incoming, freq_dev_offset, freq_dev_slope)?;

    log::debug!(
        "Continuing tracks: {} peaks into {} slots, tolerance {:.1} + {:.4}/Hz",
        peaks.len(),
        incoming.len(),
        freq_dev_offset,
        freq_dev_slope
    );

    let num_slots = incoming.len();
    let mut out = TrackFrame::zeroed(num_slots);

    // Candidate peaks, strongest first. Zero-frequency entries are not
    // legitimate peaks and never participate.
    let mut mag_order: Vec<usize> = (0..peaks.len())
        .filter(|&i| peaks.frequencies[i] > 0.0)
        .collect();
    mag_order.sort_by(|&a, &b| {
        peaks.magnitudes[b]
            .partial_cmp(&peaks.magnitudes[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Pool of still-unmatched active incoming slots.
    let mut unmatched: Vec<usize> = (0..num_slots)
        .filter(|&i| incoming.frequencies[i] > 0.0)
        .collect();

    let mut assigned: Vec<Option<usize>> = vec![None; num_slots];
    let mut peak_used = vec![false; peaks.len()];

    for &p in &mag_order {
        if unmatched.is_empty() {
            break;
        }
        let peak_freq = peaks.frequencies[p];

        // Nearest unmatched incoming track by absolute frequency distance.
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for (k, &slot) in unmatched.iter().enumerate() {
            let dist = (peak_freq - incoming.frequencies[slot]).abs();
            if dist < best_dist {
                best_dist = dist;
                best = k;
            }
        }

        if best_dist < freq_dev_offset + freq_dev_slope * peak_freq {
            let slot = unmatched.swap_remove(best);
            assigned[slot] = Some(p);
            peak_used[p] = true;
        }
    }

    // Matched slots take the peak; unmatched active slots carry over.
    for slot in 0..num_slots {
        if let Some(p) = assigned[slot] {
            out.frequencies[slot] = peaks.frequencies[p];
            out.magnitudes[slot] = peaks.magnitudes[p];
            out.phases[slot] = peaks.phases[p];
        } else if incoming.frequencies[slot] > 0.0 {
            out.frequencies[slot] = incoming.frequencies[slot];
            out.magnitudes[slot] = incoming.magnitudes[slot];
            out.phases[slot] = incoming.phases[slot];
        }
    }

    // Fill slots that were empty on entry with leftover peaks, strongest
    // first; append new slots for any overflow.
    let leftovers: Vec<usize> = mag_order.into_iter().filter(|&p| !peak_used[p]).collect();
    let empty_slots: Vec<usize> = (0..num_slots)
        .filter(|&i| incoming.frequencies[i] == 0.0)
        .collect();

    for (n, &p) in leftovers.iter().enumerate() {
        if let Some(&slot) = empty_slots.get(n) {
            out.frequencies[slot] = peaks.frequencies[p];
            out.magnitudes[slot] = peaks.magnitudes[p];
            out.phases[slot] = peaks.phases[p];
        } else {
            out.frequencies.push(peaks.frequencies[p]);
            out.magnitudes.push(peaks.magnitudes[p]);
            out.phases.push(peaks.phases[p]);
        }
    }

    log::debug!(
        "Continuation done: {} slots out ({} appended)",
        out.len(),
        out.len() - num_slots
    );

    Ok(out)
}

fn validate_inputs(
    peaks: &SpectralPeaks,
    incoming: &TrackFrame,
    freq_dev_offset: f32,
    freq_dev_slope: f32,
) -> Result<(), SineModelError> {
    if peaks.frequencies.len() != peaks.magnitudes.len()
        || peaks.frequencies.len() != peaks.phases.len()
    {
        return Err(SineModelError::InvalidInput(format!(
            "Ragged peak arrays: {} frequencies, {} magnitudes, {} phases",
            peaks.frequencies.len(),
            peaks.magnitudes.len(),
            peaks.phases.len()
        )));
    }

    if incoming.frequencies.len() != incoming.magnitudes.len()
        || incoming.frequencies.len() != incoming.phases.len()
    {
        return Err(SineModelError::InvalidInput(format!(
            "Ragged track arrays: {} frequencies, {} magnitudes, {} phases",
            incoming.frequencies.len(),
            incoming.magnitudes.len(),
            incoming.phases.len()
        )));
    }

    if let Some(&f) = peaks
        .frequencies
        .iter()
        .find(|&&f| !f.is_finite() || f < 0.0)
    {
        return Err(SineModelError::InvalidInput(format!(
            "Invalid peak frequency: {}",
            f
        )));
    }

    if let Some(&m) = peaks
        .magnitudes
        .iter()
        .find(|&&m| !m.is_finite() || m < 0.0)
    {
        return Err(SineModelError::InvalidInput(format!(
            "Invalid peak magnitude: {}",
            m
        )));
    }

    if let Some(&f) = incoming
        .frequencies
        .iter()
        .find(|&&f| !f.is_finite() || f < 0.0)
    {
        return Err(SineModelError::InvalidInput(format!(
            "Invalid incoming track frequency: {}",
            f
        )));
    }

    if !freq_dev_offset.is_finite()
        || freq_dev_offset < 0.0
        || !freq_dev_slope.is_finite()
        || freq_dev_slope < 0.0
    {
        return Err(SineModelError::InvalidInput(format!(
            "Invalid deviation parameters: offset={}, slope={}",
            freq_dev_offset, freq_dev_slope
        )));
    }

    Ok(())
}
