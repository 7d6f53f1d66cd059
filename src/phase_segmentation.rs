//! Gait cycle construction and eight-phase segmentation.
//!
//! Each pair of consecutive heel strikes of the same foot bounds one gait
//! cycle. A cycle is split into the eight canonical phases at fixed
//! proportional cut points taken from [`PHASE_CUTS`].
//!
//! Design: the cut table is the single source of truth for phase timing.
//! Both index-based segmentation here and the percent windows in
//! [`phase_stats`](crate::phase_stats) derive from it.

use tracing::debug;

use crate::event_detection::InitialContactDetector;
use crate::types::{FrameAngleSample, GaitCycle, GaitPhase, PhaseSegment, Side};

/// Cumulative fraction of the cycle at which each phase ends.
///
/// A phase starts where the previous one ends; the first phase starts at 0.
/// Initial contact is an instant and therefore ends at 0 as well.
/// These fractions are fixed heuristics preserved for compatibility.
pub const PHASE_CUTS: [(GaitPhase, f64); 8] = [
    (GaitPhase::InitialContact, 0.0),
    (GaitPhase::LoadingResponse, 0.12),
    (GaitPhase::MidStance, 0.31),
    (GaitPhase::TerminalStance, 0.50),
    (GaitPhase::PreSwing, 0.62),
    (GaitPhase::InitialSwing, 0.75),
    (GaitPhase::MidSwing, 0.87),
    (GaitPhase::TerminalSwing, 1.0),
];

/// `(phase, lower, upper)` fractions for every phase, in cycle order.
pub fn phase_bounds() -> [(GaitPhase, f64, f64); 8] {
    let mut bounds = [(GaitPhase::InitialContact, 0.0, 0.0); 8];
    let mut lower = 0.0;
    for (slot, &(phase, upper)) in bounds.iter_mut().zip(PHASE_CUTS.iter()) {
        *slot = (phase, lower, upper);
        lower = upper;
    }
    bounds
}

/// Split the frame range `[start, end]` into the eight phases.
///
/// Boundaries are `round(start + (end - start) * cut)`. Consecutive segments
/// share their boundary index, so the result is contiguous and gapless.
/// Short cycles can round a phase down to zero length; that is accepted.
pub fn split_cycle(start: usize, end: usize) -> Vec<PhaseSegment> {
    let len = end.saturating_sub(start) as f64;
    let at = |fraction: f64| (start as f64 + len * fraction).round() as usize;

    phase_bounds()
        .iter()
        .map(|&(phase, lower, upper)| PhaseSegment::new(phase, at(lower), at(upper)))
        .collect()
}

/// Build one cycle per adjacent pair of heel-strike indices.
///
/// `N` ascending events yield `N - 1` cycles; fewer than two events yield none.
pub fn build_cycles(events: &[usize], side: Side) -> Vec<GaitCycle> {
    events
        .windows(2)
        .filter(|pair| pair[0] < pair[1])
        .map(|pair| GaitCycle {
            start_index: pair[0],
            end_index: pair[1],
            side,
            phases: split_cycle(pair[0], pair[1]),
        })
        .collect()
}

/// Phase segmenter combining heel-strike detection with cycle splitting.
#[derive(Debug, Clone, Default)]
pub struct PhaseSegmenter {
    detector: InitialContactDetector,
}

impl PhaseSegmenter {
    pub fn new(detector: InitialContactDetector) -> Self {
        Self { detector }
    }

    /// Detect cycles for one side.
    ///
    /// `frames` is filtered to `side` first; returned indices address the
    /// filtered sequence (identical to input indices for single-side input).
    pub fn segment(&self, frames: &[FrameAngleSample], fps: f64, side: Side) -> Vec<GaitCycle> {
        let side_frames: Vec<FrameAngleSample> =
            frames.iter().filter(|f| f.side == side).copied().collect();

        let events = self.detector.detect(&side_frames, fps);
        let cycles = build_cycles(&events, side);

        debug!(
            side = side.as_str(),
            frames = side_frames.len(),
            events = events.len(),
            cycles = cycles.len(),
            "segmented gait cycles"
        );
        cycles
    }
}

/// Detect and segment cycles for one side with default detector settings.
pub fn segment_phases(frames: &[FrameAngleSample], fps: f64, side: Side) -> Vec<GaitCycle> {
    PhaseSegmenter::default().segment(frames, fps, side)
}
