//! Per-phase statistics over percent-of-cycle series.
//!
//! This module maps percent-indexed phase descriptions into comparable
//! windows, slices series by those windows and summarizes each slice:
//! - Window mapping from phase start percents
//! - Inclusive window slicing
//! - min / max / mean / signed peak / range
//! - Time normalization of per-frame cycles onto a 0–100 % axis
//!
//! Empty inputs never fail. They produce NaN statistics or empty series so
//! the caller can tell "no samples" apart from a legitimate zero.

use std::collections::BTreeMap;

use crate::phase_segmentation::phase_bounds;
use crate::types::{GaitPhase, PercentPhase, PercentSample, PhaseStatistics, PhaseWindow};

/// Resolution of a normalized gait curve: one sample per percent, 0 to 100.
pub const DEFAULT_CURVE_POINTS: usize = 101;

/// Per-phase statistics keyed by phase tag.
pub type PhaseStatsMap = BTreeMap<GaitPhase, PhaseStatistics>;

/// Summary statistics of a value slice.
///
/// `peak` is whichever of `min`/`max` has the larger absolute value, sign
/// preserved; on a tie the maximum is reported. An empty slice yields
/// [`PhaseStatistics::EMPTY`].
pub fn basic_stats(values: &[f64]) -> PhaseStatistics {
    if values.is_empty() {
        return PhaseStatistics::EMPTY;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    let mean = sum / values.len() as f64;
    let peak = if min.abs() > max.abs() { min } else { max };

    PhaseStatistics {
        min,
        max,
        mean,
        peak,
        range: max - min,
    }
}

/// Derive a contiguous window per phase from percent-indexed phases.
///
/// Each window runs from its phase's start percent to the next listed
/// phase's start percent, or to 100 for the last one. Canonical phases that
/// do not appear in `phases` get [`PhaseWindow::NO_DATA`]. When a tag is
/// listed twice the later entry wins.
pub fn phase_windows(phases: &[PercentPhase]) -> BTreeMap<GaitPhase, PhaseWindow> {
    let mut windows: BTreeMap<GaitPhase, PhaseWindow> = GaitPhase::ALL
        .iter()
        .map(|&phase| (phase, PhaseWindow::NO_DATA))
        .collect();

    for (i, current) in phases.iter().enumerate() {
        let end = phases.get(i + 1).map_or(100.0, |next| next.start_percent);
        windows.insert(current.phase, PhaseWindow::new(current.start_percent, end));
    }
    windows
}

/// Percent phases of the canonical cut table.
pub fn canonical_percent_phases() -> Vec<PercentPhase> {
    phase_bounds()
        .iter()
        .map(|&(phase, lower, _)| PercentPhase::new(phase, lower * 100.0))
        .collect()
}

/// Windows of the canonical cut table.
pub fn canonical_phase_windows() -> BTreeMap<GaitPhase, PhaseWindow> {
    phase_windows(&canonical_percent_phases())
}

/// Values whose percent lies in `[window.start, window.end]`.
pub fn slice_by_window(series: &[PercentSample], window: &PhaseWindow) -> Vec<f64> {
    series
        .iter()
        .filter(|s| window.contains(s.percent))
        .map(|s| s.value)
        .collect()
}

/// Statistics for every canonical phase.
///
/// Phases missing from `windows`, or mapped to the `{0, 0}` no-data window,
/// report [`PhaseStatistics::EMPTY`].
pub fn phase_statistics(
    series: &[PercentSample],
    windows: &BTreeMap<GaitPhase, PhaseWindow>,
) -> PhaseStatsMap {
    GaitPhase::ALL
        .iter()
        .map(|&phase| {
            let stats = match windows.get(&phase) {
                Some(window) if !window.is_no_data() => {
                    basic_stats(&slice_by_window(series, window))
                }
                _ => PhaseStatistics::EMPTY,
            };
            (phase, stats)
        })
        .collect()
}

/// Resample one cycle of a per-frame series onto `points` evenly spaced
/// percents from 0 to 100 by linear interpolation.
///
/// The cycle spans frames `start..=end` (the closing heel strike is shared
/// with the next cycle). Ranges that fall outside `values` are clipped; an
/// empty range or fewer than 2 points produce an empty curve.
pub fn normalize_cycle(values: &[f64], start: usize, end: usize, points: usize) -> Vec<PercentSample> {
    if points < 2 || start > end || start >= values.len() {
        return Vec::new();
    }
    let end = end.min(values.len() - 1);
    let cycle = &values[start..=end];
    let span = (cycle.len() - 1) as f64;

    (0..points)
        .map(|p| {
            let fraction = p as f64 / (points - 1) as f64;
            let position = fraction * span;
            let lo = position.floor() as usize;
            let hi = (lo + 1).min(cycle.len() - 1);
            let t = position - lo as f64;
            let value = cycle[lo] + (cycle[hi] - cycle[lo]) * t;
            PercentSample::new(fraction * 100.0, value)
        })
        .collect()
}

/// Point-wise mean of normalized curves.
///
/// Curves are expected to share one resolution; longer curves are truncated
/// to the shortest. No curves produce an empty result.
pub fn mean_curve(curves: &[Vec<PercentSample>]) -> Vec<PercentSample> {
    let Some(len) = curves.iter().map(Vec::len).min() else {
        return Vec::new();
    };

    (0..len)
        .map(|i| {
            let sum: f64 = curves.iter().map(|c| c[i].value).sum();
            PercentSample::new(curves[0][i].percent, sum / curves.len() as f64)
        })
        .collect()
}
