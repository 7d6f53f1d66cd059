//! Scalar signal filtering for per-frame joint series.
//!
//! This module provides the low-level series operations the detector and the
//! pipeline build on:
//! - Centered moving-average smoothing with truncated edges
//! - Finite-difference vertical velocity
//!
//! All functions are stateless. Calling them independently per series (per
//! joint, per side) is always correct.

use serde::{Deserialize, Serialize};

use crate::types::FrameAngleSample;

/// Default half-window for [`smooth`]: each output averages up to 5 inputs.
pub const DEFAULT_HALF_WINDOW: usize = 2;

/// Parameters for series smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Half-window `k`; the full window spans `2k + 1` samples.
    /// Zero disables smoothing.
    pub half_window: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            half_window: DEFAULT_HALF_WINDOW,
        }
    }
}

/// Centered moving average with half-window `k`.
///
/// At index `i` the window is `[max(0, i - k), min(len, i + k + 1))`. Near
/// the edges the window is truncated rather than padded or reflected, so the
/// first and last `k` outputs average fewer samples. The output has the same
/// length as the input and `k = 0` returns the series unchanged.
pub fn smooth(series: &[f64], k: usize) -> Vec<f64> {
    let len = series.len();
    (0..len)
        .map(|i| {
            let lo = i.saturating_sub(k);
            let hi = (i + k + 1).min(len);
            let window = &series[lo..hi];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}

/// Vertical velocity by backward difference, in units per second.
///
/// `vy[0]` is defined as 0; `vy[i] = (y[i] - y[i-1]) * fps` otherwise.
pub fn vertical_velocity(y: &[f64], fps: f64) -> Vec<f64> {
    let mut vy = Vec::with_capacity(y.len());
    if y.is_empty() {
        return vy;
    }
    vy.push(0.0);
    vy.extend(y.windows(2).map(|pair| (pair[1] - pair[0]) * fps));
    vy
}

/// Smooth every numeric channel of a single-side sample sequence.
///
/// Hip, knee and ankle angles and the ankle height are smoothed
/// independently. Timestamps and side are carried through untouched.
pub fn smooth_samples(samples: &[FrameAngleSample], k: usize) -> Vec<FrameAngleSample> {
    let hip = smooth_channel(samples, k, |s| s.hip_deg);
    let knee = smooth_channel(samples, k, |s| s.knee_deg);
    let ankle = smooth_channel(samples, k, |s| s.ankle_deg);
    let y_ankle = smooth_channel(samples, k, |s| s.y_ankle);

    samples
        .iter()
        .enumerate()
        .map(|(i, s)| FrameAngleSample {
            hip_deg: hip[i],
            knee_deg: knee[i],
            ankle_deg: ankle[i],
            y_ankle: y_ankle[i],
            ..*s
        })
        .collect()
}

fn smooth_channel<F>(samples: &[FrameAngleSample], k: usize, channel: F) -> Vec<f64>
where
    F: Fn(&FrameAngleSample) -> f64,
{
    let raw: Vec<f64> = samples.iter().map(channel).collect();
    smooth(&raw, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_smooth_zero_half_window_is_identity() {
        let series = vec![1.5, -2.25, 3.0, 0.1, 7.7];
        assert_eq!(smooth(&series, 0), series);
    }

    #[test]
    fn test_smooth_truncates_at_edges() {
        let series = [0.0, 3.0, 6.0, 9.0, 12.0];
        let out = smooth(&series, 1);

        // Edge windows hold 2 samples, interior windows 3.
        assert_abs_diff_eq!(out[0], 1.5);
        assert_abs_diff_eq!(out[1], 3.0);
        assert_abs_diff_eq!(out[2], 6.0);
        assert_abs_diff_eq!(out[3], 9.0);
        assert_abs_diff_eq!(out[4], 10.5);
    }

    #[test]
    fn test_smooth_default_window() {
        let series = [5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let out = smooth(&series, DEFAULT_HALF_WINDOW);
        assert_abs_diff_eq!(out[0], 5.0 / 3.0);
        assert_abs_diff_eq!(out[1], 5.0 / 4.0);
        assert_abs_diff_eq!(out[2], 1.0);
        assert_abs_diff_eq!(out[3], 0.0);
    }

    #[test]
    fn test_smooth_window_larger_than_series() {
        let out = smooth(&[2.0, 4.0], 10);
        assert_eq!(out, vec![3.0, 3.0]);
    }

    #[test]
    fn test_smooth_empty() {
        assert!(smooth(&[], 2).is_empty());
    }

    #[test]
    fn test_vertical_velocity() {
        let vy = vertical_velocity(&[1.0, 0.5, 0.5, 1.0], 30.0);
        assert_eq!(vy, vec![0.0, -15.0, 0.0, 15.0]);
        assert!(vertical_velocity(&[], 30.0).is_empty());
        assert_eq!(vertical_velocity(&[4.0], 30.0), vec![0.0]);
    }

    #[test]
    fn test_smooth_samples_preserves_metadata() {
        let samples: Vec<_> = (0..5)
            .map(|i| {
                FrameAngleSample::new(i * 33, 170.0, 150.0 + i as f64, 90.0, Side::Left, 0.8)
            })
            .collect();
        let smoothed = smooth_samples(&samples, 1);

        assert_eq!(smoothed.len(), samples.len());
        for (raw, out) in samples.iter().zip(&smoothed) {
            assert_eq!(raw.timestamp_ms, out.timestamp_ms);
            assert_eq!(out.side, Side::Left);
            assert_abs_diff_eq!(out.hip_deg, 170.0);
        }
        assert_abs_diff_eq!(smoothed[0].knee_deg, 150.5);
        assert_abs_diff_eq!(smoothed[2].knee_deg, 152.0);
    }

    proptest! {
        #[test]
        fn prop_smooth_preserves_length_and_bounds(
            series in prop::collection::vec(-100.0f64..100.0, 0..64),
            k in 0usize..6,
        ) {
            let out = smooth(&series, k);
            prop_assert_eq!(out.len(), series.len());

            if !series.is_empty() {
                let lo = series.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                for v in out {
                    prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
                }
            }
        }
    }
}
