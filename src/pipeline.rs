//! Complete gait analysis pipeline from pose frames to per-phase joint metrics.
//!
//! This module orchestrates the full data flow for one recording:
//!
//! # Architecture
//!
//! 1. **Angle Extraction**: Pose landmarks become per-side joint angle samples
//! 2. **Smoothing**: Every joint channel and the ankle height are smoothed
//! 3. **Event Detection**: Heel strikes are located in the smoothed ankle height
//! 4. **Cycle Assembly**: Consecutive heel strikes bound eight-phase gait cycles
//! 5. **Profiling**: Each joint is time-normalized per cycle, averaged into a
//!    mean curve and summarized per canonical phase window
//!
//! Left and right sides are analyzed independently. The analyzer holds only
//! its configuration, so one instance can serve any number of recordings.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::event_detection::InitialContactDetector;
use crate::landmarks::PoseFrame;
use crate::phase_segmentation::build_cycles;
use crate::phase_stats::{
    canonical_phase_windows, mean_curve, normalize_cycle, phase_statistics, PhaseStatsMap,
};
use crate::signal::{smooth, smooth_samples};
use crate::types::{FrameAngleSample, GaitCycle, JointType, PercentSample, Side};

/// Joints derived from landmarks beyond the three carried in every sample.
///
/// Pelvic tilt is absent: see [`PoseFrame::joint_angle`].
const AUXILIARY_JOINTS: [JointType; 3] = [
    JointType::TrunkLean,
    JointType::PelvisDrop,
    JointType::FootProg,
];

/// Steps per gait cycle: one per foot.
const STEPS_PER_CYCLE: f64 = 2.0;

/// Mean normalized curve and phase statistics of one joint on one side.
#[derive(Debug, Clone, Serialize)]
pub struct JointPhaseProfile {
    pub joint: JointType,
    /// Cycle-averaged curve over 0–100 % of the gait cycle.
    pub mean_curve: Vec<PercentSample>,
    /// Statistics of the mean curve within each canonical phase window.
    pub phase_stats: PhaseStatsMap,
}

/// Analysis result for one body side.
#[derive(Debug, Clone, Serialize)]
pub struct SideAnalysis {
    pub side: Side,
    /// Smoothed angle samples the analysis ran on.
    pub samples: Vec<FrameAngleSample>,
    /// Heel-strike indices into `samples`.
    pub events: Vec<usize>,
    pub cycles: Vec<GaitCycle>,
    pub joints: BTreeMap<JointType, JointPhaseProfile>,
    /// Mean cycle duration in seconds; NaN without cycles.
    pub stride_time_s: f64,
    /// Steps per minute; NaN without cycles.
    pub cadence_steps_per_min: f64,
}

impl SideAnalysis {
    /// Profile of one joint, if it could be computed for this side.
    pub fn joint(&self, joint: JointType) -> Option<&JointPhaseProfile> {
        self.joints.get(&joint)
    }

    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }
}

/// Analysis result for both sides of one recording.
#[derive(Debug, Clone, Serialize)]
pub struct GaitReport {
    pub fps: f64,
    /// Number of pose frames (or samples) handed to the analyzer.
    pub frame_count: usize,
    pub sides: Vec<SideAnalysis>,
}

impl GaitReport {
    pub fn side(&self, side: Side) -> Option<&SideAnalysis> {
        self.sides.iter().find(|analysis| analysis.side == side)
    }
}

/// Gait analysis pipeline processor.
#[derive(Debug, Clone, Default)]
pub struct GaitAnalyzer {
    config: AnalysisConfig,
    detector: InitialContactDetector,
}

impl GaitAnalyzer {
    /// Creates an analyzer with the given configuration.
    pub fn new(config: AnalysisConfig) -> Self {
        let detector = InitialContactDetector::new(config.detector.clone());
        Self { config, detector }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze both sides of a recording.
    pub fn analyze(&self, frames: &[PoseFrame], fps: f64) -> GaitReport {
        let sides = Side::BOTH
            .iter()
            .map(|&side| self.analyze_side(frames, fps, side))
            .collect();

        GaitReport {
            fps,
            frame_count: frames.len(),
            sides,
        }
    }

    /// Analyze one side of a recording.
    ///
    /// Frames unusable for `side` are dropped before any index is assigned, so
    /// event and cycle indices address the retained samples.
    pub fn analyze_side(&self, frames: &[PoseFrame], fps: f64, side: Side) -> SideAnalysis {
        let mut samples = Vec::with_capacity(frames.len());
        let mut auxiliary: Vec<Vec<Option<f64>>> = vec![Vec::new(); AUXILIARY_JOINTS.len()];

        for frame in frames {
            let Some(sample) = frame.angle_sample(side, self.config.min_visibility) else {
                continue;
            };
            samples.push(sample);
            for (series, &joint) in auxiliary.iter_mut().zip(AUXILIARY_JOINTS.iter()) {
                series.push(frame.joint_angle(joint, side));
            }
        }

        // A derived joint is profiled only when every retained frame supports it.
        let extra: Vec<(JointType, Vec<f64>)> = AUXILIARY_JOINTS
            .iter()
            .zip(auxiliary)
            .filter_map(|(&joint, series)| {
                let values: Option<Vec<f64>> = series.into_iter().collect();
                values
                    .filter(|v| !v.is_empty())
                    .map(|v| (joint, smooth(&v, self.config.smoothing.half_window)))
            })
            .collect();

        self.profile(side, samples, extra, fps)
    }

    /// Analyze one side from precomputed angle samples.
    ///
    /// Samples of the other side are ignored. Only hip, knee and ankle are
    /// profiled since nothing else is carried per sample.
    pub fn analyze_samples(&self, samples: &[FrameAngleSample], fps: f64, side: Side) -> SideAnalysis {
        let side_samples: Vec<FrameAngleSample> =
            samples.iter().filter(|s| s.side == side).copied().collect();
        self.profile(side, side_samples, Vec::new(), fps)
    }

    fn profile(
        &self,
        side: Side,
        raw: Vec<FrameAngleSample>,
        extra: Vec<(JointType, Vec<f64>)>,
        fps: f64,
    ) -> SideAnalysis {
        let samples = smooth_samples(&raw, self.config.smoothing.half_window);
        let events = self.detector.detect(&samples, fps);
        let cycles = build_cycles(&events, side);

        let sagittal = [JointType::Hip, JointType::Knee, JointType::Ankle].map(|joint| {
            let series: Vec<f64> = samples
                .iter()
                .filter_map(|s| s.joint_value(joint))
                .collect();
            (joint, series)
        });

        let windows = canonical_phase_windows();
        let profiled: Vec<(JointType, Vec<f64>)> = if cycles.is_empty() {
            Vec::new()
        } else {
            sagittal.into_iter().chain(extra).collect()
        };
        let joints: BTreeMap<JointType, JointPhaseProfile> = profiled
            .into_iter()
            .map(|(joint, series)| {
                let curves: Vec<Vec<PercentSample>> = cycles
                    .iter()
                    .map(|c| {
                        normalize_cycle(&series, c.start_index, c.end_index, self.config.curve_points)
                    })
                    .collect();
                let curve = mean_curve(&curves);
                let phase_stats = phase_statistics(&curve, &windows);
                (
                    joint,
                    JointPhaseProfile {
                        joint,
                        mean_curve: curve,
                        phase_stats,
                    },
                )
            })
            .collect();

        let stride_time_s = if cycles.is_empty() {
            f64::NAN
        } else {
            cycles.iter().map(|c| c.duration_s(fps)).sum::<f64>() / cycles.len() as f64
        };
        let cadence_steps_per_min = STEPS_PER_CYCLE * 60.0 / stride_time_s;

        debug!(
            side = side.as_str(),
            samples = samples.len(),
            events = events.len(),
            cycles = cycles.len(),
            joints = joints.len(),
            stride_time_s,
            "side analysis complete"
        );

        SideAnalysis {
            side,
            samples,
            events,
            cycles,
            joints,
            stride_time_s,
            cadence_steps_per_min,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
