//! Before/after comparison of per-phase joint statistics.
//!
//! Pairs the statistics of two sessions phase by phase and reports the change
//! in mean angle. `improvement = before.mean - after.mean`, so a positive value
//! means the angle decreased after the intervention. Whether a decrease is
//! clinically desirable depends on the joint and is left to the reader.
//!
//! Phases are never aggregated across one another.

use serde::Serialize;

use crate::phase_stats::PhaseStatsMap;
use crate::pipeline::SideAnalysis;
use crate::types::{GaitPhase, JointType, PhaseStatistics, Side};

/// Change of one joint within one phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseDelta {
    pub phase: GaitPhase,
    pub before: PhaseStatistics,
    pub after: PhaseStatistics,
    /// `before.mean - after.mean`; NaN when either side lacks data.
    pub improvement: f64,
}

impl PhaseDelta {
    pub fn new(phase: GaitPhase, before: PhaseStatistics, after: PhaseStatistics) -> Self {
        Self {
            phase,
            before,
            after,
            improvement: before.mean - after.mean,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.improvement.is_nan()
    }
}

/// Per-phase comparison of one joint, always covering all eight phases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JointComparison {
    pub joint: JointType,
    pub phases: Vec<PhaseDelta>,
}

impl JointComparison {
    pub fn phase(&self, phase: GaitPhase) -> Option<&PhaseDelta> {
        self.phases.iter().find(|delta| delta.phase == phase)
    }
}

/// Compare one joint's phase statistics between two sessions.
///
/// Phases absent from either map compare against [`PhaseStatistics::EMPTY`].
pub fn compare_joint(joint: JointType, before: &PhaseStatsMap, after: &PhaseStatsMap) -> JointComparison {
    let lookup = |map: &PhaseStatsMap, phase: GaitPhase| {
        map.get(&phase).copied().unwrap_or(PhaseStatistics::EMPTY)
    };

    let phases = GaitPhase::ALL
        .iter()
        .map(|&phase| PhaseDelta::new(phase, lookup(before, phase), lookup(after, phase)))
        .collect();

    JointComparison { joint, phases }
}

/// Comparison of every joint profiled in both analyses of one side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideComparison {
    pub side: Side,
    pub joints: Vec<JointComparison>,
}

/// Compare every joint profiled in both side analyses.
///
/// The side is taken from `before`. Joints missing from either analysis are
/// skipped.
pub fn compare_sides(before: &SideAnalysis, after: &SideAnalysis) -> SideComparison {
    let joints = before
        .joints
        .iter()
        .filter_map(|(&joint, profile)| {
            let other = after.joints.get(&joint)?;
            Some(compare_joint(joint, &profile.phase_stats, &other.phase_stats))
        })
        .collect();

    SideComparison {
        side: before.side,
        joints,
    }
}
