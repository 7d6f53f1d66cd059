//! Export module for downstream reporting.
//!
//! Flattens analysis results into row-oriented JSON documents that dashboards
//! and spreadsheets can consume without knowing the analysis types:
//! - **Session export**: one row per side, joint and phase plus a temporal
//!   summary per side
//! - **Comparison export**: one row per side, joint and phase with before,
//!   after and improvement
//!
//! Statistics without data serialize as `null`. Initial contact is an instant
//! at 0 % of the cycle with no window of its own, so its rows are always
//! `null` in both exports; this is expected, not a gap in the recording.

use serde::Serialize;

use crate::comparison::SideComparison;
use crate::error::Result;
use crate::pipeline::GaitReport;
use crate::types::{GaitPhase, JointType, Side};

/// Statistics of one joint in one phase on one side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseStatRow {
    pub side: Side,
    pub joint: JointType,
    pub phase: GaitPhase,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub peak: f64,
    pub range: f64,
}

/// Temporal parameters of one side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideSummary {
    pub side: Side,
    pub samples: usize,
    pub heel_strikes: usize,
    pub cycles: usize,
    pub stride_time_s: f64,
    pub cadence_steps_per_min: f64,
}

/// Complete session data for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionExport {
    pub fps: f64,
    pub frame_count: usize,
    pub summary: Vec<SideSummary>,
    pub rows: Vec<PhaseStatRow>,
}

impl SessionExport {
    pub fn from_report(report: &GaitReport) -> Self {
        let summary = report
            .sides
            .iter()
            .map(|side| SideSummary {
                side: side.side,
                samples: side.samples.len(),
                heel_strikes: side.events.len(),
                cycles: side.cycles.len(),
                stride_time_s: side.stride_time_s,
                cadence_steps_per_min: side.cadence_steps_per_min,
            })
            .collect();

        let rows = report
            .sides
            .iter()
            .flat_map(|side| {
                side.joints.values().flat_map(move |profile| {
                    profile.phase_stats.iter().map(move |(&phase, stats)| PhaseStatRow {
                        side: side.side,
                        joint: profile.joint,
                        phase,
                        min: stats.min,
                        max: stats.max,
                        mean: stats.mean,
                        peak: stats.peak,
                        range: stats.range,
                    })
                })
            })
            .collect();

        Self {
            fps: report.fps,
            frame_count: report.frame_count,
            summary,
            rows,
        }
    }

    /// Rows of one side and joint, in phase order.
    pub fn rows_for(&self, side: Side, joint: JointType) -> impl Iterator<Item = &PhaseStatRow> {
        self.rows
            .iter()
            .filter(move |row| row.side == side && row.joint == joint)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Before/after change of one joint in one phase on one side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub side: Side,
    pub joint: JointType,
    pub phase: GaitPhase,
    pub before_mean: f64,
    pub after_mean: f64,
    pub improvement: f64,
}

/// Complete comparison data for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonExport {
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonExport {
    pub fn from_comparisons(comparisons: &[SideComparison]) -> Self {
        let rows = comparisons
            .iter()
            .flat_map(|side| {
                side.joints.iter().flat_map(move |joint| {
                    joint.phases.iter().map(move |delta| ComparisonRow {
                        side: side.side,
                        joint: joint.joint,
                        phase: delta.phase,
                        before_mean: delta.before.mean,
                        after_mean: delta.after.mean,
                        improvement: delta.improvement,
                    })
                })
            })
            .collect();

        Self { rows }
    }

    /// Keep only rows of one joint.
    pub fn retain_joint(&mut self, joint: JointType) {
        self.rows.retain(|row| row.joint == joint);
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::compare_sides;
    use crate::pipeline::GaitAnalyzer;
    use crate::types::FrameAngleSample;
    use std::f64::consts::TAU;

    fn report() -> GaitReport {
        let samples: Vec<FrameAngleSample> = (0..121)
            .map(|i| {
                let phase = (i % 30) as f64 / 30.0;
                let y = -(0.8 + 0.1 * (phase * TAU).cos());
                let knee = 150.0 + 20.0 * (phase * TAU).cos();
                FrameAngleSample::new(i as u64 * 33, 170.0, knee, 95.0, Side::Left, y)
            })
            .collect();
        let analyzer = GaitAnalyzer::default();
        GaitReport {
            fps: 30.0,
            frame_count: samples.len(),
            sides: vec![
                analyzer.analyze_samples(&samples, 30.0, Side::Left),
                analyzer.analyze_samples(&samples, 30.0, Side::Right),
            ],
        }
    }

    #[test]
    fn test_session_rows_cover_every_phase() {
        let export = SessionExport::from_report(&report());

        assert_eq!(export.summary.len(), 2);
        assert_eq!(export.summary[0].cycles, 2);
        assert_eq!(export.summary[1].cycles, 0);

        // 3 joints x 8 phases on the left side only.
        assert_eq!(export.rows.len(), 24);
        let knee: Vec<&PhaseStatRow> = export.rows_for(Side::Left, JointType::Knee).collect();
        assert_eq!(knee.len(), 8);
        assert_eq!(knee[0].phase, GaitPhase::InitialContact);
        assert_eq!(knee[7].phase, GaitPhase::TerminalSwing);
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let json = SessionExport::from_report(&report()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let right = &value["summary"][1];
        assert_eq!(right["side"], "right");
        assert!(right["stride_time_s"].is_null());

        let ic = &value["rows"][0];
        assert_eq!(ic["phase"], "IC");
        assert!(ic["mean"].is_null());
        assert!(value["rows"][1]["mean"].is_number());
    }

    #[test]
    fn test_comparison_export() {
        let report = report();
        let left = report.side(Side::Left).unwrap();
        let comparison = compare_sides(left, left);

        let mut export = ComparisonExport::from_comparisons(&[comparison]);
        assert_eq!(export.rows.len(), 24);
        let lr = export
            .rows
            .iter()
            .find(|r| r.joint == JointType::Knee && r.phase == GaitPhase::LoadingResponse)
            .unwrap();
        assert_eq!(lr.improvement, 0.0);

        export.retain_joint(JointType::Hip);
        assert_eq!(export.rows.len(), 8);

        let pretty = export.to_json_pretty().unwrap();
        assert!(pretty.contains("\"joint\": \"hip\""));
    }
}
