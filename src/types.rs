//! Core data types for the gait metrics engine.
//!
//! This module defines the value objects that flow through the analysis
//! pipeline: landmarks, per-frame angle samples, gait cycles and their phase
//! segments, percent-indexed windows and per-phase statistics.
//!
//! Design principle: if a concept exists, it gets a type. Phase tags and joint
//! labels are closed enums, never free text.
//!
//! None of these types has identity or persistence. They are produced by pure
//! transformations and owned by whoever called the transformation.

use serde::{Deserialize, Serialize};

// ============================================================================
// LANDMARK AND SIDE
// ============================================================================

/// A single pose landmark as delivered by an upstream pose estimator.
///
/// `z` and `visibility` are optional because 2-D estimators omit them.
/// An absent `z` behaves exactly like `0.0`, an absent visibility like `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal coordinate (normalized image units or pixels).
    pub x: f64,
    /// Vertical coordinate. Image convention: grows downward.
    pub y: f64,
    /// Optional depth coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Optional visibility/confidence score in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    /// Creates a 2-D landmark with no depth and no visibility score.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    /// Creates a 3-D landmark.
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            visibility: None,
        }
    }

    /// Returns a copy carrying the given visibility score.
    pub fn visible(mut self, visibility: f64) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Depth with the 2-D fallback applied.
    pub fn z_or_zero(&self) -> f64 {
        self.z.unwrap_or(0.0)
    }

    /// Visibility with the "fully visible" fallback applied.
    pub fn visibility_or_full(&self) -> f64 {
        self.visibility.unwrap_or(1.0)
    }
}

/// Body side a series or cycle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// The contralateral side.
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

// ============================================================================
// PER-FRAME SAMPLES
// ============================================================================

/// Joint angles and ankle height for one captured frame on one side.
///
/// This is the atomic unit consumed by event detection and segmentation.
/// Angles are included angles in degrees as produced by
/// [`angle_deg`](crate::geometry::angle_deg) (180° = fully extended).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameAngleSample {
    /// Capture timestamp in milliseconds.
    pub timestamp_ms: u64,
    /// Hip angle (shoulder–hip–knee) in degrees.
    pub hip_deg: f64,
    /// Knee angle (hip–knee–ankle) in degrees.
    pub knee_deg: f64,
    /// Ankle angle (knee–ankle–toe) in degrees.
    pub ankle_deg: f64,
    /// Side this sample was computed for.
    pub side: Side,
    /// Ankle height (negated image `y`, larger is higher), the input to
    /// heel-strike detection. Ground contact is a local minimum.
    pub y_ankle: f64,
}

impl FrameAngleSample {
    pub fn new(
        timestamp_ms: u64,
        hip_deg: f64,
        knee_deg: f64,
        ankle_deg: f64,
        side: Side,
        y_ankle: f64,
    ) -> Self {
        Self {
            timestamp_ms,
            hip_deg,
            knee_deg,
            ankle_deg,
            side,
            y_ankle,
        }
    }

    /// Sample value for one of the three sagittal joints carried here.
    ///
    /// Returns `None` for joints that are not stored per sample.
    pub fn joint_value(&self, joint: JointType) -> Option<f64> {
        match joint {
            JointType::Hip => Some(self.hip_deg),
            JointType::Knee => Some(self.knee_deg),
            JointType::Ankle => Some(self.ankle_deg),
            _ => None,
        }
    }
}

// ============================================================================
// GAIT PHASES AND CYCLES
// ============================================================================

/// The eight canonical gait phases, in temporal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GaitPhase {
    #[serde(rename = "IC")]
    InitialContact,
    #[serde(rename = "LR")]
    LoadingResponse,
    #[serde(rename = "MSt")]
    MidStance,
    #[serde(rename = "TSt")]
    TerminalStance,
    #[serde(rename = "PSw")]
    PreSwing,
    #[serde(rename = "ISw")]
    InitialSwing,
    #[serde(rename = "MSw")]
    MidSwing,
    #[serde(rename = "TSw")]
    TerminalSwing,
}

impl GaitPhase {
    /// All phases in cycle order.
    pub const ALL: [GaitPhase; 8] = [
        GaitPhase::InitialContact,
        GaitPhase::LoadingResponse,
        GaitPhase::MidStance,
        GaitPhase::TerminalStance,
        GaitPhase::PreSwing,
        GaitPhase::InitialSwing,
        GaitPhase::MidSwing,
        GaitPhase::TerminalSwing,
    ];

    /// Clinical abbreviation (IC, LR, ...).
    pub fn abbreviation(&self) -> &'static str {
        match self {
            GaitPhase::InitialContact => "IC",
            GaitPhase::LoadingResponse => "LR",
            GaitPhase::MidStance => "MSt",
            GaitPhase::TerminalStance => "TSt",
            GaitPhase::PreSwing => "PSw",
            GaitPhase::InitialSwing => "ISw",
            GaitPhase::MidSwing => "MSw",
            GaitPhase::TerminalSwing => "TSw",
        }
    }

    /// Parse a clinical abbreviation. Case-sensitive.
    pub fn from_abbreviation(tag: &str) -> Option<GaitPhase> {
        GaitPhase::ALL.iter().copied().find(|p| p.abbreviation() == tag)
    }

    /// True for the five stance sub-phases (IC through PSw).
    pub fn is_stance(&self) -> bool {
        *self <= GaitPhase::PreSwing
    }
}

/// An index-based phase span inside one gait cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSegment {
    pub phase: GaitPhase,
    /// First frame index of the phase.
    pub start_index: usize,
    /// Last frame index of the phase; equals the next phase's start.
    pub end_index: usize,
}

impl PhaseSegment {
    pub fn new(phase: GaitPhase, start_index: usize, end_index: usize) -> Self {
        Self {
            phase,
            start_index,
            end_index,
        }
    }

    /// Length in frames. Zero-length phases are legal at short cycles.
    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One stride from a heel strike to the next heel strike of the same foot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaitCycle {
    /// Frame index of the opening heel strike.
    pub start_index: usize,
    /// Frame index of the closing heel strike.
    pub end_index: usize,
    pub side: Side,
    /// Exactly eight contiguous segments covering `[start_index, end_index]`.
    pub phases: Vec<PhaseSegment>,
}

impl GaitCycle {
    /// Cycle length in frames.
    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cycle duration in seconds for the given frame rate.
    pub fn duration_s(&self, fps: f64) -> f64 {
        self.len() as f64 / fps
    }

    /// Segment for a phase tag, if present.
    pub fn phase(&self, phase: GaitPhase) -> Option<&PhaseSegment> {
        self.phases.iter().find(|segment| segment.phase == phase)
    }
}

// ============================================================================
// PERCENT-INDEXED REPRESENTATION
// ============================================================================

/// A phase described by where it starts, in percent of the gait cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentPhase {
    pub phase: GaitPhase,
    pub start_percent: f64,
}

impl PercentPhase {
    pub fn new(phase: GaitPhase, start_percent: f64) -> Self {
        Self {
            phase,
            start_percent,
        }
    }
}

/// A percent range `[start, end]` of the gait cycle covered by one phase.
///
/// `{0, 0}` is the "no data" marker assigned to phases that were missing
/// from the input; it is not a legitimate zero-width phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub start: f64,
    pub end: f64,
}

impl PhaseWindow {
    /// Window assigned to absent phases.
    pub const NO_DATA: PhaseWindow = PhaseWindow {
        start: 0.0,
        end: 0.0,
    };

    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// True for the `{0, 0}` marker.
    pub fn is_no_data(&self) -> bool {
        self.start == 0.0 && self.end == 0.0
    }

    /// Inclusive on both ends.
    pub fn contains(&self, percent: f64) -> bool {
        percent >= self.start && percent <= self.end
    }
}

/// One point of a percent-of-cycle indexed series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentSample {
    pub percent: f64,
    pub value: f64,
}

impl PercentSample {
    pub fn new(percent: f64, value: f64) -> Self {
        Self { percent, value }
    }
}

// ============================================================================
// STATISTICS AND JOINTS
// ============================================================================

/// Summary statistics of a series restricted to one phase window.
///
/// All fields are NaN when no sample fell into the window. Callers must
/// check [`has_data`](Self::has_data) before display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Whichever of `min`/`max` has the larger magnitude, sign preserved.
    pub peak: f64,
    /// `max - min`.
    pub range: f64,
}

impl PhaseStatistics {
    /// The "no samples" sentinel.
    pub const EMPTY: PhaseStatistics = PhaseStatistics {
        min: f64::NAN,
        max: f64::NAN,
        mean: f64::NAN,
        peak: f64::NAN,
        range: f64::NAN,
    };

    pub fn has_data(&self) -> bool {
        !self.mean.is_nan()
    }
}

impl Default for PhaseStatistics {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Joint or segment a series describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JointType {
    Ankle,
    Knee,
    Hip,
    PelvisTilt,
    PelvisDrop,
    TrunkLean,
    FootProg,
}

impl JointType {
    pub const ALL: [JointType; 7] = [
        JointType::Ankle,
        JointType::Knee,
        JointType::Hip,
        JointType::PelvisTilt,
        JointType::PelvisDrop,
        JointType::TrunkLean,
        JointType::FootProg,
    ];

    /// Wire label, identical to the serde representation.
    pub fn label(&self) -> &'static str {
        match self {
            JointType::Ankle => "ankle",
            JointType::Knee => "knee",
            JointType::Hip => "hip",
            JointType::PelvisTilt => "pelvisTilt",
            JointType::PelvisDrop => "pelvisDrop",
            JointType::TrunkLean => "trunkLean",
            JointType::FootProg => "footProg",
        }
    }

    pub fn from_label(label: &str) -> Option<JointType> {
        JointType::ALL.iter().copied().find(|j| j.label() == label)
    }
}

impl std::fmt::Display for JointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for JointType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JointType::from_label(s).ok_or_else(|| format!("unknown joint type: {s}"))
    }
}
