//! Pose frames and joint-angle extraction.
//!
//! Upstream pose estimation delivers one frame of landmarks per captured
//! video frame using the 33-point BlazePose topology. This module turns those
//! frames into per-side [`FrameAngleSample`]s and auxiliary segment angles.
//!
//! Frames missing a required landmark, or carrying one below the visibility
//! threshold, are skipped rather than guessed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;
use crate::geometry::{angle_deg, lean_from_vertical_deg, midpoint, segment_tilt_deg};
use crate::types::{FrameAngleSample, JointType, Landmark, Side};

/// Landmark indices of the BlazePose topology used here.
pub mod landmark_index {
    pub const NOSE: usize = 0;
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_KNEE: usize = 25;
    pub const RIGHT_KNEE: usize = 26;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;
    pub const LEFT_HEEL: usize = 29;
    pub const RIGHT_HEEL: usize = 30;
    pub const LEFT_FOOT_INDEX: usize = 31;
    pub const RIGHT_FOOT_INDEX: usize = 32;
}

/// Number of landmarks in a complete BlazePose frame.
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Landmark indices of one body side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideIndices {
    pub shoulder: usize,
    pub hip: usize,
    pub knee: usize,
    pub ankle: usize,
    pub heel: usize,
    pub foot_index: usize,
}

impl SideIndices {
    pub fn for_side(side: Side) -> Self {
        use landmark_index::*;
        match side {
            Side::Left => Self {
                shoulder: LEFT_SHOULDER,
                hip: LEFT_HIP,
                knee: LEFT_KNEE,
                ankle: LEFT_ANKLE,
                heel: LEFT_HEEL,
                foot_index: LEFT_FOOT_INDEX,
            },
            Side::Right => Self {
                shoulder: RIGHT_SHOULDER,
                hip: RIGHT_HIP,
                knee: RIGHT_KNEE,
                ankle: RIGHT_ANKLE,
                heel: RIGHT_HEEL,
                foot_index: RIGHT_FOOT_INDEX,
            },
        }
    }
}

/// Landmarks of one captured frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Capture timestamp in milliseconds.
    pub timestamp_ms: u64,
    /// Landmarks indexed per [`landmark_index`].
    pub landmarks: Vec<Landmark>,
}

impl PoseFrame {
    pub fn new(timestamp_ms: u64, landmarks: Vec<Landmark>) -> Self {
        Self {
            timestamp_ms,
            landmarks,
        }
    }

    /// Landmark at `index` if present and at least `min_visibility` visible.
    pub fn landmark(&self, index: usize, min_visibility: f64) -> Option<&Landmark> {
        self.landmarks
            .get(index)
            .filter(|lm| lm.visibility_or_full() >= min_visibility)
    }

    /// Hip, knee and ankle angles plus ankle height for one side.
    ///
    /// Ankle height is the negated image `y`, so the foot's lowest point in
    /// the image (ground contact) is a minimum of `y_ankle`.
    ///
    /// Returns `None` when any of shoulder, hip, knee, ankle or toe is missing
    /// or below `min_visibility`.
    pub fn angle_sample(&self, side: Side, min_visibility: f64) -> Option<FrameAngleSample> {
        let idx = SideIndices::for_side(side);
        let shoulder = self.landmark(idx.shoulder, min_visibility)?;
        let hip = self.landmark(idx.hip, min_visibility)?;
        let knee = self.landmark(idx.knee, min_visibility)?;
        let ankle = self.landmark(idx.ankle, min_visibility)?;
        let toe = self.landmark(idx.foot_index, min_visibility)?;

        Some(FrameAngleSample::new(
            self.timestamp_ms,
            angle_deg(shoulder, hip, knee),
            angle_deg(hip, knee, ankle),
            angle_deg(knee, ankle, toe),
            side,
            -ankle.y,
        ))
    }

    /// Angle of any supported joint or segment for one side, in degrees.
    ///
    /// - `Hip`, `Knee`, `Ankle`: included angles as in [`angle_sample`](Self::angle_sample).
    /// - `TrunkLean`: shoulder midpoint over hip midpoint against vertical.
    /// - `PelvisDrop`: hip line against horizontal, positive when `side`'s hip
    ///   sits lower in the image than the opposite hip.
    /// - `FootProg`: heel→toe direction in the x–z ground plane against the
    ///   depth axis; needs `z` on both landmarks.
    /// - `PelvisTilt`: not observable from this topology, always `None`.
    pub fn joint_angle(&self, joint: JointType, side: Side) -> Option<f64> {
        let idx = SideIndices::for_side(side);
        let other = SideIndices::for_side(side.opposite());
        let lm = |index: usize| self.landmarks.get(index);

        match joint {
            JointType::Hip => Some(angle_deg(lm(idx.shoulder)?, lm(idx.hip)?, lm(idx.knee)?)),
            JointType::Knee => Some(angle_deg(lm(idx.hip)?, lm(idx.knee)?, lm(idx.ankle)?)),
            JointType::Ankle => {
                Some(angle_deg(lm(idx.knee)?, lm(idx.ankle)?, lm(idx.foot_index)?))
            }
            JointType::TrunkLean => {
                let shoulders = midpoint(lm(idx.shoulder)?, lm(other.shoulder)?);
                let hips = midpoint(lm(idx.hip)?, lm(other.hip)?);
                Some(lean_from_vertical_deg(&hips, &shoulders))
            }
            JointType::PelvisDrop => {
                let own = lm(idx.hip)?;
                let opposite = lm(other.hip)?;
                // Tilt of the hip line read left-to-right in the image,
                // positive when the right-hand hip sits lower.
                let own_is_leftmost = own.x <= opposite.x;
                let tilt = if own_is_leftmost {
                    segment_tilt_deg(own, opposite)
                } else {
                    segment_tilt_deg(opposite, own)
                };
                Some(if own_is_leftmost { -tilt } else { tilt })
            }
            JointType::FootProg => {
                let heel = lm(idx.heel)?;
                let toe = lm(idx.foot_index)?;
                let dz = toe.z? - heel.z?;
                let dx = toe.x - heel.x;
                Some(dx.atan2(-dz).to_degrees())
            }
            JointType::PelvisTilt => None,
        }
    }
}

/// Per-frame angle samples of one side, skipping unusable frames.
pub fn angle_series(frames: &[PoseFrame], side: Side, min_visibility: f64) -> Vec<FrameAngleSample> {
    frames
        .iter()
        .filter_map(|frame| {
            let sample = frame.angle_sample(side, min_visibility);
            if sample.is_none() {
                trace!(
                    timestamp_ms = frame.timestamp_ms,
                    side = side.as_str(),
                    "skipping frame with missing or low-visibility landmarks"
                );
            }
            sample
        })
        .collect()
}

/// Load a JSON array of [`PoseFrame`]s.
pub fn read_pose_frames<P: AsRef<Path>>(path: P) -> Result<Vec<PoseFrame>> {
    let content = fs::read_to_string(path)?;
    let frames: Vec<PoseFrame> = serde_json::from_str(&content)?;
    Ok(frames)
}
