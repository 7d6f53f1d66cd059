//! Heel-strike (initial contact) detection.
//!
//! Locates the frames at which a foot first touches the ground from the
//! per-frame vertical ankle coordinate:
//! - Local minimum of the ankle height series
//! - Vertical velocity crossing from negative to non-negative at that frame
//! - Refractory period suppressing physiologically implausible repeats
//!
//! The detector is a pure batch function. It keeps no state between calls,
//! so left and right series (or separate sessions) can be processed
//! independently and in any order.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::signal::vertical_velocity;
use crate::types::FrameAngleSample;

/// Minimum time between two accepted heel strikes of the same foot, in seconds.
pub const DEFAULT_REFRACTORY_S: f64 = 0.3;

/// Frames at each end of the series that are never considered as events.
pub const DEFAULT_EDGE_MARGIN: usize = 2;

/// Configuration for heel-strike detection.
///
/// Both values are fixed heuristics kept for compatibility with existing
/// reports. They are exposed so they can be tuned per population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDetectorConfig {
    /// Refractory period in seconds. Converted to frames as `refractory_s * fps`.
    pub refractory_s: f64,
    /// Number of leading and trailing samples excluded from detection.
    /// Values below 1 are treated as 1 since a minimum needs both neighbours.
    pub edge_margin: usize,
}

impl Default for EventDetectorConfig {
    fn default() -> Self {
        Self {
            refractory_s: DEFAULT_REFRACTORY_S,
            edge_margin: DEFAULT_EDGE_MARGIN,
        }
    }
}

/// Heel-strike detector over vertical ankle trajectories.
#[derive(Debug, Clone, Default)]
pub struct InitialContactDetector {
    config: EventDetectorConfig,
}

impl InitialContactDetector {
    /// Create a detector with the given configuration.
    pub fn new(config: EventDetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EventDetectorConfig {
        &self.config
    }

    /// Refractory period expressed in frames for a frame rate.
    pub fn refractory_frames(&self, fps: f64) -> f64 {
        self.config.refractory_s * fps
    }

    /// Detect heel strikes in the `y_ankle` channel of one side's samples.
    pub fn detect(&self, frames: &[FrameAngleSample], fps: f64) -> Vec<usize> {
        let y: Vec<f64> = frames.iter().map(|f| f.y_ankle).collect();
        self.detect_in_series(&y, fps)
    }

    /// Detect heel strikes in a raw ankle height series.
    ///
    /// Returns ascending frame indices. Short series, flat series and invalid
    /// frame rates all produce an empty list.
    pub fn detect_in_series(&self, y: &[f64], fps: f64) -> Vec<usize> {
        if !fps.is_finite() || fps <= 0.0 {
            warn!(fps, "invalid frame rate, skipping initial contact detection");
            return Vec::new();
        }

        let margin = self.config.edge_margin.max(1);
        let end = y.len().saturating_sub(margin);
        if margin >= end {
            return Vec::new();
        }

        let vy = vertical_velocity(y, fps);
        let refractory = self.refractory_frames(fps);

        let mut events = Vec::new();
        let mut last_event: Option<usize> = None;

        for i in margin..end {
            let is_local_min = y[i] < y[i - 1] && y[i] <= y[i + 1];
            // vy[i] is the velocity arriving at i, vy[i + 1] the velocity leaving it.
            let crosses_zero = vy[i] < 0.0 && vy[i + 1] >= 0.0;
            if !(is_local_min && crosses_zero) {
                continue;
            }

            if let Some(prev) = last_event {
                if ((i - prev) as f64) < refractory {
                    debug!(
                        frame = i,
                        previous = prev,
                        refractory_frames = refractory,
                        "suppressed initial contact inside refractory period"
                    );
                    continue;
                }
            }

            events.push(i);
            last_event = Some(i);
        }

        debug!(events = events.len(), frames = y.len(), fps, "initial contacts detected");
        events
    }
}

/// Detect heel strikes with the default refractory period and edge margin.
pub fn detect_initial_contact(frames: &[FrameAngleSample], fps: f64) -> Vec<usize> {
    InitialContactDetector::default().detect(frames, fps)
}

// ============================================================================
// TESTS
// ============================================================================
