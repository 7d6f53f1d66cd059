//! Gait Metrics Engine Library
//!
//! A deterministic gait analysis kernel that turns per-frame pose landmarks
//! into gait events, eight-phase gait cycles and per-phase joint statistics.
//!
//! # Design Philosophy
//!
//! - **Pure computation**: every analysis step is a function of its input and
//!   configuration. No module keeps state between calls.
//! - **Degrade, don't fail**: short or empty input yields empty results and
//!   missing data yields NaN statistics, never an error.
//! - **Fixed heuristics, exposed**: the refractory period, smoothing window and
//!   phase cut table keep their established values but live in one place.
//!
//! # Example
//!
//! ```no_run
//! use gait_metrics::{AnalysisConfig, GaitAnalyzer, SessionExport, read_pose_frames};
//!
//! let frames = read_pose_frames("walk.json")?;
//! let analyzer = GaitAnalyzer::new(AnalysisConfig::default());
//! let report = analyzer.analyze(&frames, 30.0);
//! println!("{}", SessionExport::from_report(&report).to_json_pretty()?);
//! # Ok::<(), gait_metrics::GaitError>(())
//! ```

pub mod comparison;
pub mod config;
pub mod error;
pub mod event_detection;
pub mod export;
pub mod geometry;
pub mod landmarks;
pub mod phase_segmentation;
pub mod phase_stats;
pub mod pipeline;
pub mod signal;
pub mod types;

mod stress_tests;

// Re-export commonly used types
pub use comparison::{compare_joint, compare_sides, JointComparison, PhaseDelta, SideComparison};
pub use config::{validate_fps, AnalysisConfig};
pub use error::{GaitError, Result};
pub use event_detection::{detect_initial_contact, EventDetectorConfig, InitialContactDetector};
pub use export::{ComparisonExport, SessionExport};
pub use geometry::angle_deg;
pub use landmarks::{angle_series, read_pose_frames, PoseFrame};
pub use phase_segmentation::{segment_phases, PhaseSegmenter, PHASE_CUTS};
pub use phase_stats::{basic_stats, phase_windows, PhaseStatsMap};
pub use pipeline::{GaitAnalyzer, GaitReport, JointPhaseProfile, SideAnalysis};
pub use signal::{smooth, SmoothingConfig};
pub use types::{
    FrameAngleSample, GaitCycle, GaitPhase, JointType, Landmark, PercentPhase, PhaseSegment,
    PhaseStatistics, PhaseWindow, Side,
};
