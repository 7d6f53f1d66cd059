/// Stress testing for the gait analysis pipeline.
///
/// These tests target failure modes that only show up with long recordings,
/// degenerate input or pathological signals.

#[cfg(test)]
mod stress_tests {
    use std::f64::consts::TAU;

    use crate::event_detection::InitialContactDetector;
    use crate::integration_tests::integration_tests::{walking_frames, WalkProfile};
    use crate::landmarks::{PoseFrame, POSE_LANDMARK_COUNT};
    use crate::phase_stats::{mean_curve, normalize_cycle};
    use crate::pipeline::GaitAnalyzer;
    use crate::signal::smooth;
    use crate::types::*;

    // ============================================================================
    // CATEGORY 1: LONG RECORDINGS
    // ============================================================================

    /// Ten minutes of walking at 60 fps (36,001 frames).
    #[test]
    fn stress_ten_minute_walk_60fps() {
        let frames = walking_frames(WalkProfile {
            period: 60,
            cycles: 600,
            ..WalkProfile::default()
        });
        let report = GaitAnalyzer::default().analyze(&frames, 60.0);

        let left = report.side(Side::Left).unwrap();
        assert_eq!(left.events.len(), 599, "every interior heel strike found");
        assert_eq!(left.cycle_count(), 598);
        assert!((left.cadence_steps_per_min - 120.0).abs() < 1e-6);

        for pair in left.events.windows(2) {
            assert_eq!(pair[1] - pair[0], 60);
        }
    }

    /// High frame rate capture keeps stride timing in seconds.
    #[test]
    fn stress_high_frame_rate_240fps() {
        let frames = walking_frames(WalkProfile {
            period: 240,
            cycles: 10,
            ..WalkProfile::default()
        });
        let report = GaitAnalyzer::default().analyze(&frames, 240.0);
        for side in &report.sides {
            assert!(side.cycle_count() >= 8);
            assert!((side.stride_time_s - 1.0).abs() < 1e-9);
        }
    }

    // ============================================================================
    // CATEGORY 2: DEGENERATE INPUT
    // ============================================================================

    #[test]
    fn stress_frozen_subject_yields_nothing() {
        let landmarks = vec![Landmark::new(0.5, 0.5); POSE_LANDMARK_COUNT];
        let frames: Vec<PoseFrame> = (0..600)
            .map(|i| PoseFrame::new(i * 33, landmarks.clone()))
            .collect();
        let report = GaitAnalyzer::default().analyze(&frames, 30.0);

        for side in &report.sides {
            assert_eq!(side.samples.len(), 600);
            assert!(side.events.is_empty());
            assert!(side.joints.is_empty());
            // Coincident landmarks still produce finite angles.
            assert!(side.samples.iter().all(|s| s.knee_deg.is_finite()));
        }
    }

    #[test]
    fn stress_empty_and_truncated_frames() {
        let frames = vec![
            PoseFrame::new(0, Vec::new()),
            PoseFrame::new(33, vec![Landmark::new(0.1, 0.1); 12]),
        ];
        let report = GaitAnalyzer::default().analyze(&frames, 30.0);
        assert_eq!(report.frame_count, 2);
        assert!(report.sides.iter().all(|s| s.samples.is_empty()));
    }

    #[test]
    fn stress_non_finite_landmarks_do_not_panic() {
        let mut frames = walking_frames(WalkProfile::default());
        for frame in frames.iter_mut().step_by(7) {
            frame.landmarks[25].x = f64::NAN;
            frame.landmarks[28].y = f64::INFINITY;
        }
        let report = GaitAnalyzer::default().analyze(&frames, 30.0);
        assert_eq!(report.sides.len(), 2);
    }

    #[test]
    fn stress_pathological_frame_rates() {
        let frames = walking_frames(WalkProfile::default());
        for fps in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            let report = GaitAnalyzer::default().analyze(&frames, fps);
            assert!(report.sides.iter().all(|s| s.events.is_empty()));
        }
    }

    // ============================================================================
    // CATEGORY 3: NOISY SIGNALS
    // ============================================================================

    /// Deterministic high-frequency jitter on top of a clean gait rhythm.
    #[test]
    fn stress_jitter_respects_refractory_period() {
        let fps = 30.0;
        let y: Vec<f64> = (0..3000)
            .map(|i| {
                let gait = (i as f64 / 30.0 * TAU).cos();
                let jitter = 0.15 * (i as f64 * 2.7).sin();
                -(gait + jitter)
            })
            .collect();

        let detector = InitialContactDetector::default();
        for series in [y.clone(), smooth(&y, 2)] {
            let events = detector.detect_in_series(&series, fps);
            assert!(!events.is_empty());
            for pair in events.windows(2) {
                assert!((pair[1] - pair[0]) as f64 >= detector.refractory_frames(fps));
            }
        }
    }

    #[test]
    fn stress_curve_normalization_handles_tiny_and_huge_cycles() {
        let series: Vec<f64> = (0..10_000).map(|i| (i as f64 * 0.01).sin()).collect();

        let tiny = normalize_cycle(&series, 100, 101, 101);
        let huge = normalize_cycle(&series, 0, 9_999, 101);
        assert_eq!(tiny.len(), 101);
        assert_eq!(huge.len(), 101);
        assert!(tiny.iter().chain(&huge).all(|p| p.value.is_finite()));

        let mean = mean_curve(&[tiny, huge]);
        assert_eq!(mean.len(), 101);
        assert_eq!(mean[100].percent, 100.0);
    }
}
