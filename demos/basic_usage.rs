/// Basic usage example: feed angle samples, get per-phase joint statistics
use gait_metrics::{
    compare_joint, AnalysisConfig, FrameAngleSample, GaitAnalyzer, GaitPhase, JointType, Side,
};

/// One gait cycle per second at 30 fps, knee flexing by up to `2 * depth` degrees.
fn simulated_walk(depth: f64) -> Vec<FrameAngleSample> {
    (0..151)
        .map(|i| {
            let phase = (i % 30) as f64 / 30.0 * std::f64::consts::TAU;
            let knee = 175.0 - depth * (1.0 - phase.cos());
            let y_ankle = -(0.85 + 0.05 * phase.cos());
            FrameAngleSample::new(i as u64 * 33, 172.0, knee, 95.0, Side::Left, y_ankle)
        })
        .collect()
}

fn main() {
    println!("=== Gait Metrics Engine: Basic Example ===\n");

    let analyzer = GaitAnalyzer::new(AnalysisConfig::default());

    let before = analyzer.analyze_samples(&simulated_walk(20.0), 30.0, Side::Left);
    println!(
        "Heel strikes: {:?}\nCycles: {}\nCadence: {:.1} steps/min\n",
        before.events,
        before.cycle_count(),
        before.cadence_steps_per_min
    );

    if let Some(knee) = before.joint(JointType::Knee) {
        println!("Knee angle per phase:");
        for (phase, stats) in &knee.phase_stats {
            if stats.has_data() {
                println!(
                    "  {:<4} mean {:>6.1}  min {:>6.1}  max {:>6.1}",
                    phase.abbreviation(),
                    stats.mean,
                    stats.min,
                    stats.max
                );
            } else {
                println!("  {:<4} (instant, no samples)", phase.abbreviation());
            }
        }
    }

    let after = analyzer.analyze_samples(&simulated_walk(5.0), 30.0, Side::Left);
    if let (Some(b), Some(a)) = (before.joint(JointType::Knee), after.joint(JointType::Knee)) {
        let comparison = compare_joint(JointType::Knee, &b.phase_stats, &a.phase_stats);
        if let Some(delta) = comparison.phase(GaitPhase::TerminalStance) {
            println!(
                "\nTerminal stance knee mean: {:.1} -> {:.1} (improvement {:+.1})",
                delta.before.mean, delta.after.mean, delta.improvement
            );
        }
    }
}
