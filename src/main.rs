//! Gait Metrics CLI
//!
//! Runs the gait analysis pipeline over recorded pose-landmark sequences and
//! prints JSON reports to stdout. Logs go to stderr.
//!
//! This is the entry point for standalone use. For library use, see lib.rs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use gait_metrics::{
    compare_sides, read_pose_frames, validate_fps, AnalysisConfig, ComparisonExport, GaitAnalyzer,
    GaitReport, JointType, SessionExport,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gait-metrics", version, about = "Gait phase metrics from pose landmarks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Analysis configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one recording
    Analyze {
        /// JSON array of pose frames
        #[arg(short, long)]
        input: PathBuf,

        /// Capture frame rate
        #[arg(long)]
        fps: f64,

        /// Pretty-print the report
        #[arg(long)]
        pretty: bool,
    },

    /// Compare a recording before and after an intervention
    Compare {
        /// Pose frames recorded before
        #[arg(long)]
        before: PathBuf,

        /// Pose frames recorded after
        #[arg(long)]
        after: PathBuf,

        /// Capture frame rate of both recordings
        #[arg(long)]
        fps: f64,

        /// Restrict output to one joint (e.g. knee, trunkLean)
        #[arg(long)]
        joint: Option<JointType>,

        /// Pretty-print the report
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;
    let analyzer = GaitAnalyzer::new(config);

    match cli.command {
        Commands::Analyze { input, fps, pretty } => {
            let report = run_analyze(&analyzer, &input, fps)?;
            let export = SessionExport::from_report(&report);
            let json = if pretty {
                export.to_json_pretty()?
            } else {
                export.to_json()?
            };
            println!("{json}");
        }
        Commands::Compare {
            before,
            after,
            fps,
            joint,
            pretty,
        } => {
            let before_report = run_analyze(&analyzer, &before, fps)?;
            let after_report = run_analyze(&analyzer, &after, fps)?;

            let comparisons: Vec<_> = before_report
                .sides
                .iter()
                .filter_map(|b| {
                    let a = after_report.side(b.side)?;
                    Some(compare_sides(b, a))
                })
                .collect();

            let mut export = ComparisonExport::from_comparisons(&comparisons);
            if let Some(joint) = joint {
                export.retain_joint(joint);
            }
            if export.rows.is_empty() {
                warn!("no joint could be compared; check that both recordings contain gait cycles");
            }
            let json = if pretty {
                export.to_json_pretty()?
            } else {
                export.to_json()?
            };
            println!("{json}");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    let mut config = match path {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    config
        .apply_env_overrides()
        .context("invalid GAIT_* environment override")?;
    Ok(config)
}

fn run_analyze(analyzer: &GaitAnalyzer, input: &Path, fps: f64) -> anyhow::Result<GaitReport> {
    let fps = validate_fps(fps)?;
    let frames = read_pose_frames(input)
        .with_context(|| format!("failed to read pose frames from {}", input.display()))?;

    info!(path = %input.display(), frames = frames.len(), fps, "analyzing recording");
    let report = analyzer.analyze(&frames, fps);

    for side in &report.sides {
        info!(
            side = side.side.as_str(),
            heel_strikes = side.events.len(),
            cycles = side.cycles.len(),
            cadence = side.cadence_steps_per_min,
            "side summary"
        );
    }
    Ok(report)
}
