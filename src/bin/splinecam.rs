use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "splinecam", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the fly-along as a numbered PNG sequence.
    Render(RenderArgs),
    /// Print a summary of a spline chain file.
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input spline chain text file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for frames.
    #[arg(long)]
    out: PathBuf,

    /// Render config JSON. Missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the frame budget.
    #[arg(long)]
    frames: Option<u64>,

    /// Override vertical camera tracking.
    #[arg(long, value_enum)]
    track_mode: Option<TrackChoice>,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input spline chain text file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TrackChoice {
    Locked,
    Tracking,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let curve = splinecam::CurveModel::from_path(&args.in_path)
        .with_context(|| format!("load spline chain '{}'", args.in_path.display()))?;

    let mut cfg = match &args.config {
        Some(p) => splinecam::RenderConfig::from_path(p)
            .with_context(|| format!("load render config '{}'", p.display()))?,
        None => splinecam::RenderConfig::default(),
    };
    if let Some(frames) = args.frames {
        cfg.max_frames = frames;
    }
    if let Some(mode) = args.track_mode {
        cfg.track_mode = match mode {
            TrackChoice::Locked => splinecam::TrackMode::Locked,
            TrackChoice::Tracking => splinecam::TrackMode::Tracking,
        };
    }

    let mut driver = splinecam::FrameSequenceDriver::new(&curve, cfg)?;
    let mut sink = splinecam::PngSequenceSink::new(&args.out);
    let stats = driver.run(&mut sink)?;

    let reason = match stats.outcome {
        splinecam::RunOutcome::Exhausted => "end of curve",
        splinecam::RunOutcome::BudgetReached => "frame budget reached",
    };
    eprintln!(
        "wrote {} frames to {} ({reason})",
        stats.frames_emitted,
        args.out.display()
    );
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let curve = splinecam::CurveModel::from_path(&args.in_path)
        .with_context(|| format!("load spline chain '{}'", args.in_path.display()))?;
    println!("control_points: {}", curve.control_points().len());
    println!("segments:       {}", curve.segment_count());
    println!(
        "domain:         [{}, {}]",
        curve.domain_start(),
        curve.domain_end()
    );
    Ok(())
}
