//! Tempo CLI
//!
//! Validate and play tween animation scripts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempo_animation::{
    AdvanceMode, AnimationContext, AnimationScript, Easing, PlayerConfig, StepDef, TweenAnimation,
};
use tempo_core::{seconds, SlotStore};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod script;

use script::{format_slots, load_script, stub_context};

#[derive(Parser)]
#[command(name = "tempo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tween animation script runner", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a script and resolve every slot and callback it names
    Check {
        /// Script file
        script: PathBuf,
    },

    /// Play a script at a fixed tick rate and log slot values per frame
    Play {
        /// Script file
        script: PathBuf,

        /// Frames per second (overrides [player] fps)
        #[arg(long)]
        fps: Option<u32>,

        /// Stop after this many seconds (overrides [player] max_seconds)
        #[arg(long)]
        max_seconds: Option<f32>,

        /// Complete every due step within a single frame
        #[arg(long)]
        cascade: bool,
    },

    /// Print the easing table
    Easings {
        /// Number of sample points per curve
        #[arg(short, long, default_value = "5")]
        samples: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Check { script } => cmd_check(&script),

        Commands::Play {
            script,
            fps,
            max_seconds,
            cascade,
        } => cmd_play(&script, fps, max_seconds, cascade),

        Commands::Easings { samples } => cmd_easings(samples),
    }
}

fn cmd_check(path: &Path) -> Result<()> {
    let script = load_script(path)?;
    let ctx = stub_context(&script)?;
    let animation = script
        .build(&ctx)
        .with_context(|| format!("Failed to build {}", path.display()))?;

    info!(
        "{}: {} slots, {} steps, {:?} advance",
        path.display(),
        ctx.slots.len(),
        animation.len(),
        script.player.advance
    );

    for (index, step) in script.steps.iter().enumerate() {
        info!("  [{}] {}", index, describe_step(step));
    }

    let callbacks = ctx.callbacks.names();
    if !callbacks.is_empty() {
        info!("  callbacks: {}", callbacks.join(", "));
    }

    Ok(())
}

fn cmd_play(path: &Path, fps: Option<u32>, max_seconds: Option<f32>, cascade: bool) -> Result<()> {
    let script = load_script(path)?;
    let (tick, limit) = playback_timing(&script.player, fps, max_seconds)?;

    let ctx = stub_context(&script)?;
    let mut animation = build_player(&script, &ctx, cascade)
        .with_context(|| format!("Failed to build {}", path.display()))?;

    info!(
        "Playing {} at {:?} per frame ({:?} advance)",
        path.display(),
        tick,
        animation.advance_mode()
    );
    debug!("{:?}", animation);

    let frames = run_frames(&mut animation, tick, limit, &ctx.slots);

    if animation.is_finished() {
        info!("Finished after {} frames", frames);
    } else {
        warn!(
            "Stopped after {:.3}s with {} of {} steps complete",
            animation.elapsed().as_secs_f32(),
            animation.cursor(),
            animation.len()
        );
    }

    Ok(())
}

/// Frame interval and time limit, command-line values over `[player]`
fn playback_timing(
    player: &PlayerConfig,
    fps: Option<u32>,
    max_seconds: Option<f32>,
) -> Result<(Duration, Duration)> {
    let fps = fps.unwrap_or(player.fps);
    if fps == 0 {
        anyhow::bail!("fps must be greater than zero");
    }
    let limit = seconds("max seconds", max_seconds.unwrap_or(player.max_seconds))?;
    Ok((frame_interval(fps), limit))
}

fn build_player(
    script: &AnimationScript,
    ctx: &AnimationContext,
    cascade: bool,
) -> Result<TweenAnimation> {
    let mut animation = script.build(ctx)?;
    if cascade {
        animation.set_advance_mode(AdvanceMode::Cascade);
    }
    Ok(animation)
}

/// Tick `animation` until it finishes or `limit` is reached; returns the
/// number of frames played
fn run_frames(
    animation: &mut TweenAnimation,
    tick: Duration,
    limit: Duration,
    slots: &SlotStore,
) -> u64 {
    let mut frame = 0u64;
    while !animation.is_finished() && animation.elapsed() < limit {
        animation.update(tick);
        frame += 1;
        info!(
            "frame {:>5} t={:.3}s step {}/{} | {}",
            frame,
            animation.elapsed().as_secs_f32(),
            animation.cursor(),
            animation.len(),
            format_slots(slots)
        );
    }
    frame
}

fn cmd_easings(samples: usize) -> Result<()> {
    let samples = samples.max(2);
    let width = Easing::ALL
        .iter()
        .map(|easing| easing.to_string().len())
        .max()
        .unwrap_or(0);

    for easing in Easing::ALL {
        let values: Vec<String> = sample_points(samples)
            .map(|t| format!("{:>6.3}", easing.apply(t)))
            .collect();
        println!("{:<width$}  {}", easing.to_string(), values.join(" "));
    }

    Ok(())
}

fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps as f64)
}

/// `samples` evenly spaced points from 0.0 to 1.0 inclusive
fn sample_points(samples: usize) -> impl Iterator<Item = f32> {
    let last = (samples - 1) as f32;
    (0..samples).map(move |i| i as f32 / last)
}

fn describe_step(step: &StepDef) -> String {
    match step {
        StepDef::Wait { duration, .. } => format!("wait {}s", duration),
        StepDef::Tween {
            delay,
            duration,
            easing,
            properties,
            ..
        } => format!(
            "tween {} properties, delay {}s, duration {}s, {}",
            properties.len(),
            delay,
            duration,
            easing
        ),
        StepDef::Execute {
            delay,
            duration,
            callback,
            ..
        } => format!("execute '{}', delay {}s, duration {}s", callback, delay, duration),
    }
}
