//! Prismview Terminal - interactive prism viewer
//!
//! Renders the catalog prisms as shaded ASCII art with an orbit camera.
//!
//! # Usage
//!
//! ```bash
//! prismview
//! prismview --prism hexagonal --wireframe
//! prismview --rotation-clock elapsed --fps 60
//! prismview --list
//! ```
//!
//! # Controls
//!
//! - 1-5 / Tab / P: Select prism
//! - W: Wireframe, Space: Auto-rotate, S: Statistics
//! - Arrow keys: Orbit, +/-: Zoom, HJKL: Pan, R: Reset view
//! - Q/ESC: Quit

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use prismview_core::{
    PrismKind, RotationClock, SceneConfig, ViewerAction, ViewerState, PRISM_TYPES,
};
use prismview_terminal::{AppOptions, Background, TerminalApp};

#[derive(Parser)]
#[command(name = "prismview")]
#[command(author, version, about = "Interactive 3D viewer for geometric prisms")]
struct Args {
    /// Prism to show first (unknown types fall back to rectangular)
    #[arg(long, default_value = "rectangular")]
    prism: String,

    /// Reject unknown prism types instead of falling back
    #[arg(long)]
    strict: bool,

    /// Start in wireframe mode
    #[arg(long, short = 'w')]
    wireframe: bool,

    /// Start with auto-rotation paused
    #[arg(long)]
    no_auto_rotate: bool,

    /// Start with the statistics panel hidden
    #[arg(long)]
    hide_stats: bool,

    /// Whether auto-rotation advances per frame or per elapsed time
    #[arg(long, value_enum, default_value = "per-frame")]
    rotation_clock: ClockArg,

    /// Target frame rate
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Closest orbit distance from the origin
    #[arg(long)]
    min_distance: Option<f32>,

    /// Farthest orbit distance from the origin
    #[arg(long)]
    max_distance: Option<f32>,

    /// Assume a light terminal background
    #[arg(long)]
    light: bool,

    /// Print the prism catalog and exit
    #[arg(long)]
    list: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ClockArg {
    PerFrame,
    Elapsed,
}

impl From<ClockArg> for RotationClock {
    fn from(arg: ClockArg) -> Self {
        match arg {
            ClockArg::PerFrame => RotationClock::PerFrame,
            ClockArg::Elapsed => RotationClock::Elapsed,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so they can be redirected away from the viewport
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    if args.list {
        print_catalog();
        return Ok(());
    }

    let options = build_options(&args)?;
    tracing::info!(
        prism = %options.state.selected_prism,
        clock = ?options.clock,
        fps = options.frame_rate,
        "starting prism viewer"
    );

    let mut app = TerminalApp::new(options).context("failed to query terminal size")?;
    app.run().context("terminal viewer failed")?;

    Ok(())
}

fn build_options(args: &Args) -> Result<AppOptions> {
    if args.strict {
        args.prism
            .parse::<PrismKind>()
            .with_context(|| format!("invalid --prism value `{}`", args.prism))?;
    }

    let state = ViewerState::default()
        .apply(ViewerAction::Select(args.prism.clone()))
        .apply(ViewerAction::SetWireframe(args.wireframe))
        .apply(ViewerAction::SetAutoRotate(!args.no_auto_rotate))
        .apply(ViewerAction::SetShowStats(!args.hide_stats));

    let mut scene = SceneConfig::default();
    if let Some(min) = args.min_distance {
        scene.orbit.min_distance = min;
    }
    if let Some(max) = args.max_distance {
        scene.orbit.max_distance = max;
    }
    anyhow::ensure!(
        scene.orbit.min_distance > 0.0 && scene.orbit.min_distance <= scene.orbit.max_distance,
        "orbit distances must satisfy 0 < min ({}) <= max ({})",
        scene.orbit.min_distance,
        scene.orbit.max_distance
    );

    Ok(AppOptions {
        state,
        scene,
        clock: args.rotation_clock.into(),
        frame_rate: args.fps,
        background: if args.light {
            Background::Light
        } else {
            Background::Dark
        },
    })
}

fn print_catalog() {
    println!(
        "{:<12} {:<18} {:>5} {:>5} {:>8} {:>5}",
        "ID", "NAME", "FACES", "EDGES", "VERTICES", "V-E+F"
    );
    for descriptor in &PRISM_TYPES {
        println!(
            "{:<12} {:<18} {:>5} {:>5} {:>8} {:>5}",
            descriptor.id,
            descriptor.name,
            descriptor.faces,
            descriptor.edges,
            descriptor.vertices,
            descriptor.euler_characteristic()
        );
    }
}
