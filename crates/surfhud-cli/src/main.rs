mod attach;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use surfhud::{DEFAULT_RATE_HZ, LoopExit, RunSummary};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "surfhud")]
#[command(about = "Speed and position overlay for a running game")]
struct Args {
    /// Title of the target game's window
    #[arg(long, default_value = "Counter-Strike 2")]
    window_title: String,

    /// Module the offset table is relative to
    #[arg(long, default_value = "client.dll")]
    module: String,

    /// Text drawn in the panel's title bar
    #[arg(long, default_value = "Surf Info by Cr0mb")]
    title: String,

    /// Name of the overlay window
    #[arg(long, default_value = "Surf Box")]
    overlay_name: String,

    /// Refresh rate in frames per second
    #[arg(long, default_value_t = DEFAULT_RATE_HZ)]
    rate: u32,

    /// JSON offset table replacing the built-in one
    #[arg(short, long)]
    offsets: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("surfhud=info".parse()?))
        .init();

    let args = Args::parse();
    info!("surfhud starting...");

    match run(&args) {
        Ok(summary) => Ok(exit_code(&summary)),
        Err(e) => {
            eprintln!("{} {:#}", "[!]".red().bold(), e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn exit_code(summary: &RunSummary) -> ExitCode {
    match &summary.exit {
        LoopExit::WindowClosed => ExitCode::SUCCESS,
        LoopExit::Faulted(e) => {
            eprintln!("{} Overlay stopped: {}", "[!]".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_os = "windows")]
fn run(args: &Args) -> Result<RunSummary> {
    use surfhud::{Compositor, FramePacer, OverlayConfig, OverlaySurface};

    let target = attach::Target {
        window_title: &args.window_title,
        module: &args.module,
        offsets: args.offsets.as_deref(),
    };
    let sampler = attach::attach(&target)?;

    let surface = OverlaySurface::create(&OverlayConfig {
        title: args.overlay_name.clone(),
        ..OverlayConfig::default()
    })?;

    let mut compositor = Compositor::new(surface, sampler, args.title.as_str())
        .with_pacer(FramePacer::from_rate(args.rate));
    Ok(compositor.run())
}

#[cfg(not(target_os = "windows"))]
fn run(args: &Args) -> Result<RunSummary> {
    // Resolve the offset table anyway so a bad file is reported consistently.
    attach::resolve_offsets(args.offsets.as_deref())?;
    anyhow::bail!(
        "surfhud only runs on Windows (target window: {})",
        args.window_title
    )
}
