//! Command-line entry point: replay a session and save the drawing.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use inkfield_app::{AppError, AppResult, Session, save_png};
use inkfield_core::CanvasConfig;
use inkfield_render::DrawingSurface;

/// Replay a recorded drawing session and export it as PNG.
#[derive(Debug, Parser)]
#[command(name = "inkfield", version, about)]
struct Cli {
    /// Session file (JSON) to replay
    session: PathBuf,

    /// Output image; `.png` is appended when there is no extension
    #[arg(short, long, default_value = "drawing.png")]
    output: PathBuf,

    /// Canvas configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(cli: &Cli) -> AppResult<()> {
    let config = match &cli.config {
        Some(path) => CanvasConfig::load(path)?,
        None => CanvasConfig::default(),
    };
    let session = Session::load(&cli.session)?;
    log::info!(
        "replaying {} event(s) from {}",
        session.events.len(),
        cli.session.display()
    );

    let mut surface = DrawingSurface::new(&config)?;
    let summary = session.replay(&mut surface)?;
    log::info!(
        "{} frame(s), {} growth(s), {} stroke(s) erased",
        summary.frames,
        summary.growths,
        summary.erased
    );

    let path = save_png(&surface, &cli.output)?;
    println!("{}", path.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::EmptyCanvas) => {
            eprintln!("Nothing to save: the session left no visible strokes");
            ExitCode::from(2)
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
