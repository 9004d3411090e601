//! CubeLink terminal - a rotatable 3×3×3 cube
//!
//! Controls:
//!   - F B L R U D: turn a face (Shift turns it the other way)
//!   - Mouse drag / Arrow Keys: spin the cube
//!   - V: reset the view, X: reset the cube
//!   - Q/ESC: Quit

use anyhow::{Context, Result};
use clap::Parser;
use cubelink_core::parse_moves;
use cubelink_terminal::{config, TerminalApp};
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cubelink-terminal", version, about = "Rotatable 3x3x3 cube in the terminal")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Moves to animate after start-up, e.g. "F R U' L2"
    #[arg(short, long)]
    moves: Option<String>,

    /// Moves applied instantly before start-up
    #[arg(short, long)]
    scramble: Option<String>,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format_timestamp_millis();
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {:?}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let config = config::load_config(args.config.as_deref())?;
    let scramble = parse_moves(args.scramble.as_deref().unwrap_or_default())
        .context("Invalid --scramble sequence")?;
    let moves = parse_moves(args.moves.as_deref().unwrap_or_default())
        .context("Invalid --moves sequence")?;

    log::info!("cubelink-terminal starting up");
    let mut app = TerminalApp::new(config)?;
    let applied = app.scramble(&scramble);
    if applied != scramble.len() {
        log::warn!("applied {applied} of {} scramble moves", scramble.len());
    }
    app.queue_moves(&moves);
    app.run()?;

    log::info!("cubelink-terminal shut down after {} moves", app.engine().history().len());
    Ok(())
}
