//! # Burrow Main Entry Point
//!
//! Generates a dungeon, then runs the turn loop over scripted commands or
//! stdin lines and prints the resulting frame.

use burrow::{new_game, BurrowResult, GameConfig, InputSource, LineInput, ScriptedInput, Session};
use clap::Parser;
use log::{error, info};
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Command line arguments for Burrow.
#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(about = "A turn-based dungeon crawl driven by text commands")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation and combat rolls
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with engine configuration overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Commands separated by ';', e.g. "l; l; g; i 0"
    #[arg(long)]
    script: Option<String>,

    /// File of commands, one per line
    #[arg(long, conflicts_with = "script")]
    script_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print a frame after every command, not just at the end
    #[arg(long)]
    show_frames: bool,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(err) = run(&args) {
        error!("{}", err);
        eprintln!("burrow: {}", err);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => tracing::Level::ERROR,
            "warn" => tracing::Level::WARN,
            "debug" => tracing::Level::DEBUG,
            "trace" => tracing::Level::TRACE,
            _ => tracing::Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_target(false)
            .init();
    }
}

fn load_config(args: &Args) -> BurrowResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> BurrowResult<()> {
    info!("Starting Burrow v{}", burrow::VERSION);
    let config = load_config(args)?;
    info!("Generating dungeon with seed {}", config.seed);

    let mut session = Session::new(new_game(config)?);

    let mut input: Box<dyn InputSource> = if let Some(script) = &args.script {
        Box::new(ScriptedInput::from_script(script))
    } else if let Some(path) = &args.script_file {
        let text = std::fs::read_to_string(path)?;
        Box::new(ScriptedInput::from_script(&text))
    } else {
        Box::new(LineInput::new(BufReader::new(io::stdin())))
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = session.run(input.as_mut(), &mut out, args.show_frames)?;

    info!(
        "Finished after {} turns ({:?}, escaped: {})",
        summary.turns, summary.status, summary.escaped
    );
    Ok(())
}
