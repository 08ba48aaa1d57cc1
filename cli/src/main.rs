use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use engine::faces::DEFAULT_DOT;
use engine::Dice;
use tracing_subscriber::EnvFilter;

mod screen;
mod session;
mod terminal;

use session::{Session, SessionConfig};

#[derive(Parser)]
#[command(name = "risk-battler")]
#[command(about = "Speeds up the battle part of Risk")]
struct Cli {
    /// RNG seed for a repeatable session (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Pause between rounds when finishing a battle automatically
    #[arg(long, default_value_t = 600)]
    delay_ms: u64,
    /// Character used for the dots on the dice
    #[arg(long, default_value_t = DEFAULT_DOT)]
    dot: char,
    /// Write logs here; the screen itself is never logged to
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file: {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let dice = match cli.seed {
        Some(seed) => Dice::from_seed(seed),
        None => Dice::from_entropy(),
    };
    let cfg = SessionConfig {
        delay: Duration::from_millis(cli.delay_ms),
        dot: cli.dot,
    };
    tracing::info!(seed = ?cli.seed, delay_ms = cli.delay_ms, "session starting");

    let mut screen = terminal::init().context("failed to set up the terminal")?;
    let result = Session::new(&mut screen, dice, cfg).run();
    drop(screen);

    if let Err(err) = &result {
        tracing::error!(error = %err, "session aborted");
    }
    result
}
