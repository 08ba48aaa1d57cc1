use std::{fs, path::Path, path::PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use engine::odds::{estimate, OddsConfig, OddsReport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "risk-odds")]
#[command(about = "Monte Carlo odds for a Risk battle")]
struct Args {
    /// Attacking troops
    #[arg(long)]
    offense: Option<u32>,

    /// Defending troops
    #[arg(long)]
    defense: Option<u32>,

    /// Number of battles to fight (default 1000)
    #[arg(long)]
    trials: Option<u32>,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with offense/defense/trials/seed; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn load_config(path: &Path) -> Result<OddsConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read odds config: {}", path.display()))?;
    let cfg = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse odds config: {}", path.display()))?;
    Ok(cfg)
}

fn resolve_config(args: &Args) -> Result<OddsConfig> {
    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => OddsConfig {
            offense: args.offense.context("--offense is required without --config")?,
            defense: args.defense.context("--defense is required without --config")?,
            trials: 1000,
            seed: 0,
        },
    };
    if let Some(offense) = args.offense {
        cfg.offense = offense;
    }
    if let Some(defense) = args.defense {
        cfg.defense = defense;
    }
    if let Some(trials) = args.trials {
        cfg.trials = trials;
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    ensure!(cfg.offense > 0 && cfg.defense > 0, "troop counts must be positive");
    Ok(cfg)
}

fn print_report(cfg: &OddsConfig, report: &OddsReport) {
    println!(
        "offense {} vs defense {} over {} trials (seed {})",
        cfg.offense, cfg.defense, report.trials, cfg.seed
    );
    println!(
        "offense wins: {} ({:.1}%)",
        report.offense_wins,
        report.offense_win_rate * 100.0
    );
    println!("defense wins: {}", report.defense_wins);
    println!("avg rounds: {:.2}", report.avg_rounds);
    println!(
        "avg troops lost: offense {:.2}, defense {:.2}",
        report.avg_offense_lost, report.avg_defense_lost
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = resolve_config(&args)?;
    tracing::info!(?cfg, "estimating odds");
    let report = estimate(&cfg)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&cfg, &report);
    }
    Ok(())
}
