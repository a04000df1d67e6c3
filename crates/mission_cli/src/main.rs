//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `mission_core` linkage with a deterministic ping.
//! - Print a read-only progress summary of a genre store.

use clap::Parser;
use mission_core::{
    count_incomplete_missions, CoreConfig, JsonGenreStore, MissionService,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mission_cli")]
#[command(about = "Mission Manager core smoke check")]
#[command(version)]
struct Cli {
    /// JSON store to summarize (overrides the config file)
    #[arg(long)]
    data: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only print the linkage check
    #[arg(long)]
    ping_only: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    println!("mission_core ping={}", mission_core::ping());
    println!("mission_core version={}", mission_core::core_version());
    if cli.ping_only {
        return ExitCode::SUCCESS;
    }

    match summarize(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn summarize(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    if let Err(err) = mission_core::logging::init_logging_with_config(&config) {
        eprintln!("warning: logging disabled: {err}");
    }

    let path = cli.data.clone().unwrap_or_else(|| config.data_path());
    let service = MissionService::new(JsonGenreStore::open(&path)?)?;

    println!("store={}", path.display());
    for genre in service.genres() {
        println!(
            "{} (incomplete missions: {})",
            genre.name,
            count_incomplete_missions(genre)
        );
        for mission in &genre.missions {
            let done = mission.completed_at.as_deref().unwrap_or("-");
            println!(
                "  {:>3.0}% {} [completed: {}]",
                mission.progress() * 100.0,
                mission.name,
                done
            );
        }
    }
    Ok(())
}
