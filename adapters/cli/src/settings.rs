//! Command-line flags and configuration file loading.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use maze_chase_world::SessionConfig;

/// Command-line flags accepted by the binary.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Escape the maze before the bot catches you", long_about = None)]
pub(crate) struct Args {
    /// TOML file with session settings.
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,
    /// Number of maze rows.
    #[arg(long)]
    pub(crate) rows: Option<u32>,
    /// Number of maze columns.
    #[arg(long)]
    pub(crate) columns: Option<u32>,
    /// Seed for maze generation; random when omitted.
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,
    /// Countdown length in seconds.
    #[arg(long)]
    pub(crate) countdown: Option<u64>,
}

/// Builds the session configuration from the optional file and flag overrides.
pub(crate) fn load(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            parse(&contents)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    apply_overrides(&mut config, args);
    config.validate().context("invalid session configuration")?;
    Ok(config)
}

fn parse(contents: &str) -> Result<SessionConfig> {
    Ok(toml::from_str(contents)?)
}

fn apply_overrides(config: &mut SessionConfig, args: &Args) {
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(columns) = args.columns {
        config.columns = columns;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(countdown) = args.countdown {
        config.countdown_secs = countdown;
    }
}
