mod analysis;
mod cli;
mod clock;
mod config;
mod data;
mod render;
mod util;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, DEFAULT_CONFIG_PATH};
use config::{ensure_defaults, load, Config};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut cfg = match &cli.config {
        Some(path) => load(path).with_context(|| format!("loading config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load(DEFAULT_CONFIG_PATH)
            .with_context(|| format!("loading config {DEFAULT_CONFIG_PATH}"))?,
        None => {
            tracing::debug!("no config file; using built-in defaults");
            Config::default()
        }
    };
    ensure_defaults(&mut cfg);

    cli::run(cli, cfg)
}
