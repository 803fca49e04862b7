mod config;
mod model;

use crate::config::{LogConfig, load_config};
use anyhow::Context;
use clap::Parser;
use kmodel::MODEL_MANAGER;
use kmodel_logger::{LevelFilter, LogFormat, Logger};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Declares the sample model and prints the registry snapshot as JSON.
#[derive(Debug, Parser)]
#[command(name = "kmodel-inspect", version, about)]
struct Args {
    /// Configuration file. Defaults to an optional `inspect.toml`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the snapshot.
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Print the snapshot on a single line.
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = load_config(args.config.as_deref()).context("Critical: Configuration is malformed")?;
    let _logger = init_logger(&cfg.log)?;

    model::declare_abc().context("Failed to declare the A/B/C model")?;
    model::declare_orders().context("Failed to declare the order model")?;

    let snapshot = MODEL_MANAGER.snapshot();
    info!(classes = snapshot.classes.len(), "Writing snapshot");

    let pretty = args.pretty || (cfg.output.pretty && !args.compact);
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, &snapshot)?;
    } else {
        serde_json::to_writer(&mut out, &snapshot)?;
    }
    writeln!(out)?;

    Ok(())
}

fn init_logger(log: &LogConfig) -> anyhow::Result<Logger> {
    let level = log
        .level
        .parse::<LevelFilter>()
        .with_context(|| format!("Invalid log level '{}'", log.level))?;
    let format = if log.json { LogFormat::Json } else { LogFormat::Compact };

    let builder = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .level(level)
        .format(format);
    let logger = match &log.directory {
        Some(directory) => builder.directory(directory).init()?,
        None => builder.init()?,
    };

    Ok(logger)
}
