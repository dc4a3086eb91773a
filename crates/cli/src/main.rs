mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use igdb_fetch_core::{
    config::{self, AppConfig},
    export::{self, Exporter},
    HttpDownloader, IgdbClient,
};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let request = match cli.request() {
        Ok(request) => request,
        Err(hint) => {
            println!("{hint}");
            return Ok(());
        }
    };

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => {
            config::ensure_default_config()?;
            AppConfig::load()?
        }
    };
    init_logging(&config.log_dir)?;

    let output_root = cli.output.clone().unwrap_or_else(|| config.output_root.clone());
    fs::create_dir_all(&output_root)
        .with_context(|| format!("failed to create {}", output_root.display()))?;

    info!(query = %request.name, output = %output_root.display(), "starting run");
    let client = IgdbClient::new(&request.credentials, &config)?;
    let exporter = Exporter::new(output_root, HttpDownloader::new()?);
    let summary = export::run(&client, &exporter, &request.name)?;

    println!(
        "Found {} games, wrote {} result directories",
        summary.games_found,
        summary.directories.len()
    );
    Ok(())
}

fn init_logging(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let log_path = log_dir.join("igdb-fetch.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stdout);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(())
}
