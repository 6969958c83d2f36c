//! ewgen CLI - generates dynamic-loading wrangler shims from C headers

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ewgen::config::{self, GeneratorConfig};
use ewgen::ops;
use ewgen::HeaderParser;

mod cli;

use cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("ewgen=debug")
    } else {
        EnvFilter::new("ewgen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&cli)?;
    let backend = HeaderParser::new();

    if cli.dump_model {
        println!("{}", ops::dump_model(&config, &backend)?);
        return Ok(());
    }

    let report = ops::generate(&config, &backend)?;
    tracing::info!(
        "generated {} and {} from {} header(s)",
        config.header_out.display(),
        config.source_out.display(),
        report.headers
    );
    Ok(())
}

/// Resolve the effective configuration: file values first, then CLI
/// flag overrides, then positional headers.
fn resolve_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::load_or_default(Path::new(config::DEFAULT_CONFIG_FILE)),
    };

    if !cli.headers.is_empty() {
        config.headers = cli.headers.clone();
    }
    if let Some(path) = &cli.header_template {
        config.header_template = path.clone();
    }
    if let Some(path) = &cli.source_template {
        config.source_template = path.clone();
    }
    if let Some(path) = &cli.header_out {
        config.header_out = path.clone();
    }
    if let Some(path) = &cli.source_out {
        config.source_out = path.clone();
    }
    if let Some(prefix) = &cli.define_prefix {
        config.define_prefix = prefix.clone();
    }

    Ok(config)
}
