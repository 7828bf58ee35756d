#![allow(dead_code)]

use clap::Parser;
use std::path::{Path, PathBuf};

mod config;
mod core;
mod error;
mod logging;
mod processors;

/// Reclass - A pipeline toolkit for relabeling scenario data
#[derive(Parser)]
#[command(name = "reclass")]
#[command(version = "0.1.0")]
#[command(about = "Reclass: validate categorical aggregation mappings and apply them to tabular scenario data")]
struct Cli {
    /// Pipeline configuration file path
    #[arg(short, long, default_value = "./config/pipeline.yaml")]
    config: PathBuf,

    /// Input dataset: long-format CSV with a trailing 'value' column
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output dataset path; written to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Load and validate the configuration and every mapping, then exit
    #[arg(long)]
    check: bool,

    /// Sum the values of duplicate rows after the last step
    #[arg(long)]
    merge_duplicates: bool,

    /// List available processor types
    #[arg(short = 'L', long)]
    list_processors: bool,
}

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging with specified level
    logging::init_logging(&cli.log_level);

    // Handle list processors command
    if cli.list_processors {
        println!("Available processor types:");
        for processor in processors::factory::list_processors() {
            println!("  - {}", processor);
        }
        return;
    }

    // Load configuration from specified file
    let pipeline_config = match config::load_pipeline_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load config from '{}': {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };

    // Validate configuration
    if let Err(e) = config::validate_config(&pipeline_config) {
        tracing::error!("Configuration error: {e}");
        std::process::exit(1);
    }

    // Build all steps up front; every mapping is loaded and validated
    // here, before any data is read
    let base_dir = cli.config.parent().unwrap_or(Path::new(".")).to_path_buf();
    let pipeline = match core::pipeline::Pipeline::build(&pipeline_config, &base_dir) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("Failed to build pipeline: {e:#}");
            std::process::exit(1);
        }
    };

    tracing::info!("Configuration loaded and validated successfully.");

    if cli.check {
        println!("{} step(s) validated.", pipeline.len());
        return;
    }

    let Some(input) = cli.input.as_ref() else {
        tracing::error!("An input dataset is required unless --check is given");
        std::process::exit(1);
    };

    let dataset = match core::dataset::Dataset::from_csv(input) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!("Failed to read dataset '{}': {}", input.display(), e);
            std::process::exit(1);
        }
    };
    tracing::info!("Read {} rows from '{}'", dataset.len(), input.display());

    let result = match pipeline.run(dataset) {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Pipeline failed: {e:#}");
            std::process::exit(1);
        }
    };

    let result = if cli.merge_duplicates {
        result.merge_duplicates()
    } else {
        result
    };

    let written = match cli.output.as_ref() {
        Some(path) => result
            .to_csv(path)
            .map(|_| tracing::info!("Wrote {} rows to '{}'", result.len(), path.display())),
        None => result.write_csv(csv::Writer::from_writer(std::io::stdout().lock())),
    };
    if let Err(e) = written {
        tracing::error!("Failed to write dataset: {e}");
        std::process::exit(1);
    }
}
