//! balcp CLI - load-balanced parallel directory copy

use balcp::config::{CliArgs, CopyConfig};
use balcp::core::CopyEngine;
use balcp::error::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();

    // Handle result
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let config = CopyConfig::from_cli(&args)?;

    if args.verbose > 0 {
        print_config(&config);
    }

    let engine = CopyEngine::new(config);
    let result = engine.execute()?;

    if !args.quiet {
        result.print_summary();
    }

    Ok(())
}

fn print_config(config: &CopyConfig) {
    println!("=== Configuration ===");
    println!("Source:      {:?}", config.source);
    println!("Destination: {:?}", config.destination);
    println!("Workers:     {}", config.workers);
    println!(
        "Buffer:      {}",
        humansize::format_size(config.buffer_size as u64, humansize::BINARY)
    );
    println!();
}
