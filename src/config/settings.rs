//! Configuration settings for balcp
//!
//! Defines the CLI arguments, the runtime configuration derived from them,
//! and size-string parsing.

use crate::error::{BalcpError, Result};
use clap::Parser;
use std::path::PathBuf;

/// balcp - load-balanced multi-threaded recursive directory copy
#[derive(Parser, Debug, Clone)]
#[command(name = "balcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Copy a directory tree in parallel, balancing bytes across workers")]
#[command(long_about = r#"
balcp recursively copies a source directory into a destination directory
using a fixed pool of worker threads. During a single-threaded traversal it
records every regular file as a sized job, then partitions the jobs across
workers with a greedy largest-first assignment so that no worker is
overloaded while others idle.

Regular files, directories, symbolic links and permission bits are
preserved. Devices, FIFOs and sockets are skipped silently.

Examples:
  balcp /data /backup                 # auto-detected worker count
  balcp /data /backup -t 8            # 8 workers
  balcp /data /backup -t 8 -b 1M      # 8 workers, 1 MiB copy buffer
"#)]
pub struct CliArgs {
    /// Source directory
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Destination directory
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// Number of copy workers (0 = auto-detect)
    #[arg(short = 't', long, default_value = "0", value_name = "NUM")]
    pub workers: usize,

    /// I/O buffer size per worker (e.g. 4096, 64K, 1M)
    #[arg(short = 'b', long, default_value = "4096", value_name = "SIZE")]
    pub buffer_size: String,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress the summary)
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone)]
pub struct CopyConfig {
    /// Source directory
    pub source: PathBuf,
    /// Destination directory
    pub destination: PathBuf,
    /// Worker count (always >= 1 after resolution)
    pub workers: usize,
    /// I/O buffer size in bytes
    pub buffer_size: usize,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            workers: 1,
            buffer_size: 4096,
        }
    }
}

impl CopyConfig {
    /// Create config from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        let workers = if args.workers == 0 {
            num_cpus::get()
        } else {
            args.workers
        };

        let buffer_size = parse_size(&args.buffer_size)
            .map_err(|e| BalcpError::config(format!("Invalid buffer size: {}", e)))?
            as usize;
        if buffer_size == 0 {
            return Err(BalcpError::config("Buffer size must be positive"));
        }

        Ok(Self {
            source: args.source.clone(),
            destination: args.destination.clone(),
            workers,
            buffer_size,
        })
    }
}

/// Parse human-readable size string to bytes
pub fn parse_size(size: &str) -> std::result::Result<u64, String> {
    let size = size.trim().to_uppercase();

    if size.is_empty() {
        return Err("Empty size string".to_string());
    }

    let (num_str, multiplier) = if size.ends_with("GB") || size.ends_with('G') {
        let num = size.trim_end_matches(|c| c == 'G' || c == 'B');
        (num, 1024u64 * 1024 * 1024)
    } else if size.ends_with("MB") || size.ends_with('M') {
        let num = size.trim_end_matches(|c| c == 'M' || c == 'B');
        (num, 1024u64 * 1024)
    } else if size.ends_with("KB") || size.ends_with('K') {
        let num = size.trim_end_matches(|c| c == 'K' || c == 'B');
        (num, 1024u64)
    } else if size.ends_with('B') {
        let num = size.trim_end_matches('B');
        (num, 1u64)
    } else {
        // Assume bytes if no suffix
        (size.as_str(), 1u64)
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: {}", num_str))?;

    Ok((num * multiplier as f64) as u64)
}
