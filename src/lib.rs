//! # balcp - Load-Balanced Parallel Directory Copy
//!
//! balcp recursively copies a directory tree into a destination using a
//! fixed pool of worker threads, balancing total byte volume across workers
//! so that no single worker is overloaded while others idle.
//!
//! ## How it works
//!
//! 1. **Traversal** (single-threaded): every entry in the source tree is
//!    visited once. Directories and symbolic links are recreated at the
//!    destination immediately; each regular file is recorded as a sized
//!    copy job with its source and destination handles already open.
//! 2. **Scheduling**: jobs are partitioned across N workers with a greedy
//!    largest-first assignment (the classic LPT heuristic), keeping worker
//!    byte totals within one largest-job of each other.
//! 3. **Copying**: N independent threads stream the bytes of their
//!    partitions with a reusable buffer, then close both handles per job.
//!
//! Permission bits, regular files, symlinks (including targets longer than
//! the initial read buffer) and directory structure are preserved. Devices,
//! FIFOs and sockets are skipped silently.
//!
//! ## Quick Start
//!
//! ```no_run
//! use balcp::core::copy_tree;
//! use std::path::Path;
//!
//! let result = copy_tree(Path::new("/source"), Path::new("/destination"), 4).unwrap();
//! println!("Copied {} files ({} bytes)", result.files_copied, result.bytes_copied);
//! ```
//!
//! ## Advanced Usage
//!
//! ```no_run
//! use balcp::config::CopyConfig;
//! use balcp::core::CopyEngine;
//! use std::path::PathBuf;
//!
//! let config = CopyConfig {
//!     source: PathBuf::from("/source"),
//!     destination: PathBuf::from("/destination"),
//!     workers: 8,
//!     buffer_size: 1 << 20,
//! };
//!
//! let result = CopyEngine::new(config).execute().unwrap();
//! result.print_summary();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod error;
pub mod fs;

// Re-export commonly used types
pub use config::CopyConfig;
pub use core::{CopyEngine, CopyResult};
pub use error::{BalcpError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
