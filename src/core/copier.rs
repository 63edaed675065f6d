//! Main copy engine
//!
//! Orchestrates the two-phase pipeline: a single-threaded traversal that
//! materializes directories and symlinks and records sized copy jobs,
//! followed by a greedy load-balanced partitioning and N parallel workers
//! streaming the file bytes. All directory and symlink creation
//! happens-before any byte copying begins.

use crate::config::CopyConfig;
use crate::core::scheduler::partition_jobs;
use crate::core::worker::{run_partition, WorkerReport};
use crate::error::{BalcpError, Result};
use crate::fs::{bootstrap_destination, TreeWalker};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

/// Copy operation result
#[derive(Debug)]
pub struct CopyResult {
    /// Total files copied
    pub files_copied: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Total directories created
    pub dirs_created: u64,
    /// Total symlinks recreated
    pub symlinks_created: u64,
    /// Total duration
    pub duration: Duration,
    /// Average throughput in bytes/second
    pub throughput: f64,
}

impl CopyResult {
    /// Print summary to console
    pub fn print_summary(&self) {
        println!("\n=== Copy Summary ===");
        println!("Files copied:    {}", self.files_copied);
        println!(
            "Bytes copied:    {}",
            humansize::format_size(self.bytes_copied, humansize::BINARY)
        );
        println!("Directories:     {}", self.dirs_created);
        println!("Symlinks:        {}", self.symlinks_created);
        println!("Duration:        {:.2?}", self.duration);
        println!(
            "Throughput:      {}/s",
            humansize::format_size(self.throughput as u64, humansize::BINARY)
        );
    }
}

/// Main copy engine
pub struct CopyEngine {
    config: CopyConfig,
}

impl CopyEngine {
    /// Create a new copy engine
    pub fn new(config: CopyConfig) -> Self {
        Self { config }
    }

    /// Execute the copy operation
    pub fn execute(&self) -> Result<CopyResult> {
        let start_time = Instant::now();

        let dest_root = bootstrap_destination(&self.config.source, &self.config.destination)?;

        // Phase one: traversal. Directories and symlinks land at the
        // destination here; regular files become open-handle jobs.
        let outcome = TreeWalker::walk(&self.config.source, &dest_root)?;
        tracing::debug!(
            jobs = outcome.jobs.len(),
            total_bytes = outcome.total_bytes,
            dirs = outcome.dirs_created,
            symlinks = outcome.symlinks_created,
            "traversal complete"
        );

        let (partitions, loads) = partition_jobs(outcome.jobs, self.config.workers)?;
        for load in &loads {
            tracing::info!(
                worker = load.worker_id,
                assigned = %humansize::format_size(load.bytes, humansize::BINARY),
                "worker load"
            );
        }

        // Phase two: parallel copy. Each worker exclusively owns its
        // partition; workers that received an empty partition exit
        // immediately.
        let buffer_size = self.config.buffer_size;
        let handles: Vec<_> = partitions
            .into_iter()
            .enumerate()
            .map(|(worker_id, jobs)| {
                thread::spawn(move || run_partition(worker_id, jobs, buffer_size))
            })
            .collect();

        let mut files_copied = 0u64;
        let mut bytes_copied = 0u64;
        let mut first_error: Option<BalcpError> = None;
        for (worker_id, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(Ok(WorkerReport {
                    files_copied: files,
                    bytes_copied: bytes,
                })) => {
                    files_copied += files;
                    bytes_copied += bytes;
                }
                Ok(Err(e)) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
                Err(_) => {
                    if first_error.is_none() {
                        first_error = Some(BalcpError::WorkerPanic { worker_id });
                    }
                }
            }
        }
        // In-flight copies on other workers were abandoned as-is; no
        // rollback of partially written destination files.
        if let Some(e) = first_error {
            return Err(e);
        }

        let duration = start_time.elapsed();
        let throughput = if duration.as_secs_f64() > 0.0 {
            bytes_copied as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Ok(CopyResult {
            files_copied,
            bytes_copied,
            dirs_created: outcome.dirs_created,
            symlinks_created: outcome.symlinks_created,
            duration,
            throughput,
        })
    }
}

/// One-call copy with a chosen worker count and the default buffer size
pub fn copy_tree(source: &Path, dest: &Path, workers: usize) -> Result<CopyResult> {
    let config = CopyConfig {
        source: source.to_path_buf(),
        destination: dest.to_path_buf(),
        workers,
        ..Default::default()
    };

    let engine = CopyEngine::new(config);
    engine.execute()
}
