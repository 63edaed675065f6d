//! Copy worker
//!
//! Executes one partition of copy jobs with a single reusable buffer.
//! Workers share nothing: each job's handles belong to exactly one worker,
//! so the copy loop needs no synchronization.

use crate::error::{IoResultExt, Result};
use crate::fs::{close_checked, FileJob};
use std::io::{Read, Write};

/// What one worker accomplished.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerReport {
    /// Jobs completed
    pub files_copied: u64,
    /// Bytes written
    pub bytes_copied: u64,
}

/// Copy every job in the partition, strictly in assigned order.
///
/// For each job: read up to `buffer_size` bytes from the source handle, a
/// zero read signals end-of-file, otherwise write exactly the bytes read to
/// the destination (short writes are retried by `write_all`). Both handles
/// are closed when the job completes; the first read, write or close
/// failure ends the worker.
pub fn run_partition(
    worker_id: usize,
    jobs: Vec<FileJob>,
    buffer_size: usize,
) -> Result<WorkerReport> {
    let mut buf = vec![0u8; buffer_size];
    let mut report = WorkerReport::default();

    for job in jobs {
        let FileJob {
            size,
            mut source,
            mut dest,
            dest_path,
        } = job;

        loop {
            let n = source.read(&mut buf).with_path(&dest_path)?;
            if n == 0 {
                break;
            }
            dest.write_all(&buf[..n]).with_path(&dest_path)?;
            report.bytes_copied += n as u64;
        }

        close_checked(source, &dest_path)?;
        close_checked(dest, &dest_path)?;
        report.files_copied += 1;

        tracing::trace!(
            worker = worker_id,
            path = %dest_path.display(),
            bytes = size,
            "job complete"
        );
    }

    Ok(report)
}
