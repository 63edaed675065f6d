//! Job scheduling and load balancing
//!
//! Partitions the recorded copy jobs across a fixed number of workers with
//! the greedy longest-processing-time-first heuristic: jobs are sorted by
//! size descending and each is handed to the currently least-loaded worker.
//! This keeps the byte totals within one largest-job of each other, a small
//! constant factor from the optimal makespan, and is deterministic: size
//! ties keep discovery order and load ties go to the lowest worker id.
//!
//! Balancing is offline. Once partitions are handed to workers no
//! rebalancing or work stealing occurs.

use crate::error::{BalcpError, Result};
use crate::fs::FileJob;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Accumulated byte load of one worker during assignment.
///
/// Field order matters: the derived ordering compares `bytes` before
/// `worker_id`, so a min-heap pops the least-loaded worker and breaks ties
/// by lowest id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkerLoad {
    /// Total bytes assigned so far
    pub bytes: u64,
    /// Worker index in [0, N)
    pub worker_id: usize,
}

/// Result of assigning a list of job sizes to N workers.
#[derive(Debug)]
pub struct Assignment {
    /// Per-worker lists of job indices, in assignment order
    pub partitions: Vec<Vec<usize>>,
    /// Final per-worker loads, sorted by descending bytes
    pub loads: Vec<WorkerLoad>,
}

/// Assign job sizes to `workers` partitions, largest first.
///
/// Returns an error for a zero worker count. With more workers than jobs,
/// the surplus partitions come back empty.
pub fn assign(sizes: &[u64], workers: usize) -> Result<Assignment> {
    if workers == 0 {
        return Err(BalcpError::config("Worker count must be positive"));
    }

    // Stable sort keeps discovery order among equal sizes.
    let mut order: Vec<usize> = (0..sizes.len()).collect();
    order.sort_by(|&a, &b| sizes[b].cmp(&sizes[a]));

    let mut heap: BinaryHeap<Reverse<WorkerLoad>> = (0..workers)
        .map(|worker_id| Reverse(WorkerLoad { bytes: 0, worker_id }))
        .collect();
    let mut partitions: Vec<Vec<usize>> = vec![Vec::new(); workers];

    for job in order {
        let Reverse(mut load) = heap.pop().expect("heap holds one entry per worker");
        partitions[load.worker_id].push(job);
        load.bytes += sizes[job];
        heap.push(Reverse(load));
    }

    // Drain the heap for reporting, most-loaded worker first.
    let mut loads: Vec<WorkerLoad> = heap.into_iter().map(|Reverse(load)| load).collect();
    loads.sort_by(|a, b| b.cmp(a));

    Ok(Assignment { partitions, loads })
}

/// Partition the recorded jobs into per-worker lists.
///
/// Each job lands in exactly one partition; within a partition, jobs keep
/// their assignment order (descending size). The returned loads are sorted
/// by descending bytes for reporting.
pub fn partition_jobs(
    jobs: Vec<FileJob>,
    workers: usize,
) -> Result<(Vec<Vec<FileJob>>, Vec<WorkerLoad>)> {
    let sizes: Vec<u64> = jobs.iter().map(|j| j.size).collect();
    let assignment = assign(&sizes, workers)?;

    let mut slots: Vec<Option<FileJob>> = jobs.into_iter().map(Some).collect();
    let partitions = assignment
        .partitions
        .into_iter()
        .map(|indices| {
            indices
                .into_iter()
                .map(|i| slots[i].take().expect("each job assigned exactly once"))
                .collect()
        })
        .collect();

    Ok((partitions, assignment.loads))
}
