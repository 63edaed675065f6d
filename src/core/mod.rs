//! Core copy engine module
//!
//! Provides the copy orchestration, the greedy load-balancing scheduler,
//! and the parallel copy workers.

mod copier;
mod scheduler;
mod worker;

pub use copier::{copy_tree, CopyEngine, CopyResult};
pub use scheduler::{assign, partition_jobs, Assignment, WorkerLoad};
pub use worker::{run_partition, WorkerReport};
