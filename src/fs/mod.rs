//! File system operations module
//!
//! Tree traversal, symlink handling, and destination-side filesystem
//! operations used by the copy engine.

mod link;
mod operations;
mod walker;

pub use link::{read_link_unbounded, recreate_symlink};
pub use operations::{bootstrap_destination, close_checked, create_dir_with_mode, permission_bits};
pub use walker::{FileJob, TreeWalker, WalkOutcome};
