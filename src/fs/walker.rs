//! Directory tree traversal and work recording
//!
//! A single-threaded walk over the source tree that materializes
//! directories and symlinks at the destination as it goes, and records
//! every regular file as a sized copy job with both file handles already
//! open. No file bytes are copied here.
//!
//! Traversal composes explicit child paths per recursion level instead of
//! changing the process working directory, so it is reentrant and keeps no
//! global state.

use crate::error::{IoResultExt, Result};
use crate::fs::link::recreate_symlink;
use crate::fs::operations::{create_dir_with_mode, permission_bits};
use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

/// One regular file's copy task.
///
/// Both handles are opened during traversal and stay open until exactly one
/// copy worker consumes the job and closes them. The number of open handle
/// pairs therefore equals the number of regular files discovered so far, a
/// known scalability bound of the upfront-open design.
#[derive(Debug)]
pub struct FileJob {
    /// Source byte size at record time
    pub size: u64,
    /// Open read handle on the source file
    pub source: File,
    /// Open write handle on the destination file (created, truncated)
    pub dest: File,
    /// Destination path, kept for error diagnostics
    pub dest_path: PathBuf,
}

/// The source/destination directory pair active during one level of
/// recursion.
struct DirectoryContext {
    source: PathBuf,
    dest: PathBuf,
}

impl DirectoryContext {
    fn descend(&self, name: &OsStr) -> DirectoryContext {
        DirectoryContext {
            source: self.source.join(name),
            dest: self.dest.join(name),
        }
    }
}

/// Everything the traversal produced.
#[derive(Debug)]
pub struct WalkOutcome {
    /// Recorded copy jobs, in discovery order
    pub jobs: Vec<FileJob>,
    /// Directories created (or reused) at the destination
    pub dirs_created: u64,
    /// Symlinks recreated at the destination
    pub symlinks_created: u64,
    /// Total bytes across all recorded jobs
    pub total_bytes: u64,
}

/// Recursive tree walker
pub struct TreeWalker {
    jobs: Vec<FileJob>,
    dirs_created: u64,
    symlinks_created: u64,
    total_bytes: u64,
}

impl TreeWalker {
    /// Walk `source_root`, mirroring directories and symlinks under
    /// `dest_root` and recording one job per regular file.
    ///
    /// `dest_root` must already exist. Any failing metadata, open, create
    /// or link operation aborts the walk.
    pub fn walk(source_root: &Path, dest_root: &Path) -> Result<WalkOutcome> {
        let mut walker = TreeWalker {
            jobs: Vec::new(),
            dirs_created: 0,
            symlinks_created: 0,
            total_bytes: 0,
        };

        let root = DirectoryContext {
            source: source_root.to_path_buf(),
            dest: dest_root.to_path_buf(),
        };
        walker.walk_dir(&root)?;

        Ok(WalkOutcome {
            jobs: walker.jobs,
            dirs_created: walker.dirs_created,
            symlinks_created: walker.symlinks_created,
            total_bytes: walker.total_bytes,
        })
    }

    fn walk_dir(&mut self, ctx: &DirectoryContext) -> Result<()> {
        // read_dir never yields "." or ".."
        for entry in std::fs::read_dir(&ctx.source).with_path(&ctx.source)? {
            let entry = entry.with_path(&ctx.source)?;
            let name = entry.file_name();
            // Does not follow symlinks
            let file_type = entry.file_type().with_path(entry.path())?;

            if file_type.is_file() {
                self.record_file(ctx, &name)?;
            } else if file_type.is_symlink() {
                recreate_symlink(&ctx.source.join(&name), &ctx.dest.join(&name))?;
                self.symlinks_created += 1;
            } else if file_type.is_dir() {
                // Mode comes from the child's own metadata, not the parent's
                let meta = entry.metadata().with_path(entry.path())?;
                let child = ctx.descend(&name);
                create_dir_with_mode(&child.dest, permission_bits(&meta))?;
                self.dirs_created += 1;
                self.walk_dir(&child)?;
            } else {
                // Devices, FIFOs, sockets: intentionally not copied
                tracing::debug!(path = %entry.path().display(), "skipping unsupported entry type");
            }
        }

        Ok(())
    }

    /// Record a regular file as a pending job with both handles open.
    fn record_file(&mut self, ctx: &DirectoryContext, name: &OsStr) -> Result<()> {
        let src_path = ctx.source.join(name);
        let dest_path = ctx.dest.join(name);

        let source = File::open(&src_path).with_path(&src_path)?;
        let meta = source.metadata().with_path(&src_path)?;

        let dest = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(permission_bits(&meta))
            .open(&dest_path)
            .with_path(&dest_path)?;

        let size = meta.len();
        self.total_bytes += size;
        self.jobs.push(FileJob {
            size,
            source,
            dest,
            dest_path,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn write_file(path: &Path, contents: &[u8]) {
        let mut f = File::create(path).unwrap();
        f.write_all(contents).unwrap();
    }

    fn walk_into_fresh_dest(src: &Path) -> (TempDir, WalkOutcome) {
        let dst = TempDir::new().unwrap();
        let outcome = TreeWalker::walk(src, dst.path()).unwrap();
        (dst, outcome)
    }

    #[test]
    fn test_records_regular_files_with_sizes() {
        let src = TempDir::new().unwrap();
        write_file(&src.path().join("a.txt"), b"hello");
        write_file(&src.path().join("b.bin"), &[0u8; 2048]);

        let (_dst, outcome) = walk_into_fresh_dest(src.path());

        assert_eq!(outcome.jobs.len(), 2);
        assert_eq!(outcome.total_bytes, 5 + 2048);
        let mut sizes: Vec<u64> = outcome.jobs.iter().map(|j| j.size).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![5, 2048]);
    }

    #[test]
    fn test_creates_directory_structure_before_copying() {
        let src = TempDir::new().unwrap();
        std::fs::create_dir_all(src.path().join("a/b/c")).unwrap();
        write_file(&src.path().join("a/b/c/deep.txt"), b"deep");

        let (dst, outcome) = walk_into_fresh_dest(src.path());

        // Directories exist at the destination even though no bytes were
        // copied yet.
        assert!(dst.path().join("a/b/c").is_dir());
        assert_eq!(outcome.dirs_created, 3);
        let copied = std::fs::read(dst.path().join("a/b/c/deep.txt")).unwrap();
        assert!(copied.is_empty());
    }

    #[test]
    fn test_preserves_directory_mode() {
        let src = TempDir::new().unwrap();
        let locked = src.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o700)).unwrap();

        let (dst, _outcome) = walk_into_fresh_dest(src.path());

        let meta = std::fs::metadata(dst.path().join("locked")).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o700);
    }

    #[test]
    fn test_preserves_file_mode_on_destination_handle() {
        let src = TempDir::new().unwrap();
        let exe = src.path().join("tool.sh");
        write_file(&exe, b"#!/bin/sh\n");
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o750)).unwrap();

        let (dst, _outcome) = walk_into_fresh_dest(src.path());

        let meta = std::fs::metadata(dst.path().join("tool.sh")).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o750);
    }

    #[test]
    fn test_recreates_symlinks_immediately() {
        let src = TempDir::new().unwrap();
        write_file(&src.path().join("real.txt"), b"real");
        std::os::unix::fs::symlink("real.txt", src.path().join("ln")).unwrap();

        let long_target = "t".repeat(1000);
        std::os::unix::fs::symlink(&long_target, src.path().join("long_ln")).unwrap();

        let (dst, outcome) = walk_into_fresh_dest(src.path());

        assert_eq!(outcome.symlinks_created, 2);
        assert_eq!(
            std::fs::read_link(dst.path().join("ln")).unwrap(),
            PathBuf::from("real.txt")
        );
        assert_eq!(
            std::fs::read_link(dst.path().join("long_ln")).unwrap(),
            PathBuf::from(long_target)
        );
    }

    #[test]
    fn test_symlink_to_directory_is_not_traversed() {
        let src = TempDir::new().unwrap();
        std::fs::create_dir(src.path().join("real_dir")).unwrap();
        write_file(&src.path().join("real_dir/inner.txt"), b"x");
        std::os::unix::fs::symlink("real_dir", src.path().join("dir_ln")).unwrap();

        let (dst, outcome) = walk_into_fresh_dest(src.path());

        // One job for inner.txt, one recreated link, no duplicate traversal
        assert_eq!(outcome.jobs.len(), 1);
        assert!(dst.path().join("dir_ln").symlink_metadata().unwrap().file_type().is_symlink());
    }

    #[test]
    fn test_fifo_is_skipped_silently() {
        let src = TempDir::new().unwrap();
        write_file(&src.path().join("kept.txt"), b"kept");
        nix::unistd::mkfifo(
            &src.path().join("pipe"),
            nix::sys::stat::Mode::from_bits_truncate(0o644),
        )
        .unwrap();

        let (dst, outcome) = walk_into_fresh_dest(src.path());

        assert_eq!(outcome.jobs.len(), 1);
        assert!(!dst.path().join("pipe").exists());
    }

    #[test]
    fn test_missing_source_fails() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let absent = src.path().join("nope");
        assert!(TreeWalker::walk(&absent, dst.path()).is_err());
    }
}
