//! Destination-side filesystem operations
//!
//! Directory creation with preserved mode bits, destination-root bootstrap,
//! and a checked close for file handles whose close errors must not be
//! swallowed.

use crate::error::{BalcpError, IoResultExt, Result};
use std::fs::File;
use std::os::unix::fs::{DirBuilderExt, MetadataExt, PermissionsExt};
use std::os::unix::io::IntoRawFd;
use std::path::{Path, PathBuf};

/// Create a directory with the given mode bits, reusing it if it already
/// exists. The mode of a pre-existing directory is left untouched.
pub fn create_dir_with_mode(path: &Path, mode: u32) -> Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.mode(mode & 0o7777);

    match builder.create(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(BalcpError::io(path, e)),
    }
}

/// Resolve and prepare the destination root directory.
///
/// If `destination` does not exist it is created with the source
/// directory's mode and the copy lands directly inside it. If it does
/// exist, a directory named after the source's base name is created (or
/// reused) inside it, and the copy lands there.
pub fn bootstrap_destination(source: &Path, destination: &Path) -> Result<PathBuf> {
    let src_meta = std::fs::metadata(source).with_path(source)?;
    if !src_meta.is_dir() {
        return Err(BalcpError::InvalidPath(format!(
            "source is not a directory: {}",
            source.display()
        )));
    }
    let src_mode = src_meta.permissions().mode();

    match std::fs::metadata(destination) {
        Ok(dst_meta) => {
            if !dst_meta.is_dir() {
                return Err(BalcpError::InvalidPath(format!(
                    "destination is not a directory: {}",
                    destination.display()
                )));
            }

            let base = source
                .file_name()
                .map(PathBuf::from)
                .or_else(|| {
                    // "." or a trailing-slash path: fall back to the
                    // canonical name.
                    std::fs::canonicalize(source)
                        .ok()
                        .and_then(|p| p.file_name().map(PathBuf::from))
                })
                .ok_or_else(|| {
                    BalcpError::InvalidPath(format!(
                        "cannot derive a base name from {}",
                        source.display()
                    ))
                })?;

            let root = destination.join(base);
            create_dir_with_mode(&root, src_mode)?;
            Ok(root)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            create_dir_with_mode(destination, src_mode)?;
            Ok(destination.to_path_buf())
        }
        Err(e) => Err(BalcpError::io(destination, e)),
    }
}

/// Close a file handle, surfacing the close(2) result.
///
/// Dropping a `File` discards any close error; deferred-write filesystems
/// can report the real write failure at close time, so workers close their
/// handles through this instead.
pub fn close_checked(file: File, path: &Path) -> Result<()> {
    let fd = file.into_raw_fd();
    let rc = unsafe { libc::close(fd) };
    if rc == -1 {
        return Err(BalcpError::io(path, std::io::Error::last_os_error()));
    }
    Ok(())
}

/// Mode bits of a metadata entry, masked to the permission bits.
pub fn permission_bits(meta: &std::fs::Metadata) -> u32 {
    meta.mode() & 0o7777
}
