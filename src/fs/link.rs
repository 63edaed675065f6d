//! Symbolic link handling
//!
//! Reads link targets with a fixed-size buffer and recreates them at the
//! destination. `readlink(2)` silently truncates targets longer than the
//! buffer, so a read that fills the buffer exactly is retried from the
//! start with a larger buffer until a read comes back short. Link targets
//! are rare and short in the common case, so the occasional re-read is
//! cheaper than sizing the buffer up front via lstat.

use crate::error::{BalcpError, IoResultExt, Result};
use std::ffi::{CString, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::Path;

/// Initial readlink buffer size in bytes
const INITIAL_TARGET_BUF: usize = 256;

/// Read a symlink target of unbounded length.
///
/// The target is returned exactly as stored, without any resolution.
pub fn read_link_unbounded(path: &Path) -> Result<OsString> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| BalcpError::InvalidPath(path.display().to_string()))?;

    let mut capacity = INITIAL_TARGET_BUF;
    loop {
        let mut buf = vec![0u8; capacity];
        let n = unsafe {
            libc::readlink(
                c_path.as_ptr(),
                buf.as_mut_ptr() as *mut libc::c_char,
                buf.len(),
            )
        };
        if n < 0 {
            return Err(BalcpError::io(path, std::io::Error::last_os_error()));
        }

        let n = n as usize;
        if n < buf.len() {
            buf.truncate(n);
            return Ok(OsString::from_vec(buf));
        }

        // Full buffer: the target may be truncated. Re-read from the start
        // with more room until the read comes back short.
        capacity *= 2;
    }
}

/// Recreate `source` (a symlink) at `dest` with an identical target string.
pub fn recreate_symlink(source: &Path, dest: &Path) -> Result<()> {
    let target = read_link_unbounded(source)?;
    std::os::unix::fs::symlink(&target, dest).with_path(dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_short_target() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink("target.txt", &link).unwrap();

        let target = read_link_unbounded(&link).unwrap();
        assert_eq!(target, OsString::from("target.txt"));
    }

    #[test]
    fn test_read_target_longer_than_initial_buffer() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("link");

        let long_target: String = "x".repeat(1000);
        std::os::unix::fs::symlink(&long_target, &link).unwrap();

        let target = read_link_unbounded(&link).unwrap();
        assert_eq!(target, OsString::from(long_target));
    }

    #[test]
    fn test_read_target_exactly_buffer_sized() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("link");

        let target_str: String = "y".repeat(INITIAL_TARGET_BUF);
        std::os::unix::fs::symlink(&target_str, &link).unwrap();

        let target = read_link_unbounded(&link).unwrap();
        assert_eq!(target, OsString::from(target_str));
    }

    #[test]
    fn test_read_missing_link_fails() {
        let dir = TempDir::new().unwrap();
        let err = read_link_unbounded(&dir.path().join("absent")).unwrap_err();
        assert!(err.path().is_some());
    }

    #[test]
    fn test_recreate_symlink() {
        let src_dir = TempDir::new().unwrap();
        let dst_dir = TempDir::new().unwrap();

        let src_link = src_dir.path().join("link");
        std::os::unix::fs::symlink("../some/relative/path", &src_link).unwrap();

        let dst_link = dst_dir.path().join("link");
        recreate_symlink(&src_link, &dst_link).unwrap();

        let recreated = std::fs::read_link(&dst_link).unwrap();
        assert_eq!(recreated, std::path::PathBuf::from("../some/relative/path"));
    }
}
