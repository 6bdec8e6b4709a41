//! Session directory provisioning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::SandboxError;
use super::identifier::TenantPath;

/// Create `root/workspace/agent/session` if it does not exist yet.
///
/// Safe to call repeatedly and concurrently for the same triple: a directory
/// that already exists, or that another caller created first, is success.
/// Symlinks are not resolved here.
pub fn provision_session_dir(root: &Path, tenant: &TenantPath) -> Result<PathBuf, SandboxError> {
    let session_dir = tenant.session_dir(root);

    match fs::create_dir_all(&session_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && session_dir.is_dir() => {}
        Err(source) => return Err(SandboxError::Provision { source }),
    }

    debug!(tenant = %tenant, "Session directory ready");
    Ok(session_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::security::SandboxErrorKind;
    use tempfile::TempDir;

    fn tenant() -> TenantPath {
        TenantPath::new("ws", "ag", "se").unwrap()
    }

    #[test]
    fn test_creates_full_chain() {
        let root = TempDir::new().unwrap();
        let dir = provision_session_dir(root.path(), &tenant()).unwrap();

        assert_eq!(dir, root.path().join("ws/ag/se"));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_idempotent() {
        let root = TempDir::new().unwrap();
        let first = provision_session_dir(root.path(), &tenant()).unwrap();
        fs::write(first.join("keep.txt"), "data").unwrap();

        let second = provision_session_dir(root.path(), &tenant()).unwrap();
        assert_eq!(first, second);
        assert!(second.join("keep.txt").exists());
    }

    #[test]
    fn test_root_created_when_missing() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("not/yet/there");
        let dir = provision_session_dir(&root, &tenant()).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_file_in_the_way_fails() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("ws"), "not a dir").unwrap();

        let err = provision_session_dir(root.path(), &tenant()).unwrap_err();
        assert_eq!(err.kind(), SandboxErrorKind::Provision);
    }

    #[test]
    fn test_concurrent_first_access() {
        let root = TempDir::new().unwrap();
        let tenant = TenantPath::new("race", "agent", "fresh").unwrap();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(|| provision_session_dir(root.path(), &tenant)))
                .collect();
            for handle in handles {
                assert!(handle.join().unwrap().is_ok());
            }
        });
    }
}
