//! Symlink resolution and containment check.
//!
//! This is the security boundary of the resolver: both the session directory
//! and the candidate path are resolved to their real form on disk before they
//! are compared.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::warn;

use super::error::SandboxError;

/// Symlink hops followed before giving up, matching Linux `MAXSYMLINKS`.
const MAX_SYMLINK_HOPS: usize = 40;

/// Resolve every symlink in `path`, tolerating components that do not exist.
///
/// Existing components are resolved through their symlinks, including
/// dangling ones, so a link whose target is missing still reveals where a
/// later write would land. The first missing component and everything after
/// it are appended literally. Relative inputs are taken against the current
/// directory.
pub fn real_path(path: &Path) -> io::Result<PathBuf> {
    let mut hops = 0;
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    resolve(&path, &mut hops)
}

fn resolve(path: &Path, hops: &mut usize) -> io::Result<PathBuf> {
    let mut resolved = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                let next = resolved.join(name);
                match fs::symlink_metadata(&next) {
                    Ok(meta) if meta.file_type().is_symlink() => {
                        *hops += 1;
                        if *hops > MAX_SYMLINK_HOPS {
                            return Err(io::Error::other("too many levels of symbolic links"));
                        }
                        let target = fs::read_link(&next)?;
                        resolved = resolve(&resolved.join(target), hops)?;
                    }
                    Ok(_) => resolved = next,
                    Err(e) if is_missing(&e) => resolved = next,
                    Err(e) => return Err(e),
                }
            }
        }
    }

    Ok(resolved)
}

fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// Checks if a path is within (or equal to) a root directory.
///
/// Compares whole components, so `/a/session-evil` is not within `/a/session`.
pub fn is_within_root(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}

/// Resolve `candidate` and verify it stays inside `session_dir`.
///
/// `requested` is the caller-supplied path, used only for the error message.
/// Returns the real path of `candidate` on success. A candidate that cannot
/// be resolved cannot be shown to be contained and is rejected as a boundary
/// violation.
pub fn enforce_boundary(
    session_dir: &Path,
    candidate: &Path,
    requested: &str,
) -> Result<PathBuf, SandboxError> {
    let session_real = real_path(session_dir).map_err(|source| SandboxError::Provision { source })?;

    let candidate_real = match real_path(candidate) {
        Ok(p) => p,
        Err(e) => {
            warn!(requested, error = %e, "Cannot resolve requested path");
            return Err(SandboxError::boundary_violation(requested));
        }
    };

    if !is_within_root(&candidate_real, &session_real) {
        warn!(requested, "Path escapes session sandbox");
        return Err(SandboxError::boundary_violation(requested));
    }

    Ok(candidate_real)
}
