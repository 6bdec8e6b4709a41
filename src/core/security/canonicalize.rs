//! Lexical join and normalization of a requested path.
//!
//! This step never touches the filesystem and is not a security boundary on
//! its own: symlinks are resolved later by [`super::boundary`].

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

/// Join `requested` onto `session_dir` and normalize `.` and `..` segments.
///
/// Absolute requests are reinterpreted relative to the session directory:
/// `/etc/passwd` becomes `session_dir/etc/passwd`. The result may still point
/// outside the session directory (e.g. `../../x`).
pub fn canonicalize_request(session_dir: &Path, requested: &str) -> PathBuf {
    session_dir.join(strip_root(Path::new(requested))).clean()
}

/// Drop root and drive-prefix components so the path can only be joined, never
/// replace the base it is joined to.
fn strip_root(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect()
}
