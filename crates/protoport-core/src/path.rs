use std::path::{Component, Path, PathBuf};

use crate::CoreError;

pub const PROTO_SUFFIX: &str = ".proto";

pub fn is_proto_file(name: &str) -> bool {
    name.ends_with(PROTO_SUFFIX)
}

/// Create `dir` and any missing parents. An existing directory is fine.
pub fn ensure_dir(dir: &Path) -> Result<(), CoreError> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Turn a `/`-separated remote path into a relative local path.
///
/// Anything that could escape the directory it is joined onto (absolute
/// paths, `.` or `..` segments, drive prefixes) is rejected. An empty path
/// maps to an empty `PathBuf`.
pub fn remote_to_local(remote: &str) -> Result<PathBuf, CoreError> {
    let mut local = PathBuf::new();
    if remote.is_empty() {
        return Ok(local);
    }
    if remote.starts_with('/') || remote.contains('\\') {
        return Err(CoreError::UnsafePath(remote.to_string()));
    }

    for segment in remote.split('/') {
        if segment.is_empty() {
            return Err(CoreError::UnsafePath(remote.to_string()));
        }
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => local.push(part),
            _ => return Err(CoreError::UnsafePath(remote.to_string())),
        }
    }

    Ok(local)
}

/// Strip `base` (a remote directory path) from the front of `path`.
///
/// Returns `None` when `path` does not live under `base`.
pub fn strip_remote_base<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    let base = base.trim_matches('/');
    if base.is_empty() {
        return Some(path.trim_start_matches('/'));
    }
    let rest = path.trim_start_matches('/').strip_prefix(base)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}

/// Parent directory of a `/`-separated remote path, `""` at the root.
pub fn remote_parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}
