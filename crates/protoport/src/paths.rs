use std::path::{Path, PathBuf};

use protoport_core::ensure_dir;

/// Directory holding the running executable. Default `inputs/` and
/// `outputs/` folders live next to it.
pub fn executable_dir() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow::anyhow!("could not resolve executable directory"))
}

/// An explicit output directory must already exist; the default one is
/// created on demand.
pub fn resolve_output(flag: Option<&Path>, base: &Path) -> anyhow::Result<PathBuf> {
    match flag {
        Some(dir) => {
            if !dir.is_dir() {
                anyhow::bail!("output path does not exist: {}", dir.display());
            }
            Ok(dir.to_path_buf())
        }
        None => {
            let dir = base.join("outputs");
            ensure_dir(&dir)?;
            Ok(dir)
        }
    }
}

pub fn resolve_input(flag: Option<&Path>, base: &Path) -> anyhow::Result<PathBuf> {
    match flag {
        Some(dir) => {
            if !dir.is_dir() {
                anyhow::bail!("input path does not exist: {}", dir.display());
            }
            Ok(dir.to_path_buf())
        }
        None => {
            let dir = base.join("inputs");
            if !dir.is_dir() {
                anyhow::bail!("no input folder was found at {}", dir.display());
            }
            Ok(dir)
        }
    }
}
