use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Core(#[from] protoport_core::CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("compiler command is empty")]
    EmptyCommand,
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("error building proto file {}", file.display())]
    CompilerFailed { file: PathBuf, code: Option<i32> },
    #[error("building {} timed out after {}s", file.display(), timeout.as_secs_f64())]
    Timeout { file: PathBuf, timeout: Duration },
}
