use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;

use crate::task::BuildTask;
use crate::BuildError;

pub const DEFAULT_PROTOC: &str = "protoc";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Turns one `.proto` file into generated code.
#[async_trait]
pub trait ProtoCompiler: Send + Sync {
    async fn compile(&self, task: &BuildTask) -> Result<(), BuildError>;
}

#[async_trait]
impl<T: ProtoCompiler + ?Sized> ProtoCompiler for &T {
    async fn compile(&self, task: &BuildTask) -> Result<(), BuildError> {
        (**self).compile(task).await
    }
}

/// Runs an external protoc-compatible command per task.
#[derive(Debug, Clone)]
pub struct ProtocCompiler {
    program: String,
    /// Arguments placed before the task's own, e.g. `protoc` for `buf protoc`.
    leading_args: Vec<String>,
    timeout: Duration,
}

impl Default for ProtocCompiler {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROTOC.to_string(),
            leading_args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ProtocCompiler {
    /// Build from a command line such as `["buf", "protoc"]`.
    pub fn from_command(command: &[String]) -> Result<Self, BuildError> {
        let (program, leading_args) = command.split_first().ok_or(BuildError::EmptyCommand)?;
        if program.trim().is_empty() {
            return Err(BuildError::EmptyCommand);
        }
        Ok(Self {
            program: program.clone(),
            leading_args: leading_args.to_vec(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args_for(&self, task: &BuildTask) -> Vec<String> {
        let mut args = self.leading_args.clone();
        args.extend(task.protoc_args());
        args
    }
}

#[async_trait]
impl ProtoCompiler for ProtocCompiler {
    async fn compile(&self, task: &BuildTask) -> Result<(), BuildError> {
        let file = task.proto_file();
        let args = self.args_for(task);
        tracing::debug!(program = %self.program, ?args, "running compiler");

        // Dropping the output future (timeout or cancellation) kills the child.
        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, output).await {
            Ok(result) => result.map_err(|source| BuildError::Spawn {
                program: self.program.clone(),
                source,
            })?,
            Err(_) => {
                tracing::error!(file = %file.display(), timeout = ?self.timeout, "compiler timed out");
                return Err(BuildError::Timeout {
                    file,
                    timeout: self.timeout,
                });
            }
        };

        if !output.status.success() {
            tracing::error!(
                file = %file.display(),
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                "compiler failed"
            );
            return Err(BuildError::CompilerFailed {
                file,
                code: output.status.code(),
            });
        }

        if !output.stdout.is_empty() {
            tracing::debug!(
                file = %file.display(),
                stdout = %String::from_utf8_lossy(&output.stdout).trim_end(),
                "compiler output"
            );
        }
        tracing::info!(file = %file.display(), "build successful");
        Ok(())
    }
}
