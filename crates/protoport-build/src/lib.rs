pub mod compiler;
pub mod dispatch;
pub mod error;
pub mod task;

pub use compiler::{ProtoCompiler, ProtocCompiler, DEFAULT_PROTOC, DEFAULT_TIMEOUT};
pub use dispatch::{walk, Dispatcher, WalkReport};
pub use error::BuildError;
pub use task::BuildTask;

use std::path::Path;

use protoport_core::TargetLanguage;

/// Compile a single `.proto` file found in `proto_dir` into `output_dir`.
pub async fn build<C: ProtoCompiler + ?Sized>(
    compiler: &C,
    proto_dir: &Path,
    output_dir: &Path,
    file_name: &str,
    language: &str,
) -> Result<(), BuildError> {
    let language = TargetLanguage::parse(language)?;
    let task = BuildTask::new(proto_dir, output_dir, file_name, language);
    compiler.compile(&task).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use protoport_core::CoreError;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<BuildTask>>);

    #[async_trait]
    impl ProtoCompiler for Recorder {
        async fn compile(&self, task: &BuildTask) -> Result<(), BuildError> {
            self.0.lock().unwrap().push(task.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn build_hands_one_task_to_the_compiler() {
        let compiler = Recorder::default();
        build(&compiler, Path::new("in/api"), Path::new("out/api"), "user.proto", "python")
            .await
            .unwrap();

        let tasks = compiler.0.lock().unwrap();
        assert_eq!(
            *tasks,
            vec![BuildTask::new(
                Path::new("in/api"),
                Path::new("out/api"),
                "user.proto",
                TargetLanguage::Python
            )]
        );
    }

    #[tokio::test]
    async fn build_rejects_bad_languages_without_compiling() {
        let compiler = Recorder::default();

        let err = build(&compiler, Path::new("in"), Path::new("out"), "a.proto", "")
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Core(CoreError::LanguageNotSpecified)));

        let err = build(&compiler, Path::new("in"), Path::new("out"), "a.proto", "cobol")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Core(CoreError::LanguageNotSupported(ref lang)) if lang == "cobol"
        ));

        assert!(compiler.0.lock().unwrap().is_empty());
    }
}
