use std::path::{Path, PathBuf};

use protoport_core::TargetLanguage;

/// One compiler invocation: a `.proto` file, where it lives and where its
/// generated code goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTask {
    pub proto_dir: PathBuf,
    pub output_dir: PathBuf,
    pub file_name: String,
    pub language: TargetLanguage,
}

impl BuildTask {
    pub fn new(
        proto_dir: &Path,
        output_dir: &Path,
        file_name: &str,
        language: TargetLanguage,
    ) -> Self {
        Self {
            proto_dir: proto_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            file_name: file_name.to_string(),
            language,
        }
    }

    pub fn proto_file(&self) -> PathBuf {
        self.proto_dir.join(&self.file_name)
    }

    /// Arguments for protoc: language output flags, the import path, then
    /// the proto file itself as the only positional argument.
    pub fn protoc_args(&self) -> Vec<String> {
        let mut args = self.language.output_flags(&self.output_dir);
        args.push(format!("--proto_path={}", self.proto_dir.display()));
        args.push(self.proto_file().display().to_string());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn java_args() {
        let task = BuildTask::new(
            Path::new("in/api"),
            Path::new("out/api"),
            "user.proto",
            TargetLanguage::Java,
        );
        let file = Path::new("in/api").join("user.proto");
        assert_eq!(
            task.protoc_args(),
            vec![
                "--java_out=out/api".to_string(),
                "--proto_path=in/api".to_string(),
                file.display().to_string(),
            ]
        );
    }

    #[test]
    fn go_args_put_grpc_flags_before_proto_path() {
        let task = BuildTask::new(Path::new("p"), Path::new("o"), "s.proto", TargetLanguage::Go);
        let args = task.protoc_args();
        assert_eq!(args.len(), 6);
        assert_eq!(args[0], "--go_out=o");
        assert_eq!(args[2], "--go-grpc_out=o");
        assert_eq!(args[4], "--proto_path=p");
        assert_eq!(args[5], Path::new("p").join("s.proto").display().to_string());
    }
}
