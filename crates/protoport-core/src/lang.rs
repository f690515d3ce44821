use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::CoreError;

/// Code generator backends protoc can be asked to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetLanguage {
    Go,
    Cpp,
    CSharp,
    Java,
    Python,
    Ruby,
    Pyi,
    Php,
    Objc,
    Kotlin,
    Node,
    Dart,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 12] = [
        TargetLanguage::Go,
        TargetLanguage::Cpp,
        TargetLanguage::CSharp,
        TargetLanguage::Java,
        TargetLanguage::Python,
        TargetLanguage::Ruby,
        TargetLanguage::Pyi,
        TargetLanguage::Php,
        TargetLanguage::Objc,
        TargetLanguage::Kotlin,
        TargetLanguage::Node,
        TargetLanguage::Dart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::Go => "go",
            TargetLanguage::Cpp => "cpp",
            TargetLanguage::CSharp => "csharp",
            TargetLanguage::Java => "java",
            TargetLanguage::Python => "python",
            TargetLanguage::Ruby => "ruby",
            TargetLanguage::Pyi => "pyi",
            TargetLanguage::Php => "php",
            TargetLanguage::Objc => "objc",
            TargetLanguage::Kotlin => "kotlin",
            TargetLanguage::Node => "node",
            TargetLanguage::Dart => "dart",
        }
    }

    /// Parse a user-supplied identifier. Empty input is reported separately
    /// from an unknown one.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CoreError::LanguageNotSpecified);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.as_str() == value)
            .ok_or_else(|| CoreError::LanguageNotSupported(value.to_string()))
    }

    /// Compiler output flags pointing generated code at `out_dir`.
    ///
    /// Go emits message and gRPC service code side by side, both with
    /// source-relative paths.
    pub fn output_flags(&self, out_dir: &Path) -> Vec<String> {
        let out = out_dir.display();
        match self {
            TargetLanguage::Go => vec![
                format!("--go_out={out}"),
                "--go_opt=paths=source_relative".to_string(),
                format!("--go-grpc_out={out}"),
                "--go-grpc_opt=paths=source_relative".to_string(),
            ],
            other => vec![format!("--{}_out={out}", other.as_str())],
        }
    }

    /// Comma-separated list of every supported identifier, for help text.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|lang| lang.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetLanguage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
