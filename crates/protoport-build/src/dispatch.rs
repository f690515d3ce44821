use std::path::{Path, PathBuf};

use protoport_core::{ensure_dir, is_proto_file, TargetLanguage, PROTO_SUFFIX};

use crate::compiler::ProtoCompiler;
use crate::task::BuildTask;
use crate::BuildError;

type BuiltHook = Box<dyn Fn(&BuildTask) + Send + Sync>;

/// Summary of a completed walk.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkReport {
    /// Input directories visited, the root included.
    pub directories: usize,
    /// Proto files compiled, in build order.
    pub built: Vec<PathBuf>,
    /// Non-proto files passed over.
    pub skipped: usize,
}

/// Walks an input tree, mirrors its directories under an output root and
/// compiles every `.proto` file it meets.
pub struct Dispatcher<C> {
    compiler: C,
    language: TargetLanguage,
    on_built: Option<BuiltHook>,
}

impl<C: ProtoCompiler> Dispatcher<C> {
    pub fn new(compiler: C, language: TargetLanguage) -> Self {
        Self {
            compiler,
            language,
            on_built: None,
        }
    }

    /// Called after each file compiles successfully.
    pub fn on_built(mut self, hook: impl Fn(&BuildTask) + Send + Sync + 'static) -> Self {
        self.on_built = Some(Box::new(hook));
        self
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Entries are handled in file-name order. Every subdirectory gets its
    /// output counterpart when it is first seen, before anything inside it
    /// is compiled. The first error stops the walk.
    ///
    /// An output root nested inside `input` is never walked itself.
    pub async fn walk(&self, input: &Path, output: &Path) -> Result<WalkReport, BuildError> {
        ensure_dir(output)?;
        let output_root = std::fs::canonicalize(output)?;

        let mut report = WalkReport::default();
        let mut pending = vec![(input.to_path_buf(), output.to_path_buf())];

        while let Some((in_dir, out_dir)) = pending.pop() {
            report.directories += 1;

            let mut entries = std::fs::read_dir(&in_dir)?.collect::<Result<Vec<_>, _>>()?;
            entries.sort_by_key(|e| e.file_name());

            let mut subdirs = Vec::new();
            for entry in entries {
                let file_name = entry.file_name();
                if entry.file_type()?.is_dir() {
                    if std::fs::canonicalize(entry.path())? == output_root {
                        tracing::debug!(path = %entry.path().display(), "skipping output directory");
                        continue;
                    }
                    let sub_out = out_dir.join(&file_name);
                    ensure_dir(&sub_out)?;
                    subdirs.push((entry.path(), sub_out));
                    continue;
                }

                match file_name.to_str() {
                    Some(name) if is_proto_file(name) => {
                        let task = BuildTask::new(&in_dir, &out_dir, name, self.language);
                        self.compiler.compile(&task).await?;
                        if let Some(hook) = &self.on_built {
                            hook(&task);
                        }
                        report.built.push(task.proto_file());
                    }
                    Some(_) => report.skipped += 1,
                    None => {
                        if file_name.to_string_lossy().ends_with(PROTO_SUFFIX) {
                            tracing::warn!(
                                path = %entry.path().display(),
                                "skipping proto file with a non UTF-8 name"
                            );
                        }
                        report.skipped += 1;
                    }
                }
            }
            // Reversed so subdirectories are visited in name order.
            pending.extend(subdirs.into_iter().rev());
        }

        tracing::info!(
            language = %self.language,
            built = report.built.len(),
            skipped = report.skipped,
            directories = report.directories,
            "walk complete"
        );
        Ok(report)
    }
}

/// Compile every `.proto` file under `input` into the mirrored `output`
/// tree. The language is checked before anything on disk is touched.
pub async fn walk<C: ProtoCompiler>(
    input: &Path,
    output: &Path,
    language: &str,
    compiler: C,
) -> Result<WalkReport, BuildError> {
    let language = TargetLanguage::parse(language)?;
    Dispatcher::new(compiler, language).walk(input, output).await
}
