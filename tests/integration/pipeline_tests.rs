use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use protoport_build::{BuildError, BuildTask, Dispatcher, ProtoCompiler};
use protoport_core::{CoreError, ScratchDir, TargetLanguage};
use protoport_github::{ContentEntry, ContentsSource, GithubError, Materializer};

/// In-memory repository: directory listings keyed by remote path, file
/// bytes keyed by content url.
#[derive(Default)]
struct FakeRepo {
    listings: HashMap<String, Vec<ContentEntry>>,
    blobs: HashMap<String, Vec<u8>>,
}

impl FakeRepo {
    fn dir(mut self, path: &str, entries: Vec<ContentEntry>) -> Self {
        self.listings.insert(path.to_string(), entries);
        self
    }

    fn file(mut self, path: &str, body: &str) -> (Self, ContentEntry) {
        let url = format!("https://api.example.test/blobs/{path}");
        self.blobs.insert(url.clone(), body.as_bytes().to_vec());
        (self, ContentEntry::file(path, &url))
    }
}

#[async_trait]
impl ContentsSource for FakeRepo {
    async fn list(&self, path: &str) -> Result<Vec<ContentEntry>, GithubError> {
        self.listings
            .get(path)
            .cloned()
            .ok_or_else(|| GithubError::Status {
                url: format!("https://api.example.test/contents/{path}"),
                status: 404,
                body: "Not Found".to_string(),
            })
    }

    async fn fetch_raw(&self, entry: &ContentEntry) -> Result<Vec<u8>, GithubError> {
        let url = entry
            .content_url()
            .ok_or_else(|| GithubError::MissingUrl(entry.path.clone()))?;
        self.blobs
            .get(url)
            .cloned()
            .ok_or_else(|| GithubError::MissingUrl(entry.path.clone()))
    }
}

#[derive(Default)]
struct RecordingCompiler {
    tasks: Mutex<Vec<BuildTask>>,
    fail_on: Option<&'static str>,
}

impl RecordingCompiler {
    fn names(&self) -> Vec<String> {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.file_name.clone())
            .collect()
    }
}

#[async_trait]
impl ProtoCompiler for RecordingCompiler {
    async fn compile(&self, task: &BuildTask) -> Result<(), BuildError> {
        self.tasks.lock().unwrap().push(task.clone());
        if self.fail_on == Some(task.file_name.as_str()) {
            return Err(BuildError::CompilerFailed {
                file: task.proto_file(),
                code: Some(1),
            });
        }
        Ok(())
    }
}

/// Remote layout: `a.proto`, `sub/b.proto`, `sub/readme.md`.
fn sample_repo() -> FakeRepo {
    let repo = FakeRepo::default();
    let (repo, a) = repo.file("a.proto", "syntax = \"proto3\";\npackage a;\n");
    let (repo, b) = repo.file("sub/b.proto", "syntax = \"proto3\";\npackage b;\n");
    let (repo, readme) = repo.file("sub/readme.md", "# docs\n");
    repo.dir("", vec![a, ContentEntry::dir("sub")])
        .dir("sub", vec![b, readme])
}

#[tokio::test]
async fn remote_tree_builds_into_mirrored_output() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("out");
    let scratch = ScratchDir::prepare(&tmp.path().join("scratch")).unwrap();

    let materialized = Materializer::new(sample_repo())
        .materialize("", &scratch)
        .await
        .unwrap();

    let root = scratch.root();
    assert_eq!(
        std::fs::read_to_string(root.join("a.proto")).unwrap(),
        "syntax = \"proto3\";\npackage a;\n"
    );
    assert!(root.join("sub").join("b.proto").is_file());
    assert!(!root.join("sub").join("readme.md").exists());
    assert_eq!(materialized.files.len(), 2);

    let dispatcher = Dispatcher::new(RecordingCompiler::default(), TargetLanguage::Go);
    let report = dispatcher.walk(&materialized.root, &output).await.unwrap();

    assert_eq!(dispatcher.compiler().names(), vec!["a.proto", "b.proto"]);
    assert_eq!(report.built.len(), 2);
    assert!(output.join("sub").is_dir());

    let tasks = dispatcher.compiler().tasks.lock().unwrap().clone();
    assert_eq!(tasks[0].proto_dir, root);
    assert_eq!(tasks[0].output_dir, output);
    assert_eq!(tasks[1].proto_dir, root.join("sub"));
    assert_eq!(tasks[1].output_dir, output.join("sub"));
}

#[tokio::test]
async fn subpath_becomes_the_scratch_root() {
    let tmp = tempfile::tempdir().unwrap();
    let scratch = ScratchDir::temporary().unwrap();

    let materialized = Materializer::new(sample_repo())
        .materialize("sub", &scratch)
        .await
        .unwrap();
    assert!(scratch.root().join("b.proto").is_file());
    assert!(!scratch.root().join("a.proto").exists());

    let dispatcher = Dispatcher::new(RecordingCompiler::default(), TargetLanguage::Python);
    dispatcher
        .walk(&materialized.root, &tmp.path().join("out"))
        .await
        .unwrap();
    assert_eq!(dispatcher.compiler().names(), vec!["b.proto"]);
}

#[tokio::test]
async fn stale_scratch_files_never_reach_the_compiler() {
    let tmp = tempfile::tempdir().unwrap();
    let scratch_path = tmp.path().join("scratch");
    std::fs::create_dir_all(scratch_path.join("old")).unwrap();
    std::fs::write(scratch_path.join("old").join("gone.proto"), b"x").unwrap();

    // Reusing a dirty directory without preparing it is refused.
    let dirty = ScratchDir::prepare(&tmp.path().join("other")).unwrap();
    std::fs::write(dirty.root().join("left.proto"), b"x").unwrap();
    let err = Materializer::new(sample_repo())
        .materialize("", &dirty)
        .await
        .unwrap_err();
    assert!(matches!(err, GithubError::ScratchNotEmpty(_)));

    let scratch = ScratchDir::prepare(&scratch_path).unwrap();
    assert!(scratch.is_empty().unwrap());
    let materialized = Materializer::new(sample_repo())
        .materialize("", &scratch)
        .await
        .unwrap();

    let dispatcher = Dispatcher::new(RecordingCompiler::default(), TargetLanguage::Java);
    dispatcher
        .walk(&materialized.root, &tmp.path().join("out"))
        .await
        .unwrap();
    assert_eq!(dispatcher.compiler().names(), vec!["a.proto", "b.proto"]);
}

#[tokio::test]
async fn unsupported_language_invokes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in");
    std::fs::create_dir_all(&input).unwrap();
    std::fs::write(input.join("a.proto"), b"syntax = \"proto3\";").unwrap();
    let output = tmp.path().join("out");

    let compiler = RecordingCompiler::default();
    let err = protoport_build::walk(&input, &output, "cobol", &compiler)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BuildError::Core(CoreError::LanguageNotSupported(ref lang)) if lang == "cobol"
    ));
    assert!(compiler.names().is_empty());
    assert!(!output.exists());
}

#[tokio::test]
async fn first_failure_stops_the_pipeline() {
    let tmp = tempfile::tempdir().unwrap();
    let scratch = ScratchDir::temporary().unwrap();
    let materialized = Materializer::new(sample_repo())
        .materialize("", &scratch)
        .await
        .unwrap();

    let compiler = RecordingCompiler {
        fail_on: Some("a.proto"),
        ..RecordingCompiler::default()
    };
    let dispatcher = Dispatcher::new(compiler, TargetLanguage::Kotlin);
    let err = dispatcher
        .walk(&materialized.root, &tmp.path().join("out"))
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::CompilerFailed { code: Some(1), .. }));
    assert_eq!(
        err.to_string(),
        format!(
            "error building proto file {}",
            materialized.root.join("a.proto").display()
        )
    );
    assert_eq!(dispatcher.compiler().names(), vec!["a.proto"]);
}

#[tokio::test]
async fn missing_remote_directory_aborts_materialization() {
    let scratch = ScratchDir::temporary().unwrap();
    let err = Materializer::new(sample_repo())
        .materialize("does/not/exist", &scratch)
        .await
        .unwrap_err();
    assert!(matches!(err, GithubError::Status { status: 404, .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn shell_compiler_writes_generated_files() {
    use protoport_build::ProtocCompiler;

    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("out");
    let scratch = ScratchDir::temporary().unwrap();
    let materialized = Materializer::new(sample_repo())
        .materialize("", &scratch)
        .await
        .unwrap();

    // Stand-in for protoc: `--python_out=<dir>` comes first, the proto file last.
    let script = r#"out="${1#*=}"; for last; do :; done; touch "$out/$(basename "$last" .proto)_pb2.py""#;
    let compiler = ProtocCompiler::from_command(&[
        "sh".to_string(),
        "-c".to_string(),
        script.to_string(),
        "protoc".to_string(),
    ])
    .unwrap();

    protoport_build::walk(&materialized.root, &output, "python", compiler)
        .await
        .unwrap();

    assert!(output.join("a_pb2.py").is_file());
    assert!(output.join("sub").join("b_pb2.py").is_file());
}

#[test]
fn materializer_and_dispatcher_agree_on_proto_files() {
    for name in ["a.proto", "nested.v1.proto", "readme.md", "a.proto.bak"] {
        let entry = ContentEntry::file(&format!("dir/{name}"), "https://x");
        assert_eq!(entry.is_proto_file(), protoport_core::is_proto_file(name));
    }
}
