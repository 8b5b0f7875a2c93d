//! Orchestrator integration tests.
//!
//! These drive `convert` end to end with a scripted `EngineRunner`, so they
//! need neither Pandoc nor LaTeX. The fake runner records every process it
//! is asked to start; a conversion that must be rejected before Pandoc runs
//! is checked by looking at what was recorded.

use futures::future::BoxFuture;
use pandoc_convert::{
    check_engine, convert, convert_sync, run_conversion, ConversionProgressCallback,
    ConversionRequest, ConvertError, ConverterConfig, EngineCommand, EngineProbe, EngineRunner,
    FailureKind, ProcessOutput,
};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Runner that pretends `installed` programs are on PATH.
struct FakeRunner {
    installed: Vec<&'static str>,
    exit_code: i32,
    stderr: String,
    /// Create the `-o` file when a conversion runs.
    write_output: bool,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeRunner {
    fn with_pandoc() -> Self {
        Self {
            installed: vec!["pandoc"],
            exit_code: 0,
            stderr: String::new(),
            write_output: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn without_pandoc() -> Self {
        Self {
            installed: Vec::new(),
            ..Self::with_pandoc()
        }
    }

    fn also_installed(mut self, program: &'static str) -> Self {
        self.installed.push(program);
        self
    }

    fn all_calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than the `--version` probe.
    fn conversion_calls(&self) -> Vec<Vec<String>> {
        self.all_calls()
            .into_iter()
            .filter(|c| c.get(1).map(String::as_str) != Some("--version"))
            .collect()
    }
}

impl EngineRunner for FakeRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.installed
            .contains(&program)
            .then(|| PathBuf::from("/fake/bin").join(program))
    }

    fn run<'a>(
        &'a self,
        program: &'a Path,
        args: &'a [OsString],
    ) -> BoxFuture<'a, std::io::Result<ProcessOutput>> {
        let argv: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        let mut call = vec![program.display().to_string()];
        call.extend(argv.iter().cloned());
        self.calls.lock().unwrap().push(call);

        let output = if argv == ["--version"] {
            ProcessOutput {
                exit_code: Some(0),
                stdout: "pandoc 3.1.9\nFeatures: +server +lua\n".into(),
                stderr: String::new(),
            }
        } else {
            if self.write_output && self.exit_code == 0 {
                if let Some(i) = argv.iter().position(|a| a == "-o") {
                    std::fs::write(&argv[i + 1], b"converted").unwrap();
                }
            }
            ProcessOutput {
                exit_code: Some(self.exit_code),
                stdout: String::new(),
                stderr: self.stderr.clone(),
            }
        };
        Box::pin(async move { Ok(output) })
    }
}

fn config_with(runner: &Arc<FakeRunner>) -> ConverterConfig {
    ConverterConfig::builder()
        .runner(runner.clone() as Arc<dyn EngineRunner>)
        .build()
        .unwrap()
}

/// Temp dir holding `name` with some content.
fn workspace_with(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, "# Title\n\nBody text.\n").unwrap();
    (dir, path)
}

fn s(p: &Path) -> String {
    p.display().to_string()
}

// ── Pre-flight failures ──────────────────────────────────────────────────────

#[tokio::test]
async fn engine_absent_fails_with_guidance() {
    let (_dir, input) = workspace_with("report.md");
    let runner = Arc::new(FakeRunner::without_pandoc());
    let request = ConversionRequest::builder(&input).output(input.with_extension("docx")).build();

    let err = convert(&request, &config_with(&runner)).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::EngineNotInstalled);
    let msg = err.to_string();
    assert!(msg.starts_with("Pandoc is not installed."), "got: {msg}");
    assert!(msg.contains("brew install pandoc"));
    assert!(runner.all_calls().is_empty());
}

#[tokio::test]
async fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Arc::new(FakeRunner::with_pandoc());
    let request = ConversionRequest::builder(dir.path().join("nope.md"))
        .to_format("html")
        .build();

    let err = convert(&request, &config_with(&runner)).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::InputNotFound);
    assert!(err.to_string().starts_with("Input file not found:"));
    assert!(runner.conversion_calls().is_empty());
}

#[tokio::test]
async fn unknown_input_extension_fails() {
    let (_dir, input) = workspace_with("notes.txt");
    let runner = Arc::new(FakeRunner::with_pandoc());
    let request = ConversionRequest::builder(&input).to_format("html").build();

    let err = convert(&request, &config_with(&runner)).await.unwrap_err();

    assert!(matches!(err, ConvertError::InputFormatUndetectable { .. }));
    assert!(runner.conversion_calls().is_empty());
}

#[tokio::test]
async fn neither_output_nor_format_fails() {
    let (_dir, input) = workspace_with("report.md");
    let runner = Arc::new(FakeRunner::with_pandoc());
    let request = ConversionRequest::builder(&input).build();

    let err = convert(&request, &config_with(&runner)).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::UnspecifiedTarget);
    assert_eq!(err.to_string(), "Must specify either output file or --to format");
}

#[tokio::test]
async fn input_only_output_extension_fails() {
    let (_dir, input) = workspace_with("report.md");
    let runner = Arc::new(FakeRunner::with_pandoc());

    // Without --to the output registry does not know .csv at all.
    let request = ConversionRequest::builder(&input)
        .output(input.with_extension("csv"))
        .build();
    let err = convert(&request, &config_with(&runner)).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::FormatUndetectable);

    // With --to the validator rejects the input-only target.
    let request = ConversionRequest::builder(&input)
        .output(input.with_extension("csv"))
        .to_format("csv")
        .build();
    let err = convert(&request, &config_with(&runner)).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::UnsupportedConversion);
    assert_eq!(err.to_string(), "Cannot convert TO .csv - it's an input-only format");

    assert!(runner.conversion_calls().is_empty());
}

#[tokio::test]
async fn tabular_to_slides_rejected_before_spawning() {
    let (_dir, input) = workspace_with("data.csv");
    let runner = Arc::new(FakeRunner::with_pandoc());
    let request = ConversionRequest::builder(&input).to_format("pptx").build();

    let err = convert(&request, &config_with(&runner)).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::UnsupportedConversion);
    assert_eq!(
        err.to_string(),
        "Converting tabular data (.csv) to .pptx is not supported"
    );
    assert!(runner.conversion_calls().is_empty());
}

#[tokio::test]
async fn pdf_without_latex_is_renderer_unavailable() {
    let (_dir, input) = workspace_with("doc.md");
    let runner = Arc::new(FakeRunner::with_pandoc());
    let request = ConversionRequest::builder(&input)
        .output(input.with_extension("pdf"))
        .build();

    let err = convert(&request, &config_with(&runner)).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::RendererUnavailable);
    assert!(err.to_string().contains("texlive-xetex"));
    // Only the engine probe ran.
    let calls = runner.all_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][1], "--version");
}

// ── Engine outcomes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn markdown_to_docx_succeeds() {
    let (_dir, input) = workspace_with("report.md");
    let output = input.with_extension("docx");
    let runner = Arc::new(FakeRunner::with_pandoc());
    let request = ConversionRequest::builder(&input).output(&output).build();

    let out = convert(&request, &config_with(&runner)).await.unwrap();

    assert_eq!(out.input_format, "markdown");
    assert_eq!(out.output_format, "docx");
    assert_eq!(out.output_path, output);
    assert_eq!(out.engine_version.as_deref(), Some("pandoc 3.1.9"));
    assert!(output.exists());

    let calls = runner.conversion_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        [
            "/fake/bin/pandoc".to_string(),
            "-f".into(),
            "markdown".into(),
            "-t".into(),
            "docx".into(),
            "-o".into(),
            s(&output),
            s(&input),
        ]
    );
    assert!(!calls[0].contains(&"-s".to_string()));
    assert_eq!(out.command, calls[0][1..]);
}

#[tokio::test]
async fn pdf_uses_first_available_latex_engine() {
    let (_dir, input) = workspace_with("doc.md");
    let runner = Arc::new(FakeRunner::with_pandoc().also_installed("lualatex").also_installed("xelatex"));
    let request = ConversionRequest::builder(&input).to_format("pdf").toc(true).build();

    let out = convert(&request, &config_with(&runner)).await.unwrap();

    assert_eq!(out.pdf_engine.as_deref(), Some("xelatex"));
    assert_eq!(out.output_path, input.with_extension("pdf"));
    let call = &runner.conversion_calls()[0];
    let tail: Vec<&str> = call[call.len() - 5..].iter().map(String::as_str).collect();
    assert_eq!(tail[..4], ["-s", "--toc", "--pdf-engine", "xelatex"]);
    assert_eq!(call.last(), Some(&s(&input)));
}

#[tokio::test]
async fn bare_format_synthesises_canonical_output() {
    let (_dir, input) = workspace_with("guide.docx");
    let runner = Arc::new(FakeRunner::with_pandoc());
    let request = ConversionRequest::builder(&input).to_format("markdown").build();

    let out = convert(&request, &config_with(&runner)).await.unwrap();

    assert_eq!(out.output_path, input.with_extension("md"));
    assert!(out.output_path.exists());
}

#[tokio::test]
async fn passthrough_goes_after_flags_and_before_input() {
    let (_dir, input) = workspace_with("notes.md");
    let output = input.with_extension("html");
    let runner = Arc::new(FakeRunner::with_pandoc());
    let request = ConversionRequest::builder(&input)
        .output(&output)
        .passthrough(["--metadata", "title=Notes", "--number-sections"])
        .build();

    convert(&request, &config_with(&runner)).await.unwrap();

    let call = &runner.conversion_calls()[0];
    let n = call.len();
    assert_eq!(call[n - 5], "-s", "html forces standalone");
    assert_eq!(call[n - 4..n - 1], ["--metadata", "title=Notes", "--number-sections"]);
    assert_eq!(call[n - 1], s(&input));
}

#[tokio::test]
async fn non_zero_exit_reports_stderr() {
    let (_dir, input) = workspace_with("report.md");
    let runner = Arc::new(FakeRunner {
        exit_code: 64,
        stderr: "pandoc: Unknown input format fancy\n".into(),
        ..FakeRunner::with_pandoc()
    });
    let request = ConversionRequest::builder(&input).output(input.with_extension("rtf")).build();

    let err = convert(&request, &config_with(&runner)).await.unwrap_err();

    match err {
        ConvertError::EngineExecutionFailed { exit_code, ref diagnostics } => {
            assert_eq!(exit_code, Some(64));
            assert_eq!(diagnostics, "pandoc: Unknown input format fancy");
        }
        ref other => panic!("unexpected {other:?}"),
    }
    assert!(err.to_string().starts_with("Pandoc conversion failed:\n"));
}

#[tokio::test]
async fn zero_exit_without_artifact_is_output_not_produced() {
    let (_dir, input) = workspace_with("report.md");
    let runner = Arc::new(FakeRunner {
        write_output: false,
        ..FakeRunner::with_pandoc()
    });
    let request = ConversionRequest::builder(&input).output(input.with_extension("docx")).build();

    let err = convert(&request, &config_with(&runner)).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::OutputNotProduced);
    assert_eq!(runner.conversion_calls().len(), 1);
}

#[tokio::test]
async fn engine_warnings_are_kept_on_success() {
    let (_dir, input) = workspace_with("report.md");
    let runner = Arc::new(FakeRunner {
        stderr: "[WARNING] Could not fetch resource logo.png\n".into(),
        ..FakeRunner::with_pandoc()
    });
    let request = ConversionRequest::builder(&input).output(input.with_extension("docx")).build();

    let out = convert(&request, &config_with(&runner)).await.unwrap();
    assert!(out.engine_stderr.contains("logo.png"));
}

// ── Entry points & callbacks ─────────────────────────────────────────────────

#[tokio::test]
async fn run_conversion_flattens_result() {
    let (_dir, input) = workspace_with("report.md");
    let output = input.with_extension("docx");
    let runner = Arc::new(FakeRunner::with_pandoc());
    let request = ConversionRequest::builder(&input).output(&output).build();

    let result = run_conversion(&request, &config_with(&runner)).await;

    assert!(result.success);
    assert_eq!(result.output_path.as_deref(), Some(output.as_path()));
    assert_eq!(result.message, format!("Successfully converted to {}", output.display()));

    let failed = run_conversion(&ConversionRequest::builder(&input).build(), &config_with(&runner)).await;
    assert!(!failed.success);
    assert_eq!(failed.failure, Some(FailureKind::UnspecifiedTarget));
}

#[test]
fn convert_sync_runs_without_an_outer_runtime() {
    let (_dir, input) = workspace_with("report.md");
    let runner = Arc::new(FakeRunner::with_pandoc());
    let request = ConversionRequest::builder(&input).to_format("html").build();

    let out = convert_sync(&request, &config_with(&runner)).unwrap();
    assert_eq!(out.output_path, input.with_extension("html"));
}

#[tokio::test]
async fn check_engine_reports_presence() {
    let present = Arc::new(FakeRunner::with_pandoc());
    let probe = check_engine(&config_with(&present)).await;
    assert_eq!(probe.path, Some(PathBuf::from("/fake/bin/pandoc")));
    assert_eq!(probe.version_number().as_deref(), Some("3.1.9"));

    let absent = Arc::new(FakeRunner::without_pandoc());
    let probe = check_engine(&config_with(&absent)).await;
    assert!(!probe.is_installed());
    assert!(probe.version.is_none());
}

#[derive(Default)]
struct RecordingCallback {
    events: Mutex<Vec<String>>,
}

impl ConversionProgressCallback for RecordingCallback {
    fn on_engine_detected(&self, probe: &EngineProbe) {
        self.events
            .lock()
            .unwrap()
            .push(format!("detected:{}", probe.is_installed()));
    }

    fn on_renderer_selected(&self, renderer: &str) {
        self.events.lock().unwrap().push(format!("renderer:{renderer}"));
    }

    fn on_engine_start(&self, _command: &EngineCommand) {
        self.events.lock().unwrap().push("start".into());
    }

    fn on_engine_complete(&self, exit_code: Option<i32>, _elapsed: Duration) {
        self.events
            .lock()
            .unwrap()
            .push(format!("complete:{exit_code:?}"));
    }
}

#[tokio::test]
async fn progress_callback_sees_each_milestone() {
    let (_dir, input) = workspace_with("doc.md");
    let runner = Arc::new(FakeRunner::with_pandoc().also_installed("pdflatex"));
    let cb = Arc::new(RecordingCallback::default());
    let config = ConverterConfig::builder()
        .runner(runner.clone() as Arc<dyn EngineRunner>)
        .progress_callback(cb.clone() as Arc<dyn ConversionProgressCallback>)
        .build()
        .unwrap();
    let request = ConversionRequest::builder(&input).output(input.with_extension("pdf")).build();

    convert(&request, &config).await.unwrap();

    assert_eq!(
        *cb.events.lock().unwrap(),
        ["detected:true", "renderer:pdflatex", "start", "complete:Some(0)"]
    );
}
