//! The boundary to the outside world: locating and running executables.
//!
//! The orchestrator never touches `PATH` or spawns a process directly. It
//! goes through an [`EngineRunner`], which makes every pipeline stage
//! testable with a scripted runner and keeps process state out of globals.
//! [`SystemRunner`] is the real implementation.

use futures::future::BoxFuture;
use serde::Serialize;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tracing::debug;

/// Captured result of one finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Locates programs and runs them to completion.
///
/// `Send + Sync` so a runner can be shared through the config.
pub trait EngineRunner: Send + Sync {
    /// Absolute path of `program`, or `None` if it is not installed.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run `program` with `args`, capturing stdout and stderr.
    ///
    /// Dropping the returned future must stop the child process.
    fn run<'a>(
        &'a self,
        program: &'a Path,
        args: &'a [OsString],
    ) -> BoxFuture<'a, io::Result<ProcessOutput>>;
}

/// Runner backed by the real search path and `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl EngineRunner for SystemRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        engine_locate::find_executable(program)
    }

    fn run<'a>(
        &'a self,
        program: &'a Path,
        args: &'a [OsString],
    ) -> BoxFuture<'a, io::Result<ProcessOutput>> {
        Box::pin(async move {
            let output = tokio::process::Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output()
                .await?;
            Ok(ProcessOutput {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        })
    }
}

/// Whether the engine is installed, and which version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineProbe {
    pub path: Option<PathBuf>,
    /// First line of `--version`, e.g. `pandoc 3.1.9`.
    pub version: Option<String>,
}

impl EngineProbe {
    pub fn is_installed(&self) -> bool {
        self.path.is_some()
    }

    /// Dotted version number, e.g. `3.1.9`.
    pub fn version_number(&self) -> Option<String> {
        self.version.as_deref().and_then(engine_locate::version_number)
    }
}

/// Locate `program` and ask it for its version.
///
/// A located engine whose version query fails is still reported as present.
pub async fn probe_engine(runner: &dyn EngineRunner, program: &str) -> EngineProbe {
    let Some(path) = runner.locate(program) else {
        debug!("Engine '{}' not found on search path", program);
        return EngineProbe::default();
    };

    let args = [OsString::from("--version")];
    let version = match runner.run(&path, &args).await {
        Ok(out) if out.success() => engine_locate::version_line(&out.stdout),
        Ok(out) => {
            debug!("'{} --version' exited with {:?}", path.display(), out.exit_code);
            None
        }
        Err(e) => {
            debug!("'{} --version' could not run: {}", path.display(), e);
            None
        }
    };

    debug!("Engine at {} reports {:?}", path.display(), version);
    EngineProbe {
        path: Some(path),
        version,
    }
}
