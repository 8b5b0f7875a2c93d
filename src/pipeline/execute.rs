//! Engine execution and output verification.
//!
//! The engine runs once, to completion. A non-zero exit and a zero exit
//! without the declared output file are different failures: Pandoc can
//! succeed while writing nothing (for example when a filter swallows the
//! document), and callers need to tell the two apart.

use crate::engine::{EngineRunner, ProcessOutput};
use crate::error::ConvertError;
use crate::pipeline::command::EngineCommand;
use crate::progress::ProgressCallback;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Run `command` and map a non-zero exit (or timeout) to a failure.
pub async fn run_engine(
    command: &EngineCommand,
    runner: &dyn EngineRunner,
    timeout: Option<Duration>,
    progress: Option<&ProgressCallback>,
) -> Result<ProcessOutput, ConvertError> {
    let argv = command.to_os_args();
    info!("Running {}", command.display());
    if let Some(cb) = progress {
        cb.on_engine_start(command);
    }

    let start = Instant::now();
    let run = runner.run(&command.program, &argv);
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, run).await {
            Ok(result) => result,
            Err(_) => {
                if let Some(cb) = progress {
                    cb.on_engine_complete(None, start.elapsed());
                }
                return Err(ConvertError::EngineExecutionFailed {
                    exit_code: None,
                    diagnostics: format!("timed out after {limit:?}"),
                });
            }
        },
        None => run.await,
    };

    let output = result.map_err(|source| ConvertError::EngineLaunchFailed {
        engine: command.program.clone(),
        source,
    })?;
    let elapsed = start.elapsed();
    debug!("Engine exited with {:?} after {}ms", output.exit_code, elapsed.as_millis());
    if let Some(cb) = progress {
        cb.on_engine_complete(output.exit_code, elapsed);
    }

    if !output.success() {
        let diagnostics = match output.stderr.trim() {
            "" => "Unknown error".to_string(),
            text => text.to_string(),
        };
        return Err(ConvertError::EngineExecutionFailed {
            exit_code: output.exit_code,
            diagnostics,
        });
    }

    Ok(output)
}

/// The engine said it succeeded; make sure the file is really there.
pub fn verify_output(path: &Path) -> Result<(), ConvertError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ConvertError::OutputNotProduced {
            path: path.to_path_buf(),
        })
    }
}
