//! What a conversion hands back.
//!
//! [`ConversionOutput`] is the detailed success value of
//! [`crate::convert::convert`]. [`ConversionResult`] flattens success and
//! failure into the `{success, message, output_path}` shape the CLI prints
//! and serialises.

use crate::error::{ConvertError, FailureKind};
use serde::Serialize;
use std::path::PathBuf;

/// Details of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionOutput {
    /// The file the engine wrote (verified to exist).
    pub output_path: PathBuf,
    pub input_format: String,
    pub output_format: String,
    /// Renderer passed as `--pdf-engine`, if any.
    pub pdf_engine: Option<String>,
    /// Engine argv, program excluded.
    pub command: Vec<String>,
    /// Version line reported by the engine.
    pub engine_version: Option<String>,
    /// Whatever the engine printed on stderr; Pandoc uses it for warnings.
    pub engine_stderr: String,
    pub duration_ms: u64,
}

impl ConversionOutput {
    pub fn message(&self) -> String {
        format!("Successfully converted to {}", self.output_path.display())
    }
}

/// Outcome of one request, success or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub success: bool,
    pub message: String,
    pub output_path: Option<PathBuf>,
    /// Set only when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl ConversionResult {
    pub fn from_outcome(outcome: &Result<ConversionOutput, ConvertError>) -> Self {
        match outcome {
            Ok(output) => Self {
                success: true,
                message: output.message(),
                output_path: Some(output.output_path.clone()),
                failure: None,
            },
            Err(e) => Self {
                success: false,
                message: e.to_string(),
                output_path: None,
                failure: Some(e.kind()),
            },
        }
    }
}

impl From<Result<ConversionOutput, ConvertError>> for ConversionResult {
    fn from(outcome: Result<ConversionOutput, ConvertError>) -> Self {
        Self::from_outcome(&outcome)
    }
}
