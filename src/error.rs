//! Error types for the pandoc-convert library.
//!
//! Every way a conversion can end badly is a variant of [`ConvertError`].
//! None of them abort the process: the orchestrator returns them as
//! `Err(ConvertError)` and the caller turns them into a
//! [`crate::output::ConversionResult`] with `success == false`.
//!
//! [`FailureKind`] is the payload-free discriminant, suitable for JSON output
//! and for matching in tests without caring about the message text.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// All failures returned by the conversion orchestrator.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Engine errors ─────────────────────────────────────────────────────
    /// The conversion engine is not on the search path.
    #[error("{engine} is not installed.\n{guidance}")]
    EngineNotInstalled { engine: String, guidance: String },

    /// The engine was found but could not be started.
    #[error("Error running {engine:?}: {source}")]
    EngineLaunchFailed {
        engine: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine exited with a non-zero status (or was killed on timeout).
    #[error("Pandoc conversion failed:\n{diagnostics}")]
    EngineExecutionFailed {
        exit_code: Option<i32>,
        diagnostics: String,
    },

    /// The engine reported success but the declared output file is missing.
    #[error("Conversion completed but output file was not created: '{path}'")]
    OutputNotProduced { path: PathBuf },

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// No `--from` and the input extension is not in the input registry.
    #[error("Could not detect input format for: {path}")]
    InputFormatUndetectable { path: PathBuf },

    // ── Target errors ─────────────────────────────────────────────────────
    /// No `--to` and the output extension is not in the output registry.
    #[error("Could not detect output format for: {path}")]
    OutputFormatUndetectable { path: PathBuf },

    /// Neither an output path nor an output format was given.
    #[error("Must specify either output file or --to format")]
    UnspecifiedTarget,

    /// A validator rule rejected the input/output pairing.
    #[error("{reason}")]
    UnsupportedConversion { reason: String },

    /// PDF output was requested and no LaTeX renderer is available.
    #[error("{guidance}")]
    RendererUnavailable {
        candidates: Vec<String>,
        guidance: String,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Which failure class a [`ConvertError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    EngineNotInstalled,
    EngineLaunchFailed,
    EngineExecutionFailed,
    OutputNotProduced,
    InputNotFound,
    FormatUndetectable,
    UnspecifiedTarget,
    UnsupportedConversion,
    RendererUnavailable,
    InvalidConfig,
    Internal,
}

impl ConvertError {
    /// The failure class, ignoring the payload.
    pub fn kind(&self) -> FailureKind {
        match self {
            ConvertError::EngineNotInstalled { .. } => FailureKind::EngineNotInstalled,
            ConvertError::EngineLaunchFailed { .. } => FailureKind::EngineLaunchFailed,
            ConvertError::EngineExecutionFailed { .. } => FailureKind::EngineExecutionFailed,
            ConvertError::OutputNotProduced { .. } => FailureKind::OutputNotProduced,
            ConvertError::InputNotFound { .. } => FailureKind::InputNotFound,
            ConvertError::InputFormatUndetectable { .. }
            | ConvertError::OutputFormatUndetectable { .. } => FailureKind::FormatUndetectable,
            ConvertError::UnspecifiedTarget => FailureKind::UnspecifiedTarget,
            ConvertError::UnsupportedConversion { .. } => FailureKind::UnsupportedConversion,
            ConvertError::RendererUnavailable { .. } => FailureKind::RendererUnavailable,
            ConvertError::InvalidConfig(_) => FailureKind::InvalidConfig,
            ConvertError::Internal(_) => FailureKind::Internal,
        }
    }
}
