//! The conversion request: what the caller asked for, before any resolution.
//!
//! A [`ConversionRequest`] is built once per invocation and only ever
//! borrowed by the orchestrator. Everything derived from it (detected
//! formats, the synthesised output path, the chosen PDF renderer) lives in
//! the pipeline stages, never back in the request.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// An engine argument the converter does not interpret.
///
/// Kept verbatim and appended after every recognised flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PassthroughArg(String);

impl PassthroughArg {
    pub fn new(arg: impl Into<String>) -> Self {
        Self(arg.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PassthroughArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PassthroughArg {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PassthroughArg {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A single document conversion as requested by the caller.
///
/// # Example
/// ```rust
/// use pandoc_convert::ConversionRequest;
///
/// let request = ConversionRequest::builder("report.md")
///     .output("report.docx")
///     .toc(true)
///     .passthrough(["--number-sections"])
///     .build();
/// assert_eq!(request.output.as_deref(), Some(std::path::Path::new("report.docx")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRequest {
    /// Document to convert.
    pub input: PathBuf,
    /// Where to write the result. Synthesised from `to` when absent.
    pub output: Option<PathBuf>,
    /// Explicit input format; detected from the input extension when absent.
    pub from: Option<String>,
    /// Explicit output format; detected from the output extension when absent.
    pub to: Option<String>,
    /// Ask for a complete document. Some output extensions force this on.
    pub standalone: bool,
    /// Include a table of contents.
    pub toc: bool,
    /// Renderer for PDF output. Probed from the LaTeX candidates when absent.
    pub pdf_engine: Option<String>,
    /// Arguments forwarded to the engine untouched.
    pub passthrough: Vec<PassthroughArg>,
}

impl ConversionRequest {
    /// Start a request for `input`.
    pub fn builder(input: impl Into<PathBuf>) -> ConversionRequestBuilder {
        ConversionRequestBuilder {
            request: ConversionRequest {
                input: input.into(),
                output: None,
                from: None,
                to: None,
                standalone: false,
                toc: false,
                pdf_engine: None,
                passthrough: Vec::new(),
            },
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }
}

/// Builder for [`ConversionRequest`].
#[derive(Debug)]
pub struct ConversionRequestBuilder {
    request: ConversionRequest,
}

impl ConversionRequestBuilder {
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.request.output = Some(path.into());
        self
    }

    pub fn from_format(mut self, format: impl Into<String>) -> Self {
        self.request.from = Some(format.into());
        self
    }

    pub fn to_format(mut self, format: impl Into<String>) -> Self {
        self.request.to = Some(format.into());
        self
    }

    pub fn standalone(mut self, v: bool) -> Self {
        self.request.standalone = v;
        self
    }

    pub fn toc(mut self, v: bool) -> Self {
        self.request.toc = v;
        self
    }

    pub fn pdf_engine(mut self, engine: impl Into<String>) -> Self {
        self.request.pdf_engine = Some(engine.into());
        self
    }

    pub fn passthrough<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<PassthroughArg>,
    {
        self.request
            .passthrough
            .extend(args.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> ConversionRequest {
        self.request
    }
}
