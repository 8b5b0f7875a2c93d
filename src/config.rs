//! Configuration for the conversion orchestrator.
//!
//! [`ConverterConfig`] holds everything that is not part of an individual
//! request: which engine to run, which PDF renderers to probe, an optional
//! subprocess timeout, and the runner/progress hooks. Build it with
//! [`ConverterConfig::builder()`] or take [`ConverterConfig::default()`].

use crate::engine::{EngineRunner, SystemRunner};
use crate::error::ConvertError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Engine looked up when no other program is configured.
pub const DEFAULT_ENGINE: &str = "pandoc";

/// Configuration shared by every conversion.
///
/// # Example
/// ```rust
/// use pandoc_convert::ConverterConfig;
/// use std::time::Duration;
///
/// let config = ConverterConfig::builder()
///     .engine("/opt/pandoc/bin/pandoc")
///     .timeout(Duration::from_secs(120))
///     .build()
///     .unwrap();
/// assert_eq!(config.engine, "/opt/pandoc/bin/pandoc");
/// ```
#[derive(Clone)]
pub struct ConverterConfig {
    /// Engine program name or path. Default: `pandoc`.
    pub engine: String,

    /// PDF renderers probed in order when a PDF target has no explicit
    /// renderer. Default: `pdflatex`, `xelatex`, `lualatex`.
    pub renderer_candidates: Vec<String>,

    /// Upper bound on the conversion subprocess. Default: none.
    ///
    /// Expiry kills the engine and fails like a non-zero exit.
    pub timeout: Option<Duration>,

    /// How programs are located and run. Default: [`SystemRunner`].
    pub runner: Arc<dyn EngineRunner>,

    /// Optional milestone callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            engine: DEFAULT_ENGINE.to_string(),
            renderer_candidates: engine_locate::LATEX_RENDERERS
                .iter()
                .map(|r| r.to_string())
                .collect(),
            timeout: None,
            runner: Arc::new(SystemRunner),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConverterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterConfig")
            .field("engine", &self.engine)
            .field("renderer_candidates", &self.renderer_candidates)
            .field("timeout", &self.timeout)
            .field("runner", &"<dyn EngineRunner>")
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConverterConfig {
    /// Create a new builder for `ConverterConfig`.
    pub fn builder() -> ConverterConfigBuilder {
        ConverterConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConverterConfig`].
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl ConverterConfigBuilder {
    pub fn engine(mut self, program: impl Into<String>) -> Self {
        self.config.engine = program.into();
        self
    }

    pub fn renderer_candidates<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.renderer_candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.config.timeout = secs.map(Duration::from_secs);
        self
    }

    pub fn runner(mut self, runner: Arc<dyn EngineRunner>) -> Self {
        self.config.runner = runner;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConverterConfig, ConvertError> {
        let c = &self.config;
        if c.engine.trim().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "Engine program must not be empty".into(),
            ));
        }
        if c.renderer_candidates.iter().any(|r| r.trim().is_empty()) {
            return Err(ConvertError::InvalidConfig(
                "Renderer candidates must not contain empty names".into(),
            ));
        }
        if c.timeout.is_some_and(|t| t < Duration::from_secs(1)) {
            return Err(ConvertError::InvalidConfig(
                "Timeout must be at least 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}
