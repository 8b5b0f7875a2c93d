//! Progress-callback trait for conversion milestones.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConverterConfigBuilder::progress_callback`] to hear about
//! the few things that take noticeable time: probing the engine, picking a
//! PDF renderer, and waiting for the engine to finish.
//!
//! # Example
//!
//! ```rust
//! use pandoc_convert::{ConversionProgressCallback, ConverterConfig, EngineCommand};
//! use std::sync::Arc;
//!
//! struct Echo;
//!
//! impl ConversionProgressCallback for Echo {
//!     fn on_engine_start(&self, command: &EngineCommand) {
//!         eprintln!("running {}", command.display());
//!     }
//! }
//!
//! let config = ConverterConfig::builder()
//!     .progress_callback(Arc::new(Echo) as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::engine::EngineProbe;
use crate::pipeline::command::EngineCommand;
use std::sync::Arc;
use std::time::Duration;

/// Called by the orchestrator as a conversion advances.
///
/// All methods default to no-ops.
pub trait ConversionProgressCallback: Send + Sync {
    /// The engine probe finished (installed or not).
    fn on_engine_detected(&self, probe: &EngineProbe) {
        let _ = probe;
    }

    /// A PDF renderer was picked from the candidate list.
    fn on_renderer_selected(&self, renderer: &str) {
        let _ = renderer;
    }

    /// The conversion subprocess is about to start.
    fn on_engine_start(&self, command: &EngineCommand) {
        let _ = command;
    }

    /// The conversion subprocess exited, or was killed on timeout
    /// (`exit_code == None`).
    fn on_engine_complete(&self, exit_code: Option<i32>, elapsed: Duration) {
        let _ = (exit_code, elapsed);
    }
}

/// Shared callback handle stored in [`crate::config::ConverterConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
