//! # pandoc-convert
//!
//! Convert documents between formats by driving [Pandoc](https://pandoc.org).
//!
//! ## What this crate does (and does not)
//!
//! Pandoc does all the real work: parsing, the document model, writing.
//! This crate is the thin layer in front of it that people keep rewriting in
//! shell scripts: guess formats from file extensions, refuse conversions
//! that cannot work, translate a few friendly flags into Pandoc's command
//! line, run it, and check that the promised file actually appeared.
//!
//! ## Pipeline Overview
//!
//! ```text
//! request
//!  │
//!  ├─ 1. Probe     is Pandoc on PATH? which version?
//!  ├─ 2. Input     file exists, format from --from or extension
//!  ├─ 3. Target    output path/format, synthesised from --to if needed
//!  ├─ 4. Validate  static rule table (input-only targets, tabular → slides)
//!  ├─ 5. Renderer  PDF needs pdflatex / xelatex / lualatex
//!  ├─ 6. Command   deterministic argv, input last
//!  └─ 7. Execute   run once, then verify the output file exists
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pandoc_convert::{convert_sync, ConversionRequest, ConverterConfig};
//!
//! let request = ConversionRequest::builder("report.md")
//!     .output("report.docx")
//!     .toc(true)
//!     .build();
//! match convert_sync(&request, &ConverterConfig::default()) {
//!     Ok(out) => println!("{}", out.message()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pandoc-convert` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod args;
pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod formats;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod request;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConverterConfig, ConverterConfigBuilder};
pub use convert::{check_engine, convert, convert_sync, run_conversion};
pub use engine::{EngineProbe, EngineRunner, ProcessOutput, SystemRunner};
pub use error::{ConvertError, FailureKind};
pub use formats::{detect_format, format_listing, INPUT_FORMATS, OUTPUT_FORMATS};
pub use output::{ConversionOutput, ConversionResult};
pub use pipeline::command::{build_command, ConversionPlan, EngineArg, EngineCommand};
pub use pipeline::validate::{validate_conversion, ConversionPair, Verdict};
pub use progress::{ConversionProgressCallback, ProgressCallback};
pub use request::{ConversionRequest, ConversionRequestBuilder, PassthroughArg};
