//! Conversion entry points.
//!
//! [`convert`] walks one request through the pipeline stages and stops at
//! the first failure. Nothing is retried and nothing is cleaned up: partial
//! files written by the engine belong to the engine.

use crate::config::{ConverterConfig, DEFAULT_ENGINE};
use crate::engine::{probe_engine, EngineProbe};
use crate::error::ConvertError;
use crate::output::{ConversionOutput, ConversionResult};
use crate::pipeline::command::{build_command, ConversionPlan};
use crate::pipeline::execute::{run_engine, verify_output};
use crate::pipeline::input::resolve_input;
use crate::pipeline::renderer::select_renderer;
use crate::pipeline::target::resolve_target;
use crate::pipeline::validate::{validate_conversion, ConversionPair, Verdict};
use crate::request::ConversionRequest;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert one document with the engine.
///
/// # Errors
/// Every failure class of [`ConvertError`]; the engine is only spawned for
/// the conversion once all pre-flight checks passed.
///
/// # Example
/// ```rust,no_run
/// use pandoc_convert::{convert, ConversionRequest, ConverterConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = ConversionRequest::builder("report.md").output("report.docx").build();
/// let output = convert(&request, &ConverterConfig::default()).await?;
/// println!("{}", output.message());
/// # Ok(())
/// # }
/// ```
pub async fn convert(
    request: &ConversionRequest,
    config: &ConverterConfig,
) -> Result<ConversionOutput, ConvertError> {
    let total_start = Instant::now();
    let runner = config.runner.as_ref();
    let progress = config.progress_callback.as_ref();
    info!("Starting conversion: {}", request.input.display());

    // ── Step 1: Engine available? ────────────────────────────────────────
    let probe = probe_engine(runner, &config.engine).await;
    if let Some(cb) = progress {
        cb.on_engine_detected(&probe);
    }
    let Some(engine_path) = probe.path.clone() else {
        return Err(ConvertError::EngineNotInstalled {
            engine: engine_label(&config.engine),
            guidance: engine_locate::engine_install_guidance(),
        });
    };

    // ── Steps 2–3: Input exists, format known ────────────────────────────
    let input = resolve_input(&request.input, request.from.as_deref())?;

    // ── Step 4: Output path and format ───────────────────────────────────
    let target = resolve_target(&input.path, request.output.as_deref(), request.to.as_deref())?;
    if target.synthesized {
        info!("No output path given; writing {}", target.path.display());
    }

    // ── Step 5: Static validation ────────────────────────────────────────
    let verdict = validate_conversion(&ConversionPair {
        input_format: &input.format,
        output_format: &target.format,
        input_extension: input.extension.as_deref(),
        output_extension: target.extension.as_deref(),
    });
    if let Verdict::Rejected { rule, reason } = verdict {
        debug!("Rejected by rule {}", rule);
        return Err(ConvertError::UnsupportedConversion { reason });
    }

    // ── Step 6: PDF renderer ─────────────────────────────────────────────
    let pdf_engine = select_renderer(
        &target,
        request.pdf_engine.as_deref(),
        &config.renderer_candidates,
        runner,
    )?;
    if request.pdf_engine.is_none() {
        if let (Some(cb), Some(renderer)) = (progress, pdf_engine.as_deref()) {
            cb.on_renderer_selected(renderer);
        }
    }

    // ── Steps 7–8: Build and run ─────────────────────────────────────────
    let plan = ConversionPlan {
        input: input.path.clone(),
        input_format: Some(input.format.clone()),
        output: target.path.clone(),
        output_format: Some(target.format.clone()),
        standalone: request.standalone,
        toc: request.toc,
        pdf_engine: pdf_engine.clone(),
        passthrough: request.passthrough.clone(),
    };
    let command = build_command(engine_path, &plan);
    let engine_output = run_engine(&command, runner, config.timeout, progress).await?;

    // ── Step 9: Output really exists ─────────────────────────────────────
    verify_output(&target.path)?;

    if !engine_output.stderr.trim().is_empty() {
        warn!("Engine reported: {}", engine_output.stderr.trim());
    }

    let duration_ms = total_start.elapsed().as_millis() as u64;
    info!(
        "Converted {} → {} in {}ms",
        input.path.display(),
        target.path.display(),
        duration_ms
    );

    Ok(ConversionOutput {
        output_path: target.path,
        input_format: input.format,
        output_format: target.format,
        pdf_engine,
        command: command.to_string_args(),
        engine_version: probe.version,
        engine_stderr: engine_output.stderr,
        duration_ms,
    })
}

/// Run [`convert`] and flatten the outcome into a [`ConversionResult`].
pub async fn run_conversion(
    request: &ConversionRequest,
    config: &ConverterConfig,
) -> ConversionResult {
    ConversionResult::from(convert(request, config).await)
}

/// Synchronous wrapper around [`convert`].
///
/// Drives the conversion on a single-threaded runtime created for the call.
pub fn convert_sync(
    request: &ConversionRequest,
    config: &ConverterConfig,
) -> Result<ConversionOutput, ConvertError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ConvertError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(request, config))
}

/// Is the engine installed, and which version?
///
/// Never fails: absence is reported through [`EngineProbe::is_installed`].
pub async fn check_engine(config: &ConverterConfig) -> EngineProbe {
    probe_engine(config.runner.as_ref(), &config.engine).await
}

/// Name used for the engine in messages.
fn engine_label(program: &str) -> String {
    if program == DEFAULT_ENGINE {
        "Pandoc".to_string()
    } else {
        program.to_string()
    }
}
