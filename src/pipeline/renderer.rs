//! PDF renderer selection.
//!
//! Pandoc writes PDF through an external typesetter. When the caller names
//! one it is used as-is; otherwise the configured candidates are probed in
//! order and the first one on the search path wins.

use crate::engine::EngineRunner;
use crate::error::ConvertError;
use crate::pipeline::target::ResolvedTarget;
use tracing::debug;

/// Whether `target` is rendered to PDF.
pub fn is_pdf_target(target: &ResolvedTarget) -> bool {
    target.extension.as_deref() == Some(".pdf") || target.format == "pdf"
}

/// Renderer to pass as `--pdf-engine`, if any.
///
/// Non-PDF targets keep whatever the caller supplied.
pub fn select_renderer(
    target: &ResolvedTarget,
    explicit: Option<&str>,
    candidates: &[String],
    runner: &dyn EngineRunner,
) -> Result<Option<String>, ConvertError> {
    if let Some(name) = explicit {
        return Ok(Some(name.to_string()));
    }
    if !is_pdf_target(target) {
        return Ok(None);
    }

    match candidates.iter().find(|c| runner.locate(c).is_some()) {
        Some(found) => {
            debug!("Selected PDF renderer {}", found);
            Ok(Some(found.clone()))
        }
        None => Err(ConvertError::RendererUnavailable {
            candidates: candidates.to_vec(),
            guidance: engine_locate::renderer_install_guidance(candidates),
        }),
    }
}
