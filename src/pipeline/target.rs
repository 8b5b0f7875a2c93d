//! Target resolution: where the output goes and in which format.
//!
//! Three cases:
//!
//! * an output path is given: its format is the explicit `to`, or detected
//!   from its extension in the output registry;
//! * only `to` is given: the output path is the input path with its
//!   extension replaced by the format's canonical extension (first-declared
//!   in the registry), or by `.<format>` for formats the registry does not
//!   list;
//! * neither: the request is rejected.

use crate::error::ConvertError;
use crate::formats::{extension_of, OUTPUT_FORMATS};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The output after path and format resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub path: PathBuf,
    pub format: String,
    /// Lowercase, dot-prefixed extension of `path`, if any.
    pub extension: Option<String>,
    /// `path` was derived from the input rather than given.
    pub synthesized: bool,
}

/// Resolve the output path and format for `input`.
pub fn resolve_target(
    input: &Path,
    output: Option<&Path>,
    to: Option<&str>,
) -> Result<ResolvedTarget, ConvertError> {
    let (path, format, synthesized) = match (output, to) {
        (Some(path), explicit) => {
            let format = match explicit {
                Some(f) => f.to_string(),
                None => OUTPUT_FORMATS
                    .detect(path)
                    .ok_or_else(|| ConvertError::OutputFormatUndetectable {
                        path: path.to_path_buf(),
                    })?
                    .to_string(),
            };
            (path.to_path_buf(), format, false)
        }
        (None, Some(format)) => (synthesize_output_path(input, format), format.to_string(), true),
        (None, None) => return Err(ConvertError::UnspecifiedTarget),
    };

    debug!("Output {} is {}", path.display(), format);
    Ok(ResolvedTarget {
        extension: extension_of(&path),
        path,
        format,
        synthesized,
    })
}

/// `input` with its extension swapped for the canonical one of `format`.
pub fn synthesize_output_path(input: &Path, format: &str) -> PathBuf {
    let extension = OUTPUT_FORMATS
        .canonical_extension(format)
        .map(|ext| ext.trim_start_matches('.'))
        .unwrap_or(format);
    input.with_extension(extension)
}
