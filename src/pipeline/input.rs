//! Input resolution: the input file must exist and have a known format.
//!
//! An explicit `--from` always wins over the extension, so files with odd
//! names (`notes.txt` holding Markdown) can still be converted.

use crate::error::ConvertError;
use crate::formats::{extension_of, INPUT_FORMATS};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The input after existence and format checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    pub path: PathBuf,
    pub format: String,
    /// Lowercase, dot-prefixed extension of `path`, if any.
    pub extension: Option<String>,
}

/// Check `path` exists and work out its format.
pub fn resolve_input(
    path: &Path,
    explicit_format: Option<&str>,
) -> Result<ResolvedInput, ConvertError> {
    if !path.exists() {
        return Err(ConvertError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let format = match explicit_format {
        Some(f) => f.to_string(),
        None => INPUT_FORMATS
            .detect(path)
            .ok_or_else(|| ConvertError::InputFormatUndetectable {
                path: path.to_path_buf(),
            })?
            .to_string(),
    };

    debug!("Input {} is {}", path.display(), format);
    Ok(ResolvedInput {
        path: path.to_path_buf(),
        format,
        extension: extension_of(path),
    })
}
