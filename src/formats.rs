//! Format registry: which file extensions map to which Pandoc format names.
//!
//! Two registries exist because Pandoc reads more formats than it writes:
//! spreadsheets and delimited text (`.csv`, `.tsv`, `.xlsx`) are readers
//! only, and PDF is a writer only (through a LaTeX renderer).
//!
//! The tables are process-wide statics built on first use and never mutated.
//! Extensions are stored lowercase with their leading dot, the same form
//! [`extension_of`] returns.
//!
//! ## Canonical extensions
//!
//! Several extensions can name the same format (`.md` and `.markdown`).
//! When an output path has to be synthesised from a bare format name, the
//! extension declared *first* in the registry wins. Declaration order is
//! therefore part of the contract: `.md`, `.html` and `.tex` come before
//! their longer aliases.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

const INPUT_TABLE: &[(&str, &str)] = &[
    (".md", "markdown"),
    (".markdown", "markdown"),
    (".html", "html"),
    (".htm", "html"),
    (".docx", "docx"),
    (".csv", "csv"),
    (".tsv", "tsv"),
    (".xlsx", "xlsx"),
    (".pptx", "pptx"),
    (".tex", "latex"),
    (".latex", "latex"),
    (".epub", "epub"),
    (".rtf", "rtf"),
    (".json", "json"),
    (".xml", "xml"),
    (".gfm", "gfm"),
    (".commonmark", "commonmark"),
];

const OUTPUT_TABLE: &[(&str, &str)] = &[
    (".md", "markdown"),
    (".markdown", "markdown"),
    (".html", "html"),
    (".htm", "html"),
    (".docx", "docx"),
    (".pptx", "pptx"),
    (".tex", "latex"),
    (".latex", "latex"),
    (".epub", "epub"),
    (".rtf", "rtf"),
    (".json", "json"),
    (".xml", "xml"),
    (".pdf", "pdf"),
    (".gfm", "gfm"),
    (".commonmark", "commonmark"),
];

/// Extensions Pandoc can read but never write.
pub const INPUT_ONLY: &[&str] = &[".csv", ".tsv", ".xlsx"];

/// Extensions whose output is only usable as a complete document.
pub const STANDALONE_REQUIRED: &[&str] = &[".html", ".htm", ".epub", ".pdf"];

/// Input (reader) registry.
pub static INPUT_FORMATS: Lazy<FormatRegistry> = Lazy::new(|| FormatRegistry::new(INPUT_TABLE));

/// Output (writer) registry.
pub static OUTPUT_FORMATS: Lazy<FormatRegistry> =
    Lazy::new(|| FormatRegistry::new(OUTPUT_TABLE));

/// One extension → format mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatEntry {
    pub extension: &'static str,
    pub format: &'static str,
}

/// An immutable extension → format lookup table.
#[derive(Debug)]
pub struct FormatRegistry {
    entries: Vec<FormatEntry>,
    by_extension: HashMap<&'static str, &'static str>,
}

impl FormatRegistry {
    fn new(table: &'static [(&'static str, &'static str)]) -> Self {
        let entries: Vec<FormatEntry> = table
            .iter()
            .map(|&(extension, format)| FormatEntry { extension, format })
            .collect();
        let by_extension = entries.iter().map(|e| (e.extension, e.format)).collect();
        Self {
            entries,
            by_extension,
        }
    }

    /// Format name for a lowercase, dot-prefixed extension.
    pub fn lookup(&self, extension: &str) -> Option<&'static str> {
        self.by_extension.get(extension).copied()
    }

    /// Format name for the extension of `path`.
    pub fn detect(&self, path: impl AsRef<Path>) -> Option<&'static str> {
        extension_of(path).and_then(|ext| self.lookup(&ext))
    }

    /// First-declared extension mapping to `format`.
    pub fn canonical_extension(&self, format: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.format == format)
            .map(|e| e.extension)
    }

    /// Entries sorted by extension.
    pub fn sorted_entries(&self) -> Vec<FormatEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|e| e.extension);
        sorted
    }
}

/// Lowercase extension of `path` with its leading dot (`report.MD` → `.md`).
///
/// Dot-files such as `.md` have no extension.
pub fn extension_of(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Detect the format of `path` in `registry`. Never fails; unknown is `None`.
pub fn detect_format(path: impl AsRef<Path>, registry: &FormatRegistry) -> Option<&'static str> {
    registry.detect(path)
}

/// Whether `extension` can only be read, never written.
pub fn is_input_only(extension: &str) -> bool {
    INPUT_ONLY.contains(&extension)
}

/// Whether output with `extension` always needs standalone mode.
pub fn requires_standalone(extension: &str) -> bool {
    STANDALONE_REQUIRED.contains(&extension)
}

// ── Listing ──────────────────────────────────────────────────────────────

/// One row of the `--formats` listing.
#[derive(Debug, Clone, Serialize)]
pub struct FormatRow {
    pub extension: &'static str,
    pub format: &'static str,
    pub input_only: bool,
}

/// Both registries plus notes, as printed by `--formats`.
#[derive(Debug, Clone, Serialize)]
pub struct FormatListing {
    pub input: Vec<FormatRow>,
    pub output: Vec<FormatRow>,
    pub notes: Vec<&'static str>,
}

const LISTING_NOTES: &[&str] = &[
    "CSV, TSV, XLSX are input-only (tabular data)",
    "PDF output requires LaTeX installation",
    "HTML, EPUB, PDF automatically use standalone mode",
];

/// Build the listing, each registry sorted by extension.
pub fn format_listing() -> FormatListing {
    let rows = |registry: &FormatRegistry| {
        registry
            .sorted_entries()
            .into_iter()
            .map(|e| FormatRow {
                extension: e.extension,
                format: e.format,
                input_only: is_input_only(e.extension),
            })
            .collect::<Vec<_>>()
    };
    FormatListing {
        input: rows(&*INPUT_FORMATS),
        output: rows(&*OUTPUT_FORMATS),
        notes: LISTING_NOTES.to_vec(),
    }
}

impl FormatListing {
    /// Plain-text rendering.
    pub fn render(&self) -> String {
        let rule = "-".repeat(40);
        let mut out = format!("Supported Input Formats:\n{rule}\n");
        for row in &self.input {
            let note = if row.input_only { " (input only)" } else { "" };
            out.push_str(&format!("  {:12} -> {}{}\n", row.extension, row.format, note));
        }
        out.push_str(&format!("\nSupported Output Formats:\n{rule}\n"));
        for row in &self.output {
            out.push_str(&format!("  {:12} -> {}\n", row.extension, row.format));
        }
        out.push_str("\nNotes:\n");
        for note in &self.notes {
            out.push_str(&format!("  - {note}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_extension_detects_its_format() {
        for &(ext, fmt) in INPUT_TABLE {
            let path = format!("file{ext}");
            assert_eq!(INPUT_FORMATS.detect(&path), Some(fmt), "input {ext}");
        }
        for &(ext, fmt) in OUTPUT_TABLE {
            let path = format!("dir/file{ext}");
            assert_eq!(OUTPUT_FORMATS.detect(&path), Some(fmt), "output {ext}");
        }
    }

    #[test]
    fn unknown_extensions_are_absent() {
        for path in ["notes.txt", "image.png", "archive.tar.gz", "Makefile", ".md"] {
            assert_eq!(detect_format(path, &INPUT_FORMATS), None, "{path}");
            assert_eq!(detect_format(path, &OUTPUT_FORMATS), None, "{path}");
        }
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(INPUT_FORMATS.detect("REPORT.MD"), Some("markdown"));
        assert_eq!(OUTPUT_FORMATS.detect("Slides.PPTX"), Some("pptx"));
    }

    #[test]
    fn registries_differ_where_expected() {
        assert_eq!(INPUT_FORMATS.detect("data.csv"), Some("csv"));
        assert_eq!(OUTPUT_FORMATS.detect("data.csv"), None);
        assert_eq!(INPUT_FORMATS.detect("doc.pdf"), None);
        assert_eq!(OUTPUT_FORMATS.detect("doc.pdf"), Some("pdf"));
    }

    #[test]
    fn canonical_extension_is_first_declared() {
        assert_eq!(OUTPUT_FORMATS.canonical_extension("markdown"), Some(".md"));
        assert_eq!(OUTPUT_FORMATS.canonical_extension("html"), Some(".html"));
        assert_eq!(OUTPUT_FORMATS.canonical_extension("latex"), Some(".tex"));
        assert_eq!(OUTPUT_FORMATS.canonical_extension("rst"), None);
    }

    #[test]
    fn input_only_and_standalone_sets() {
        for ext in INPUT_ONLY {
            assert!(is_input_only(ext));
            assert!(OUTPUT_FORMATS.lookup(ext).is_none());
        }
        assert!(!is_input_only(".md"));
        assert!(requires_standalone(".html"));
        assert!(requires_standalone(".pdf"));
        assert!(!requires_standalone(".docx"));
    }

    #[test]
    fn extension_of_lowercases_and_keeps_dot() {
        assert_eq!(extension_of("a/b/Report.DocX").as_deref(), Some(".docx"));
        assert_eq!(extension_of("README"), None);
    }

    #[test]
    fn listing_is_sorted_and_marks_input_only() {
        let listing = format_listing();
        let exts: Vec<_> = listing.input.iter().map(|r| r.extension).collect();
        let mut sorted = exts.clone();
        sorted.sort();
        assert_eq!(exts, sorted);

        let csv = listing.input.iter().find(|r| r.extension == ".csv").unwrap();
        assert!(csv.input_only);

        let text = listing.render();
        assert!(text.contains("Supported Input Formats:"));
        assert!(text.contains("  .csv         -> csv (input only)"));
        assert!(text.contains("  .pdf         -> pdf\n"));
    }
}
