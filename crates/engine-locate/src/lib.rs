//! # engine-locate
//!
//! Find external conversion engines (Pandoc, LaTeX) on the search path and
//! tell the user how to install them when they are missing.
//!
//! Nothing here downloads or installs anything: presence is probed with
//! [`which`], and the installation guidance is static text enumerated per
//! platform.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use engine_locate::{find_executable, engine_install_guidance, LATEX_RENDERERS};
//!
//! match find_executable("pandoc") {
//!     Some(path) => println!("pandoc at {}", path.display()),
//!     None => eprintln!("{}", engine_install_guidance()),
//! }
//!
//! let latex = LATEX_RENDERERS.iter().find_map(|r| find_executable(r));
//! ```
//!
//! ## Platform support
//!
//! | OS      | Engine hints                 | LaTeX hint             |
//! |---------|------------------------------|------------------------|
//! | macOS   | Homebrew, MacPorts           | `mactex-no-gui` cask   |
//! | Linux   | apt-get, dnf                 | `texlive-xetex`        |
//! | Windows | Chocolatey, Scoop            | MiKTeX                 |

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use tracing::debug;

// ── Public constants ─────────────────────────────────────────────────────────

/// LaTeX engines able to render PDF through Pandoc, in preference order.
pub const LATEX_RENDERERS: &[&str] = &["pdflatex", "xelatex", "lualatex"];

/// Where to download Pandoc when no package manager applies.
pub const ENGINE_DOWNLOAD_URL: &str = "https://pandoc.org/installing.html";

// ── Platforms ────────────────────────────────────────────────────────────────

/// Operating-system families the guidance text knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            "windows" => Platform::Windows,
            _ => Platform::Other,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
            Platform::Other => "Other",
        }
    }
}

/// One way of installing a tool on one platform.
#[derive(Debug, Clone, Copy)]
pub struct InstallHint {
    pub platform: Platform,
    /// Heading shown above the command, e.g. `macOS (using Homebrew)`.
    pub heading: &'static str,
    pub command: &'static str,
}

/// Package-manager commands for installing Pandoc.
pub const ENGINE_INSTALL_HINTS: &[InstallHint] = &[
    InstallHint {
        platform: Platform::MacOs,
        heading: "macOS (using Homebrew)",
        command: "brew install pandoc",
    },
    InstallHint {
        platform: Platform::MacOs,
        heading: "macOS (using MacPorts)",
        command: "sudo port install pandoc",
    },
    InstallHint {
        platform: Platform::Linux,
        heading: "Ubuntu/Debian",
        command: "sudo apt-get install pandoc",
    },
    InstallHint {
        platform: Platform::Linux,
        heading: "Fedora",
        command: "sudo dnf install pandoc",
    },
    InstallHint {
        platform: Platform::Windows,
        heading: "Windows (using Chocolatey)",
        command: "choco install pandoc",
    },
    InstallHint {
        platform: Platform::Windows,
        heading: "Windows (using Scoop)",
        command: "scoop install pandoc",
    },
];

/// Ways of getting a LaTeX distribution for PDF output.
pub const RENDERER_INSTALL_HINTS: &[InstallHint] = &[
    InstallHint {
        platform: Platform::MacOs,
        heading: "macOS",
        command: "brew install --cask mactex-no-gui",
    },
    InstallHint {
        platform: Platform::Linux,
        heading: "Ubuntu",
        command: "sudo apt-get install texlive-xetex",
    },
    InstallHint {
        platform: Platform::Windows,
        heading: "Windows",
        command: "Install MiKTeX from https://miktex.org/",
    },
];

/// Hints from `hints` that apply to `platform`.
pub fn hints_for(hints: &'static [InstallHint], platform: Platform) -> Vec<&'static InstallHint> {
    hints.iter().filter(|h| h.platform == platform).collect()
}

// ── Guidance text ────────────────────────────────────────────────────────────

fn render_renderer_lines(out: &mut String) {
    for hint in RENDERER_INSTALL_HINTS {
        out.push_str(&format!("    {}: {}\n", hint.heading, hint.command));
    }
}

/// Full installation instructions for the engine, every platform included.
pub fn engine_install_guidance() -> String {
    let mut out = String::from("\nPandoc Installation Instructions\n");
    out.push_str("================================\n\n");
    for hint in ENGINE_INSTALL_HINTS {
        out.push_str(&format!("{}:\n    {}\n\n", hint.heading, hint.command));
    }
    out.push_str(&format!("Or download from: {ENGINE_DOWNLOAD_URL}\n\n"));
    out.push_str("For PDF output, you also need a LaTeX distribution:\n");
    render_renderer_lines(&mut out);
    out
}

/// Explanation shown when PDF output is requested and no LaTeX engine exists.
pub fn renderer_install_guidance(candidates: &[String]) -> String {
    let names = match candidates {
        [] => String::from("a LaTeX engine"),
        [only] => only.clone(),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    };
    let mut out = format!("PDF output requires a LaTeX engine ({names}).\n");
    out.push_str("Install a LaTeX distribution:\n");
    for hint in RENDERER_INSTALL_HINTS {
        out.push_str(&format!("  {}: {}\n", hint.heading, hint.command));
    }
    out.trim_end().to_string()
}

/// One-line suggestion for the running platform, if there is one.
pub fn suggested_install_command() -> Option<String> {
    let platform = Platform::current();
    hints_for(ENGINE_INSTALL_HINTS, platform)
        .first()
        .map(|h| format!("Suggested for {}: {}", platform.label(), h.command))
}

// ── Search-path lookup ───────────────────────────────────────────────────────

/// Resolve `program` against `PATH`.
///
/// A `program` containing a path separator is checked directly.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    match which::which(program) {
        Ok(path) => {
            debug!("Found '{}' at {}", program, path.display());
            Some(path)
        }
        Err(e) => {
            debug!("'{}' not found: {}", program, e);
            None
        }
    }
}

// ── Version parsing ──────────────────────────────────────────────────────────

static RE_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)+)").unwrap());

/// First non-empty line of `--version` output, e.g. `pandoc 3.1.9`.
pub fn version_line(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

/// Dotted version number inside a version line, e.g. `3.1.9`.
pub fn version_number(line: &str) -> Option<String> {
    RE_VERSION
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
