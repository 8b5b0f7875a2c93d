//! Engine command construction.
//!
//! [`build_command`] is pure: the same plan always yields the same argument
//! list, in this order:
//!
//! ```text
//! -f <in-fmt>  -t <out-fmt>  -o <output>  [-s]  [--toc]  [--pdf-engine <r>]  <passthrough…>  <input>
//! ```
//!
//! `-s` is added when the caller asked for it or the output extension needs
//! a complete document; the caller cannot turn it off for those extensions.

use crate::formats::{extension_of, requires_standalone};
use crate::request::PassthroughArg;
use std::ffi::OsString;
use std::path::PathBuf;

/// Everything the builder needs, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPlan {
    pub input: PathBuf,
    pub input_format: Option<String>,
    pub output: PathBuf,
    pub output_format: Option<String>,
    pub standalone: bool,
    pub toc: bool,
    pub pdf_engine: Option<String>,
    pub passthrough: Vec<PassthroughArg>,
}

/// One argument of the engine command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineArg {
    InputFormat(String),
    OutputFormat(String),
    OutputPath(PathBuf),
    Standalone,
    TableOfContents,
    PdfEngine(String),
    /// Forwarded verbatim from the caller.
    Passthrough(PassthroughArg),
    InputPath(PathBuf),
}

impl EngineArg {
    fn push_to(&self, argv: &mut Vec<OsString>) {
        match self {
            EngineArg::InputFormat(f) => argv.extend(["-f".into(), f.into()]),
            EngineArg::OutputFormat(f) => argv.extend(["-t".into(), f.into()]),
            EngineArg::OutputPath(p) => argv.extend(["-o".into(), p.into()]),
            EngineArg::Standalone => argv.push("-s".into()),
            EngineArg::TableOfContents => argv.push("--toc".into()),
            EngineArg::PdfEngine(e) => argv.extend(["--pdf-engine".into(), e.into()]),
            EngineArg::Passthrough(a) => argv.push(a.as_str().into()),
            EngineArg::InputPath(p) => argv.push(p.into()),
        }
    }
}

/// A program plus its typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    pub program: PathBuf,
    pub args: Vec<EngineArg>,
}

impl EngineCommand {
    /// Flattened argv, program excluded.
    pub fn to_os_args(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.args.len() * 2);
        for arg in &self.args {
            arg.push_to(&mut argv);
        }
        argv
    }

    /// Lossy argv as strings, program excluded.
    pub fn to_string_args(&self) -> Vec<String> {
        self.to_os_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Human-readable command line for logs.
    pub fn display(&self) -> String {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.to_string_args())
            .map(|a| {
                if a.is_empty() || a.contains(char::is_whitespace) {
                    format!("\"{a}\"")
                } else {
                    a
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Build the engine command for `plan`.
pub fn build_command(program: impl Into<PathBuf>, plan: &ConversionPlan) -> EngineCommand {
    let mut args = Vec::new();

    if let Some(ref f) = plan.input_format {
        args.push(EngineArg::InputFormat(f.clone()));
    }
    if let Some(ref f) = plan.output_format {
        args.push(EngineArg::OutputFormat(f.clone()));
    }
    args.push(EngineArg::OutputPath(plan.output.clone()));

    let forced = extension_of(&plan.output).is_some_and(|ext| requires_standalone(&ext));
    if plan.standalone || forced {
        args.push(EngineArg::Standalone);
    }
    if plan.toc {
        args.push(EngineArg::TableOfContents);
    }
    if let Some(ref engine) = plan.pdf_engine {
        args.push(EngineArg::PdfEngine(engine.clone()));
    }
    args.extend(plan.passthrough.iter().cloned().map(EngineArg::Passthrough));
    args.push(EngineArg::InputPath(plan.input.clone()));

    EngineCommand {
        program: program.into(),
        args,
    }
}
