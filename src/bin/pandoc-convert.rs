//! CLI binary for pandoc-convert.
//!
//! A thin shim over the library crate: split off the tokens meant for
//! Pandoc, parse the rest with clap, map them to a `ConversionRequest` and
//! `ConverterConfig`, and print the result.

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use pandoc_convert::args::{contains_any, split_args};
use pandoc_convert::{
    check_engine, convert, format_listing, ConversionProgressCallback, ConversionRequest,
    ConversionResult, ConverterConfig, EngineCommand, EngineProbe, ProgressCallback,
};
use serde::Serialize;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const BIN_NAME: &str = "pandoc-convert";

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner on stderr while the engine is probed and run.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Preparing");
        bar.set_message("Looking for Pandoc…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_engine_detected(&self, probe: &EngineProbe) {
        if let Some(ref version) = probe.version {
            self.bar.set_message(format!("Found {version}"));
        }
    }

    fn on_renderer_selected(&self, renderer: &str) {
        self.bar
            .println(dim(&format!("  PDF renderer: {renderer}")));
    }

    fn on_engine_start(&self, command: &EngineCommand) {
        self.bar.set_prefix("Converting");
        self.bar.set_message(command.display());
    }

    fn on_engine_complete(&self, _exit_code: Option<i32>, _elapsed: Duration) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Output format from the output extension
  pandoc-convert report.md report.docx

  # Output path from the input name + target format (guide.md)
  pandoc-convert guide.docx --to markdown

  # Tabular data to a standalone HTML page
  pandoc-convert data.csv output.html --standalone

  # PDF through a specific LaTeX engine, with a table of contents
  pandoc-convert paper.md paper.pdf --toc --pdf-engine xelatex

  # Anything else is handed to Pandoc untouched
  pandoc-convert notes.md notes.html --metadata title=Notes --number-sections

  # Is Pandoc installed? Which formats are known?
  pandoc-convert --check
  pandoc-convert --formats

PASSTHROUGH:
  An unrecognised option is forwarded to Pandoc together with the next
  argument when that argument does not start with '-'. Put the input and
  output files before Pandoc options, or use the --option=value form.
  Pandoc's own -V/--variable and --version are forwarded too.

ENVIRONMENT VARIABLES:
  PANDOC_CONVERT_ENGINE       Pandoc executable name or path (default: pandoc)
  PANDOC_CONVERT_TIMEOUT      Conversion timeout in seconds
  PANDOC_CONVERT_JSON         Print JSON instead of text
  PANDOC_CONVERT_NO_PROGRESS  Disable the spinner
  PANDOC_CONVERT_LOG          tracing filter, e.g. debug or pandoc_convert=debug
"#;

/// Convert documents between formats with Pandoc.
#[derive(Parser, Debug)]
#[command(
    name = BIN_NAME,
    about = "Convert documents between formats with Pandoc",
    long_about = "Convert documents between formats with Pandoc. Input and output formats are \
detected from file extensions unless given explicitly; the conversion is checked before Pandoc \
runs, and the output file is verified afterwards.",
    color = clap::ColorChoice::Auto,
    args_override_self = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Document to convert.
    input: Option<PathBuf>,

    /// Output file; its extension selects the output format.
    output: Option<PathBuf>,

    /// Further positional arguments are ignored.
    #[arg(hide = true)]
    extra: Vec<String>,

    /// Output file (takes precedence over the positional OUTPUT).
    #[arg(short = 'o', value_name = "PATH", allow_hyphen_values = true)]
    output_flag: Option<PathBuf>,

    /// Input format (detected from the input extension by default).
    #[arg(short = 'f', long = "from", value_name = "FORMAT", allow_hyphen_values = true)]
    from: Option<String>,

    /// Output format (required when no output file is given).
    #[arg(short = 't', long = "to", value_name = "FORMAT", allow_hyphen_values = true)]
    to: Option<String>,

    /// Produce a complete document with header and footer.
    #[arg(short, long)]
    standalone: bool,

    /// Include a table of contents.
    #[arg(long)]
    toc: bool,

    /// PDF engine (pdflatex, xelatex, lualatex, …); probed when omitted.
    #[arg(long, value_name = "ENGINE", allow_hyphen_values = true)]
    pdf_engine: Option<String>,

    /// Report whether Pandoc is installed, then exit.
    #[arg(long)]
    check: bool,

    /// List the known extensions and formats, then exit.
    #[arg(long)]
    formats: bool,

    /// Print results as JSON.
    #[arg(long, env = "PANDOC_CONVERT_JSON", value_parser = FalseyValueParser::new())]
    json: bool,

    /// Kill Pandoc and fail after this many seconds.
    #[arg(long, env = "PANDOC_CONVERT_TIMEOUT", value_name = "SECS",
          value_parser = clap::value_parser!(u64).range(1..), allow_hyphen_values = true)]
    timeout: Option<u64>,

    /// Pandoc executable name or path.
    #[arg(long, env = "PANDOC_CONVERT_ENGINE", value_name = "PROGRAM",
          default_value = "pandoc", allow_hyphen_values = true)]
    engine_path: String,

    /// Disable the progress spinner.
    #[arg(long, env = "PANDOC_CONVERT_NO_PROGRESS", value_parser = FalseyValueParser::new())]
    no_progress: bool,
}

impl Cli {
    /// Every option at its built-in default, environment ignored.
    fn fallback() -> Self {
        Self {
            input: None,
            output: None,
            extra: Vec::new(),
            output_flag: None,
            from: None,
            to: None,
            standalone: false,
            toc: false,
            pdf_engine: None,
            check: false,
            formats: false,
            json: false,
            timeout: None,
            engine_path: pandoc_convert::config::DEFAULT_ENGINE.to_string(),
            no_progress: false,
        }
    }
}

/// `--check --json` payload.
#[derive(Serialize)]
struct CheckReport<'a> {
    installed: bool,
    path: Option<&'a PathBuf>,
    version: Option<&'a str>,
    version_number: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let raw: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    // ── Help paths ───────────────────────────────────────────────────────
    if raw.is_empty() {
        println!("Usage: {BIN_NAME} <INPUT> [OUTPUT] [OPTIONS]\n");
        Cli::command()
            .print_long_help()
            .context("Failed to print help")?;
        return Ok(ExitCode::SUCCESS);
    }
    if contains_any(&raw, &["-h", "--help"]) {
        Cli::command()
            .print_long_help()
            .context("Failed to print help")?;
        return Ok(ExitCode::SUCCESS);
    }

    // ── Parse ────────────────────────────────────────────────────────────
    let split = split_args(raw.iter().cloned());
    let argv = std::iter::once(BIN_NAME.to_string()).chain(split.recognized);
    let parsed = Cli::try_parse_from(argv);

    // --check / --formats win wherever they appear, even next to bad options.
    let check = contains_any(&raw, &["--check"]);
    let formats = contains_any(&raw, &["--formats"]);
    let cli = match parsed {
        Ok(cli) => cli,
        Err(_) if check || formats => {
            Cli::try_parse_from([BIN_NAME]).unwrap_or_else(|_| Cli::fallback())
        }
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            e.print().context("Failed to print help")?;
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            e.print().ok();
            return Ok(ExitCode::FAILURE);
        }
    };

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner provides all the feedback that matters while it runs.
    let show_progress = !cli.no_progress && !cli.json && !check && !formats && io::stderr().is_terminal();
    let filter = if show_progress { "error" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PANDOC_CONVERT_LOG").unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if check {
        return run_check(&cli).await;
    }
    if formats {
        return run_formats(&cli);
    }

    // ── Build request ────────────────────────────────────────────────────
    let Some(input) = cli.input.clone() else {
        println!("Error: No input file specified");
        println!("Usage: {BIN_NAME} <input_file> <output_file>");
        return Ok(ExitCode::FAILURE);
    };
    if !cli.extra.is_empty() {
        warn!("Ignoring extra positional arguments: {:?}", cli.extra);
    }
    let output = match (cli.output_flag.clone(), cli.output.clone()) {
        (Some(flag), Some(positional)) => {
            warn!("-o {} overrides positional output {}", flag.display(), positional.display());
            Some(flag)
        }
        (flag, positional) => flag.or(positional),
    };

    let mut builder = ConversionRequest::builder(input)
        .standalone(cli.standalone)
        .toc(cli.toc)
        .passthrough(split.passthrough);
    if let Some(path) = output {
        builder = builder.output(path);
    }
    if let Some(ref f) = cli.from {
        builder = builder.from_format(f);
    }
    if let Some(ref t) = cli.to {
        builder = builder.to_format(t);
    }
    if let Some(ref engine) = cli.pdf_engine {
        builder = builder.pdf_engine(engine);
    }
    let request = builder.build();

    // ── Run conversion ───────────────────────────────────────────────────
    let spinner = show_progress.then(CliProgressCallback::new);
    let progress_cb: Option<ProgressCallback> = spinner
        .clone()
        .map(|cb| cb as Arc<dyn ConversionProgressCallback>);
    let config = build_config(&cli, progress_cb)?;

    let outcome = convert(&request, &config).await;
    if let Some(ref s) = spinner {
        s.finish();
    }
    let result = ConversionResult::from_outcome(&outcome);

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialise result")?
        );
    } else {
        if let Ok(ref out) = outcome {
            let warnings = out.engine_stderr.trim();
            if !warnings.is_empty() {
                eprintln!("{}", dim(warnings));
            }
        }
        println!("{}", result.message);
        if let Some(ref path) = result.output_path {
            println!("Output: {}", path.display());
        }
    }

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// `--check`: report engine presence; never fails the process.
async fn run_check(cli: &Cli) -> Result<ExitCode> {
    let config = build_config(cli, None)?;
    let probe = check_engine(&config).await;

    if cli.json {
        let report = CheckReport {
            installed: probe.is_installed(),
            path: probe.path.as_ref(),
            version: probe.version.as_deref(),
            version_number: probe.version_number(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else if let Some(ref path) = probe.path {
        println!(
            "{} Pandoc is installed: {}",
            green("✓"),
            probe.version.as_deref().unwrap_or("unknown version")
        );
        println!("  Location: {}", path.display());
    } else {
        println!("{} Pandoc is not installed", red("✗"));
        println!("{}", engine_locate::engine_install_guidance());
        if let Some(hint) = engine_locate::suggested_install_command() {
            println!("{hint}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// `--formats`: print both registries.
fn run_formats(cli: &Cli) -> Result<ExitCode> {
    let listing = format_listing();
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&listing).context("Failed to serialise formats")?
        );
    } else {
        print!("{}", listing.render());
    }
    Ok(ExitCode::SUCCESS)
}

/// Map CLI args to `ConverterConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConverterConfig> {
    let mut builder = ConverterConfig::builder()
        .engine(&cli.engine_path)
        .timeout_secs(cli.timeout);
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }
    builder.build().context("Invalid configuration")
}
