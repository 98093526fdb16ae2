//! CLI binary for md2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use md2pdf::{
    convert_to_file, default_output_path, render_document, ConversionConfig,
    ConversionProgressCallback, Md2PdfError, PaperFormat, ProgressCallback, Stage,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a single spinner whose message tracks the
/// pipeline stage. The export stage dominates wall-clock time (browser
/// launch), so a spinner beats a bar with three ticks.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_stage_start(&self, stage: Stage) {
        self.bar.set_message(format!("{}…", stage.label()));
    }

    fn on_stage_complete(&self, stage: Stage, bytes: usize) {
        self.bar.println(format!(
            "  {} {}  {}",
            green("✓"),
            stage.label(),
            dim(&format!("{bytes} bytes")),
        ));
    }

    fn on_conversion_complete(&self, _pdf_bytes: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion — writes report.pdf next to report.md
  md2pdf report.md

  # Explicit output path
  md2pdf report.md out/report.pdf

  # US Letter with wider margins
  md2pdf --format letter --margin 2 report.md

  # Use a specific browser binary
  md2pdf --browser /usr/bin/chromium report.md

  # Your own stylesheet instead of the built-in one
  md2pdf --css corporate.css report.md

  # Inspect the HTML the browser would print (no browser launched)
  md2pdf --html-only report.md > report.html

  # Machine-readable conversion report
  md2pdf --json report.md

ENVIRONMENT VARIABLES:
  MD2PDF_BROWSER   Path to a Chromium-family browser binary
  CHROME           Fallback browser path, honoured by other Chromium tooling

BROWSER DISCOVERY:
  md2pdf prints through an installed Chromium-family browser. Resolution
  order: --browser flag, MD2PDF_BROWSER, CHROME, the standard macOS Google
  Chrome location, then well-known binary names on PATH. On macOS an
  explicit install is required; there is no bundled browser.
"#;

/// Convert Markdown documents to styled PDF via a headless browser.
#[derive(Parser, Debug)]
#[command(
    name = "md2pdf",
    version,
    about = "Convert Markdown documents to styled PDF via a headless browser",
    long_about = "Convert a Markdown document to a styled, paginated PDF. Markdown is rendered \
to HTML, wrapped in a print-tuned stylesheet, and printed through a headless Chromium \
session (A4, 1 cm margins by default).",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the input Markdown file.
    ///
    /// Optional at the clap level so that a missing argument is reported as
    /// this tool's own usage error (exit code 1), matching every other
    /// failure mode.
    input: Option<PathBuf>,

    /// Output PDF path. Defaults to the input path with extension `.pdf`.
    output: Option<PathBuf>,

    /// Paper size of the exported PDF.
    #[arg(long, env = "MD2PDF_FORMAT", value_enum, default_value = "a4")]
    format: FormatArg,

    /// Uniform page margin in centimetres.
    #[arg(long, env = "MD2PDF_MARGIN", default_value_t = 1.0)]
    margin: f64,

    /// Seconds to wait for the page to finish loading before giving up.
    #[arg(long, env = "MD2PDF_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Path to a Chromium-family browser binary.
    #[arg(long, env = "MD2PDF_BROWSER")]
    browser: Option<PathBuf>,

    /// Run the browser with its sandbox enabled (off by default so the tool
    /// works in containers and CI).
    #[arg(long, env = "MD2PDF_SANDBOX")]
    sandbox: bool,

    /// Path to a CSS file replacing the built-in stylesheet.
    #[arg(long, env = "MD2PDF_CSS")]
    css: Option<PathBuf>,

    /// Print the composed HTML document to stdout and exit; no browser is
    /// launched and no PDF is written.
    #[arg(long)]
    html_only: bool,

    /// Output a machine-readable JSON conversion report instead of the
    /// confirmation line.
    #[arg(long, env = "MD2PDF_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "MD2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2PDF_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum FormatArg {
    A4,
    Letter,
    Legal,
}

impl From<FormatArg> for PaperFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::A4 => PaperFormat::A4,
            FormatArg::Letter => PaperFormat::Letter,
            FormatArg::Legal => PaperFormat::Legal,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the spinner is active; the
    // spinner provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.html_only;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Resolve paths ────────────────────────────────────────────────────
    let input = cli.input.clone().ok_or(Md2PdfError::MissingInput)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&input));

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb).await?;

    // ── HTML-only mode ───────────────────────────────────────────────────
    if cli.html_only {
        let html = render_document(&input, &config)
            .await
            .context("Failed to render document")?;
        io::stdout()
            .lock()
            .write_all(html.as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    let stats = convert_to_file(&input, &output, &config)
        .await
        .context("Conversion failed")?;

    if cli.json {
        let report = serde_json::json!({
            "input": input,
            "output": output,
            "stats": stats,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else {
        println!("PDF generated at: {}", output.display());
        if !cli.quiet {
            eprintln!(
                "   {} {}  {}",
                green("✔"),
                bold(&format!("{} bytes", stats.pdf_bytes)),
                dim(&format!("{}ms total", stats.total_duration_ms)),
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
async fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let stylesheet = if let Some(ref path) = cli.css {
        Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read stylesheet from {:?}", path))?,
        )
    } else {
        None
    };

    let mut builder = ConversionConfig::builder()
        .paper_format(cli.format.clone().into())
        .margin_cm(cli.margin)
        .load_timeout_secs(cli.timeout)
        .sandbox(cli.sandbox);

    if let Some(ref path) = cli.browser {
        builder = builder.browser_path(path.clone());
    }
    if let Some(css) = stylesheet {
        builder = builder.stylesheet(css);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
