//! # md2pdf
//!
//! Convert Markdown documents to styled PDF files.
//!
//! ## Why this crate?
//!
//! Producing a decent-looking PDF from Markdown usually means wiring up a
//! whole document toolchain. Browsers already ship a first-class print
//! engine, so this crate takes the short path: render Markdown to HTML,
//! embed a print-tuned stylesheet, and let a headless Chromium session
//! paginate it — typography, tables, and code blocks come out the way the
//! browser would print them.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Load    read the source file as UTF-8
//!  ├─ 2. Render  Markdown → HTML via pulldown-cmark,
//!  │             wrapped in a fixed document shell + stylesheet
//!  └─ 3. Export  headless Chromium loads the document and prints
//!                to PDF (A4, 1 cm margins by default)
//! ```
//!
//! One document in, one PDF out; the pipeline is strictly sequential with
//! a single attempt and no retries.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2pdf::{convert_to_file, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let stats = convert_to_file("notes.md", "notes.pdf", &config).await?;
//!     eprintln!("wrote {} bytes in {}ms", stats.pdf_bytes, stats.total_duration_ms);
//!     Ok(())
//! }
//! ```
//!
//! ## Requirements
//!
//! A Chromium-family browser must be installed. On most platforms it is
//! found automatically; otherwise point md2pdf at the binary with
//! `MD2PDF_BROWSER=/path/to/chrome` or
//! [`ConversionConfigBuilder::browser_path`].
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2pdf` binary (clap + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! md2pdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod style;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, PaperFormat};
pub use convert::{convert, convert_sync, convert_to_file, render_document};
pub use error::Md2PdfError;
pub use output::{ConversionOutput, ConversionStats};
pub use pipeline::export::{ChromiumEngine, PdfEngine, PrintOptions};
pub use pipeline::input::default_output_path;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback, Stage};
