//! Error types for the md2pdf library.
//!
//! Everything that can go wrong in the pipeline lands in one
//! [`Md2PdfError`] enum, grouped by which stage raised it:
//!
//! * **Usage** — the caller gave us nothing to convert.
//! * **Input** — the Markdown file is missing, unreadable, or not UTF-8.
//! * **Render** — the headless browser could not be launched, did not
//!   settle, or failed to produce PDF bytes.
//! * **Output** — the PDF bytes could not be written to the target path.
//!
//! There is no recovery or retry anywhere in the pipeline: every variant
//! propagates to the top level, where the binary logs it to stderr and
//! exits non-zero. Messages therefore carry actionable hints (what to
//! check, which flag to set) because they are the last thing the user sees.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the md2pdf library.
#[derive(Debug, Error)]
pub enum Md2PdfError {
    // ── Usage errors ──────────────────────────────────────────────────────
    /// No input path was supplied on the command line.
    #[error("No input file given.\nUsage: md2pdf <input.md> [output.pdf]")]
    MissingInput,

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file was read but its bytes are not valid UTF-8.
    #[error("File '{path}' is not valid UTF-8 text.\nmd2pdf only converts UTF-8 Markdown documents.")]
    NotUtf8 { path: PathBuf },

    /// Any other OS-level read failure.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Render errors ─────────────────────────────────────────────────────
    /// The browser process could not be started.
    #[error(
        "Failed to launch the headless browser: {0}\n\n\
md2pdf needs a Chromium-family browser installed on this machine.\n\
If it is installed somewhere unusual, point md2pdf at it:\n\
  • --browser /path/to/chrome\n\
  • or set MD2PDF_BROWSER=/path/to/chrome\n"
    )]
    BrowserLaunchFailed(String),

    /// The browser launched but the document could not be loaded into a page.
    #[error("Browser failed to load the document: {detail}")]
    NavigationFailed { detail: String },

    /// The page did not finish loading within the configured timeout.
    #[error("Page did not settle within {secs}s.\nIncrease --timeout if the document is very large.")]
    LoadTimeout { secs: u64 },

    /// The browser loaded the page but `printToPDF` failed.
    #[error("PDF capture failed: {0}")]
    PdfCaptureFailed(String),

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_mentions_usage() {
        let msg = Md2PdfError::MissingInput.to_string();
        assert!(msg.contains("md2pdf <input.md>"), "got: {msg}");
    }

    #[test]
    fn file_not_found_display() {
        let e = Md2PdfError::FileNotFound {
            path: PathBuf::from("/tmp/missing.md"),
        };
        assert!(e.to_string().contains("/tmp/missing.md"));
    }

    #[test]
    fn launch_failed_mentions_browser_flag() {
        let e = Md2PdfError::BrowserLaunchFailed("no chrome found".into());
        let msg = e.to_string();
        assert!(msg.contains("--browser"));
        assert!(msg.contains("MD2PDF_BROWSER"));
        assert!(msg.contains("no chrome found"));
    }

    #[test]
    fn load_timeout_display() {
        let e = Md2PdfError::LoadTimeout { secs: 30 };
        assert!(e.to_string().contains("30s"));
    }

    #[test]
    fn output_write_failed_carries_source() {
        use std::error::Error as _;
        let e = Md2PdfError::OutputWriteFailed {
            path: PathBuf::from("out/report.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("out/report.pdf"));
        assert!(e.source().is_some());
    }
}
