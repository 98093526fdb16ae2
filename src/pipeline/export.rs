//! PDF export: drive a headless Chromium session over the DevTools protocol.
//!
//! ## Why spawn_blocking?
//!
//! The `headless_chrome` crate is synchronous — it blocks on the DevTools
//! websocket while the browser launches, navigates, and prints.
//! `tokio::task::spawn_blocking` moves that work onto the blocking thread
//! pool so the async caller is not stalled.
//!
//! ## Why a `file://` URL instead of injecting the HTML?
//!
//! The composed document is staged as a file in a `TempDir` and loaded by
//! URL. That keeps the readiness logic uniform (navigate, then wait for the
//! load to settle) and avoids the DevTools `setDocumentContent` path, which
//! does not participate in the navigation lifecycle. The `TempDir` is kept
//! alive until the print completes and is removed on drop, panic included.
//!
//! ## Resource lifetime
//!
//! The `Browser` value owns the spawned subprocess; dropping it kills the
//! process. Every exit path out of [`ChromiumEngine::render`] — success or
//! error — drops the browser, so no Chromium instance outlives a conversion.

use crate::config::{ConversionConfig, PaperFormat, CM_PER_INCH};
use crate::error::Md2PdfError;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tracing::{debug, info};
use url::Url;

/// Page geometry and print behaviour for a single export.
///
/// Decoupled from [`ConversionConfig`] so engine implementations only see
/// print-relevant settings.
#[derive(Debug, Clone)]
pub struct PrintOptions {
    pub paper_format: PaperFormat,
    pub margin_cm: f64,
    pub print_background: bool,
    pub load_timeout: Duration,
}

impl PrintOptions {
    pub fn from_config(config: &ConversionConfig) -> Self {
        Self {
            paper_format: config.paper_format,
            margin_cm: config.margin_cm,
            print_background: config.print_background,
            load_timeout: Duration::from_secs(config.load_timeout_secs),
        }
    }

    /// Map to the DevTools `Page.printToPDF` parameter struct.
    ///
    /// DevTools speaks inches; margins are configured in centimetres.
    pub fn to_pdf_options(&self) -> PrintToPdfOptions {
        let margin_in = self.margin_cm / CM_PER_INCH;
        PrintToPdfOptions {
            print_background: Some(self.print_background),
            paper_width: Some(self.paper_format.width_in()),
            paper_height: Some(self.paper_format.height_in()),
            margin_top: Some(margin_in),
            margin_bottom: Some(margin_in),
            margin_left: Some(margin_in),
            margin_right: Some(margin_in),
            ..Default::default()
        }
    }
}

/// A rendering backend that turns a complete HTML document into PDF bytes.
///
/// The pipeline only talks to this trait; [`ChromiumEngine`] is the default
/// implementation. Substitutes (a different browser engine, a native layout
/// library, a test double) plug in via
/// [`crate::config::ConversionConfigBuilder::engine`].
pub trait PdfEngine: Send + Sync {
    /// Render `html` to PDF bytes. Must release any acquired rendering
    /// session before returning, on error paths included.
    fn render(&self, html: &str, options: &PrintOptions) -> Result<Vec<u8>, Md2PdfError>;
}

/// The default engine: a headless Chromium-family browser driven over the
/// DevTools protocol.
pub struct ChromiumEngine {
    browser_path: Option<PathBuf>,
    sandbox: bool,
}

impl ChromiumEngine {
    pub fn new(browser_path: Option<PathBuf>, sandbox: bool) -> Self {
        Self {
            browser_path,
            sandbox,
        }
    }

    /// Build an engine from the browser-related config fields, resolving
    /// the executable path once up front.
    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(config.resolve_browser_path(), config.sandbox)
    }
}

impl PdfEngine for ChromiumEngine {
    fn render(&self, html: &str, options: &PrintOptions) -> Result<Vec<u8>, Md2PdfError> {
        // Stage the document where the browser can load it by URL.
        let staging =
            TempDir::new().map_err(|e| Md2PdfError::Internal(format!("tempdir: {e}")))?;
        let doc_path = staging.path().join("document.html");
        std::fs::write(&doc_path, html)
            .map_err(|e| Md2PdfError::Internal(format!("staging write: {e}")))?;
        let file_url = Url::from_file_path(&doc_path)
            .map_err(|_| Md2PdfError::Internal(format!("not a file URL: {}", doc_path.display())))?
            .to_string();

        let launch = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(self.sandbox)
            .path(self.browser_path.clone())
            .build()
            .map_err(|e| Md2PdfError::BrowserLaunchFailed(e.to_string()))?;

        info!(
            "Launching headless browser (path: {})",
            self.browser_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "auto-detected".into())
        );
        let browser =
            Browser::new(launch).map_err(|e| Md2PdfError::BrowserLaunchFailed(format!("{e:#}")))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Md2PdfError::BrowserLaunchFailed(format!("{e:#}")))?;
        tab.set_default_timeout(options.load_timeout);

        tab.navigate_to(&file_url)
            .map_err(|e| classify_load_error(e, options.load_timeout))?;
        tab.wait_until_navigated()
            .map_err(|e| classify_load_error(e, options.load_timeout))?;
        debug!("Document loaded: {file_url}");

        let pdf = tab
            .print_to_pdf(Some(options.to_pdf_options()))
            .map_err(|e| Md2PdfError::PdfCaptureFailed(format!("{e:#}")))?;

        info!("Captured PDF: {} bytes", pdf.len());
        // `browser` (and its subprocess) and `staging` are dropped here.
        Ok(pdf)
    }
}

/// Distinguish a load timeout from other navigation failures.
///
/// `headless_chrome` surfaces both through `anyhow`, so the timeout case
/// has to be recognised by message.
fn classify_load_error(e: anyhow::Error, timeout: Duration) -> Md2PdfError {
    let detail = format!("{e:#}");
    let lower = detail.to_lowercase();
    if lower.contains("timeout") || lower.contains("timed out") {
        Md2PdfError::LoadTimeout {
            secs: timeout.as_secs(),
        }
    } else {
        Md2PdfError::NavigationFailed { detail }
    }
}

/// Run an engine on the blocking pool.
pub async fn export_pdf(
    engine: Arc<dyn PdfEngine>,
    html: String,
    options: PrintOptions,
) -> Result<Vec<u8>, Md2PdfError> {
    tokio::task::spawn_blocking(move || engine.render(&html, &options))
        .await
        .map_err(|e| Md2PdfError::Internal(format!("Export task panicked: {e}")))?
}

/// Write PDF bytes to `path` atomically (temp file + rename).
pub async fn write_pdf(bytes: &[u8], path: &Path) -> Result<(), Md2PdfError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Md2PdfError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let tmp_path = path.with_extension("pdf.tmp");
    tokio::fs::write(&tmp_path, bytes)
        .await
        .map_err(|e| Md2PdfError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Md2PdfError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
}
