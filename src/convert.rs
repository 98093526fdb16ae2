//! Conversion entry points.
//!
//! The pipeline is strictly sequential — read, render, export — with a
//! single attempt and no retries. One Markdown document in, one PDF out;
//! every failure propagates to the caller untouched.

use crate::config::ConversionConfig;
use crate::error::Md2PdfError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::export::{self, ChromiumEngine, PdfEngine, PrintOptions};
use crate::pipeline::{input, render};
use crate::progress::Stage;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Convert a Markdown file to PDF, returning the bytes in memory.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input_path` — path to the Markdown source document
/// * `config` — conversion configuration
///
/// # Errors
/// Returns `Err(Md2PdfError)` when the source cannot be read, the browser
/// cannot be launched, the page does not settle within the configured
/// timeout, or PDF capture fails. There is no partial success.
pub async fn convert(
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    let total_start = Instant::now();
    let input_path = input_path.as_ref();
    info!("Starting conversion: {}", input_path.display());

    let cb = config.progress_callback.as_ref();

    // ── Stage 1: Load ────────────────────────────────────────────────────
    let load_start = Instant::now();
    if let Some(cb) = cb {
        cb.on_stage_start(Stage::Load);
    }
    let markdown = input::load_markdown(input_path).await?;
    let load_duration_ms = load_start.elapsed().as_millis() as u64;
    if let Some(cb) = cb {
        cb.on_stage_complete(Stage::Load, markdown.len());
    }

    // ── Stage 2: Render ──────────────────────────────────────────────────
    let render_start = Instant::now();
    if let Some(cb) = cb {
        cb.on_stage_start(Stage::Render);
    }
    let (html, title) = render_stage(&markdown, input_path, config);
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    if let Some(cb) = cb {
        cb.on_stage_complete(Stage::Render, html.len());
    }

    // ── Stage 3: Export ──────────────────────────────────────────────────
    let export_start = Instant::now();
    if let Some(cb) = cb {
        cb.on_stage_start(Stage::Export);
    }
    let engine = resolve_engine(config);
    let pdf = export::export_pdf(engine, html.clone(), PrintOptions::from_config(config)).await?;
    let export_duration_ms = export_start.elapsed().as_millis() as u64;
    if let Some(cb) = cb {
        cb.on_stage_complete(Stage::Export, pdf.len());
    }

    let stats = ConversionStats {
        markdown_bytes: markdown.len(),
        html_bytes: html.len(),
        pdf_bytes: pdf.len(),
        load_duration_ms,
        render_duration_ms,
        export_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} bytes of PDF in {}ms",
        stats.pdf_bytes, stats.total_duration_ms
    );

    if let Some(cb) = cb {
        cb.on_conversion_complete(pdf.len());
    }

    Ok(ConversionOutput {
        pdf,
        html,
        title,
        stats,
    })
}

/// Convert a Markdown file and write the PDF to `output_path`.
///
/// Uses atomic write (temp file + rename) so a failed run never leaves a
/// truncated PDF at the target path.
pub async fn convert_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Md2PdfError> {
    let output = convert(input_path, config).await?;
    export::write_pdf(&output.pdf, output_path.as_ref()).await?;
    Ok(output.stats)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Md2PdfError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(input_path, config))
}

/// Run only the first two stages: read the source and compose the HTML
/// document, without launching a browser.
///
/// Useful for checking what the browser would be asked to print — styling
/// problems show up here long before a PDF is involved.
pub async fn render_document(
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<String, Md2PdfError> {
    let input_path = input_path.as_ref();
    let markdown = input::load_markdown(input_path).await?;
    let (html, _) = render_stage(&markdown, input_path, config);
    Ok(html)
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Markdown → composed HTML document, with the title fallback chain:
/// first `#` heading, else the input file stem.
fn render_stage(
    markdown: &str,
    input_path: &Path,
    config: &ConversionConfig,
) -> (String, Option<String>) {
    let fragment = render::render_fragment(markdown);
    let title = render::extract_title(markdown);
    let effective_title = title.clone().unwrap_or_else(|| {
        input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Document".to_string())
    });
    let html = render::compose_document(&fragment, &effective_title, config.effective_stylesheet());
    (html, title)
}

/// Resolve the PDF engine: a pre-built engine from the config if the caller
/// supplied one, otherwise a Chromium engine built from the browser fields.
fn resolve_engine(config: &ConversionConfig) -> Arc<dyn PdfEngine> {
    if let Some(ref engine) = config.engine {
        return Arc::clone(engine);
    }
    Arc::new(ChromiumEngine::from_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Engine double: records the HTML it was given, returns fixed bytes.
    struct CapturingEngine {
        seen_html: Mutex<Option<String>>,
    }

    impl PdfEngine for CapturingEngine {
        fn render(&self, html: &str, _options: &PrintOptions) -> Result<Vec<u8>, Md2PdfError> {
            *self.seen_html.lock().unwrap() = Some(html.to_string());
            Ok(b"%PDF-1.7 stub".to_vec())
        }
    }

    fn config_with_engine(engine: Arc<dyn PdfEngine>) -> ConversionConfig {
        ConversionConfig::builder().engine(engine).build().unwrap()
    }

    #[tokio::test]
    async fn convert_runs_full_pipeline_with_stub_engine() {
        let dir = tempfile::tempdir().unwrap();
        let md_path = dir.path().join("doc.md");
        std::fs::write(&md_path, "# Title\n\nbody text\n").unwrap();

        let engine = Arc::new(CapturingEngine {
            seen_html: Mutex::new(None),
        });
        let config = config_with_engine(engine.clone());

        let output = convert(&md_path, &config).await.unwrap();

        assert_eq!(output.pdf, b"%PDF-1.7 stub");
        assert_eq!(output.title.as_deref(), Some("Title"));
        assert_eq!(output.stats.pdf_bytes, output.pdf.len());
        assert!(output.stats.markdown_bytes > 0);
        assert!(output.stats.html_bytes > output.stats.markdown_bytes);

        // The engine saw the same document the caller got back.
        let seen = engine.seen_html.lock().unwrap().clone().unwrap();
        assert_eq!(seen, output.html);
        assert!(seen.contains("<h1>Title</h1>"));
    }

    #[tokio::test]
    async fn convert_to_file_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let md_path = dir.path().join("doc.md");
        std::fs::write(&md_path, "hello\n").unwrap();
        let out_path = dir.path().join("doc.pdf");

        let engine = Arc::new(CapturingEngine {
            seen_html: Mutex::new(None),
        });
        let stats = convert_to_file(&md_path, &out_path, &config_with_engine(engine))
            .await
            .unwrap();

        let written = std::fs::read(&out_path).unwrap();
        assert!(written.starts_with(b"%PDF"));
        assert_eq!(stats.pdf_bytes, written.len());
    }

    #[tokio::test]
    async fn convert_missing_input_fails_before_engine() {
        struct PanicEngine;
        impl PdfEngine for PanicEngine {
            fn render(&self, _: &str, _: &PrintOptions) -> Result<Vec<u8>, Md2PdfError> {
                panic!("engine must not run when input loading fails");
            }
        }

        let config = config_with_engine(Arc::new(PanicEngine));
        let err = convert("/no/such/input.md", &config).await.unwrap_err();
        assert!(matches!(err, Md2PdfError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn title_falls_back_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let md_path = dir.path().join("release-notes.md");
        std::fs::write(&md_path, "no heading here\n").unwrap();

        let engine = Arc::new(CapturingEngine {
            seen_html: Mutex::new(None),
        });
        let config = config_with_engine(engine.clone());
        let output = convert(&md_path, &config).await.unwrap();

        assert_eq!(output.title, None);
        let seen = engine.seen_html.lock().unwrap().clone().unwrap();
        assert!(seen.contains("<title>release-notes</title>"));
    }

    #[tokio::test]
    async fn render_document_skips_the_engine() {
        let dir = tempfile::tempdir().unwrap();
        let md_path = dir.path().join("doc.md");
        std::fs::write(&md_path, "# Preview\n\n> quoted\n").unwrap();

        // Default config would build a ChromiumEngine, but render_document
        // must never reach the export stage.
        let html = render_document(&md_path, &ConversionConfig::default())
            .await
            .unwrap();
        assert!(html.contains("<blockquote>"));
        assert!(html.contains("<title>Preview</title>"));
    }
}
