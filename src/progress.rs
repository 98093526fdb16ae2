//! Progress-callback trait for pipeline stage events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline moves through its stages.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a terminal spinner, a log file, or a GUI — without the
//! library knowing anything about how the host application communicates. The
//! trait is `Send + Sync` because the export stage runs on a blocking-pool
//! thread.

use std::sync::Arc;

/// The three pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the Markdown source from disk.
    Load,
    /// Converting Markdown to the composed HTML document.
    Render,
    /// Driving the headless browser and capturing the PDF.
    Export,
}

impl Stage {
    /// Short human-readable label, used by progress displays.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Load => "Reading Markdown",
            Stage::Render => "Rendering HTML",
            Stage::Export => "Printing PDF",
        }
    }
}

/// Called by the conversion pipeline as it enters and leaves each stage.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Stages run strictly sequentially, so no internal
/// synchronisation is required — but the export stage executes on a
/// blocking-pool thread, hence the `Send + Sync` bound.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called when a stage begins.
    fn on_stage_start(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called when a stage completes.
    ///
    /// # Arguments
    /// * `stage` — the stage that finished
    /// * `bytes` — size of that stage's product (Markdown, HTML, or PDF)
    fn on_stage_complete(&self, stage: Stage, bytes: usize) {
        let _ = (stage, bytes);
    }

    /// Called once after the pipeline finishes, before any file is written.
    ///
    /// # Arguments
    /// * `pdf_bytes` — size of the captured PDF
    fn on_conversion_complete(&self, pdf_bytes: usize) {
        let _ = pdf_bytes;
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
