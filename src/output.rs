//! Conversion results: the captured PDF plus timing and size statistics.

use serde::{Deserialize, Serialize};

/// Result of a full conversion.
///
/// The PDF is returned in memory; [`crate::convert_to_file`] writes it to
/// disk. The composed HTML is kept alongside so callers can inspect exactly
/// what the browser printed.
#[derive(Debug)]
pub struct ConversionOutput {
    /// The captured PDF bytes.
    pub pdf: Vec<u8>,
    /// The complete HTML document that was printed.
    pub html: String,
    /// Document title taken from the first level-1 heading, if any.
    pub title: Option<String>,
    /// Timing and size statistics.
    pub stats: ConversionStats,
}

/// Timing and size statistics for a conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Size of the Markdown source in bytes.
    pub markdown_bytes: usize,
    /// Size of the composed HTML document in bytes.
    pub html_bytes: usize,
    /// Size of the captured PDF in bytes.
    pub pdf_bytes: usize,
    /// Time spent reading the source.
    pub load_duration_ms: u64,
    /// Time spent rendering Markdown and composing the document.
    pub render_duration_ms: u64,
    /// Time spent in the browser, launch to capture.
    pub export_duration_ms: u64,
    /// Wall-clock time for the whole pipeline.
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_serialise_to_json() {
        let stats = ConversionStats {
            markdown_bytes: 120,
            html_bytes: 4096,
            pdf_bytes: 20_000,
            load_duration_ms: 1,
            render_duration_ms: 2,
            export_duration_ms: 900,
            total_duration_ms: 903,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"pdf_bytes\":20000"));

        let back: ConversionStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.export_duration_ms, 900);
    }
}
