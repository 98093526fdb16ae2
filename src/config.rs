//! Configuration types for Markdown-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across threads, log them, and diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A ten-field constructor is unreadable and breaks on every new field. The
//! builder lets callers set only what they care about and rely on documented
//! defaults for the rest.

use crate::error::Md2PdfError;
use crate::pipeline::export::PdfEngine;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for a Markdown-to-PDF conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use md2pdf::{ConversionConfig, PaperFormat};
///
/// let config = ConversionConfig::builder()
///     .paper_format(PaperFormat::A4)
///     .margin_cm(1.0)
///     .load_timeout_secs(30)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Physical page size of the exported PDF. Default: [`PaperFormat::A4`].
    pub paper_format: PaperFormat,

    /// Uniform page margin in centimetres, applied to all four sides.
    /// Default: 1.0.
    ///
    /// Margins are owned by the browser's print pipeline, not by CSS — the
    /// embedded stylesheet deliberately zeroes the `body` margin so the two
    /// do not stack.
    pub margin_cm: f64,

    /// Maximum time to wait for the page to finish loading, in seconds.
    /// Default: 30.
    ///
    /// The composed document is self-contained (no external resources), so
    /// in practice it settles in well under a second. The bound exists so a
    /// wedged browser process fails the conversion instead of hanging it
    /// forever.
    pub load_timeout_secs: u64,

    /// Explicit path to a Chromium-family browser binary.
    ///
    /// If `None`, the path is resolved at launch: `MD2PDF_BROWSER`, then
    /// `CHROME`, then the standard macOS Google Chrome install location,
    /// then the engine's own search of well-known names on `PATH`.
    pub browser_path: Option<PathBuf>,

    /// Run the browser with its sandbox enabled. Default: false.
    ///
    /// Disabled by default so the tool works inside containers and CI
    /// runners, where the Chromium sandbox cannot acquire the privileges it
    /// needs. Enable for defence-in-depth when converting untrusted input
    /// on a desktop.
    pub sandbox: bool,

    /// Ask the browser to print background colours and images. Default: true.
    ///
    /// The default stylesheet relies on this for code-block and blockquote
    /// fills. Chromium omits backgrounds from print output unless told
    /// otherwise.
    pub print_background: bool,

    /// Replacement stylesheet. If `None`, uses
    /// [`crate::style::DEFAULT_STYLESHEET`].
    pub stylesheet: Option<String>,

    /// Pre-constructed PDF engine. Takes precedence over the browser fields
    /// above; useful in tests or to substitute a non-Chromium backend.
    pub engine: Option<Arc<dyn PdfEngine>>,

    /// Optional observer for pipeline stage events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            paper_format: PaperFormat::default(),
            margin_cm: 1.0,
            load_timeout_secs: 30,
            browser_path: None,
            sandbox: false,
            print_background: true,
            stylesheet: None,
            engine: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("paper_format", &self.paper_format)
            .field("margin_cm", &self.margin_cm)
            .field("load_timeout_secs", &self.load_timeout_secs)
            .field("browser_path", &self.browser_path)
            .field("sandbox", &self.sandbox)
            .field("print_background", &self.print_background)
            .field("stylesheet", &self.stylesheet.as_ref().map(|s| s.len()))
            .field("engine", &self.engine.as_ref().map(|_| "<dyn PdfEngine>"))
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// The stylesheet in effect: the configured override or the built-in one.
    pub fn effective_stylesheet(&self) -> &str {
        self.stylesheet
            .as_deref()
            .unwrap_or(crate::style::DEFAULT_STYLESHEET)
    }

    /// Resolve the browser executable path, from most to least specific.
    ///
    /// 1. `browser_path` set by the caller.
    /// 2. `MD2PDF_BROWSER` environment variable.
    /// 3. `CHROME` environment variable (honoured by other Chromium tooling).
    /// 4. The standard macOS Google Chrome install path, if it exists — on
    ///    macOS no browser is assumed discoverable on `PATH`.
    ///
    /// Returns `None` when nothing matched; the engine then falls back to
    /// its own search of well-known binary names.
    pub fn resolve_browser_path(&self) -> Option<PathBuf> {
        if let Some(ref p) = self.browser_path {
            return Some(p.clone());
        }
        for var in ["MD2PDF_BROWSER", "CHROME"] {
            if let Ok(v) = std::env::var(var) {
                if !v.is_empty() {
                    return Some(PathBuf::from(v));
                }
            }
        }
        #[cfg(target_os = "macos")]
        {
            let default = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
            if default.exists() {
                return Some(default);
            }
        }
        None
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn paper_format(mut self, format: PaperFormat) -> Self {
        self.config.paper_format = format;
        self
    }

    pub fn margin_cm(mut self, cm: f64) -> Self {
        self.config.margin_cm = cm.max(0.0);
        self
    }

    pub fn load_timeout_secs(mut self, secs: u64) -> Self {
        self.config.load_timeout_secs = secs.max(1);
        self
    }

    pub fn browser_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.browser_path = Some(path.into());
        self
    }

    pub fn sandbox(mut self, v: bool) -> Self {
        self.config.sandbox = v;
        self
    }

    pub fn print_background(mut self, v: bool) -> Self {
        self.config.print_background = v;
        self
    }

    pub fn stylesheet(mut self, css: impl Into<String>) -> Self {
        self.config.stylesheet = Some(css.into());
        self
    }

    pub fn engine(mut self, engine: Arc<dyn PdfEngine>) -> Self {
        self.config.engine = Some(engine);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2PdfError> {
        let c = &self.config;
        if !c.margin_cm.is_finite() || c.margin_cm < 0.0 {
            return Err(Md2PdfError::InvalidConfig(format!(
                "Margin must be a non-negative number of centimetres, got {}",
                c.margin_cm
            )));
        }
        // Half the page must remain for content after both margins.
        let max_margin = c.paper_format.width_in() * CM_PER_INCH / 4.0;
        if c.margin_cm > max_margin {
            return Err(Md2PdfError::InvalidConfig(format!(
                "Margin {}cm leaves no room for content on {} paper (max {:.1}cm)",
                c.margin_cm,
                c.paper_format.name(),
                max_margin
            )));
        }
        if c.load_timeout_secs == 0 {
            return Err(Md2PdfError::InvalidConfig(
                "Load timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Centimetres per inch; the browser's print API speaks inches, the CLI
/// speaks centimetres.
pub const CM_PER_INCH: f64 = 2.54;

/// Physical page size of the exported PDF.
///
/// Chromium's `printToPDF` takes paper dimensions in inches, so the variants
/// carry their ISO/ANSI sizes pre-converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperFormat {
    /// ISO A4: 210 × 297 mm. (default)
    #[default]
    A4,
    /// ANSI Letter: 8.5 × 11 in.
    Letter,
    /// ANSI Legal: 8.5 × 14 in.
    Legal,
}

impl PaperFormat {
    /// Paper width in inches.
    pub fn width_in(&self) -> f64 {
        match self {
            PaperFormat::A4 => 8.27,
            PaperFormat::Letter | PaperFormat::Legal => 8.5,
        }
    }

    /// Paper height in inches.
    pub fn height_in(&self) -> f64 {
        match self {
            PaperFormat::A4 => 11.69,
            PaperFormat::Letter => 11.0,
            PaperFormat::Legal => 14.0,
        }
    }

    /// Human-readable name for messages.
    pub fn name(&self) -> &'static str {
        match self {
            PaperFormat::A4 => "A4",
            PaperFormat::Letter => "Letter",
            PaperFormat::Legal => "Legal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ConversionConfig::builder().build().expect("valid");
        assert_eq!(config.paper_format, PaperFormat::A4);
        assert!((config.margin_cm - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.load_timeout_secs, 30);
        assert!(!config.sandbox);
        assert!(config.print_background);
    }

    #[test]
    fn builder_clamps_negative_margin() {
        let config = ConversionConfig::builder().margin_cm(-3.0).build().unwrap();
        assert_eq!(config.margin_cm, 0.0);
    }

    #[test]
    fn builder_rejects_absurd_margin() {
        // 10cm margins on A4 leave nothing to print on.
        let mut config = ConversionConfig::default();
        config.margin_cm = 10.0;
        let result = ConversionConfigBuilder { config }.build();
        assert!(result.is_err());
    }

    #[test]
    fn builder_clamps_zero_timeout() {
        let config = ConversionConfig::builder()
            .load_timeout_secs(0)
            .build()
            .unwrap();
        assert_eq!(config.load_timeout_secs, 1);
    }

    #[test]
    fn effective_stylesheet_default_and_override() {
        let config = ConversionConfig::default();
        assert_eq!(
            config.effective_stylesheet(),
            crate::style::DEFAULT_STYLESHEET
        );

        let config = ConversionConfig::builder()
            .stylesheet("body { color: red; }")
            .build()
            .unwrap();
        assert_eq!(config.effective_stylesheet(), "body { color: red; }");
    }

    #[test]
    fn explicit_browser_path_wins() {
        let config = ConversionConfig::builder()
            .browser_path("/opt/chromium/chrome")
            .build()
            .unwrap();
        assert_eq!(
            config.resolve_browser_path(),
            Some(PathBuf::from("/opt/chromium/chrome"))
        );
    }

    #[test]
    fn paper_dimensions() {
        assert!((PaperFormat::A4.width_in() - 8.27).abs() < 1e-9);
        assert!((PaperFormat::A4.height_in() - 11.69).abs() < 1e-9);
        assert!((PaperFormat::Letter.height_in() - 11.0).abs() < 1e-9);
        assert!((PaperFormat::Legal.height_in() - 14.0).abs() < 1e-9);
    }

    #[test]
    fn paper_format_serde_round_trip() {
        let json = serde_json::to_string(&PaperFormat::Letter).unwrap();
        assert_eq!(json, "\"letter\"");
        let back: PaperFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PaperFormat::Letter);
    }
}
