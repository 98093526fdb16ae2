//! The embedded stylesheet applied to every converted document.
//!
//! Centralising the CSS here serves two purposes:
//!
//! 1. **Single source of truth** — tweaking the document look (heading
//!    colours, code-block fill, table borders) means editing exactly one
//!    place.
//!
//! 2. **Testability** — unit tests can assert that every styled category
//!    (headings, lists, code, tables, blockquotes) is present without
//!    rendering anything.
//!
//! Callers can override the whole sheet via
//! [`crate::config::ConversionConfig::stylesheet`]; the constant here is
//! used only when no override is provided.

/// Default stylesheet embedded into the composed HTML document.
///
/// Page margins are intentionally absent from `body`: the browser's
/// `printToPDF` margins (see [`crate::config::ConversionConfig::margin_cm`])
/// own the page geometry, and a competing CSS margin would double it.
/// `.content-wrapper` caps the line length for print-like reading.
pub const DEFAULT_STYLESHEET: &str = r#"body {
  font-family: 'Segoe UI', Arial, sans-serif;
  color: #222;
  background: #fff;
  font-size: 16px;
  line-height: 1.7;
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}
.content-wrapper {
  max-width: 800px;
  margin: 0 auto;
  padding: 0;
}
h1, h2, h3, h4, h5, h6 {
  font-family: 'Segoe UI', Arial, sans-serif;
  font-weight: 700;
  color: #1a237e;
  margin-top: 0.7em;
  margin-bottom: 0.4em;
}
h1 {
  font-size: 1.6em;
  border-bottom: 2px solid #1a237e;
  padding-bottom: 0.2em;
  margin-top: 0;
}
h2 {
  font-size: 1.2em;
  border-bottom: 1px solid #3949ab;
  padding-bottom: 0.15em;
  margin-top: 1em;
}
h3 {
  font-size: 1.05em;
  margin-top: 0.8em;
}
ul, ol {
  margin-left: 2em;
  margin-bottom: 1em;
}
li {
  margin-bottom: 0.4em;
}
strong {
  color: #0d47a1;
}
code {
  background: #23272e;
  color: #ffe082;
  padding: 2px 6px;
  border-radius: 6px;
  font-size: 0.97em;
  font-family: 'Fira Mono', 'Consolas', 'Menlo', monospace;
}
pre {
  background: #23272e;
  color: #e8eaed;
  padding: 16px;
  border-radius: 8px;
  overflow-x: auto;
  font-size: 0.97em;
  font-family: 'Fira Mono', 'Consolas', 'Menlo', monospace;
  margin-bottom: 1.2em;
}
pre code {
  background: none;
  color: inherit;
  padding: 0;
  border-radius: 0;
  font-size: inherit;
  font-family: inherit;
}
table {
  border-collapse: collapse;
  width: 100%;
  margin-bottom: 1.5em;
}
th, td {
  border: 1px solid #bdbdbd;
  padding: 8px 12px;
  text-align: left;
}
th {
  background: #e3eafc;
}
blockquote {
  border-left: 4px solid #90caf9;
  background: #f1f8ff;
  margin: 1em 0;
  padding: 0.8em 1.2em;
  color: #333;
  font-style: italic;
}
@media print {
  body { margin: 0; }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    /// Every content category the converter emits must have a rule,
    /// otherwise that category silently falls back to browser defaults.
    #[test]
    fn stylesheet_covers_all_categories() {
        for selector in [
            "body", ".content-wrapper", "h1", "h2", "h3", "ul, ol", "code", "pre", "table",
            "th, td", "blockquote", "@media print",
        ] {
            assert!(
                DEFAULT_STYLESHEET.contains(selector),
                "stylesheet is missing a rule for {selector:?}"
            );
        }
    }

    #[test]
    fn stylesheet_is_plain_css() {
        // The sheet is injected inside a <style> element; a stray tag here
        // would break out of it.
        assert!(!DEFAULT_STYLESHEET.contains("<style"));
        assert!(!DEFAULT_STYLESHEET.contains("</style"));
    }
}
