//! Document rendering: Markdown → HTML fragment → complete HTML document.
//!
//! Markdown parsing is delegated entirely to `pulldown-cmark`; this module
//! never inspects Markdown syntax itself beyond pulling a title out of the
//! first heading. The fragment is then wrapped in a fixed HTML5 shell with
//! the stylesheet embedded, producing the single self-contained document the
//! export stage hands to the browser.
//!
//! ## Why a self-contained document?
//!
//! Embedding the stylesheet (instead of linking it) means the page has zero
//! external references: the browser's load event is the only readiness
//! signal the exporter needs to wait for, and the output is identical no
//! matter which directory the temp file lands in.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use regex::Regex;
use tracing::debug;

/// Convert raw Markdown text to an HTML fragment.
///
/// Extensions beyond CommonMark: GFM tables, strikethrough, footnotes, and
/// task lists. These cover the constructs the stylesheet knows how to
/// present; anything else pulldown-cmark emits falls back to browser
/// defaults.
pub fn render_fragment(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut fragment = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut fragment, parser);

    debug!("Rendered {} bytes of HTML fragment", fragment.len());
    fragment
}

static RE_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#[ \t]+(.+?)[ \t]*#*[ \t]*$").unwrap());

/// Extract the first ATX level-1 heading as the document title.
///
/// Inline markup inside the heading is kept verbatim — the title lands in
/// `<title>`, which renders plain text anyway.
pub fn extract_title(markdown: &str) -> Option<String> {
    RE_H1
        .captures(markdown)
        .map(|caps| caps[1].trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Wrap an HTML fragment in the fixed document shell.
///
/// The shell is a minimal HTML5 skeleton: UTF-8 charset, the stylesheet
/// embedded in `<head>`, and the fragment inside a single
/// `.content-wrapper` container that caps the layout width.
pub fn compose_document(fragment: &str, title: &str, stylesheet: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{}</title>\n\
         <style>\n{}</style>\n\
         </head>\n\
         <body>\n\
         <div class=\"content-wrapper\">\n{}</div>\n\
         </body>\n\
         </html>\n",
        escape_text(title),
        stylesheet,
        fragment
    )
}

/// Minimal HTML text escaping for the title element.
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# Release Notes\n\n\
        Some *emphasis* and **strong** text with `inline code`.\n\n\
        ```rust\nfn main() {}\n```\n\n\
        | Name | Value |\n|------|-------|\n| a    | 1     |\n\n\
        > A quoted remark.\n\n\
        - item one\n- item two\n";

    #[test]
    fn fragment_contains_expected_elements() {
        let html = render_fragment(SAMPLE);
        assert!(html.contains("<h1>"), "missing h1 in: {html}");
        assert!(html.contains("<em>"));
        assert!(html.contains("<strong>"));
        assert!(html.contains("<pre>"));
        assert!(html.contains("<code"));
        assert!(html.contains("<table>"));
        assert!(html.contains("<blockquote>"));
        assert!(html.contains("<ul>"));
    }

    #[test]
    fn fragment_supports_ordered_lists_and_deep_headings() {
        let html = render_fragment("###### deep\n\n1. first\n2. second\n");
        assert!(html.contains("<h6>"));
        assert!(html.contains("<ol>"));
    }

    #[test]
    fn fragment_supports_strikethrough_and_tasklists() {
        let html = render_fragment("~~gone~~\n\n- [x] done\n- [ ] todo\n");
        assert!(html.contains("<del>"));
        assert!(html.contains("type=\"checkbox\""));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render_fragment(SAMPLE), render_fragment(SAMPLE));
    }

    #[test]
    fn title_from_first_h1() {
        assert_eq!(extract_title(SAMPLE).as_deref(), Some("Release Notes"));
    }

    #[test]
    fn title_ignores_deeper_headings() {
        assert_eq!(extract_title("## Only a subtitle\n\ntext\n"), None);
    }

    #[test]
    fn title_skips_leading_content() {
        let md = "intro paragraph\n\n# Actual Title\n";
        assert_eq!(extract_title(md).as_deref(), Some("Actual Title"));
    }

    #[test]
    fn title_strips_closing_hashes() {
        assert_eq!(extract_title("# Closed #\n").as_deref(), Some("Closed"));
    }

    #[test]
    fn composed_document_structure() {
        let doc = compose_document("<p>hi</p>", "Doc", "body { margin: 0; }");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<meta charset=\"utf-8\">"));
        assert!(doc.contains("<title>Doc</title>"));
        assert!(doc.contains("body { margin: 0; }"));
        assert!(doc.contains("<div class=\"content-wrapper\">"));
        assert!(doc.contains("<p>hi</p>"));
        assert!(doc.trim_end().ends_with("</html>"));
    }

    #[test]
    fn composed_title_is_escaped() {
        let doc = compose_document("<p></p>", "a < b & c", "");
        assert!(doc.contains("<title>a &lt; b &amp; c</title>"));
    }
}
