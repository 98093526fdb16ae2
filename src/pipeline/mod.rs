//! Pipeline stages for Markdown-to-PDF conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different PDF backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ export
//! (path)    (HTML)     (browser → PDF)
//! ```
//!
//! 1. [`input`]  — read the Markdown source as UTF-8; derive the default
//!    output path
//! 2. [`render`] — Markdown → HTML fragment via pulldown-cmark, wrapped in
//!    the fixed document shell with the embedded stylesheet
//! 3. [`export`] — drive the headless browser; runs in `spawn_blocking`
//!    because the DevTools client is synchronous

pub mod export;
pub mod input;
pub mod render;
