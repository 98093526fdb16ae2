//! Input loading: read the Markdown source and derive the output path.
//!
//! The loader reads the whole document into memory in one call — there is no
//! streaming and no size limit. A Markdown file large enough to matter here
//! would be unprintable long before it became unreadable.
//!
//! Failure cases are mapped to specific [`Md2PdfError`] variants up front
//! (missing file, permission, encoding) so the user sees a targeted message
//! instead of a raw OS error string.

use crate::error::Md2PdfError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read the Markdown source document as UTF-8 text.
pub async fn load_markdown(path: &Path) -> Result<String, Md2PdfError> {
    if !path.exists() {
        return Err(Md2PdfError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Md2PdfError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => Md2PdfError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Md2PdfError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let text = String::from_utf8(bytes).map_err(|_| Md2PdfError::NotUtf8 {
        path: path.to_path_buf(),
    })?;

    debug!("Loaded {} bytes of Markdown from {}", text.len(), path.display());
    Ok(text)
}

/// Derive the default output path: same directory and base name as the
/// input, extension replaced with `.pdf`.
///
/// `doc.md` → `doc.pdf`, `notes.markdown` → `notes.pdf`; an extension-less
/// input gains `.pdf`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}
