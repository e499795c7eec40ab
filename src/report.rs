//! Report file loading
//!
//! Mirrors the chooser's `.pdf,image/*` filter for files picked from disk.

use crate::error::{DetectError, Result};
use std::path::Path;

/// A report picked for upload
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

const REPORT_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

/// MIME type for a supported report extension (case-insensitive)
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    REPORT_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

pub fn load_report(path: &Path) -> Result<ReportFile> {
    if !path.is_file() {
        return Err(DetectError::FileNotFound(path.display().to_string()));
    }

    let mime = path
        .extension()
        .and_then(|ext| mime_for_extension(&ext.to_string_lossy()))
        .ok_or_else(|| DetectError::UnsupportedFile(path.display().to_string()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let bytes = std::fs::read(path)?;
    tracing::debug!(file = %name, size = bytes.len(), mime, "loaded report");

    Ok(ReportFile { name, mime, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for_extension("pdf"), Some("application/pdf"));
        assert_eq!(mime_for_extension("JPG"), Some("image/jpeg"));
        assert_eq!(mime_for_extension("Tiff"), Some("image/tiff"));
        assert_eq!(mime_for_extension("docx"), None);
        assert_eq!(mime_for_extension(""), None);
    }
}
