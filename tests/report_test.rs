//! Report file loading tests

use std::path::Path;
use tempfile::tempdir;
use thalassemia_detect::error::DetectError;
use thalassemia_detect::report::load_report;

#[test]
fn test_load_missing_report() {
    let result = load_report(Path::new("/nonexistent/path/report.pdf"));
    assert!(matches!(result, Err(DetectError::FileNotFound(_))));
}

#[test]
fn test_load_directory_is_not_a_report() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = load_report(dir.path());
    assert!(matches!(result, Err(DetectError::FileNotFound(_))));
}

#[test]
fn test_load_pdf_report() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, b"%PDF-1.4").unwrap();

    let report = load_report(&path).expect("load failed");
    assert_eq!(report.name, "report.pdf");
    assert_eq!(report.mime, "application/pdf");
    assert_eq!(report.bytes, b"%PDF-1.4");
}

#[test]
fn test_load_uppercase_image_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("CBC.JPG");
    std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

    let report = load_report(&path).expect("load failed");
    assert_eq!(report.mime, "image/jpeg");
}

#[test]
fn test_reject_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    for name in ["report.docx", "notes.txt", "no_extension"] {
        let path = dir.path().join(name);
        std::fs::write(&path, "hello").unwrap();
        let result = load_report(&path);
        assert!(
            matches!(result, Err(DetectError::UnsupportedFile(_))),
            "{} should be rejected",
            name
        );
    }
}
