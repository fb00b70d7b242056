//! Integration tests for error handling.

use std::path::Path;

use pdfcompose::compose::fit::{self, FitPolicy, TargetSize};
use pdfcompose::compose::nup;
use pdfcompose::compose::stack;
use pdfcompose::error::ComposeError;
use pdfcompose::geometry::Unit;
use pdfcompose::io::PdfReader;

use crate::common::test_document;

#[tokio::test]
async fn test_missing_input_file() {
    let err = PdfReader::new()
        .load(Path::new("/no/such/file.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, ComposeError::FileNotFound { .. }));
}

#[tokio::test]
async fn test_directory_as_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = PdfReader::new().load(dir.path()).await.unwrap_err();
    assert!(matches!(err, ComposeError::NotAFile { .. }));
}

#[tokio::test]
async fn test_garbage_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.pdf");
    tokio::fs::write(&path, b"%PDF-nope").await.unwrap();

    let err = PdfReader::new().load(&path).await.unwrap_err();
    assert!(matches!(err, ComposeError::FailedToLoad { .. }));
}

#[test]
fn test_empty_document_rejected() {
    let empty = test_document(&[]);
    assert!(matches!(
        nup::compose(&empty, &Default::default()).unwrap_err(),
        ComposeError::NoPages
    ));
    assert!(matches!(
        fit::compose(&empty, &FitPolicy::default()).unwrap_err(),
        ComposeError::NoPages
    ));
    assert!(matches!(
        stack::compose(&empty, &Default::default()).unwrap_err(),
        ComposeError::NoPages
    ));
}

#[test]
fn test_non_positive_custom_dimension() {
    let source = test_document(&[(100.0, 100.0)]);
    let policy = FitPolicy {
        target: TargetSize::Custom {
            width: 0.0,
            height: 297.0,
            unit: Unit::Millimeters,
        },
        ..Default::default()
    };
    let err = fit::compose(&source, &policy).unwrap_err();
    assert!(err.is_policy_error());
}

#[test]
fn test_policy_errors_precede_page_processing() {
    // An invalid grid fails identically with and without pages, so the
    // validation cannot depend on having processed any page.
    let with_pages = test_document(&[(100.0, 100.0); 3]);
    let empty = test_document(&[]);
    let bad = nup::GridPolicy {
        pages_per_sheet: 7,
        ..Default::default()
    };
    assert!(matches!(
        nup::compose(&with_pages, &bad).unwrap_err(),
        ComposeError::InvalidGrid { got: 7 }
    ));
    assert!(matches!(
        nup::compose(&empty, &bad).unwrap_err(),
        ComposeError::InvalidGrid { got: 7 }
    ));
}
