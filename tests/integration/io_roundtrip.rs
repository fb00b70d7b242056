//! Integration tests for loading and saving through the real filesystem.

use pdfcompose::compose::nup::{self, GridPolicy};
use pdfcompose::io::{PdfReader, PdfWriter};

use crate::common::{page_sizes, test_document};

#[tokio::test]
async fn test_save_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("source.pdf");

    let source = test_document(&[(612.0, 792.0), (595.0, 842.0)]);
    let written = PdfWriter::new().save(source, &path).await.unwrap();
    assert!(written > 0);

    let loaded = PdfReader::new().load(&path).await.unwrap();
    assert_eq!(loaded.page_count, 2);
    assert_eq!(
        page_sizes(&loaded.document),
        vec![(612.0, 792.0), (595.0, 842.0)]
    );
}

#[tokio::test]
async fn test_full_pipeline_through_disk() {
    // Write a source, reload it, tile it, write the result, reload that.
    let dir = tempfile::tempdir().unwrap();
    let src_path = dir.path().join("in.pdf");
    let out_path = dir.path().join("out.pdf");

    PdfWriter::new()
        .save(test_document(&[(100.0, 100.0); 5]), &src_path)
        .await
        .unwrap();

    let loaded = PdfReader::new().load(&src_path).await.unwrap();
    let sheets = nup::compose(&loaded.document, &GridPolicy::default()).unwrap();
    PdfWriter::new().save(sheets, &out_path).await.unwrap();

    let result = PdfReader::new().load(&out_path).await.unwrap();
    assert_eq!(result.page_count, 2);
}

#[tokio::test]
async fn test_uncompressed_writer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.pdf");

    PdfWriter::without_compression()
        .save(test_document(&[(612.0, 792.0)]), &path)
        .await
        .unwrap();

    let loaded = PdfReader::new().load(&path).await.unwrap();
    assert_eq!(loaded.page_count, 1);
}
