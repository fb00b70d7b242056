//! Integration tests for grid tiling.

use pdfcompose::compose::nup::{self, GridPolicy};
use pdfcompose::error::ComposeError;
use pdfcompose::geometry::{Orientation, PaperSize};

use crate::common::{count_ops, page_sizes, test_document};

#[test]
fn test_four_up_partial_last_sheet() {
    let source = test_document(&[(100.0, 100.0); 5]);

    let sheets = nup::compose(&source, &GridPolicy::default()).unwrap();

    // ceil(5 / 4) sheets; the last holds a single page.
    let sizes = page_sizes(&sheets);
    assert_eq!(sizes.len(), 2);
    assert_eq!(count_ops(&sheets, 1, " Do"), 4);
    assert_eq!(count_ops(&sheets, 2, " Do"), 1);
}

#[test]
fn test_sheet_is_portrait_a4_for_portrait_sources() {
    let source = test_document(&[(100.0, 200.0); 4]);
    let sheets = nup::compose(&source, &GridPolicy::default()).unwrap();

    let sizes = page_sizes(&sheets);
    assert_eq!(sizes[0], (595.0, 842.0));
}

#[test]
fn test_auto_landscape_for_landscape_sources() {
    // Landscape sources on a 2x2 grid keep the sheet portrait (grid is not
    // wider than tall), but explicit landscape must be honored.
    let source = test_document(&[(200.0, 100.0); 4]);

    let auto = nup::compose(&source, &GridPolicy::default()).unwrap();
    assert_eq!(page_sizes(&auto)[0], (595.0, 842.0));

    let forced = nup::compose(
        &source,
        &GridPolicy {
            orientation: Orientation::Landscape,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(page_sizes(&forced)[0], (842.0, 595.0));
}

#[test]
fn test_two_up_stacks_vertically() {
    // 2-up is one column of two rows: both placements share an X band.
    let source = test_document(&[(100.0, 100.0); 2]);
    let sheets = nup::compose(
        &source,
        &GridPolicy {
            pages_per_sheet: 2,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(page_sizes(&sheets).len(), 1);
    assert_eq!(count_ops(&sheets, 1, " Do"), 2);
}

#[test]
fn test_border_strokes_one_rect_per_page() {
    let source = test_document(&[(100.0, 100.0); 4]);
    let sheets = nup::compose(
        &source,
        &GridPolicy {
            border: Some("gray".parse().unwrap()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(count_ops(&sheets, 1, "re S"), 4);
}

#[test]
fn test_letter_paper() {
    let source = test_document(&[(100.0, 100.0); 2]);
    let sheets = nup::compose(
        &source,
        &GridPolicy {
            paper_size: PaperSize::Letter,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(page_sizes(&sheets)[0], (612.0, 792.0));
}

#[test]
fn test_invalid_pages_per_sheet() {
    let source = test_document(&[(100.0, 100.0); 3]);
    let err = nup::compose(
        &source,
        &GridPolicy {
            pages_per_sheet: 3,
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, ComposeError::InvalidGrid { got: 3 }));
}
