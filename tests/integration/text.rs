//! Integration tests for page numbering and header/footer stamping.

use pdfcompose::compose::text::{
    BandSlots, HeaderFooterPolicy, NumberingPolicy, add_headers_footers, add_page_numbers,
};
use pdfcompose::error::ComposeError;
use pdfcompose::font::BuiltinFont;

use crate::common::{count_ops, page_content, page_sizes, test_document};

const FONT: BuiltinFont = BuiltinFont::Helvetica;

#[test]
fn test_numbers_every_page_by_default() {
    let source = test_document(&[(612.0, 792.0); 3]);
    let out = add_page_numbers(&source, &NumberingPolicy::default(), FONT).unwrap();

    assert_eq!(page_sizes(&out).len(), 3);
    for page in 1..=3u32 {
        assert!(page_content(&out, page).contains(&format!("({page}) Tj")));
    }
}

#[test]
fn test_template_substitution() {
    let source = test_document(&[(612.0, 792.0); 2]);
    let policy = NumberingPolicy {
        template: "Page {page} of {total}".to_string(),
        ..Default::default()
    };
    let out = add_page_numbers(&source, &policy, FONT).unwrap();

    assert!(page_content(&out, 1).contains("(Page 1 of 2) Tj"));
    assert!(page_content(&out, 2).contains("(Page 2 of 2) Tj"));
}

#[test]
fn test_page_range_skips_unselected_pages() {
    let source = test_document(&[(612.0, 792.0); 4]);
    let policy = NumberingPolicy {
        pages: Some("2-3".parse().unwrap()),
        ..Default::default()
    };
    let out = add_page_numbers(&source, &policy, FONT).unwrap();

    assert_eq!(count_ops(&out, 1, "Tj"), 0);
    assert_eq!(count_ops(&out, 2, "Tj"), 1);
    assert_eq!(count_ops(&out, 3, "Tj"), 1);
    assert_eq!(count_ops(&out, 4, "Tj"), 0);
    // Unselected pages still carry their original content.
    assert_eq!(count_ops(&out, 1, " Do"), 1);
}

#[test]
fn test_range_beyond_document_rejected() {
    let source = test_document(&[(612.0, 792.0); 3]);
    let policy = NumberingPolicy {
        pages: Some("5-9".parse().unwrap()),
        ..Default::default()
    };
    let err = add_page_numbers(&source, &policy, FONT).unwrap_err();
    assert!(matches!(err, ComposeError::InvalidPageRange { .. }));
}

#[test]
fn test_zero_font_size_rejected() {
    let source = test_document(&[(612.0, 792.0)]);
    let policy = NumberingPolicy {
        font_size: 0.0,
        ..Default::default()
    };
    assert!(add_page_numbers(&source, &policy, FONT).is_err());
}

#[test]
fn test_header_footer_slots() {
    let source = test_document(&[(612.0, 792.0); 2]);
    let policy = HeaderFooterPolicy {
        header: BandSlots {
            left: Some("Report".to_string()),
            center: None,
            right: Some("{page}/{total}".to_string()),
        },
        footer: BandSlots {
            left: None,
            center: Some("Confidential".to_string()),
            right: None,
        },
        ..Default::default()
    };
    let out = add_headers_footers(&source, &policy, FONT).unwrap();

    let content = page_content(&out, 1);
    assert!(content.contains("(Report) Tj"));
    assert!(content.contains("(1/2) Tj"));
    assert!(content.contains("(Confidential) Tj"));
    assert_eq!(count_ops(&out, 1, "Tj"), 3);
}

#[test]
fn test_header_footer_requires_some_text() {
    let source = test_document(&[(612.0, 792.0)]);
    let err = add_headers_footers(&source, &HeaderFooterPolicy::default(), FONT).unwrap_err();
    assert!(err.is_policy_error());
}

#[test]
fn test_label_with_parens_is_escaped() {
    let source = test_document(&[(612.0, 792.0)]);
    let policy = NumberingPolicy {
        template: "({page})".to_string(),
        ..Default::default()
    };
    let out = add_page_numbers(&source, &policy, FONT).unwrap();
    assert!(page_content(&out, 1).contains("(\\(1\\)) Tj"));
}
