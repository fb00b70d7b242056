//! Integration tests for the vertical stack compositor.

use pdfcompose::compose::stack::{self, StackPolicy};
use pdfcompose::error::ComposeError;

use crate::common::{corrupt_page_content, count_ops, page_content, page_sizes, test_document};

#[test]
fn test_stack_dimensions() {
    let source = test_document(&[(100.0, 200.0), (150.0, 100.0), (100.0, 100.0)]);
    let policy = StackPolicy {
        spacing: 10.0,
        ..Default::default()
    };

    let out = stack::compose(&source, &policy).unwrap();

    // Width of the widest page; heights summed plus two gaps.
    assert_eq!(page_sizes(&out), vec![(150.0, 420.0)]);
}

#[test]
fn test_stack_single_output_page_with_all_sources() {
    let source = test_document(&[(100.0, 100.0); 4]);
    let out = stack::compose(&source, &StackPolicy::default()).unwrap();

    assert_eq!(page_sizes(&out).len(), 1);
    assert_eq!(count_ops(&out, 1, " Do"), 4);
}

#[test]
fn test_white_background_is_not_painted() {
    let source = test_document(&[(100.0, 100.0); 2]);
    let out = stack::compose(&source, &StackPolicy::default()).unwrap();
    assert_eq!(count_ops(&out, 1, "re f"), 0);
}

#[test]
fn test_colored_background_is_painted() {
    let source = test_document(&[(100.0, 100.0); 2]);
    let policy = StackPolicy {
        background: "lightgray".parse().unwrap(),
        ..Default::default()
    };
    let out = stack::compose(&source, &policy).unwrap();
    assert_eq!(count_ops(&out, 1, "re f"), 1);
}

#[test]
fn test_separator_rules_between_pages() {
    let source = test_document(&[(100.0, 100.0); 3]);
    let policy = StackPolicy {
        spacing: 20.0,
        draw_separator: true,
        ..Default::default()
    };
    let out = stack::compose(&source, &policy).unwrap();

    // Two gaps, two rules.
    assert_eq!(count_ops(&out, 1, "l S"), 2);
}

#[test]
fn test_undecodable_page_degrades_to_blank_slot() {
    let mut source = test_document(&[(100.0, 200.0), (100.0, 100.0), (100.0, 150.0)]);
    corrupt_page_content(&mut source, 2);

    let out = stack::compose(&source, &StackPolicy::default()).unwrap();
    let content = page_content(&out, 1);

    // Only the two good pages are drawn; their offsets are unaffected.
    assert_eq!(count_ops(&out, 1, " Do"), 2);
    assert!(content.contains("1 0 0 1 0 250 cm"));
    assert!(content.contains("1 0 0 1 0 0 cm"));

    // The failed page's slot is painted over in white.
    assert!(content.contains("1 1 1 rg 0 150 100 100 re f"));
}

#[test]
fn test_undecodable_page_slot_left_to_colored_background() {
    let mut source = test_document(&[(100.0, 100.0); 2]);
    corrupt_page_content(&mut source, 1);

    let policy = StackPolicy {
        background: "lightgray".parse().unwrap(),
        ..Default::default()
    };
    let out = stack::compose(&source, &policy).unwrap();

    // One canvas fill only; the failed slot shows the background.
    assert_eq!(count_ops(&out, 1, " Do"), 1);
    assert_eq!(count_ops(&out, 1, "re f"), 1);
}

#[test]
fn test_negative_spacing_rejected() {
    let source = test_document(&[(100.0, 100.0)]);
    let policy = StackPolicy {
        spacing: -5.0,
        ..Default::default()
    };
    let err = stack::compose(&source, &policy).unwrap_err();
    assert!(matches!(err, ComposeError::InvalidDimension { .. }));
}
