//! Integration tests for dimension standardization.

use pdfcompose::compose::fit::{self, FitPolicy, TargetSize};
use pdfcompose::geometry::{Orientation, PaperSize, ScalingMode, Unit};

use crate::common::{count_ops, page_content, page_sizes, test_document};

#[test]
fn test_mixed_sizes_standardize_to_a4() {
    let source = test_document(&[(612.0, 792.0), (200.0, 100.0), (842.0, 1191.0)]);

    let out = fit::compose(&source, &FitPolicy::default()).unwrap();

    assert_eq!(
        page_sizes(&out),
        vec![(595.0, 842.0), (595.0, 842.0), (595.0, 842.0)]
    );
}

#[test]
fn test_every_page_gets_background_and_placement() {
    let source = test_document(&[(300.0, 300.0); 2]);
    let out = fit::compose(&source, &FitPolicy::default()).unwrap();

    for page in 1..=2 {
        assert_eq!(count_ops(&out, page, "re f"), 1);
        assert_eq!(count_ops(&out, page, " Do"), 1);
    }
}

#[test]
fn test_custom_size_in_millimeters() {
    let source = test_document(&[(100.0, 100.0)]);
    let policy = FitPolicy {
        target: TargetSize::Custom {
            width: 210.0,
            height: 297.0,
            unit: Unit::Millimeters,
        },
        ..Default::default()
    };
    let out = fit::compose(&source, &policy).unwrap();

    let (w, h) = page_sizes(&out)[0];
    assert!((w - 210.0 * 72.0 / 25.4).abs() < 0.01);
    assert!((h - 297.0 * 72.0 / 25.4).abs() < 0.01);
}

#[test]
fn test_landscape_orientation_swaps_target() {
    let source = test_document(&[(100.0, 100.0)]);
    let policy = FitPolicy {
        target: TargetSize::Named(PaperSize::Letter),
        orientation: Orientation::Landscape,
        ..Default::default()
    };
    let out = fit::compose(&source, &policy).unwrap();
    assert_eq!(page_sizes(&out)[0], (792.0, 612.0));
}

#[test]
fn test_fit_letterboxes_wide_page() {
    // 200x100 source on a 595x842 canvas under fit: scale is 595/200.
    let source = test_document(&[(200.0, 100.0)]);
    let out = fit::compose(&source, &FitPolicy::default()).unwrap();

    let content = page_content(&out, 1);
    assert!(content.contains("q 2.975 0 0 2.975"), "content: {content}");
}

#[test]
fn test_fill_scales_past_canvas() {
    // Same source under fill: scale is 842/100.
    let source = test_document(&[(200.0, 100.0)]);
    let policy = FitPolicy {
        scaling_mode: ScalingMode::Fill,
        ..Default::default()
    };
    let out = fit::compose(&source, &policy).unwrap();

    let content = page_content(&out, 1);
    assert!(content.contains("q 8.42 0 0 8.42"), "content: {content}");
}

#[test]
fn test_already_standard_page_places_at_unit_scale() {
    let source = test_document(&[(595.0, 842.0)]);
    let out = fit::compose(&source, &FitPolicy::default()).unwrap();

    let content = page_content(&out, 1);
    assert!(content.contains("q 1 0 0 1 0 0 cm"), "content: {content}");
}
