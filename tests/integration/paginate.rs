//! Integration tests for tall-image pagination.

use pdfcompose::compose::paginate::{self, ImageData, PaginatePolicy};

use crate::common::{count_ops, page_sizes};

fn gray_image(width: u32, height: u32) -> ImageData {
    ImageData::new(width, height, vec![0xAA; width as usize * height as usize * 3]).unwrap()
}

#[test]
fn test_tall_image_spans_pages() {
    // A4 portrait with 36pt margins: content area 523 x 770. At 1046px
    // wide the image halves to 523pt wide, so 4000px tall becomes 2000pt,
    // needing ceil(2000 / 770) = 3 pages.
    let image = gray_image(1046, 4000);
    let out = paginate::compose(&image, &PaginatePolicy::default()).unwrap();

    let sizes = page_sizes(&out);
    assert_eq!(sizes.len(), 3);
    assert!(sizes.iter().all(|&s| s == (595.0, 842.0)));
    for page in 1..=3u32 {
        assert_eq!(count_ops(&out, page, " Do"), 1);
    }
}

#[test]
fn test_short_image_fits_one_page() {
    let image = gray_image(1000, 200);
    let out = paginate::compose(&image, &PaginatePolicy::default()).unwrap();
    assert_eq!(page_sizes(&out).len(), 1);
}

#[test]
fn test_image_draw_positions_climb_per_page() {
    // Scaled image height is 1000pt on a 770pt content; two pages, the
    // second drawn 770pt higher.
    let image = gray_image(523, 1000);
    let out = paginate::compose(&image, &PaginatePolicy::default()).unwrap();
    assert_eq!(page_sizes(&out).len(), 2);

    let first = crate::common::page_content(&out, 1);
    let second = crate::common::page_content(&out, 2);
    // Page 1: y = 842 - 36 - 1000 = -194. Page 2: -194 + 770 = 576.
    assert!(first.contains("36 -194 cm"), "content: {first}");
    assert!(second.contains("36 576 cm"), "content: {second}");
}

#[test]
fn test_margin_too_large_is_policy_error() {
    let image = gray_image(100, 100);
    let policy = PaginatePolicy {
        margin: 400.0,
        ..Default::default()
    };
    assert!(paginate::compose(&image, &policy).unwrap_err().is_policy_error());
}
