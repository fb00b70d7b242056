//! Integration tests for pdfcompose.
//!
//! All source documents are built in memory, so the tests carry no binary
//! fixtures.

use lopdf::{Dictionary, Document, Object, Stream, dictionary};

/// Build a document with one page per entry in `sizes` (width, height).
///
/// Each page carries a small filled rectangle so content streams are
/// non-empty.
pub fn test_document(sizes: &[(f64, f64)]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for &(w, h) in sizes {
        let ops = format!("q 0 0 0 rg 10 10 {} {} re f Q\n", w / 4.0, h / 4.0);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), ops.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(w as f32),
                Object::Real(h as f32),
            ],
            "Resources" => Object::Dictionary(Dictionary::new()),
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Replace the content stream of the 1-indexed page `page` with bytes that
/// declare a flate filter but do not decode.
pub fn corrupt_page_content(doc: &mut Document, page: u32) {
    let id = doc.get_pages()[&page];
    let corrupt_id = doc.add_object(Stream::new(
        dictionary! { "Filter" => "FlateDecode" },
        b"not a deflate stream".to_vec(),
    ));
    let dict = doc
        .get_object_mut(id)
        .and_then(|o| o.as_dict_mut())
        .unwrap();
    dict.set("Contents", Object::Reference(corrupt_id));
}

/// The (width, height) of every page, in document order.
pub fn page_sizes(doc: &Document) -> Vec<(f64, f64)> {
    let ids = pdfcompose::doc::ordered_pages(doc);
    ids.iter()
        .enumerate()
        .map(|(i, &id)| {
            let size = pdfcompose::doc::page_size(doc, (i + 1) as u32, id).unwrap();
            (size.width, size.height)
        })
        .collect()
}

/// The content stream of the 1-indexed page `page`, as text.
///
/// Only valid for freshly composed documents, whose streams are
/// uncompressed.
pub fn page_content(doc: &Document, page: u32) -> String {
    let pages = doc.get_pages();
    let id = pages[&page];
    String::from_utf8(doc.get_page_content(id).unwrap()).unwrap()
}

/// Count occurrences of a content-stream operator fragment on a page.
pub fn count_ops(doc: &Document, page: u32, fragment: &str) -> usize {
    page_content(doc, page).matches(fragment).count()
}
