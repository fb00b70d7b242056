//! The document-model layer over lopdf.
//!
//! Compositors treat a page as an opaque rectangle of known size that can be
//! embedded into another document at a translation plus uniform scale. This
//! module provides exactly that capability set: size/crop-box lookup with
//! inherited attributes, page-to-Form-XObject embedding, and an output
//! document builder with a content-stream writer.

mod builder;
mod embed;

pub use builder::{ContentBuilder, DocumentBuilder};
pub use embed::{EmbeddedPage, Embedder};

use lopdf::{Document, Object, ObjectId};

use crate::error::{ComposeError, Result};
use crate::geometry::{Rect, Size};

/// Maximum Parent-chain depth when resolving inherited page attributes.
const MAX_PARENT_DEPTH: usize = 32;

/// Look up a rectangle attribute (`MediaBox`, `CropBox`) on a page,
/// following the Parent chain for inherited values.
///
/// Returns `[x0, y0, x1, y1]` as stored, or `None` when absent everywhere.
fn page_box(doc: &Document, page_id: ObjectId, key: &[u8]) -> Result<Option<[f64; 4]>> {
    let mut current = Some(page_id);
    for _ in 0..MAX_PARENT_DEPTH {
        let Some(id) = current else { break };
        let dict = doc.get_dictionary(id)?;
        if let Ok(obj) = dict.get(key) {
            let arr = obj.as_array()?;
            if arr.len() != 4 {
                return Ok(None);
            }
            let mut out = [0.0f64; 4];
            for (slot, item) in out.iter_mut().zip(arr.iter()) {
                *slot = f64::from(item.as_float()?);
            }
            return Ok(Some(out));
        }
        current = dict
            .get(b"Parent")
            .ok()
            .and_then(|o| o.as_reference().ok());
    }
    Ok(None)
}

/// Width and height of a page from its (possibly inherited) MediaBox.
///
/// `page` is the 1-indexed page number, used only for error context.
pub fn page_size(doc: &Document, page: u32, page_id: ObjectId) -> Result<Size> {
    let media = page_box(doc, page_id, b"MediaBox")?
        .ok_or_else(|| ComposeError::malformed_page(page, "missing MediaBox"))?;
    let width = media[2] - media[0];
    let height = media[3] - media[1];
    if width <= 0.0 || height <= 0.0 {
        return Err(ComposeError::malformed_page(
            page,
            format!("degenerate MediaBox: {width} x {height}"),
        ));
    }
    Ok(Size::new(width, height))
}

/// The page's crop box as an origin + extent rectangle, if one is set.
///
/// Non-zero crop-box origins are common in print-ready files; text placement
/// uses this box (not the media box) as its bounds when present.
pub fn crop_box(doc: &Document, page_id: ObjectId) -> Result<Option<Rect>> {
    let Some(b) = page_box(doc, page_id, b"CropBox")? else {
        return Ok(None);
    };
    let width = b[2] - b[0];
    let height = b[3] - b[1];
    if width <= 0.0 || height <= 0.0 {
        return Ok(None);
    }
    Ok(Some(Rect::new(b[0], b[1], width, height)))
}

/// Ordered page object ids of a document, 1-indexed by position.
pub fn ordered_pages(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// The media-box origin of a page, defaulting to (0, 0).
pub(crate) fn media_origin(doc: &Document, page_id: ObjectId) -> (f64, f64) {
    match page_box(doc, page_id, b"MediaBox") {
        Ok(Some(b)) => (b[0], b[1]),
        _ => (0.0, 0.0),
    }
}

/// The raw MediaBox array of a page, with a Letter-sized fallback.
pub(crate) fn media_box_array(doc: &Document, page_id: ObjectId) -> Vec<Object> {
    match page_box(doc, page_id, b"MediaBox") {
        Ok(Some(b)) => b.iter().map(|&v| Object::Real(v as f32)).collect(),
        _ => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ],
    }
}
