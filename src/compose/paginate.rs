//! Tall-image pagination: slice one tall raster image across pages.
//!
//! The image is embedded once as an image XObject at its natural width
//! scaled to the content width, then drawn on every page shifted upward by
//! one content height per page. Each page's clipping to its own media box
//! does the actual slicing; no pixel data is duplicated.

use lopdf::{Document, Object, Stream, dictionary};
use serde::{Deserialize, Serialize};

use crate::doc::{ContentBuilder, DocumentBuilder};
use crate::error::{ComposeError, Result};
use crate::geometry::{Orientation, PaperSize, Rect, Size};

/// Decoded raster image, 8-bit RGB, rows top to bottom.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Interleaved RGB samples, `width * height * 3` bytes.
    pub data: Vec<u8>,
}

impl ImageData {
    /// Wrap raw RGB8 samples, validating the buffer length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ComposeError::InvalidDimension {
                what: "image size",
                value: f64::from(width.min(height)),
            });
        }
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(ComposeError::invalid_policy(format!(
                "Image buffer is {} bytes, expected {} for {}x{} RGB",
                data.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    fn aspect(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }
}

/// Policy for paginating a tall image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatePolicy {
    /// Output paper size.
    pub paper_size: PaperSize,
    /// Output page orientation.
    pub orientation: Orientation,
    /// Uniform page margin in points.
    pub margin: f64,
}

impl Default for PaginatePolicy {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            margin: 36.0,
        }
    }
}

/// Number of pages a given image/page geometry produces.
///
/// The image scales to the content width; pages advance by one content
/// height, so the count is the scaled image height over the content height,
/// rounded up, and at least 1.
pub fn slice_count(image_w: u32, image_h: u32, content: Size) -> usize {
    let scaled_h = content.width * f64::from(image_h) / f64::from(image_w);
    ((scaled_h / content.height).ceil() as usize).max(1)
}

/// Lay a tall image out across as many pages as it needs.
pub fn compose(image: &ImageData, policy: &PaginatePolicy) -> Result<Document> {
    if policy.margin < 0.0 || !policy.margin.is_finite() {
        return Err(ComposeError::InvalidDimension {
            what: "margin",
            value: policy.margin,
        });
    }
    let page = policy.paper_size.size().oriented(policy.orientation);
    if policy.margin >= page.width.min(page.height) / 2.0 {
        return Err(ComposeError::invalid_policy(format!(
            "Margin {}pt leaves no content area on a {}x{}pt page",
            policy.margin, page.width, page.height
        )));
    }

    let content = Size::new(
        page.width - 2.0 * policy.margin,
        page.height - 2.0 * policy.margin,
    );
    let scaled = Size::new(content.width, content.width * image.aspect());
    let pages = slice_count(image.width, image.height, content);

    let mut builder = DocumentBuilder::new();
    let image_id = add_image_xobject(builder.doc_mut(), image);

    for i in 0..pages {
        // The image top sits at the content-area top on page 1 and climbs
        // by one content height per page thereafter.
        let y = page.height - policy.margin - scaled.height + i as f64 * content.height;
        let mut ops = ContentBuilder::new();
        ops.draw_image(
            image_id,
            &Rect::new(policy.margin, y, scaled.width, scaled.height),
        );
        builder.add_page(page, ops);
    }

    Ok(builder.finish())
}

/// Add the image to `doc` as an uncompressed DeviceRGB image XObject.
fn add_image_xobject(doc: &mut Document, image: &ImageData) -> lopdf::ObjectId {
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => Object::Integer(i64::from(image.width)),
        "Height" => Object::Integer(i64::from(image.height)),
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => Object::Integer(8),
    };
    doc.add_object(Stream::new(dict, image.data.clone()))
}
