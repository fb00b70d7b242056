//! Output document scaffolding and content-stream generation.
//!
//! Every compositor produces a fresh document; [`DocumentBuilder`] owns the
//! Catalog/Pages tree so compositors only ever say "add a page of this size
//! with this content". [`ContentBuilder`] accumulates content-stream
//! operators and tracks which XObjects and fonts the page references, so the
//! page's resource dictionary is always consistent with its operators.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::config::Color;
use crate::font::BuiltinFont;
use crate::geometry::{Rect, Size};

use super::EmbeddedPage;

/// Format a coordinate for a content stream, trimming trailing zeros.
pub(crate) fn fmt_num(v: f64) -> String {
    if (v - v.round()).abs() < 1e-6 {
        format!("{}", v.round() as i64)
    } else {
        let s = format!("{v:.4}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Builder for a fresh output document.
pub struct DocumentBuilder {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
    font_id: Option<ObjectId>,
}

impl DocumentBuilder {
    /// Start a new document with an empty page tree.
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
            font_id: None,
        }
    }

    /// Mutable access to the underlying document, for object insertion
    /// (embedded pages, image streams).
    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The font object for `font`, added to the document on first use.
    pub fn builtin_font(&mut self, font: BuiltinFont) -> ObjectId {
        if let Some(id) = self.font_id {
            return id;
        }
        let id = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        self.font_id = Some(id);
        id
    }

    /// Append a page of `size` whose content is `content`.
    pub fn add_page(&mut self, size: Size, content: ContentBuilder) -> ObjectId {
        let (ops, xobjects, fonts) = content.finish();
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), ops));

        let mut resources = Dictionary::new();
        resources.set(
            "ProcSet",
            Object::Array(vec![
                Object::Name(b"PDF".to_vec()),
                Object::Name(b"Text".to_vec()),
                Object::Name(b"ImageC".to_vec()),
            ]),
        );
        if !xobjects.is_empty() {
            let mut dict = Dictionary::new();
            for (name, id) in xobjects {
                dict.set(name, Object::Reference(id));
            }
            resources.set("XObject", Object::Dictionary(dict));
        }
        if !fonts.is_empty() {
            let mut dict = Dictionary::new();
            for (name, id) in fonts {
                dict.set(name, Object::Reference(id));
            }
            resources.set("Font", Object::Dictionary(dict));
        }

        let page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(size.width as f32),
                Object::Real(size.height as f32),
            ],
            "Resources" => Object::Dictionary(resources),
            "Contents" => content_id,
        };
        let page_id = self.doc.add_object(page);
        self.kids.push(page_id);
        page_id
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Finalize the Pages tree and Catalog and return the document.
    pub fn finish(mut self) -> Document {
        let kids: Vec<Object> = self
            .kids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();
        let count = self.kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates content-stream operators for one output page.
#[derive(Debug, Default)]
pub struct ContentBuilder {
    ops: String,
    xobjects: Vec<(String, ObjectId)>,
    fonts: Vec<(String, ObjectId)>,
}

impl ContentBuilder {
    /// Start an empty content stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no operators have been emitted.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn register_xobject(&mut self, id: ObjectId) -> String {
        if let Some((name, _)) = self.xobjects.iter().find(|(_, existing)| *existing == id) {
            return name.clone();
        }
        let name = format!("X{}", self.xobjects.len());
        self.xobjects.push((name.clone(), id));
        name
    }

    fn register_font(&mut self, id: ObjectId) -> String {
        if let Some((name, _)) = self.fonts.iter().find(|(_, existing)| *existing == id) {
            return name.clone();
        }
        let name = format!("F{}", self.fonts.len());
        self.fonts.push((name.clone(), id));
        name
    }

    /// Draw an embedded page at `placement` (translation + uniform scale).
    ///
    /// Non-zero source MediaBox origins are compensated so `placement`
    /// always addresses the visual page corner.
    pub fn draw_embedded(&mut self, page: &EmbeddedPage, placement: &Rect) {
        let scale = placement.width / page.size.width;
        let tx = placement.x - page.origin.0 * scale;
        let ty = placement.y - page.origin.1 * scale;
        let name = self.register_xobject(page.xobject);
        self.ops.push_str(&format!(
            "q {s} 0 0 {s} {x} {y} cm /{name} Do Q\n",
            s = fmt_num(scale),
            x = fmt_num(tx),
            y = fmt_num(ty),
        ));
    }

    /// Draw an image XObject stretched over `rect`.
    ///
    /// Image space is the unit square, so the transform carries the full
    /// extent rather than a uniform scale.
    pub fn draw_image(&mut self, image: ObjectId, rect: &Rect) {
        let name = self.register_xobject(image);
        self.ops.push_str(&format!(
            "q {w} 0 0 {h} {x} {y} cm /{name} Do Q\n",
            w = fmt_num(rect.width),
            h = fmt_num(rect.height),
            x = fmt_num(rect.x),
            y = fmt_num(rect.y),
        ));
    }

    /// Fill `rect` with a solid color.
    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        self.ops.push_str(&format!(
            "q {r} {g} {b} rg {x} {y} {w} {h} re f Q\n",
            r = fmt_num(f64::from(color.r)),
            g = fmt_num(f64::from(color.g)),
            b = fmt_num(f64::from(color.b)),
            x = fmt_num(rect.x),
            y = fmt_num(rect.y),
            w = fmt_num(rect.width),
            h = fmt_num(rect.height),
        ));
    }

    /// Stroke the outline of `rect`.
    pub fn stroke_rect(&mut self, rect: &Rect, color: Color, line_width: f64) {
        self.ops.push_str(&format!(
            "q {r} {g} {b} RG {lw} w {x} {y} {w} {h} re S Q\n",
            r = fmt_num(f64::from(color.r)),
            g = fmt_num(f64::from(color.g)),
            b = fmt_num(f64::from(color.b)),
            lw = fmt_num(line_width),
            x = fmt_num(rect.x),
            y = fmt_num(rect.y),
            w = fmt_num(rect.width),
            h = fmt_num(rect.height),
        ));
    }

    /// Stroke a straight line between two points.
    pub fn stroke_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        color: Color,
        line_width: f64,
    ) {
        self.ops.push_str(&format!(
            "q {r} {g} {b} RG {lw} w {x1} {y1} m {x2} {y2} l S Q\n",
            r = fmt_num(f64::from(color.r)),
            g = fmt_num(f64::from(color.g)),
            b = fmt_num(f64::from(color.b)),
            lw = fmt_num(line_width),
            x1 = fmt_num(from.0),
            y1 = fmt_num(from.1),
            x2 = fmt_num(to.0),
            y2 = fmt_num(to.1),
        ));
    }

    /// Draw a single line of text with its baseline origin at `(x, y)`.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font: ObjectId,
        size: f64,
        color: Color,
    ) {
        let name = self.register_font(font);
        self.ops.push_str(&format!(
            "q {r} {g} {b} rg BT /{name} {size} Tf {x} {y} Td ({text}) Tj ET Q\n",
            r = fmt_num(f64::from(color.r)),
            g = fmt_num(f64::from(color.g)),
            b = fmt_num(f64::from(color.b)),
            size = fmt_num(size),
            x = fmt_num(x),
            y = fmt_num(y),
            text = escape_text(text),
        ));
    }

    fn finish(self) -> (Vec<u8>, Vec<(String, ObjectId)>, Vec<(String, ObjectId)>) {
        (self.ops.into_bytes(), self.xobjects, self.fonts)
    }
}

/// Escape a string for a PDF literal string in WinAnsi-ish bytes.
///
/// Characters above U+00FF have no single-byte encoding and degrade to '?'.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\{:03o}", c as u32)),
            c if c.is_ascii() => out.push(c),
            c if (c as u32) <= 0xFF => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out
}
