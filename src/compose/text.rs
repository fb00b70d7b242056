//! Anchored text placement: page numbers and headers/footers.
//!
//! Resolves token-substituted labels to clamped coordinates at one of six
//! anchor positions. The governing invariant is that the text origin always
//! lands fully inside the page box by at least [`EDGE_PADDING`] points, for
//! any font size, any anchor, and any page size, including text wider than
//! the page (which degrades to a cosmetic overflow on the far edge rather
//! than an error).
//!
//! Both operations rebuild the document (create-new-then-embed) rather than
//! mutating the source: the font drawing the labels must belong to the
//! destination document.

use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::{Color, PageRange};
use crate::doc::{
    ContentBuilder, DocumentBuilder, Embedder, crop_box, media_origin, ordered_pages, page_size,
};
use crate::error::{ComposeError, Result};
use crate::font::BuiltinFont;
use crate::geometry::{Rect, clamp};

use super::substitute_tokens;

/// Minimum distance between the text origin box and the page box edge.
const EDGE_PADDING: f64 = 3.0;

/// Adaptive margin as a fraction of the page dimension.
const MARGIN_RATIO: f64 = 0.04;

/// Lower and upper bounds for the adaptive margin.
const MARGIN_MIN: f64 = 8.0;
const MARGIN_MAX: f64 = 40.0;

/// Fixed margins for the header/footer bands.
const BAND_H_MARGIN: f64 = 40.0;
const BAND_V_MARGIN: f64 = 30.0;

/// One of the six named text-placement positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// Top edge, left aligned.
    TopLeft,
    /// Top edge, centered.
    TopCenter,
    /// Top edge, right aligned.
    TopRight,
    /// Bottom edge, left aligned.
    BottomLeft,
    /// Bottom edge, centered.
    #[default]
    BottomCenter,
    /// Bottom edge, right aligned.
    BottomRight,
}

impl Anchor {
    fn is_top(&self) -> bool {
        matches!(self, Self::TopLeft | Self::TopCenter | Self::TopRight)
    }
}

impl FromStr for Anchor {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "top-left" => Ok(Self::TopLeft),
            "top-center" => Ok(Self::TopCenter),
            "top-right" => Ok(Self::TopRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom-center" => Ok(Self::BottomCenter),
            "bottom-right" => Ok(Self::BottomRight),
            _ => Err(ComposeError::invalid_policy(format!(
                "Invalid anchor: {s}. Must be top|bottom - left|center|right, e.g. 'bottom-right'"
            ))),
        }
    }
}

/// Policy for page numbering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberingPolicy {
    /// Where on the page the label goes.
    pub anchor: Anchor,
    /// Font size in points. Must be > 0.
    pub font_size: f64,
    /// Label color.
    pub color: Color,
    /// Pages to stamp; `None` stamps every page.
    pub pages: Option<PageRange>,
    /// Label template; `{page}` and `{total}` are substituted.
    pub template: String,
}

impl Default for NumberingPolicy {
    fn default() -> Self {
        Self {
            anchor: Anchor::BottomCenter,
            font_size: 12.0,
            color: Color::BLACK,
            pages: None,
            template: "{page}".to_string(),
        }
    }
}

/// Text slots for one horizontal band (header or footer).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BandSlots {
    /// Left-aligned slot template.
    pub left: Option<String>,
    /// Centered slot template.
    pub center: Option<String>,
    /// Right-aligned slot template.
    pub right: Option<String>,
}

impl BandSlots {
    fn is_empty(&self) -> bool {
        self.left.is_none() && self.center.is_none() && self.right.is_none()
    }
}

/// Policy for header/footer stamping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderFooterPolicy {
    /// Top band slots.
    pub header: BandSlots,
    /// Bottom band slots.
    pub footer: BandSlots,
    /// Font size in points. Must be > 0.
    pub font_size: f64,
    /// Text color.
    pub color: Color,
    /// Pages to stamp; `None` stamps every page.
    pub pages: Option<PageRange>,
}

impl Default for HeaderFooterPolicy {
    fn default() -> Self {
        Self {
            header: BandSlots::default(),
            footer: BandSlots::default(),
            font_size: 10.0,
            color: Color::BLACK,
            pages: None,
        }
    }
}

/// Resolve an anchor to a text origin within `bounds`.
///
/// `bounds` is the placement box (crop box when present, else media box)
/// with its own origin. The result satisfies, for any input:
/// `x ∈ [bounds.x + 3, bounds.x + bounds.width - text_w - 3]` (collapsing
/// to the left bound when text is wider than the box) and the analogous Y
/// bound.
pub fn resolve_anchor(anchor: Anchor, bounds: &Rect, text_w: f64, text_h: f64) -> (f64, f64) {
    let (width, height) = (bounds.width, bounds.height);

    let h_margin = clamp(width * MARGIN_RATIO, MARGIN_MIN, MARGIN_MAX);
    let v_margin = clamp(height * MARGIN_RATIO, MARGIN_MIN, MARGIN_MAX);

    // Widen so the text's full box clears the margin threshold itself.
    let safe_h = h_margin.max(text_w / 2.0 + EDGE_PADDING);
    let safe_v = v_margin.max(text_h + EDGE_PADDING);

    let x = match anchor {
        Anchor::TopLeft | Anchor::BottomLeft => safe_h,
        Anchor::TopCenter | Anchor::BottomCenter => {
            clamp((width - text_w) / 2.0, safe_h, width - safe_h - text_w)
        }
        Anchor::TopRight | Anchor::BottomRight => (width - safe_h - text_w).max(safe_h),
    };
    let y = if anchor.is_top() {
        height - safe_v - text_h
    } else {
        safe_v
    };

    hard_clamp(bounds, text_w, text_h, bounds.x + x, bounds.y + y)
}

/// The final clamp applied to every text placement regardless of anchor:
/// origin at least [`EDGE_PADDING`] inside the box on both axes.
fn hard_clamp(bounds: &Rect, text_w: f64, text_h: f64, x: f64, y: f64) -> (f64, f64) {
    (
        clamp(
            x,
            bounds.x + EDGE_PADDING,
            bounds.x + bounds.width - text_w - EDGE_PADDING,
        ),
        clamp(
            y,
            bounds.y + EDGE_PADDING,
            bounds.y + bounds.height - text_h - EDGE_PADDING,
        ),
    )
}

/// Pages selected by an optional range, validated against the total.
fn selected_pages(pages: &Option<PageRange>, total: usize) -> Result<Vec<u32>> {
    match pages {
        None => Ok((1..=total as u32).collect()),
        Some(range) => {
            let selected = range.to_pages(total as u32);
            if selected.is_empty() {
                return Err(ComposeError::InvalidPageRange {
                    range: range.to_string(),
                    total_pages: total,
                });
            }
            Ok(selected)
        }
    }
}

/// The placement box for a page: crop box when present, else media box.
fn placement_bounds(
    source: &Document,
    page_num: u32,
    page_id: lopdf::ObjectId,
) -> Result<Rect> {
    if let Some(rect) = crop_box(source, page_id)? {
        return Ok(rect);
    }
    let size = page_size(source, page_num, page_id)?;
    let origin = media_origin(source, page_id);
    Ok(Rect::new(origin.0, origin.1, size.width, size.height))
}

/// Stamp a page-number label on the selected pages.
///
/// Every page is re-embedded into a fresh document at scale 1; unselected
/// pages pass through unchanged.
pub fn add_page_numbers(
    source: &Document,
    policy: &NumberingPolicy,
    font: BuiltinFont,
) -> Result<Document> {
    if policy.font_size <= 0.0 || !policy.font_size.is_finite() {
        return Err(ComposeError::InvalidDimension {
            what: "font size",
            value: policy.font_size,
        });
    }

    let pages = ordered_pages(source);
    let total = pages.len();
    if total == 0 {
        return Err(ComposeError::NoPages);
    }
    let selected = selected_pages(&policy.pages, total)?;

    let mut builder = DocumentBuilder::new();
    let mut embedder = Embedder::new(source);
    let text_h = font.height_at_size(policy.font_size);

    for (idx, &page_id) in pages.iter().enumerate() {
        let page_num = (idx + 1) as u32;
        let size = page_size(source, page_num, page_id)?;
        let origin = media_origin(source, page_id);

        let embedded = embedder
            .embed(builder.doc_mut(), page_num, page_id)
            .map_err(|e| ComposeError::embed_failed(page_num, e.to_string()))?;

        let mut content = ContentBuilder::new();
        content.draw_embedded(&embedded, &Rect::from_size(size));

        if selected.contains(&page_num) {
            let label = substitute_tokens(&policy.template, page_num, total);
            let text_w = font.width_of_text_at_size(&label, policy.font_size);
            let bounds = placement_bounds(source, page_num, page_id)?;
            let (x, y) = resolve_anchor(policy.anchor, &bounds, text_w, text_h);

            let font_id = builder.builtin_font(font);
            // The output page's box starts at (0, 0); rebase from the
            // source media origin.
            content.draw_text(
                &label,
                x - origin.0,
                y - origin.1,
                font_id,
                policy.font_size,
                policy.color,
            );
        }

        builder.add_page(size, content);
    }

    Ok(builder.finish())
}

/// Stamp header/footer slot text on the selected pages.
pub fn add_headers_footers(
    source: &Document,
    policy: &HeaderFooterPolicy,
    font: BuiltinFont,
) -> Result<Document> {
    if policy.font_size <= 0.0 || !policy.font_size.is_finite() {
        return Err(ComposeError::InvalidDimension {
            what: "font size",
            value: policy.font_size,
        });
    }
    if policy.header.is_empty() && policy.footer.is_empty() {
        return Err(ComposeError::invalid_policy(
            "No header or footer text given",
        ));
    }

    let pages = ordered_pages(source);
    let total = pages.len();
    if total == 0 {
        return Err(ComposeError::NoPages);
    }
    let selected = selected_pages(&policy.pages, total)?;

    let mut builder = DocumentBuilder::new();
    let mut embedder = Embedder::new(source);
    let text_h = font.height_at_size(policy.font_size);

    for (idx, &page_id) in pages.iter().enumerate() {
        let page_num = (idx + 1) as u32;
        let size = page_size(source, page_num, page_id)?;
        let origin = media_origin(source, page_id);

        let embedded = embedder
            .embed(builder.doc_mut(), page_num, page_id)
            .map_err(|e| ComposeError::embed_failed(page_num, e.to_string()))?;

        let mut content = ContentBuilder::new();
        content.draw_embedded(&embedded, &Rect::from_size(size));

        if selected.contains(&page_num) {
            let bounds = placement_bounds(source, page_num, page_id)?;
            let font_id = builder.builtin_font(font);

            for (band, is_header) in [(&policy.header, true), (&policy.footer, false)] {
                let slots = [
                    (band.left.as_deref(), SlotAlign::Left),
                    (band.center.as_deref(), SlotAlign::Center),
                    (band.right.as_deref(), SlotAlign::Right),
                ];
                for (template, align) in slots {
                    let Some(template) = template else { continue };
                    let label = substitute_tokens(template, page_num, total);
                    let text_w = font.width_of_text_at_size(&label, policy.font_size);
                    let (x, y) = band_position(&bounds, align, is_header, text_w, text_h);
                    content.draw_text(
                        &label,
                        x - origin.0,
                        y - origin.1,
                        font_id,
                        policy.font_size,
                        policy.color,
                    );
                }
            }
        }

        builder.add_page(size, content);
    }

    Ok(builder.finish())
}

#[derive(Clone, Copy)]
enum SlotAlign {
    Left,
    Center,
    Right,
}

/// Slot position within a band: fixed margins, same centering and
/// right-edge arithmetic as the anchor table, same final hard clamp.
fn band_position(
    bounds: &Rect,
    align: SlotAlign,
    is_header: bool,
    text_w: f64,
    text_h: f64,
) -> (f64, f64) {
    let x = match align {
        SlotAlign::Left => BAND_H_MARGIN,
        SlotAlign::Center => (bounds.width - text_w) / 2.0,
        SlotAlign::Right => bounds.width - BAND_H_MARGIN - text_w,
    };
    let y = if is_header {
        bounds.height - BAND_V_MARGIN - text_h
    } else {
        BAND_V_MARGIN
    };
    hard_clamp(bounds, text_w, text_h, bounds.x + x, bounds.y + y)
}
