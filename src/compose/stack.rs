//! Vertical stack compositor (combine to a single page).
//!
//! Concatenates all source pages into one oversized output page: uniform
//! width (the widest source page), pages walked top-down, each centered
//! horizontally, with optional spacing and separator rules between them.
//!
//! This is the one compositor with a per-page degradation path: a page that
//! fails to embed is replaced by a blank slot of the same size so every
//! following page keeps its correct vertical offset.

use lopdf::Document;
use serde::{Deserialize, Serialize};

use crate::config::Color;
use crate::doc::{ContentBuilder, DocumentBuilder, Embedder, ordered_pages, page_size};
use crate::error::{ComposeError, Result};
use crate::geometry::{Rect, Size};

/// Separator rule stroke width.
const SEPARATOR_WIDTH: f64 = 0.5;

/// Policy for the vertical stack compositor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackPolicy {
    /// Vertical gap between consecutive pages, in points. Must be ≥ 0.
    pub spacing: f64,
    /// Canvas color. Painted only when not white, since a solid white fill
    /// is the default canvas color. Note that with a non-white
    /// background, a failed page embed leaves its slot showing the
    /// background rather than a white blank.
    pub background: Color,
    /// Stroke a thin rule in the gap after every page except the last.
    pub draw_separator: bool,
}

impl Default for StackPolicy {
    fn default() -> Self {
        Self {
            spacing: 0.0,
            background: Color::WHITE,
            draw_separator: false,
        }
    }
}

/// The exact output page size for page sizes `sizes` and gap `spacing`.
pub fn stacked_size(sizes: &[Size], spacing: f64) -> Size {
    let max_w = sizes.iter().map(|s| s.width).fold(0.0, f64::max);
    let total_h: f64 = sizes.iter().map(|s| s.height).sum::<f64>()
        + spacing * (sizes.len().saturating_sub(1)) as f64;
    Size::new(max_w, total_h)
}

/// Stack all pages of `source` onto one tall output page.
pub fn compose(source: &Document, policy: &StackPolicy) -> Result<Document> {
    if policy.spacing < 0.0 || !policy.spacing.is_finite() {
        return Err(ComposeError::InvalidDimension {
            what: "spacing",
            value: policy.spacing,
        });
    }

    let pages = ordered_pages(source);
    if pages.is_empty() {
        return Err(ComposeError::NoPages);
    }

    let mut sizes = Vec::with_capacity(pages.len());
    for (idx, &page_id) in pages.iter().enumerate() {
        sizes.push(page_size(source, (idx + 1) as u32, page_id)?);
    }
    let canvas = stacked_size(&sizes, policy.spacing);

    let mut builder = DocumentBuilder::new();
    let mut embedder = Embedder::new(source);
    let mut content = ContentBuilder::new();

    if !policy.background.is_white() {
        content.fill_rect(&Rect::from_size(canvas), policy.background);
    }

    let mut current_y = canvas.height;
    for (idx, (&page_id, &size)) in pages.iter().zip(sizes.iter()).enumerate() {
        current_y -= size.height;
        let slot = Rect::new(
            (canvas.width - size.width) / 2.0,
            current_y,
            size.width,
            size.height,
        );

        match embedder.embed(builder.doc_mut(), (idx + 1) as u32, page_id) {
            Ok(embedded) => content.draw_embedded(&embedded, &slot),
            // Best-effort degradation: keep the slot blank so later offsets
            // stay correct. Only a white canvas needs the explicit blank.
            Err(_) if policy.background.is_white() => {
                content.fill_rect(&slot, Color::WHITE);
            }
            Err(_) => {}
        }

        if idx + 1 < pages.len() {
            if policy.draw_separator {
                let rule_y = current_y - policy.spacing / 2.0;
                content.stroke_line(
                    (0.0, rule_y),
                    (canvas.width, rule_y),
                    Color::BLACK,
                    SEPARATOR_WIDTH,
                );
            }
            current_y -= policy.spacing;
        }
    }

    builder.add_page(canvas, content);
    Ok(builder.finish())
}
