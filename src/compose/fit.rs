//! Dimension standardizer (fix dimensions).
//!
//! Maps every source page onto one canonical canvas size and orientation
//! under a fit-or-fill policy. Unlike the stack compositor, the background
//! is painted unconditionally, white included, so every output page carries
//! an explicit canvas.

use lopdf::Document;
use serde::{Deserialize, Serialize};

use crate::config::Color;
use crate::doc::{ContentBuilder, DocumentBuilder, Embedder, ordered_pages, page_size};
use crate::error::{ComposeError, Result};
use crate::geometry::{Orientation, PaperSize, Rect, ScalingMode, Size, Unit, place_centered};

/// The target canvas: a named size or explicit dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSize {
    /// One of the canonical named sizes.
    Named(PaperSize),
    /// Explicit dimensions in a given unit.
    Custom {
        /// Width, in `unit`.
        width: f64,
        /// Height, in `unit`.
        height: f64,
        /// Unit of both dimensions.
        unit: Unit,
    },
}

impl TargetSize {
    /// Resolve to points. Custom dimensions must both be positive.
    pub fn resolve(&self) -> Result<Size> {
        match self {
            Self::Named(paper) => Ok(paper.size()),
            Self::Custom {
                width,
                height,
                unit,
            } => Ok(Size::new(unit.to_points(*width)?, unit.to_points(*height)?)),
        }
    }
}

/// Policy for the dimension standardizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitPolicy {
    /// The canvas every page is mapped onto.
    pub target: TargetSize,
    /// Orientation constraint for the target; `Auto` keeps it as given.
    pub orientation: Orientation,
    /// Fit (letterbox) or fill (crop).
    pub scaling_mode: ScalingMode,
    /// Canvas color, painted unconditionally.
    pub background: Color,
}

impl Default for FitPolicy {
    fn default() -> Self {
        Self {
            target: TargetSize::Named(PaperSize::A4),
            orientation: Orientation::Auto,
            scaling_mode: ScalingMode::Fit,
            background: Color::WHITE,
        }
    }
}

/// Standardize every page of `source` onto the policy's target canvas.
///
/// Applied to its own output with the same policy, this is the identity:
/// pages already at the target size place at scale 1.0.
pub fn compose(source: &Document, policy: &FitPolicy) -> Result<Document> {
    let target = policy.target.resolve()?.oriented(policy.orientation);

    let pages = ordered_pages(source);
    if pages.is_empty() {
        return Err(ComposeError::NoPages);
    }

    let mut builder = DocumentBuilder::new();
    let mut embedder = Embedder::new(source);

    for (idx, &page_id) in pages.iter().enumerate() {
        let page_num = (idx + 1) as u32;
        let src = page_size(source, page_num, page_id)?;

        let embedded = embedder
            .embed(builder.doc_mut(), page_num, page_id)
            .map_err(|e| ComposeError::embed_failed(page_num, e.to_string()))?;

        let mut content = ContentBuilder::new();
        content.fill_rect(&Rect::from_size(target), policy.background);

        let placement = place_centered(src, target, policy.scaling_mode);
        content.draw_embedded(&embedded, &placement);

        builder.add_page(target, content);
    }

    Ok(builder.finish())
}
