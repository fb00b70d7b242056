//! Grid tiling compositor (N-Up).
//!
//! Partitions source pages into fixed-size groups and places each group on
//! one output sheet in a row-major grid, every page centered and scaled to
//! fit its cell.

use lopdf::Document;
use serde::{Deserialize, Serialize};

use crate::config::Color;
use crate::doc::{ContentBuilder, DocumentBuilder, Embedder, ordered_pages, page_size};
use crate::error::{ComposeError, Result};
use crate::geometry::{
    Orientation, PaperSize, Rect, ScalingMode, Size, place_centered, to_pdf_y,
};

/// Sheet margin in points when margins are enabled.
const MARGIN: f64 = 36.0;

/// Gap between grid cells in points when margins are enabled.
const GUTTER: f64 = 10.0;

/// Border stroke width around placed pages.
const BORDER_WIDTH: f64 = 1.0;

/// Policy for the grid tiling compositor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridPolicy {
    /// Source pages per output sheet; one of 2, 4, 9, 16.
    pub pages_per_sheet: usize,
    /// Output sheet size.
    pub paper_size: PaperSize,
    /// Sheet orientation; `Auto` picks landscape when the first source page
    /// is landscape and the grid is wider than tall.
    pub orientation: Orientation,
    /// Apply the standard sheet margin and inter-cell gutter.
    pub use_margins: bool,
    /// Stroke a 1 pt border around each placed page.
    pub border: Option<Color>,
}

impl Default for GridPolicy {
    fn default() -> Self {
        Self {
            pages_per_sheet: 4,
            paper_size: PaperSize::A4,
            orientation: Orientation::Auto,
            use_margins: true,
            border: None,
        }
    }
}

/// Grid shape (columns, rows) for a pages-per-sheet value.
///
/// # Errors
///
/// Anything outside the fixed set {2, 4, 9, 16} is rejected.
pub fn grid_dimensions(pages_per_sheet: usize) -> Result<(usize, usize)> {
    match pages_per_sheet {
        2 => Ok((1, 2)),
        4 => Ok((2, 2)),
        9 => Ok((3, 3)),
        16 => Ok((4, 4)),
        got => Err(ComposeError::InvalidGrid { got }),
    }
}

/// Resolve the output sheet size for this policy.
fn sheet_size(policy: &GridPolicy, first_page: Size, cols: usize, rows: usize) -> Size {
    let base = policy.paper_size.size();
    let orientation = match policy.orientation {
        Orientation::Auto => {
            if first_page.is_landscape() && cols > rows {
                Orientation::Landscape
            } else {
                Orientation::Portrait
            }
        }
        other => other,
    };
    base.oriented(orientation)
}

/// The cell rectangle for grid slot `index` (row-major from the visual
/// top-left) on a sheet of `sheet` size.
pub fn cell_rect(
    sheet: Size,
    cols: usize,
    rows: usize,
    margin: f64,
    gutter: f64,
    index: usize,
) -> Rect {
    let cell_w = (sheet.width - 2.0 * margin - gutter * (cols as f64 - 1.0)) / cols as f64;
    let cell_h = (sheet.height - 2.0 * margin - gutter * (rows as f64 - 1.0)) / rows as f64;
    let row = index / cols;
    let col = index % cols;
    let x = margin + col as f64 * (cell_w + gutter);
    // Row 0 is the visual top; convert to bottom-up PDF space.
    let top_down_y = margin + row as f64 * (cell_h + gutter);
    let y = to_pdf_y(top_down_y, sheet.height, cell_h);
    Rect::new(x, y, cell_w, cell_h)
}

/// Tile the source document's pages onto grid sheets.
///
/// Output page count is `ceil(source pages / pages_per_sheet)`; the last
/// sheet may be partially filled. Any page that fails to embed aborts the
/// whole operation; there is no safe placeholder for a tiled slot.
pub fn compose(source: &Document, policy: &GridPolicy) -> Result<Document> {
    let (cols, rows) = grid_dimensions(policy.pages_per_sheet)?;

    let pages = ordered_pages(source);
    if pages.is_empty() {
        return Err(ComposeError::NoPages);
    }

    let first = page_size(source, 1, pages[0])?;
    let sheet = sheet_size(policy, first, cols, rows);
    let (margin, gutter) = if policy.use_margins {
        (MARGIN, GUTTER)
    } else {
        (0.0, 0.0)
    };

    let mut builder = DocumentBuilder::new();
    let mut embedder = Embedder::new(source);

    for (group_idx, group) in pages.chunks(policy.pages_per_sheet).enumerate() {
        let mut content = ContentBuilder::new();

        for (slot, &page_id) in group.iter().enumerate() {
            let page_num = (group_idx * policy.pages_per_sheet + slot + 1) as u32;
            let src = page_size(source, page_num, page_id)?;
            let cell = cell_rect(sheet, cols, rows, margin, gutter, slot);

            let embedded = embedder
                .embed(builder.doc_mut(), page_num, page_id)
                .map_err(|e| ComposeError::embed_failed(page_num, e.to_string()))?;

            let mut placement = place_centered(src, cell.size(), ScalingMode::Fit);
            placement.x += cell.x;
            placement.y += cell.y;

            content.draw_embedded(&embedded, &placement);
            if let Some(border) = policy.border {
                content.stroke_rect(&placement, border, BORDER_WIDTH);
            }
        }

        builder.add_page(sheet, content);
    }

    Ok(builder.finish())
}
