//! Geometry primitives shared by all compositors.
//!
//! Everything here is pure math over PDF user-space points (1/72 inch,
//! origin at the bottom-left, Y growing upward). Compositors reason about
//! layout top-down; [`to_pdf_y`] is the single place where that inversion
//! happens so sign errors cannot creep back in per call site.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ComposeError, Result};

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4 mm).
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// A width/height pair in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when the page is wider than tall.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Apply an orientation constraint by swapping axes where needed.
    ///
    /// `Auto` is the identity; callers with an auto heuristic (N-Up) resolve
    /// it to a concrete orientation before calling this.
    pub fn oriented(self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Landscape if self.width < self.height => self.swapped(),
            Orientation::Portrait if self.width > self.height => self.swapped(),
            _ => self,
        }
    }

    fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// A placement rectangle in destination page space.
///
/// The sole output of every geometry computation: origin `(x, y)` plus the
/// scaled extent. For fit-mode placements the rectangle lies entirely within
/// the destination canvas; fill-mode placements may exceed it (the page
/// boundary clips).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle at the origin covering `size`.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// The extent of this rectangle as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when `inner` lies entirely within this rectangle, with a small
    /// epsilon for floating-point slack.
    pub fn contains(&self, inner: &Rect) -> bool {
        const EPS: f64 = 1e-6;
        inner.x + EPS >= self.x
            && inner.y + EPS >= self.y
            && inner.x + inner.width <= self.x + self.width + EPS
            && inner.y + inner.height <= self.y + self.height + EPS
    }
}

/// Page orientation constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Defer to the operation's own heuristic (or keep the size as given).
    #[default]
    Auto,
    /// Force height ≥ width.
    Portrait,
    /// Force width ≥ height.
    Landscape,
}

impl FromStr for Orientation {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            _ => Err(ComposeError::invalid_policy(format!(
                "Invalid orientation: {s}. Must be one of: auto, portrait, landscape"
            ))),
        }
    }
}

/// How source content is scaled onto a destination canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingMode {
    /// All source content visible; may letterbox.
    #[default]
    Fit,
    /// Destination fully covered; may crop.
    Fill,
}

impl FromStr for ScalingMode {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fit" => Ok(Self::Fit),
            "fill" => Ok(Self::Fill),
            _ => Err(ComposeError::invalid_policy(format!(
                "Invalid scaling mode: {s}. Must be 'fit' or 'fill'"
            ))),
        }
    }
}

/// Named canonical paper sizes, portrait in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    /// US Letter, 8.5 × 11 in.
    Letter,
    /// US Legal, 8.5 × 14 in.
    Legal,
    /// US Tabloid, 11 × 17 in.
    Tabloid,
    /// ISO A3.
    A3,
    /// ISO A4.
    #[default]
    A4,
    /// ISO A5.
    A5,
}

impl PaperSize {
    /// Portrait dimensions in points.
    pub fn size(&self) -> Size {
        match self {
            Self::Letter => Size::new(612.0, 792.0),
            Self::Legal => Size::new(612.0, 1008.0),
            Self::Tabloid => Size::new(792.0, 1224.0),
            Self::A3 => Size::new(842.0, 1191.0),
            Self::A4 => Size::new(595.0, 842.0),
            Self::A5 => Size::new(420.0, 595.0),
        }
    }
}

impl FromStr for PaperSize {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "letter" => Ok(Self::Letter),
            "legal" => Ok(Self::Legal),
            "tabloid" => Ok(Self::Tabloid),
            "a3" => Ok(Self::A3),
            "a4" => Ok(Self::A4),
            "a5" => Ok(Self::A5),
            _ => Err(ComposeError::UnknownPaperSize {
                name: s.to_string(),
            }),
        }
    }
}

/// Length unit for custom page dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// PDF points (1/72 inch).
    #[default]
    Points,
    /// Inches.
    Inches,
    /// Millimeters.
    Millimeters,
}

impl Unit {
    /// Convert a value in this unit to points. Values ≤ 0 are rejected.
    pub fn to_points(&self, value: f64) -> Result<f64> {
        if value <= 0.0 || !value.is_finite() {
            return Err(ComposeError::InvalidDimension {
                what: "custom dimension",
                value,
            });
        }
        Ok(match self {
            Self::Points => value,
            Self::Inches => value * POINTS_PER_INCH,
            Self::Millimeters => value * POINTS_PER_MM,
        })
    }
}

impl FromStr for Unit {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pt" | "points" => Ok(Self::Points),
            "in" | "inch" | "inches" => Ok(Self::Inches),
            "mm" | "millimeters" => Ok(Self::Millimeters),
            _ => Err(ComposeError::invalid_policy(format!(
                "Invalid unit: {s}. Must be one of: pt, in, mm"
            ))),
        }
    }
}

/// Uniform scale factor mapping `src` onto `dst` under `mode`.
pub fn compute_scale(src: Size, dst: Size, mode: ScalingMode) -> f64 {
    let sx = dst.width / src.width;
    let sy = dst.height / src.height;
    match mode {
        ScalingMode::Fit => sx.min(sy),
        ScalingMode::Fill => sx.max(sy),
    }
}

/// Scale `src` onto `dst` under `mode` and center it on both axes.
///
/// The returned rectangle is relative to the destination origin; offset it
/// by a cell origin for grid placements.
pub fn place_centered(src: Size, dst: Size, mode: ScalingMode) -> Rect {
    let scale = compute_scale(src, dst, mode);
    let width = src.width * scale;
    let height = src.height * scale;
    Rect::new(
        (dst.width - width) / 2.0,
        (dst.height - height) / 2.0,
        width,
        height,
    )
}

/// Convert a top-down Y coordinate to PDF space.
///
/// `top_down_y` is the distance from the visual top of the page to the top
/// edge of an element of height `element_height`; the result is the PDF Y of
/// the element's bottom edge.
pub fn to_pdf_y(top_down_y: f64, page_height: f64, element_height: f64) -> f64 {
    page_height - top_down_y - element_height
}

/// Clamp `v` into `[lo, hi]`, collapsing to `lo` when the interval is empty
/// (oversized content on a degenerate page).
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if hi < lo { lo } else { v.max(lo).min(hi) }
}
