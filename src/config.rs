//! Shared policy building blocks: colors and page-range selectors.
//!
//! Policy structs themselves live next to their compositors; this module
//! holds the pieces every operation shares. All types are serde-enabled so a
//! host application can drive the engine from JSON option forms instead of
//! the CLI.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ComposeError, Result};

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
}

impl Color {
    /// Opaque white, the default canvas color.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    /// Black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    /// Create a color from components in `0.0..=1.0`.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// True when this is (effectively) the default white canvas color.
    pub fn is_white(&self) -> bool {
        const EPS: f32 = 1e-4;
        (self.r - 1.0).abs() < EPS && (self.g - 1.0).abs() < EPS && (self.b - 1.0).abs() < EPS
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = ComposeError;

    /// Parse `#rrggbb` hex or a small set of named colors.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ComposeError::invalid_policy(format!(
                    "Invalid color: {s}. Expected #rrggbb"
                )));
            }
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
            return Ok(Self::from_rgb8(byte(0), byte(2), byte(4)));
        }
        match s.to_lowercase().as_str() {
            "white" => Ok(Self::WHITE),
            "black" => Ok(Self::BLACK),
            "red" => Ok(Self::from_rgb8(255, 0, 0)),
            "green" => Ok(Self::from_rgb8(0, 128, 0)),
            "blue" => Ok(Self::from_rgb8(0, 0, 255)),
            "gray" | "grey" => Ok(Self::from_rgb8(128, 128, 128)),
            "lightgray" | "lightgrey" => Ok(Self::from_rgb8(211, 211, 211)),
            _ => Err(ComposeError::invalid_policy(format!(
                "Invalid color: {s}. Use #rrggbb or a named color \
                 (white, black, red, green, blue, gray, lightgray)"
            ))),
        }
    }
}

/// Page selection for operations that only touch some pages.
///
/// Supports individual pages and ranges:
/// - "1" - single page
/// - "1-5" - inclusive range
/// - "1,3,5" - multiple individual pages
/// - "1-5,10-15" - combinations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    ranges: Vec<PageRangeItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum PageRangeItem {
    Single(u32),
    Range(u32, u32),
}

impl PageRange {
    /// Parse a page range string like `"1-5,10"`.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, zero page numbers, or inverted
    /// ranges.
    pub fn parse(s: &str) -> Result<Self> {
        let mut ranges = Vec::new();

        for part in s.split(',') {
            let part = part.trim();

            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start.trim().parse().map_err(|_| {
                    ComposeError::invalid_policy(format!("Invalid page number: {start}"))
                })?;
                let end: u32 = end.trim().parse().map_err(|_| {
                    ComposeError::invalid_policy(format!("Invalid page number: {end}"))
                })?;

                if start == 0 || end == 0 {
                    return Err(ComposeError::invalid_policy(
                        "Page numbers must be positive (1-indexed)",
                    ));
                }
                if start > end {
                    return Err(ComposeError::invalid_policy(format!(
                        "Invalid range {start}-{end}: start must not exceed end"
                    )));
                }
                ranges.push(PageRangeItem::Range(start, end));
            } else {
                let page: u32 = part.parse().map_err(|_| {
                    ComposeError::invalid_policy(format!("Invalid page number: {part}"))
                })?;
                if page == 0 {
                    return Err(ComposeError::invalid_policy(
                        "Page numbers must be positive (1-indexed)",
                    ));
                }
                ranges.push(PageRangeItem::Single(page));
            }
        }

        if ranges.is_empty() {
            return Err(ComposeError::invalid_policy("Page range cannot be empty"));
        }

        Ok(Self { ranges })
    }

    /// Check if a 1-indexed page number is included.
    pub fn contains(&self, page: u32) -> bool {
        self.ranges.iter().any(|item| match item {
            PageRangeItem::Single(p) => *p == page,
            PageRangeItem::Range(start, end) => page >= *start && page <= *end,
        })
    }

    /// All included page numbers up to `max_pages`, sorted and deduplicated.
    pub fn to_pages(&self, max_pages: u32) -> Vec<u32> {
        (1..=max_pages).filter(|p| self.contains(*p)).collect()
    }
}

impl FromStr for PageRange {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .ranges
            .iter()
            .map(|item| match item {
                PageRangeItem::Single(p) => p.to_string(),
                PageRangeItem::Range(start, end) => format!("{start}-{end}"),
            })
            .collect();
        write!(f, "{}", parts.join(","))
    }
}
