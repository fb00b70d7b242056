//! pdfcompose - Page layout and composition for PDFs.
//!
//! This library rearranges existing PDF pages onto new canvases. It
//! supports:
//!
//! - N-up grid tiling (2, 4, 9, or 16 pages per sheet)
//! - Standardizing every page to one canvas size, fit or fill
//! - Stacking all pages vertically onto one tall page
//! - Page numbers and header/footer text at anchored positions
//! - Slicing a tall raster image across multiple pages
//!
//! Source pages are embedded as Form XObjects, so vector content stays
//! vector and nothing is rasterized.
//!
//! # Examples
//!
//! ## Four pages per sheet
//!
//! ```no_run
//! use pdfcompose::compose::nup::{self, GridPolicy};
//! use pdfcompose::io::{PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = PdfReader::new().load(Path::new("slides.pdf")).await?;
//! let sheets = nup::compose(&loaded.document, &GridPolicy::default())?;
//! PdfWriter::new().save(sheets, Path::new("handout.pdf")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Page numbers on a range of pages
//!
//! ```no_run
//! use pdfcompose::compose::text::{NumberingPolicy, add_page_numbers};
//! use pdfcompose::font::BuiltinFont;
//! use pdfcompose::io::{PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = PdfReader::new().load(Path::new("report.pdf")).await?;
//! let policy = NumberingPolicy {
//!     pages: Some("2-10".parse()?),
//!     template: "{page} / {total}".to_string(),
//!     ..Default::default()
//! };
//! let numbered = add_page_numbers(&loaded.document, &policy, BuiltinFont::Helvetica)?;
//! PdfWriter::new().save(numbered, Path::new("numbered.pdf")).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod compose;
pub mod config;
pub mod doc;
pub mod error;
pub mod font;
pub mod geometry;
pub mod io;

// Re-export commonly used types
pub use error::{ComposeError, Result};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
