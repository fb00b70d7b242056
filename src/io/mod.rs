//! PDF file input/output.
//!
//! Loading and saving run the lopdf parse/serialize work on blocking tasks
//! so the async runtime stays responsive during large-file operations.

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::PdfWriter;
