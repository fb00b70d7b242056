//! Error types for pdfcompose.
//!
//! Two broad categories exist, mirroring the operation model:
//!
//! - **Policy errors** (invalid grid, unknown paper size, bad dimensions):
//!   raised before any page is processed, so a failed operation never leaves
//!   a partially built document behind.
//! - **Document errors** (load/embed failures, malformed pages): fatal for
//!   the whole operation, except inside the vertical stack compositor where
//!   a single failed embed degrades to a blank slot.

use std::path::PathBuf;

/// Result type alias for pdfcompose operations.
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Main error type for all composition operations.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// The requested pages-per-sheet value has no grid mapping.
    #[error("Unsupported pages-per-sheet value: {got}. Must be one of: 2, 4, 9, 16")]
    InvalidGrid {
        /// The rejected value.
        got: usize,
    },

    /// A named paper size was not found in the size table.
    #[error("Unknown paper size: '{name}'. Must be one of: letter, legal, tabloid, a3, a4, a5")]
    UnknownPaperSize {
        /// The unrecognized name.
        name: String,
    },

    /// A dimension (custom size, spacing, margin) is out of its valid range.
    #[error("Invalid {what}: {value}")]
    InvalidDimension {
        /// Which dimension was rejected.
        what: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A policy field failed validation or parsing.
    #[error("Invalid policy: {message}")]
    InvalidPolicy {
        /// Description of what is wrong.
        message: String,
    },

    /// A page range selects no pages of this document.
    #[error("Invalid page range '{range}': document has {total_pages} page(s)")]
    InvalidPageRange {
        /// The requested range, as given.
        range: String,
        /// Total pages in the document.
        total_pages: usize,
    },

    /// The source document contains no pages.
    #[error("Document has no pages")]
    NoPages,

    /// Input file was not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that does not exist.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {path}")]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// Failed to parse a PDF file.
    #[error("Failed to load PDF: {path}\n  Reason: {reason}")]
    FailedToLoad {
        /// Path to the file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF is encrypted and cannot be processed here.
    #[error(
        "PDF is encrypted and cannot be processed: {path}\n  \
         Hint: decrypt it first using 'qpdf --decrypt' or similar tools"
    )]
    Encrypted {
        /// Path to the encrypted file.
        path: PathBuf,
    },

    /// A source page is structurally unusable (e.g. missing MediaBox).
    #[error("Malformed page {page}: {reason}")]
    MalformedPage {
        /// 1-indexed page number.
        page: u32,
        /// Details about the problem.
        reason: String,
    },

    /// Embedding a source page into the output document failed.
    #[error("Failed to embed page {page}: {reason}")]
    EmbedFailed {
        /// 1-indexed page number.
        page: u32,
        /// Details about the failure.
        reason: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error bubbled up from the PDF object layer.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
}

impl ComposeError {
    /// Create an InvalidPolicy error.
    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            message: message.into(),
        }
    }

    /// Create a MalformedPage error.
    pub fn malformed_page(page: u32, reason: impl Into<String>) -> Self {
        Self::MalformedPage {
            page,
            reason: reason.into(),
        }
    }

    /// Create an EmbedFailed error.
    pub fn embed_failed(page: u32, reason: impl Into<String>) -> Self {
        Self::EmbedFailed {
            page,
            reason: reason.into(),
        }
    }

    /// True for pre-flight policy errors, raised before any page is touched.
    pub fn is_policy_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidGrid { .. }
                | Self::UnknownPaperSize { .. }
                | Self::InvalidDimension { .. }
                | Self::InvalidPolicy { .. }
                | Self::InvalidPageRange { .. }
        )
    }
}
