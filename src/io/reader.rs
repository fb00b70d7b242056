//! PDF reading and loading.

use lopdf::Document;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::{ComposeError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,
}

/// PDF reader with up-front path and structure checks.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not point at a readable file, the
    /// file is not a valid PDF, the PDF is encrypted, or it has no pages.
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        Self::check_path(path)?;
        let path_buf = path.to_path_buf();

        let bytes = tokio::fs::read(&path_buf).await?;

        // lopdf parsing is CPU-bound; keep it off the async runtime.
        let parse_path = path_buf.clone();
        let document = task::spawn_blocking(move || {
            Document::load_mem(&bytes).map_err(|e| ComposeError::FailedToLoad {
                path: parse_path,
                reason: e.to_string(),
            })
        })
        .await
        .map_err(|e| ComposeError::FailedToLoad {
            path: path_buf.clone(),
            reason: format!("load task failed: {e}"),
        })??;

        if document.is_encrypted() {
            return Err(ComposeError::Encrypted { path: path_buf });
        }

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(ComposeError::NoPages);
        }

        Ok(LoadedPdf {
            document,
            path: path_buf,
            page_count,
        })
    }

    /// Verify that a path exists and is a regular file.
    pub fn check_path(path: &Path) -> Result<()> {
        if !path.try_exists()? {
            return Err(ComposeError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        if path.is_dir() {
            return Err(ComposeError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }
}
