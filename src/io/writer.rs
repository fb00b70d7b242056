//! PDF writing and saving.

use lopdf::Document;
use std::io::Write;
use std::path::Path;
use tokio::task;

use crate::error::{ComposeError, Result};

/// PDF writer. Compresses streams and serializes on a blocking task, then
/// writes the bytes through tokio.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    compress: bool,
}

impl PdfWriter {
    /// Create a writer with compression enabled.
    pub fn new() -> Self {
        Self { compress: true }
    }

    /// Create a writer that keeps content streams uncompressed.
    pub fn without_compression() -> Self {
        Self { compress: false }
    }

    /// Save a document to `path`, creating parent directories as needed.
    ///
    /// Returns the number of bytes written.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<u64> {
        let compress = self.compress;

        let bytes = task::spawn_blocking(move || -> Result<Vec<u8>> {
            let mut doc = doc;
            if compress {
                doc.compress();
            }
            let mut buf = Vec::new();
            doc.save_to(&mut buf)?;
            buf.flush()?;
            Ok(buf)
        })
        .await
        .map_err(|e| ComposeError::Io(std::io::Error::other(format!("write task failed: {e}"))))??;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let len = bytes.len() as u64;
        tokio::fs::write(path, bytes).await?;

        Ok(len)
    }
}
