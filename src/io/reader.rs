//! Page reading from files, readers and in-memory buffers
//!
//! [`PageReader`] adds the file-level checks (existence, size limit,
//! permissions) around the extraction engine, and can optionally decode the
//! front matter eagerly so broken metadata is reported at read time.

use crate::core::Page;
use crate::error::{PageError, Result};
use log::{debug, warn};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Configuration for the page reader
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Maximum file size to read (in bytes)
    pub max_file_size: Option<usize>,
    /// Decode the front matter while reading and fail on decode errors
    pub decode_on_read: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_file_size: Some(10 * 1024 * 1024), // 10MB default limit
            decode_on_read: false,
        }
    }
}

/// Page reader
#[derive(Debug, Clone, Default)]
pub struct PageReader {
    config: ReaderConfig,
}

impl PageReader {
    /// Create a new reader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new reader with custom configuration
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a page from a file path
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Page> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PageError::file_not_found(path));
        }

        if !path.is_file() {
            return Err(PageError::invalid_file(path));
        }

        if let Some(max_size) = self.config.max_file_size {
            let metadata = fs::metadata(path)?;

            if metadata.len() as usize > max_size {
                return Err(PageError::validation(format!(
                    "File too large: {} bytes (limit: {} bytes)",
                    metadata.len(),
                    max_size
                )));
            }
        }

        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => PageError::permission_denied(path),
            _ => PageError::Io(e),
        })?;

        debug!("reading page {}", path.display());
        self.read_from(file).inspect_err(|e| {
            warn!("failed to read page {}: {}", path.display(), e);
        })
    }

    /// Read a page from any reader
    pub fn read_from<R: Read>(&self, reader: R) -> Result<Page> {
        let page = Page::read_from(reader)?;
        self.check(page)
    }

    /// Split a page held in memory
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Page> {
        self.read_from(bytes)
    }

    fn check(&self, page: Page) -> Result<Page> {
        if self.config.decode_on_read {
            page.metadata()?;
        }
        Ok(page)
    }

    /// Get reader configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}

/// Convenience functions for common operations
pub mod convenience {
    use super::*;
    use crate::core::Metadata;

    /// Read a page from a file path with default settings
    pub fn read_page<P: AsRef<Path>>(path: P) -> Result<Page> {
        PageReader::new().read_file(path)
    }

    /// Split a page held in memory with default settings
    pub fn parse_page(bytes: &[u8]) -> Result<Page> {
        PageReader::new().parse_bytes(bytes)
    }

    /// Read and decode only the metadata of a file
    pub fn read_metadata<P: AsRef<Path>>(path: P) -> Result<Option<Metadata>> {
        read_page(path)?.metadata()
    }
}
