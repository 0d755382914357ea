//! Error types for the pagematter library
//!
//! Extraction failures carry the byte offset reached in the front matter
//! buffer. I/O errors from the underlying stream are passed through as-is,
//! and decoder errors are surfaced unmodified.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum PageError {
    /// I/O errors from the underlying byte source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A delimiter line that is not followed by LF or CR+LF
    #[error(
        "frontmatter delimiter must be followed by CR+LF or LF but those can't be found at filepos {offset}"
    )]
    MalformedDelimiter { offset: usize },

    /// The stream ended before the closing delimiter was found
    #[error("unable to read frontmatter at filepos {offset}: unexpected end of stream")]
    UnterminatedFrontMatter { offset: usize },

    /// The opening line passed the delimiter check but has no delimiter kind
    #[error("unable to determine delimiters from {line:?}")]
    UnclassifiableDelimiter { line: String },

    /// Front matter starting with a byte no decoder is registered for
    #[error("unsupported front matter format (lead byte {lead:?})")]
    UnsupportedFormat { lead: char },

    /// YAML decoding errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML decoding errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A span requested as text is not valid UTF-8
    #[error("{what} is not valid UTF-8")]
    InvalidUtf8 { what: &'static str },

    /// File not found or invalid path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("Not a regular file: {path}")]
    InvalidFile { path: PathBuf },

    /// Permission errors
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path resolution errors
    #[error("Path resolution error: {reason}")]
    PathResolution { reason: String },

    /// Generic validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PageError>;

impl PageError {
    /// Create a new malformed delimiter error
    pub fn malformed_delimiter(offset: usize) -> Self {
        Self::MalformedDelimiter { offset }
    }

    /// Create a new unterminated front matter error
    pub fn unterminated(offset: usize) -> Self {
        Self::UnterminatedFrontMatter { offset }
    }

    /// Create a new unclassifiable delimiter error
    pub fn unclassifiable(line: &[u8]) -> Self {
        Self::UnclassifiableDelimiter {
            line: String::from_utf8_lossy(line).into_owned(),
        }
    }

    /// Create a new unsupported format error
    pub fn unsupported_format(lead: u8) -> Self {
        Self::UnsupportedFormat {
            lead: char::from(lead),
        }
    }

    /// Create a new invalid UTF-8 error
    pub fn invalid_utf8(what: &'static str) -> Self {
        Self::InvalidUtf8 { what }
    }

    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new invalid file error
    pub fn invalid_file(path: impl Into<PathBuf>) -> Self {
        Self::InvalidFile { path: path.into() }
    }

    /// Create a new permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Create a new path resolution error
    pub fn path_resolution(reason: impl Into<String>) -> Self {
        Self::PathResolution {
            reason: reason.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Byte offset into the front matter buffer, for extraction errors
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::MalformedDelimiter { offset } | Self::UnterminatedFrontMatter { offset } => {
                Some(*offset)
            }
            _ => None,
        }
    }

    /// Check if this error is recoverable
    ///
    /// Extraction is a single deterministic pass, so "recoverable" means a
    /// retry with a fresh stream or a different document may succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(io_err) => !matches!(
                io_err.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ),
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::UnclassifiableDelimiter { .. } => false,
            Self::MalformedDelimiter { .. }
            | Self::UnterminatedFrontMatter { .. }
            | Self::UnsupportedFormat { .. }
            | Self::Yaml(_)
            | Self::Toml(_)
            | Self::Json(_)
            | Self::InvalidUtf8 { .. }
            | Self::InvalidFile { .. }
            | Self::PathResolution { .. }
            | Self::Validation { .. } => true,
        }
    }

    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnclassifiableDelimiter { .. } => ErrorSeverity::Critical,
            Self::FileNotFound { .. } | Self::PermissionDenied { .. } => ErrorSeverity::Critical,
            Self::MalformedDelimiter { .. } | Self::UnterminatedFrontMatter { .. } => {
                ErrorSeverity::High
            }
            Self::Yaml(_) | Self::Toml(_) | Self::Json(_) | Self::UnsupportedFormat { .. } => {
                ErrorSeverity::Medium
            }
            Self::Validation { .. } | Self::PathResolution { .. } => ErrorSeverity::Low,
            _ => ErrorSeverity::Medium,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
