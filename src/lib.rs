//! pagematter: front matter detection and extraction for content pipelines
//!
//! This library splits a document into its raw front matter block and its
//! raw body in a single forward pass over a byte stream. It recognises three
//! conventions and does not interpret the block while extracting it:
//!
//! - YAML, between two `---` lines
//! - TOML, between two `+++` lines
//! - JSON, a balanced `{` ... `}` object
//!
//! The block may be wrapped in an HTML comment (`<!--` / `-->` lines) to hide
//! it from HTML renderers. Documents starting with `<` are treated as raw
//! markup: they are not renderable and are returned whole as content.
//!
//! # Quick Start
//!
//! ```rust
//! use pagematter::{Page, Result};
//!
//! fn main() -> Result<()> {
//!     let page = Page::from_bytes(b"---\ntitle: Hello\n---\n# Body\n")?;
//!
//!     assert!(page.is_renderable());
//!     assert_eq!(page.front_matter(), b"---\ntitle: Hello\n---\n");
//!     assert_eq!(page.content(), b"# Body\n");
//!
//!     // Decoding is lazy and picks the decoder from the block itself
//!     let meta = page.metadata()?.expect("page has front matter");
//!     assert_eq!(meta.get_str("title"), Some("Hello"));
//!     Ok(())
//! }
//! ```
//!
//! ## Reading Files
//!
//! ```rust,no_run
//! use pagematter::{PageReader, ReaderConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let reader = PageReader::with_config(ReaderConfig {
//!         decode_on_read: true,
//!         ..Default::default()
//!     });
//!     let page = reader.read_file("content/post.md")?;
//!     println!("{} bytes of content", page.content().len());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`](crate::core): classification, the extraction state machine, the [`Page`]
//!   model and metadata decoding
//! - [`io`]: the peekable byte stream, file reading and path resolution
//! - [`error`]: the [`PageError`] taxonomy

// Public API exports
pub use error::{ErrorSeverity, PageError, Result};

// Core types
pub use crate::core::{
    decode, detect_format, extract, DelimiterKind, FrontMatterFormat, FrontMatterScanner,
    Metadata, Page,
};

// IO types
pub use io::{FileResolver, PageReader, PeekReader, ReaderConfig, ResolvedFile, ResolverConfig};

pub mod core;
pub mod error;
pub mod io;

/// Convenience functions for common operations
pub mod convenience {
    //! Convenience functions with default settings, for scripts and one-off
    //! calls that don't need a configured reader.

    pub use crate::io::convenience::*;
}
