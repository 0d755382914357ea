//! Core front matter extraction
//!
//! - normalize: leading whitespace and HTML comment wrappers
//! - delimiter: first-line classification and delimiter kinds
//! - extractor: the front matter scanning state machine
//! - page: the Page model and the `extract` entry point
//! - metadata: on-demand decoding of YAML, TOML and JSON front matter

pub mod delimiter;
pub mod extractor;
pub mod metadata;
pub mod normalize;
pub mod page;

pub use delimiter::DelimiterKind;
pub use extractor::{extract_front_matter, FrontMatterScanner};
pub use metadata::{decode, detect_format, FrontMatterFormat, Metadata};
pub use page::{extract, Page};
