//! I/O layer: byte streams, page reading and file resolution

pub mod reader;
pub mod resolver;
pub mod stream;

pub use reader::{convenience, PageReader, ReaderConfig};
pub use resolver::{FileResolver, ResolvedFile, ResolverConfig};
pub use stream::{PeekReader, MAX_LOOKAHEAD};
