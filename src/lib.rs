pub mod config;
pub mod converter;
pub mod document;
pub mod inspect;
pub mod processor;
pub mod render;
pub mod source;

pub use config::Config;
pub use converter::{convert_document, convert_file, convert_source, Conversion};
pub use document::{Block, BlockRef, ConvertError, Document, Node, NodeRef};
pub use inspect::{inspect_markdown, MarkdownOutline};
pub use processor::{BatchDriver, BatchReport, DocumentProcessor, FileOutcome, MarkdownProcessor};
pub use render::{describe_structure, render_markdown};
pub use source::XmlSource;
