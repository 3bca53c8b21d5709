use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML in {}", .path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("top-level element must be a section tag in {}", .0.display())]
    MissingSection(PathBuf),

    #[error("<{element}> without a title in {}", .path.display())]
    MissingTitle { element: String, path: PathBuf },
}

impl ConvertError {
    /// Whether the error comes from the XML parser rather than the document structure
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ConvertError::Xml { .. })
    }
}
