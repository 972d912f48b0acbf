//! Error types for the document model.

use std::str::Utf8Error;

/// Error while reading markup into a document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DomError {
    /// XML parsing error.
    #[error("markup parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error")]
    Utf8(#[from] Utf8Error),

    /// Attribute syntax error.
    #[error("attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error while decoding text or names.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
}
