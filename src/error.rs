use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KmlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not well-formed XML.
    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("projection error: {0}")]
    Projection(String),
}

pub type Result<T> = std::result::Result<T, KmlError>;
