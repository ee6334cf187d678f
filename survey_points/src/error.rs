//! Errors raised by host drawing documents.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DXF error: {0}")]
    Dxf(String),

    #[error("Document unavailable: {0}")]
    Unavailable(String),
}
