//! Error types for metex operations.

use thiserror::Error;

/// Errors that can occur while reading or parsing an article document.
///
/// Absence of a methods section is not an error; see
/// [`Outcome`](crate::extract::Outcome) for the negative terminal states of
/// a successful extraction run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
