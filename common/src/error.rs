//! Error types

use thiserror::Error;

/// Shared error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("No report file selected")]
    NoFileSelected,
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;
