//! Error types for the collection client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("collection API returned status {code} for page {page}")]
    Status { code: u16, page: u32 },

    #[error("failed to decode page {page}: {message}")]
    Decode { page: u32, message: String },

    #[error("page number must be at least 1, got {0}")]
    InvalidPage(u32),
}

pub type FetchResult<T> = Result<T, FetchError>;
