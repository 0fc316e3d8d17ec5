//! Remote collection source.
//!
//! One request retrieves one page of records plus the collection's
//! total page count. The client holds no state beyond its configured
//! HTTP client; all derived state lives in the table controller.

pub mod client;
pub mod errors;
pub mod types;

pub use client::{CollectionClient, PageSource};
pub use errors::{FetchError, FetchResult};
pub use types::{Artwork, PageResponse};
