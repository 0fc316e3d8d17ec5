//! HTTP client for the paginated collection endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::remote::errors::{FetchError, FetchResult};
use crate::remote::types::{Artwork, PageResponse};
use crate::table::PageWindow;

/// Source of one page of records at a time.
///
/// The table controller is driven against this seam so it can be
/// exercised without a live endpoint.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the given 1-based page
    async fn fetch_page(&self, page: u32) -> FetchResult<PageWindow<Artwork>>;
}

/// reqwest-backed page source for the collection API
#[derive(Debug, Clone)]
pub struct CollectionClient {
    client: Client,
    base_url: String,
    fields: String,
}

impl CollectionClient {
    /// Create a client from the application configuration
    pub fn new(config: &Config) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("gallerist/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            fields: config.fields.join(","),
        })
    }
}

#[async_trait]
impl PageSource for CollectionClient {
    async fn fetch_page(&self, page: u32) -> FetchResult<PageWindow<Artwork>> {
        if page == 0 {
            return Err(FetchError::InvalidPage(page));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("page", page.to_string()), ("fields", self.fields.clone())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                page,
            });
        }

        let body: PageResponse = response.json().await.map_err(|e| FetchError::Decode {
            page,
            message: e.to_string(),
        })?;

        debug!(
            page,
            items = body.data.len(),
            total_pages = body.pagination.total_pages,
            "fetched collection page"
        );

        Ok(PageWindow {
            page_number: page,
            items: body.data,
            total_pages: body.pagination.total_pages,
        })
    }
}
