use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the paginated collection endpoint
    pub base_url: String,

    /// Record fields requested from the API
    pub fields: Vec<String>,

    /// Rows shown per page at startup
    pub rows_per_page: usize,

    /// Rows-per-page choices offered by the selector
    pub page_size_options: Vec<usize>,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://api.artic.edu/api/v1/artworks".to_string(),
            fields: vec![
                "id".to_string(),
                "title".to_string(),
                "place_of_origin".to_string(),
                "artist_display".to_string(),
                "inscriptions".to_string(),
                "date_start".to_string(),
                "date_end".to_string(),
            ],
            rows_per_page: 5,
            page_size_options: vec![5, 10, 25, 50],
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Initialize configuration from defaults and environment variables
    pub fn init() -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = Self::default();
        config.load_from_env();
        Ok(config)
    }

    /// Load configuration overrides from environment variables
    pub fn load_from_env(&mut self) {
        if let Ok(base_url) = std::env::var("GALLERIST_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(rows_str) = std::env::var("GALLERIST_ROWS") {
            if let Ok(rows) = rows_str.parse() {
                self.rows_per_page = rows;
            }
        }

        if let Ok(timeout_str) = std::env::var("GALLERIST_TIMEOUT") {
            if let Ok(timeout) = timeout_str.parse() {
                self.request_timeout_secs = timeout;
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("base URL must not be empty");
        }

        if self.rows_per_page == 0 {
            anyhow::bail!("rows per page must be at least 1");
        }

        if self.page_size_options.is_empty() {
            anyhow::bail!("at least one page size option is required");
        }

        if self.page_size_options.iter().any(|&size| size == 0) {
            anyhow::bail!("page size options must all be at least 1");
        }

        Ok(())
    }
}
