use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use crate::config::Config;
use crate::tui;

/// Gallerist - browse a server-paginated collection from your terminal
#[derive(Parser)]
#[command(
    name = "gallerist",
    version,
    about = "Browse a server-paginated record collection from your terminal",
    long_about = r#"Gallerist fetches a remote collection one page at a time and shows it as a
table with checkbox-style row selection. A bulk request for N rows keeps
accumulating records from later pages as you page forward until N is met.

Examples:
  gallerist                                  # Browse the default collection
  gallerist --rows 10                        # Start with 10 rows per page
  gallerist --base-url https://example.test  # Point at another collection"#
)]
pub struct Cli {
    /// Base URL of the collection endpoint
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Rows shown per page at startup
    #[arg(short = 'r', long = "rows")]
    pub rows: Option<usize>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        let mut config = Config::init()?;

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(rows) = self.rows {
            config.rows_per_page = rows;
        }

        config.validate()?;
        debug!("Configuration initialized");

        info!("Starting interactive mode");
        tui::run(config).await?;

        info!("Application finished");
        Ok(())
    }
}
