//! drone-scraper: a sequential product-catalog scraper driven by headless Chrome
//!
//! The crate walks a paginated product listing, gathers a bounded list of
//! detail-page URLs, extracts one [`models::Drone`] record per product, and
//! recovers from per-item failures by recycling the browser session.

pub mod browser;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod metrics;
pub mod models;
pub mod output;

use thiserror::Error;

/// Error type shared by every scraping operation
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("timed out waiting for element: {0}")]
    RenderTimeout(String),

    #[error("no element matched selector: {0}")]
    ElementNotFound(String),

    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },

    #[error("failed to parse {field} from {raw:?}: {message}")]
    Parse {
        field: &'static str,
        raw: String,
        message: String,
    },

    #[error("failed to read page content: {0}")]
    Html(String),

    #[error("no browser session is open")]
    InvalidState,

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

// Re-export commonly used types
pub use config::{Config, Selectors};
pub use crawler::scrape;
pub use models::Drone;
