//! Browser session management for scraping JavaScript-rendered listings
//!
//! This module owns the single live headless-Chrome session used for all
//! navigation and DOM reads. The session is held by a [`SessionManager`],
//! which can destroy and relaunch it after a failed extraction.
//!
//! # Example
//!
//! ```no_run
//! use drone_scraper::browser::{BrowserConfig, SessionManager};
//!
//! # fn main() -> drone_scraper::Result<()> {
//! let mut manager = SessionManager::new(BrowserConfig::default());
//! manager.open()?;
//!
//! let session = manager.session()?;
//! session.navigate("https://example.com")?;
//! session.wait_visible("h1", std::time::Duration::from_secs(10))?;
//! let html = session.html()?;
//!
//! println!("got {} bytes of HTML", html.len());
//! manager.close();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod session;

// Re-export main types for convenience
pub use config::BrowserConfig;
pub use session::{Session, SessionManager};
