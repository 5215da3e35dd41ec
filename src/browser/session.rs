use super::config::BrowserConfig;
use crate::{Result, ScrapeError};
use headless_chrome::{Browser, LaunchOptions, Tab};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;

/// One live rendering session: a Chrome process and the tab driving it
pub struct Session {
    browser: Browser,
    tab: Arc<Tab>,
}

impl Session {
    fn start(config: &BrowserConfig) -> Result<Self> {
        use std::ffi::OsStr;

        // Store owned strings first so the OsStr args can borrow them
        let images_arg = if config.disable_images {
            Some("--blink-settings=imagesEnabled=false".to_string())
        } else {
            None
        };
        let user_agent_arg = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args: Vec<&OsStr> = vec![
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-setuid-sandbox"),
        ];
        if let Some(ref img) = images_arg {
            args.push(OsStr::new(img));
        }
        if let Some(ref ua) = user_agent_arg {
            args.push(OsStr::new(ua));
        }
        for flag in &config.chrome_flags {
            args.push(OsStr::new(flag));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.window_width, config.window_height)))
            .args(args)
            .build()
            .map_err(|e| ScrapeError::Launch(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| ScrapeError::Launch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::Launch(e.to_string()))?;

        Ok(Self { browser, tab })
    }

    /// Navigate to a URL and wait for the page load to settle
    pub fn navigate(&self, url: &str) -> Result<()> {
        debug!("navigating to: {}", url);

        self.tab
            .navigate_to(url)
            .map_err(|e| ScrapeError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| ScrapeError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    /// Wait until an element matching the selector has rendered
    pub fn wait_visible(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map(|_| ())
            .map_err(|_| ScrapeError::RenderTimeout(selector.to_string()))
    }

    /// Snapshot the current page's HTML
    pub fn html(&self) -> Result<String> {
        self.tab
            .get_content()
            .map_err(|e| ScrapeError::Html(e.to_string()))
    }

    /// Get a reference to the underlying browser
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Get a reference to the underlying tab
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }
}

/// Owns the lifecycle of the single rendering session.
///
/// At most one [`Session`] exists at a time. After a failed extraction the
/// caller recycles the whole session rather than retrying the navigation,
/// since a partial render can leave the engine in a state no further
/// navigation recovers from.
pub struct SessionManager {
    config: BrowserConfig,
    session: Option<Session>,
}

impl SessionManager {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Launch the browser session. A no-op if one is already open.
    pub fn open(&mut self) -> Result<()> {
        if self.session.is_some() {
            warn!("browser session is already open");
            return Ok(());
        }
        info!("launching browser session...");
        self.session = Some(Session::start(&self.config)?);
        info!("browser session ready");
        Ok(())
    }

    /// Terminate the current session. A no-op if none is open.
    ///
    /// Dropping the session reaps the Chrome process.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            info!("browser session closed");
        }
    }

    /// Destroy and relaunch the session
    pub fn recycle(&mut self) -> Result<()> {
        self.close();
        self.open()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Borrow the live session, failing if none is open
    pub fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(ScrapeError::InvalidState)
    }
}
