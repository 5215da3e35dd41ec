use serde::Deserialize;

/// Configuration for the browser session
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Run Chrome in headless mode
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Browser window width
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    /// Browser window height
    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Disable image loading for faster page renders
    #[serde(default = "default_true")]
    pub disable_images: bool,

    /// Custom user agent
    #[serde(default = "default_user_agent")]
    pub user_agent: Option<String>,

    /// Additional Chrome flags
    #[serde(default)]
    pub chrome_flags: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_user_agent() -> Option<String> {
    Some(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36"
            .to_string(),
    )
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            disable_images: true,
            user_agent: default_user_agent(),
            chrome_flags: vec![],
        }
    }
}

impl BrowserConfig {
    /// Configuration for debugging: visible window, images enabled
    pub fn debug_mode() -> Self {
        Self {
            headless: false,
            disable_images: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert_eq!(config.window_width, 1920);
        assert_eq!(config.window_height, 1080);
        assert!(config.disable_images);
        assert!(config.user_agent.is_some());
        assert!(config.chrome_flags.is_empty());
    }

    #[test]
    fn test_debug_mode() {
        let config = BrowserConfig::debug_mode();
        assert!(!config.headless);
        assert!(!config.disable_images);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: BrowserConfig = toml::from_str("headless = false").unwrap();
        assert!(!config.headless);
        assert_eq!(config.window_width, 1920);
    }
}
