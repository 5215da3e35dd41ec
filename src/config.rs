use crate::browser::BrowserConfig;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration, loadable from `config.toml`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub selectors: Selectors,
}

/// The fixed map from field name to CSS selector, plus the element wait
/// budget. Initialized once and shared by reference with every extraction
/// call; the defaults target the product listing the scraper was built for.
#[derive(Debug, Clone, Deserialize)]
pub struct Selectors {
    /// Product id on the detail page
    #[serde(default = "default_prod_id")]
    pub prod_id: String,

    /// Brand link on the detail page
    #[serde(default = "default_brand")]
    pub brand: String,

    /// Product title on the detail page
    #[serde(default = "default_title")]
    pub title: String,

    /// Displayed price on the detail page
    #[serde(default = "default_price")]
    pub price: String,

    /// Review count on the detail page
    #[serde(default = "default_reviews")]
    pub reviews: String,

    /// Star rating on the detail page
    #[serde(default = "default_stars")]
    pub stars: String,

    /// Detail-page links inside a listing page
    #[serde(default = "default_product_list")]
    pub product_list: String,

    /// The "next page" link on a listing page
    #[serde(default = "default_next_page")]
    pub next_page: String,

    /// How long to wait for any one element to render, in seconds
    #[serde(default = "default_element_wait")]
    pub element_wait_secs: u64,
}

fn default_prod_id() -> String {
    "div.reviewer-id".to_string()
}

fn default_brand() -> String {
    "div.reviewer-brand > a".to_string()
}

fn default_title() -> String {
    "span.product-title-text".to_string()
}

fn default_price() -> String {
    "span.main-price".to_string()
}

fn default_reviews() -> String {
    "span.rating-num.J-rating-num > span.reviews-num".to_string()
}

fn default_stars() -> String {
    "div.reviewer-rating > span.star-num.js-star-num".to_string()
}

fn default_product_list() -> String {
    "ul.goodlist.cf > li > div.p-wrap > a.title".to_string()
}

fn default_next_page() -> String {
    "a.iconfont.icon-arrow_right_new1.btn-page.next-page".to_string()
}

fn default_element_wait() -> u64 {
    10
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            prod_id: default_prod_id(),
            brand: default_brand(),
            title: default_title(),
            price: default_price(),
            reviews: default_reviews(),
            stars: default_stars(),
            product_list: default_product_list(),
            next_page: default_next_page(),
            element_wait_secs: default_element_wait(),
        }
    }
}

impl Selectors {
    /// The element wait budget as a [`Duration`]
    pub fn wait_budget(&self) -> Duration {
        Duration::from_secs(self.element_wait_secs)
    }

    /// The detail-page selectors that must all render before extraction
    pub fn detail_wait_list(&self) -> [&str; 5] {
        [
            &self.title,
            &self.brand,
            &self.price,
            &self.reviews,
            &self.stars,
        ]
    }
}

impl Config {
    /// Load configuration from the given TOML file, falling back to the
    /// defaults if the file is missing or malformed.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<Config>(&content) {
                    Ok(cfg) => return cfg,
                    Err(e) => warn!("ignoring malformed config {}: {}", path.display(), e),
                },
                Err(e) => warn!("could not read config {}: {}", path.display(), e),
            }
        }
        Self::default()
    }
}
