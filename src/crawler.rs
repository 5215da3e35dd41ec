//! The crawl control loop: URL discovery, per-item extraction, recovery
//!
//! Discovery walks listing pages through their next-page links until enough
//! detail-page URLs are gathered; a render failure there aborts the whole
//! crawl. Extraction then visits each URL in turn and tolerates per-item
//! failures by recycling the browser session and moving on.

use crate::browser::{Session, SessionManager};
use crate::config::{Config, Selectors};
use crate::extract;
use crate::metrics::RunStats;
use crate::models::Drone;
use crate::Result;
use log::{debug, info, warn};
use scraper::Html;
use url::Url;

/// Collect the `href` of every element matching `css`, in document order.
/// Elements without an `href` are skipped.
fn collect_hrefs(doc: &Html, css: &str) -> Result<Vec<String>> {
    let selector = extract::parse_selector(css)?;
    Ok(doc
        .select(&selector)
        .filter_map(|a| a.value().attr("href").map(str::to_string))
        .collect())
}

/// The `href` of the first element matching `css`, if any
fn first_href(doc: &Html, css: &str) -> Result<Option<String>> {
    let selector = extract::parse_selector(css)?;
    Ok(doc
        .select(&selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string))
}

/// Resolve a possibly-relative `href` against the page it appeared on
fn absolutize(page_url: &str, href: &str) -> String {
    Url::parse(page_url)
        .and_then(|base| base.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Walk listing pages from `root_url`, gathering detail-page URLs until at
/// least `min_count` are found or the pagination runs out.
///
/// The result is truncated to `min_count` entries. It is shorter only when
/// a listing page has no next-page link before the target is reached.
pub fn discover_product_urls(
    session: &Session,
    selectors: &Selectors,
    root_url: &str,
    min_count: usize,
) -> Result<Vec<String>> {
    info!("gathering at least {} product links...", min_count);

    let mut urls: Vec<String> = Vec::new();
    let mut next_page: Option<String> = None;

    while urls.len() < min_count {
        let page_url = next_page.clone().unwrap_or_else(|| root_url.to_string());
        session.navigate(&page_url)?;

        // A listing page that never renders its product list is fatal to
        // discovery; there is no per-page tolerance here.
        session.wait_visible(&selectors.product_list, selectors.wait_budget())?;
        let doc = Html::parse_document(&session.html()?);

        for href in collect_hrefs(&doc, &selectors.product_list)? {
            let link = absolutize(&page_url, &href);
            debug!("found product link: {}", link);
            urls.push(link);
        }
        info!("gathered {} of {} product links", urls.len(), min_count);

        match first_href(&doc, &selectors.next_page)? {
            Some(href) => next_page = Some(absolutize(&page_url, &href)),
            None => {
                warn!(
                    "no next-page link on {}; stopping with {} links",
                    page_url,
                    urls.len()
                );
                break;
            }
        }
    }

    urls.truncate(min_count);
    info!("product link gathering done");
    Ok(urls)
}

fn extract_one(session: &Session, selectors: &Selectors, url: &str) -> Result<Drone> {
    session.navigate(url)?;
    for css in selectors.detail_wait_list() {
        session.wait_visible(css, selectors.wait_budget())?;
    }
    let doc = Html::parse_document(&session.html()?);
    extract::extract_drone(&doc, selectors)
}

/// Visit every discovered URL and extract a [`Drone`] from each.
///
/// Failed items are skipped, not retried: the session is recycled (the
/// failure may have wedged the renderer) and the loop moves to the next
/// URL. Only a failure of the recycle itself aborts the run.
pub fn extract_all(
    manager: &mut SessionManager,
    selectors: &Selectors,
    urls: &[String],
    stats: &mut RunStats,
) -> Result<Vec<Drone>> {
    info!("extracting product data from {} links...", urls.len());

    let mut drones = Vec::new();
    for (i, url) in urls.iter().enumerate() {
        stats.attempted += 1;
        match extract_one(manager.session()?, selectors, url) {
            Ok(drone) => {
                info!(
                    "product {}/{} scraped: [{}] {}",
                    i + 1,
                    urls.len(),
                    drone.prod_id,
                    drone.title
                );
                stats.succeeded += 1;
                drones.push(drone);
            }
            Err(e) => {
                warn!("product {}/{} failed: {}", i + 1, urls.len(), e);
                stats.failed += 1;
                manager.recycle()?;
                stats.session_recycles += 1;
            }
        }
    }
    Ok(drones)
}

/// Run a full crawl: open a session, discover URLs, extract records, close.
///
/// The session is closed on every exit path, including a discovery failure.
pub fn scrape(config: &Config, root_url: &str, min_count: usize) -> Result<Vec<Drone>> {
    let mut manager = SessionManager::new(config.browser.clone());
    let result = run(&mut manager, config, root_url, min_count);
    manager.close();
    result
}

fn run(
    manager: &mut SessionManager,
    config: &Config,
    root_url: &str,
    min_count: usize,
) -> Result<Vec<Drone>> {
    manager.open()?;

    let mut stats = RunStats::default();
    let urls = discover_product_urls(manager.session()?, &config.selectors, root_url, min_count)?;
    stats.links_discovered = urls.len();

    let drones = extract_all(manager, &config.selectors, &urls, &mut stats)?;

    info!(
        "scraping done: {} products out of {} links ({:.1}% success, {} session recycles)",
        drones.len(),
        stats.links_discovered,
        stats.success_rate(),
        stats.session_recycles
    );
    Ok(drones)
}
