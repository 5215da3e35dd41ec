//! Field extraction from a rendered detail page
//!
//! Pages are read as one HTML snapshot and parsed once; each field is then
//! selected and type-converted on its own, so a failure is attributable to a
//! single field.

use crate::config::Selectors;
use crate::models::Drone;
use crate::{Result, ScrapeError};
use rust_decimal::Decimal;
use scraper::{Html, Selector};

/// Length of the fixed prefix in front of the numeric product id
const PROD_ID_PREFIX_LEN: usize = 4;

pub(crate) fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

fn parse_err(field: &'static str, raw: &str, message: impl Into<String>) -> ScrapeError {
    ScrapeError::Parse {
        field,
        raw: raw.to_string(),
        message: message.into(),
    }
}

/// Read the text of the first element matching `css`
pub fn field_text(doc: &Html, css: &str) -> Result<String> {
    let selector = parse_selector(css)?;
    let element = doc
        .select(&selector)
        .next()
        .ok_or_else(|| ScrapeError::ElementNotFound(css.to_string()))?;
    Ok(element.text().collect::<String>().trim().to_string())
}

/// Parse a product id of the form `<prefix><digits>`, dropping the prefix
pub fn parse_prod_id(raw: &str) -> Result<u32> {
    let rest = raw
        .char_indices()
        .nth(PROD_ID_PREFIX_LEN)
        .map(|(i, _)| &raw[i..])
        .ok_or_else(|| parse_err("prod_id", raw, "shorter than the id prefix"))?;
    rest.trim()
        .parse()
        .map_err(|_| parse_err("prod_id", raw, "non-numeric id suffix"))
}

/// Parse a displayed price by keeping only digits and decimal points
pub fn parse_price(raw: &str) -> Result<Decimal> {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if filtered.is_empty() {
        return Err(parse_err("price", raw, "no digits in price text"));
    }
    filtered
        .parse::<Decimal>()
        .map_err(|e| parse_err("price", raw, e.to_string()))
}

/// Parse a review count
pub fn parse_reviews(raw: &str) -> Result<u32> {
    raw.trim()
        .parse()
        .map_err(|_| parse_err("reviews", raw, "non-numeric review count"))
}

/// Parse a star rating
pub fn parse_stars(raw: &str) -> Result<f32> {
    raw.trim()
        .parse()
        .map_err(|_| parse_err("stars", raw, "non-numeric star rating"))
}

/// Extract a full [`Drone`] from a rendered detail page.
///
/// Construction is all-or-nothing: the first field that fails to select or
/// parse aborts the whole extraction.
pub fn extract_drone(doc: &Html, selectors: &Selectors) -> Result<Drone> {
    Ok(Drone {
        prod_id: parse_prod_id(&field_text(doc, &selectors.prod_id)?)?,
        brand: field_text(doc, &selectors.brand)?,
        title: field_text(doc, &selectors.title)?,
        price: parse_price(&field_text(doc, &selectors.price)?)?,
        reviews: parse_reviews(&field_text(doc, &selectors.reviews)?)?,
        stars: parse_stars(&field_text(doc, &selectors.stars)?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn detail_page() -> Html {
        Html::parse_document(
            r#"
            <html><body>
              <div class="reviewer-id">ID: 1133349</div>
              <div class="reviewer-brand"><a href="/brand">Eachine</a></div>
              <span class="product-title-text"> Eachine E58 WIFI FPV </span>
              <span class="main-price">US$32.99</span>
              <span class="rating-num J-rating-num"><span class="reviews-num">482</span></span>
              <div class="reviewer-rating"><span class="star-num js-star-num">4.5</span></div>
            </body></html>
            "#,
        )
    }

    #[test]
    fn test_field_text_trims() {
        let doc = detail_page();
        let text = field_text(&doc, "span.product-title-text").unwrap();
        assert_eq!(text, "Eachine E58 WIFI FPV");
    }

    #[test]
    fn test_field_text_missing_element() {
        let doc = detail_page();
        let err = field_text(&doc, "div.no-such-thing").unwrap_err();
        assert!(matches!(err, ScrapeError::ElementNotFound(_)));
    }

    #[test]
    fn test_field_text_bad_selector() {
        let doc = detail_page();
        let err = field_text(&doc, ":::").unwrap_err();
        assert!(matches!(err, ScrapeError::Selector { .. }));
    }

    #[test]
    fn test_parse_prod_id() {
        assert_eq!(parse_prod_id("ID: 1133349").unwrap(), 1133349);
        assert_eq!(parse_prod_id("SKU-7").unwrap(), 7);
    }

    #[test]
    fn test_parse_prod_id_too_short() {
        assert!(parse_prod_id("ID:").is_err());
        // Exactly the prefix leaves nothing to parse
        assert!(parse_prod_id("ID: ").is_err());
    }

    #[test]
    fn test_parse_prod_id_non_numeric() {
        assert!(parse_prod_id("ID: abc").is_err());
    }

    #[test]
    fn test_parse_price_strips_currency() {
        assert_eq!(
            parse_price("US$32.99").unwrap(),
            Decimal::from_str("32.99").unwrap()
        );
        assert_eq!(
            parse_price("1,299.00 EUR").unwrap(),
            Decimal::from_str("1299.00").unwrap()
        );
    }

    #[test]
    fn test_parse_price_no_digits() {
        assert!(parse_price("Sold out").is_err());
        assert!(parse_price("").is_err());
    }

    #[test]
    fn test_parse_price_multiple_dots() {
        assert!(parse_price("1.2.3").is_err());
    }

    #[test]
    fn test_parse_reviews() {
        assert_eq!(parse_reviews("482").unwrap(), 482);
        assert_eq!(parse_reviews(" 0 ").unwrap(), 0);
        assert!(parse_reviews("many").is_err());
    }

    #[test]
    fn test_parse_stars() {
        assert_eq!(parse_stars("4.5").unwrap(), 4.5);
        assert_eq!(parse_stars("5").unwrap(), 5.0);
        assert!(parse_stars("n/a").is_err());
    }

    #[test]
    fn test_extract_drone_complete_page() {
        let doc = detail_page();
        let drone = extract_drone(&doc, &Selectors::default()).unwrap();
        assert_eq!(drone.prod_id, 1133349);
        assert_eq!(drone.brand, "Eachine");
        assert_eq!(drone.title, "Eachine E58 WIFI FPV");
        assert_eq!(drone.price, Decimal::from_str("32.99").unwrap());
        assert_eq!(drone.reviews, 482);
        assert_eq!(drone.stars, 4.5);
    }

    #[test]
    fn test_extract_drone_is_all_or_nothing() {
        let doc = Html::parse_document(
            r#"
            <html><body>
              <div class="reviewer-id">ID: 1133349</div>
              <div class="reviewer-brand"><a href="/brand">Eachine</a></div>
              <span class="product-title-text">Eachine E58</span>
              <span class="main-price">Contact seller</span>
              <span class="rating-num J-rating-num"><span class="reviews-num">482</span></span>
              <div class="reviewer-rating"><span class="star-num js-star-num">4.5</span></div>
            </body></html>
            "#,
        );
        let err = extract_drone(&doc, &Selectors::default()).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse { field: "price", .. }));
    }
}
