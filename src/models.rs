use rust_decimal::Decimal;

/// One fully-extracted product.
///
/// A `Drone` is only constructed once every field of its detail page has
/// been read and parsed; partially-extracted data is never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Drone {
    pub prod_id: u32,
    pub brand: String,
    pub title: String,
    pub price: Decimal,
    pub reviews: u32,
    pub stars: f32,
}

impl Drone {
    /// The CSV row for this record: id, brand, title, price, reviews, stars
    pub fn csv_record(&self) -> [String; 6] {
        [
            self.prod_id.to_string(),
            self.brand.clone(),
            self.title.clone(),
            self.price.to_string(),
            self.reviews.to_string(),
            self.stars.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_csv_record_order() {
        let drone = Drone {
            prod_id: 1133349,
            brand: "Eachine".to_string(),
            title: "Eachine E58 WIFI FPV".to_string(),
            price: Decimal::from_str("32.99").unwrap(),
            reviews: 482,
            stars: 4.5,
        };
        assert_eq!(
            drone.csv_record(),
            [
                "1133349".to_string(),
                "Eachine".to_string(),
                "Eachine E58 WIFI FPV".to_string(),
                "32.99".to_string(),
                "482".to_string(),
                "4.5".to_string(),
            ]
        );
    }
}
