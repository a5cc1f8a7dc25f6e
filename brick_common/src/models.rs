/// A year in which a theme has at least one listed set
pub type CatalogYear = u16;

/// Set metadata as read from a theme+year listing, before weighing
#[derive(Debug, Clone, PartialEq)]
pub struct ListedSet {
    pub year: CatalogYear,
    pub name: String,
    /// Set number without the variant suffix (e.g. "6775")
    pub set_id: String,
    /// Recommended retail price in US dollars, if the listing had one
    pub msrp: Option<f64>,
    pub pieces: u32,
}

/// One analysed set, as handed to the report
#[derive(Debug, Clone, PartialEq)]
pub struct SetRecord {
    pub year: CatalogYear,
    pub name: String,
    pub set_id: String,
    pub msrp: Option<f64>,
    /// MSRP in 2024 dollars
    pub price: Option<f64>,
    pub pieces: u32,
    /// Total weight in grams, one decimal
    pub weight: f64,
}

impl SetRecord {
    /// Price in cents per gram, one decimal. Zero when the set has no weight.
    pub fn price_per_gram(&self) -> f64 {
        match self.price {
            Some(price) if self.weight > 0.0 => round_to(price / self.weight * 100.0, 1),
            _ => 0.0,
        }
    }

    /// Price in cents per piece, one decimal. Zero when the piece count is zero.
    pub fn price_per_piece(&self) -> f64 {
        match self.price {
            Some(price) if self.pieces > 0 => round_to(price / self.pieces as f64 * 100.0, 1),
            _ => 0.0,
        }
    }
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(price: Option<f64>, pieces: u32, weight: f64) -> SetRecord {
        SetRecord {
            year: 2010,
            name: "Test Set".to_string(),
            set_id: "1234".to_string(),
            msrp: price,
            price,
            pieces,
            weight,
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(14.39559, 2), 14.40);
        assert_eq!(round_to(4.6000000001, 1), 4.6);
        assert_eq!(round_to(12.0, 2), 12.0);
    }

    #[test]
    fn test_price_per_gram() {
        let r = record(Some(14.40), 100, 48.0);
        assert_eq!(r.price_per_gram(), 30.0);
    }

    #[test]
    fn test_price_per_gram_zero_weight() {
        let r = record(Some(14.40), 100, 0.0);
        assert_eq!(r.price_per_gram(), 0.0);
    }

    #[test]
    fn test_price_per_piece() {
        let r = record(Some(9.99), 37, 30.0);
        assert_eq!(r.price_per_piece(), 27.0);
    }

    #[test]
    fn test_missing_price_yields_zero_ratios() {
        let r = record(None, 37, 30.0);
        assert_eq!(r.price_per_gram(), 0.0);
        assert_eq!(r.price_per_piece(), 0.0);
    }
}
