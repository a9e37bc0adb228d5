/// Rough category prices for when the market scan comes back empty.
/// Never consulted by the scanner itself.
#[derive(Debug, Clone)]
pub struct FallbackPriceModel {
    categories: Vec<(String, u64)>,
    default_price: u64,
}

const BASE_PRICES: &[(&str, u64)] = &[
    ("pen", 50),
    ("stationery", 100),
    ("bottle", 500),
    ("bag", 1200),
    ("shoe", 2000),
    ("sneaker", 2500),
    ("shawl", 4500),
    ("watch", 3000),
    ("toy", 400),
    ("chair", 1500),
    ("lamp", 800),
    ("furniture", 5000),
];

impl FallbackPriceModel {
    pub fn new(categories: Vec<(String, u64)>, default_price: u64) -> Self {
        let categories = categories
            .into_iter()
            .map(|(keyword, price)| (keyword.to_lowercase(), price))
            .collect();
        Self {
            categories,
            default_price,
        }
    }

    /// Price of the first category keyword found in `query`; first match wins.
    pub fn estimate(&self, query: &str) -> u64 {
        let query = query.to_lowercase();
        self.categories
            .iter()
            .find(|(keyword, _)| query.contains(keyword.as_str()))
            .map(|(_, price)| *price)
            .unwrap_or(self.default_price)
    }
}

impl Default for FallbackPriceModel {
    fn default() -> Self {
        Self::new(
            BASE_PRICES
                .iter()
                .map(|(keyword, price)| (keyword.to_string(), *price))
                .collect(),
            800,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_category() {
        let model = FallbackPriceModel::default();
        assert_eq!(model.estimate("Hand-painted Wooden CHAIR"), 1500);
        assert_eq!(model.estimate("teak furniture set"), 5000);
    }

    #[test]
    fn test_first_keyword_wins() {
        let model = FallbackPriceModel::default();
        // "shoe" precedes "sneaker" in the table.
        assert_eq!(model.estimate("sneaker shoe"), 2000);
    }

    #[test]
    fn test_unknown_uses_default() {
        let model = FallbackPriceModel::default();
        assert_eq!(model.estimate("macrame wall hanging"), 800);
    }
}
