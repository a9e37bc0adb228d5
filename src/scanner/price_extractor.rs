use regex::Regex;
use serde::{Deserialize, Serialize};

/// Rupee symbol, `Rs`, `Rs.` or `INR`, then an amount. The amount is either
/// comma-grouped (`12,500`, `1,00,000`) or a plain run of digits.
const CURRENCY_PATTERN: &str = r"(?i)(?:₹|\b(?:rs|inr))\.?\s?(\d{1,3}(?:,\d{2,3})+|\d+)";

/// Open interval of amounts considered a plausible retail price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: u64,
    pub max: u64,
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self {
            min: 50,
            max: 500_000,
        }
    }
}

impl PriceBounds {
    pub fn contains(&self, value: u64) -> bool {
        value > self.min && value < self.max
    }
}

#[derive(Debug, Clone)]
pub struct PriceExtractor {
    pattern: Regex,
    bounds: PriceBounds,
}

impl PriceExtractor {
    pub fn new(bounds: PriceBounds) -> Self {
        Self {
            pattern: Regex::new(CURRENCY_PATTERN).expect("currency pattern is a valid regex"),
            bounds,
        }
    }

    /// Every currency-marked amount in `text` that falls inside the bounds,
    /// in order of appearance. Never fails; unmatched text yields nothing.
    pub fn extract(&self, text: &str) -> Vec<u64> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| m.as_str().replace(',', "").parse::<u64>().ok())
            .filter(|&value| self.bounds.contains(value))
            .collect()
    }
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new(PriceBounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rupee_symbol_with_thousands() {
        let extractor = PriceExtractor::default();
        assert_eq!(
            extractor.extract("Great deal! ₹1,299 only, limited stock"),
            vec![1299]
        );
    }

    #[test]
    fn test_bare_phone_number_ignored() {
        let extractor = PriceExtractor::default();
        assert!(extractor.extract("Call 9876543210 for details").is_empty());
    }

    #[test]
    fn test_abbreviations_case_insensitive() {
        let extractor = PriceExtractor::default();
        assert_eq!(
            extractor.extract("MRP Rs. 2,499, now rs 1999 or INR 1,799 / inr1500"),
            vec![2499, 1999, 1799, 1500]
        );
    }

    #[test]
    fn test_ungrouped_amount_read_whole() {
        let extractor = PriceExtractor::default();
        assert_eq!(extractor.extract("₹12500 sale"), vec![12500]);
    }

    #[test]
    fn test_indian_grouping() {
        let extractor = PriceExtractor::default();
        assert_eq!(extractor.extract("Sofa set ₹1,49,999"), vec![149999]);
    }

    #[test]
    fn test_marker_inside_word_ignored() {
        let extractor = PriceExtractor::default();
        assert!(extractor.extract("open 24hrs 365 days, 12 yrs 500 stores").is_empty());
    }

    #[test]
    fn test_bounds_are_exclusive() {
        let extractor = PriceExtractor::new(PriceBounds { min: 50, max: 500_000 });
        assert!(extractor.extract("₹50").is_empty());
        assert!(extractor.extract("₹5,00,000").is_empty());
        assert_eq!(extractor.extract("₹51 and ₹4,99,999"), vec![51, 499_999]);
    }

    #[test]
    fn test_decimal_paise_not_glued() {
        let extractor = PriceExtractor::default();
        assert_eq!(extractor.extract("Rs.1,299.00"), vec![1299]);
    }

    proptest! {
        #[test]
        fn prop_extracted_values_within_bounds(text in ".{0,200}", min in 0u64..1_000, span in 1u64..1_000_000) {
            let bounds = PriceBounds { min, max: min + span };
            let extractor = PriceExtractor::new(bounds);
            for value in extractor.extract(&text) {
                prop_assert!(value > bounds.min && value < bounds.max);
            }
        }

        #[test]
        fn prop_marked_amounts_found(value in 51u64..500_000) {
            let extractor = PriceExtractor::default();
            let text = format!("Now only ₹{value} today");
            prop_assert_eq!(extractor.extract(&text), vec![value]);
        }
    }
}
