use crate::config::FilterConfig;
use crate::product::ProductRecord;

/// Selection rule for the filtered export
///
/// A record qualifies when its price is known and at most `max_price`, its
/// rating is known and at least `min_rating`, and its country of origin is
/// known and contains `country_contains` (case-sensitive).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub max_price: u64,
    pub min_rating: f64,
    pub country_contains: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::from(&FilterConfig::default())
    }
}

impl From<&FilterConfig> for FilterCriteria {
    fn from(config: &FilterConfig) -> Self {
        Self {
            max_price: config.max_price,
            min_rating: config.min_rating,
            country_contains: config.country_contains.clone(),
        }
    }
}

impl FilterCriteria {
    /// Returns true if the record belongs in the filtered export
    pub fn matches(&self, record: &ProductRecord) -> bool {
        let price_ok = record.price.is_some_and(|price| price <= self.max_price);
        let rating_ok = record.rating.is_some_and(|rating| rating >= self.min_rating);
        let country_ok = record
            .country_of_origin
            .as_deref()
            .is_some_and(|country| country.contains(self.country_contains.as_str()));

        price_ok && rating_ok && country_ok
    }

    /// Keeps the matching records, preserving order
    pub fn select<'a>(&self, records: &'a [ProductRecord]) -> Vec<&'a ProductRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
