//! Record cache keyed by lower-cased common name.
//!
//! Filled from every successful directory load. The detail flow only reads
//! it when `reuse_directory_records` is enabled.

use std::collections::HashMap;

use crate::countries::Country;

#[derive(Debug, Default)]
pub struct CountryCache {
    records: HashMap<String, Country>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl CountryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cache contents with `countries`. First occurrence wins
    /// when two records share a name.
    pub fn fill(&mut self, countries: &[Country]) {
        self.records.clear();
        for country in countries {
            self.records
                .entry(key(country.common_name()))
                .or_insert_with(|| country.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&Country> {
        self.records.get(&key(name))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{country, sample_directory};

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut cache = CountryCache::new();
        cache.fill(&sample_directory());
        assert_eq!(cache.get("FRANCE").map(|c| c.common_name()), Some("France"));
        assert_eq!(cache.get(" peru ").map(|c| c.region.as_str()), Some("Americas"));
        assert!(cache.get("Atlantis").is_none());
    }

    #[test]
    fn test_fill_replaces_previous_contents() {
        let mut cache = CountryCache::new();
        cache.fill(&sample_directory());
        cache.fill(&[country("Chad", "Africa", &[])]);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("France").is_none());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let mut cache = CountryCache::new();
        cache.fill(&[
            country("Congo", "Africa", &["GAB"]),
            country("Congo", "Africa", &[]),
        ]);
        assert_eq!(cache.get("congo").map(|c| c.borders.len()), Some(1));
    }
}
