//! # Directory Filter
//!
//! The displayed directory is a derived view: the collection itself is
//! never touched. A record is kept when it matches the selected region (if
//! any) AND its common name contains the query (if any), case-insensitively.

use std::fmt;
use std::str::FromStr;

use crate::countries::Country;

/// Regions offered by the region selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Africa,
        Region::Americas,
        Region::Asia,
        Region::Europe,
        Region::Oceania,
    ];

    /// The value the upstream API uses in `Country::region`.
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Americas => "Americas",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    /// Case-insensitive; "America" is accepted for `Americas`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "america" {
            return Ok(Region::Americas);
        }
        Region::ALL
            .into_iter()
            .find(|r| r.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown region: {s}"))
    }
}

/// Search query plus region selection. Both are UI-local.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    query: String,
    pub region: Option<Region>,
}

impl FilterState {
    pub fn new(query: &str, region: Option<Region>) -> Self {
        let mut filter = Self {
            query: String::new(),
            region,
        };
        filter.set_query(query);
        filter
    }

    /// Stores the query lower-cased.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_lowercase();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_region(&mut self, region: Option<Region>) {
        self.region = region;
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.region.is_none()
    }

    pub fn matches(&self, country: &Country) -> bool {
        let matches_region = self
            .region
            .is_none_or(|r| country.region == r.as_str());
        let matches_search = self.query.is_empty()
            || country
                .common_name()
                .to_lowercase()
                .contains(self.query.as_str());
        matches_region && matches_search
    }
}

/// Applies `filter` to `countries`, preserving order.
pub fn apply<'a>(countries: &'a [Country], filter: &FilterState) -> Vec<&'a Country> {
    countries.iter().filter(|c| filter.matches(c)).collect()
}
