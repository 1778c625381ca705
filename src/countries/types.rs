use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placeholder shown for any field the upstream record leaves empty.
pub const NOT_AVAILABLE: &str = "N/A";

/// Names of a country as reported upstream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
    /// Locale code (e.g. "deu", "fra") → name in that locale.
    #[serde(rename = "nativeName", default)]
    pub native_name: BTreeMap<String, NativeName>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct NativeName {
    #[serde(default)]
    pub official: String,
    #[serde(default)]
    pub common: String,
}

/// Flag image URLs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Flags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Currency {
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// One country record from the REST Countries v3.1 API.
///
/// Every field except the common name tolerates absence: the upstream omits
/// `capital`, `borders`, `tld` and friends for territories that have none.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Country {
    pub name: CountryName,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub tld: Vec<String>,
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    /// cca3 codes of neighbouring countries.
    #[serde(default)]
    pub borders: Vec<String>,
}

impl Country {
    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    /// Common name in the first native locale, or "N/A".
    pub fn native_name(&self) -> &str {
        self.name
            .native_name
            .values()
            .map(|n| n.common.as_str())
            .find(|n| !n.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    pub fn first_capital(&self) -> &str {
        first_or_na(&self.capital)
    }

    pub fn first_tld(&self) -> &str {
        first_or_na(&self.tld)
    }

    pub fn subregion(&self) -> &str {
        self.subregion
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Currency display names joined with ", ", or "N/A".
    pub fn currency_names(&self) -> String {
        join_or_na(self.currencies.values().map(|c| c.name.as_str()))
    }

    /// Language display names joined with ", ", or "N/A".
    pub fn language_names(&self) -> String {
        join_or_na(self.languages.values().map(String::as_str))
    }
}

fn first_or_na(values: &[String]) -> &str {
    values
        .first()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_AVAILABLE)
}

fn join_or_na<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let joined = values
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

/// A country together with its resolved border-country names.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryDetail {
    pub country: Country,
    /// Common names of neighbouring countries, in upstream order.
    /// Empty when the country has no borders or the lookup failed.
    pub border_names: Vec<String>,
}
