//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::state::App;
use crate::core::theme::Theme;
use crate::countries::{Country, CountryName, CountrySource, SourceError};

/// Builds a minimal country record.
pub fn country(name: &str, region: &str, borders: &[&str]) -> Country {
    Country {
        name: CountryName {
            common: name.to_string(),
            official: name.to_string(),
            ..Default::default()
        },
        population: 1_000,
        region: region.to_string(),
        capital: vec![format!("{name} City")],
        borders: borders.iter().map(|b| b.to_string()).collect(),
        ..Default::default()
    }
}

/// Code a `FakeSource` answers to: first three letters of the common name, upper-cased.
pub fn fake_code(country: &Country) -> String {
    country.name.common.chars().take(3).collect::<String>().to_uppercase()
}

/// An in-memory source that records every call it receives.
pub struct FakeSource {
    countries: Vec<Country>,
    failure: Option<SourceError>,
    failing_codes: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(countries: Vec<Country>) -> Self {
        Self {
            countries,
            failure: None,
            failing_codes: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every request fails with `error`.
    pub fn failing(error: SourceError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new(Vec::new())
        }
    }

    /// Only the border-code lookup fails.
    pub fn with_failing_codes(mut self) -> Self {
        self.failing_codes = true;
        self
    }

    /// Calls received so far, e.g. `["all", "name:France", "codes:BEL,DEU"]`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), SourceError> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CountrySource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_all(&self) -> Result<Vec<Country>, SourceError> {
        self.record("all".to_string())?;
        Ok(self.countries.clone())
    }

    async fn fetch_by_name(&self, name: &str) -> Result<Vec<Country>, SourceError> {
        self.record(format!("name:{name}"))?;
        let matches: Vec<Country> = self
            .countries
            .iter()
            .filter(|c| c.name.common.eq_ignore_ascii_case(name))
            .cloned()
            .collect();
        if matches.is_empty() {
            return Err(SourceError::NotFound(name.to_string()));
        }
        Ok(matches)
    }

    async fn fetch_by_codes(&self, codes: &[String]) -> Result<Vec<Country>, SourceError> {
        self.record(format!("codes:{}", codes.join(",")))?;
        if self.failing_codes {
            return Err(SourceError::Api {
                status: 500,
                message: "codes unavailable".into(),
            });
        }
        Ok(codes
            .iter()
            .filter_map(|code| self.countries.iter().find(|c| &fake_code(c) == code))
            .cloned()
            .collect())
    }
}

/// Creates a test App with the light theme and default settings.
pub fn test_app() -> App {
    App::new(Theme::Light, false)
}

/// A small directory spanning several regions.
pub fn sample_directory() -> Vec<Country> {
    vec![
        country("France", "Europe", &["BEL", "GER", "SPA"]),
        country("Germany", "Europe", &["FRA"]),
        country("Spain", "Europe", &["FRA", "POR"]),
        country("Portugal", "Europe", &["SPA"]),
        country("Peru", "Americas", &["BRA"]),
        country("Brazil", "Americas", &["PER"]),
        country("Kenya", "Africa", &[]),
        country("Japan", "Asia", &[]),
        country("Fiji", "Oceania", &[]),
    ]
}
