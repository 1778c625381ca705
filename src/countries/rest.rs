//! REST Countries v3.1 client.
//!
//! Three read-only endpoints are used:
//! - `GET /v3.1/all?fields=...`: the directory
//! - `GET /v3.1/name/{name}?fullText=true`: exact-name lookup
//! - `GET /v3.1/alpha?codes={csv}`: border resolution

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::countries::{Country, CountrySource, SourceError};

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com";

/// The `/all` endpoint refuses requests without an explicit field list and
/// caps it at ten fields. These are exactly the fields `Country` decodes.
pub const DIRECTORY_FIELDS: &str =
    "name,population,region,subregion,capital,flags,tld,currencies,languages,borders";

// Allow -, _, . unescaped in path segments and codes
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn encode(part: &str) -> String {
    utf8_percent_encode(part.trim(), SAFE).to_string()
}

/// REST Countries API source.
pub struct RestCountriesSource {
    base_url: String,
    client: reqwest::Client,
}

impl RestCountriesSource {
    /// Creates a new source.
    ///
    /// # Arguments
    /// * `base_url` - Optional custom base URL (defaults to the public API)
    /// * `timeout` - Total per-request timeout
    pub fn new(base_url: Option<String>, timeout: Duration) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("wherein/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn all_url(&self) -> String {
        format!("{}/v3.1/all?fields={}", self.base_url, DIRECTORY_FIELDS)
    }

    fn name_url(&self, name: &str) -> String {
        format!("{}/v3.1/name/{}?fullText=true", self.base_url, encode(name))
    }

    fn codes_url(&self, codes: &[String]) -> String {
        let csv = codes
            .iter()
            .map(|c| encode(c))
            .collect::<Vec<_>>()
            .join(",");
        format!("{}/v3.1/alpha?codes={}", self.base_url, csv)
    }

    /// GETs `url` and decodes a JSON array of countries.
    async fn get_countries(&self, url: &str) -> Result<Vec<Country>, SourceError> {
        info!("REST Countries request: GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        debug!("REST Countries response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("REST Countries API error: {} - {}", status, err_body);
            return Err(SourceError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        let countries: Vec<Country> =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;
        debug!("Decoded {} countries", countries.len());
        Ok(countries)
    }
}

#[async_trait]
impl CountrySource for RestCountriesSource {
    fn name(&self) -> &str {
        "restcountries"
    }

    async fn fetch_all(&self) -> Result<Vec<Country>, SourceError> {
        self.get_countries(&self.all_url()).await
    }

    async fn fetch_by_name(&self, name: &str) -> Result<Vec<Country>, SourceError> {
        match self.get_countries(&self.name_url(name)).await {
            Err(SourceError::Api { status, .. }) => {
                debug!("Name lookup for {:?} returned HTTP {}", name, status);
                Err(SourceError::NotFound(name.to_string()))
            }
            other => other,
        }
    }

    async fn fetch_by_codes(&self, codes: &[String]) -> Result<Vec<Country>, SourceError> {
        self.get_countries(&self.codes_url(codes)).await
    }
}
