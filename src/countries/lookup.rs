//! Fetch flows for the two views.
//!
//! The directory is a single request. The detail view is two sequential
//! requests: the exact-name lookup, then (only if the country has
//! neighbours) the border resolution. A failed border lookup degrades to an
//! empty list instead of failing the whole view.

use log::{debug, info, warn};

use crate::countries::{Country, CountryDetail, CountrySource, SourceError};

/// Fetches the full directory collection.
pub async fn load_directory(source: &dyn CountrySource) -> Result<Vec<Country>, SourceError> {
    let countries = source.fetch_all().await?;
    info!(
        "Directory loaded from {}: {} countries",
        source.name(),
        countries.len()
    );
    Ok(countries)
}

/// Resolves `name` to its first exact match, then resolves its borders.
pub async fn load_detail(
    source: &dyn CountrySource,
    name: &str,
) -> Result<CountryDetail, SourceError> {
    let matches = source.fetch_by_name(name).await?;
    if matches.len() > 1 {
        debug!(
            "{} matches for {:?}, taking the first",
            matches.len(),
            name
        );
    }
    let country = matches
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::NotFound(name.to_string()))?;

    Ok(with_borders(source, country).await)
}

/// Attaches border names to an already-known country.
///
/// Used directly when the country came from the directory cache.
pub async fn with_borders(source: &dyn CountrySource, country: Country) -> CountryDetail {
    let border_names = resolve_borders(source, &country.borders).await;
    CountryDetail {
        country,
        border_names,
    }
}

/// Maps cca3 codes to common names. No codes means no request.
pub async fn resolve_borders(source: &dyn CountrySource, codes: &[String]) -> Vec<String> {
    if codes.is_empty() {
        return Vec::new();
    }

    match source.fetch_by_codes(codes).await {
        Ok(countries) => countries
            .into_iter()
            .map(|c| c.name.common)
            .collect(),
        Err(e) => {
            warn!("Border lookup for {:?} failed: {}", codes, e);
            Vec::new()
        }
    }
}
