//! Catalog year discovery for a theme

use crate::http::{Fetch, FetchRequest};
use brick_common::{BrickError, BrickResult, CatalogYear, Endpoints, ResourceKind};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    /// Year filter links on the theme page, e.g. `year-2001'>2001 `
    static ref YEAR_MARKER: Regex = Regex::new(r"year-(\d{4})'>(\d{4}) ").expect("valid year pattern");
}

/// Distinct years found in a theme page, ascending
pub fn parse_years(html: &str) -> Vec<CatalogYear> {
    YEAR_MARKER
        .captures_iter(html)
        .filter_map(|caps| caps[1].parse::<CatalogYear>().ok())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Fetch the theme page (never cached) and list the years it has sets in.
///
/// A failed fetch or a page without any year marker ends the run: both
/// mean the theme token is wrong.
pub fn discover_years<F: Fetch>(
    fetcher: &F,
    endpoints: &Endpoints,
    theme: &str,
) -> BrickResult<Vec<CatalogYear>> {
    let url = endpoints.theme_years(theme);
    let response = fetcher.get(&FetchRequest {
        kind: ResourceKind::ThemeYears,
        url: url.clone(),
        agent: theme,
        cookie: None,
    })?;

    if !response.is_success() {
        log::error!(
            "Failed to fetch ({}) years, status code: {}",
            theme,
            response.status
        );
        return Err(BrickError::HttpStatus {
            url,
            status: response.status,
        });
    }

    let years = parse_years(&response.body);
    if years.is_empty() {
        return Err(BrickError::UnknownTheme(theme.to_string()));
    }

    log::info!(
        "Theme {} has sets in {} years ({}-{})",
        theme,
        years.len(),
        years[0],
        years[years.len() - 1]
    );
    Ok(years)
}
