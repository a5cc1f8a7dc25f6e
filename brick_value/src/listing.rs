//! Set metadata from a theme's per-year listing page

use crate::cache::{DocumentCache, DocumentKey};
use crate::http::Fetch;
use brick_common::{CatalogYear, Endpoints, ListedSet};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    static ref SET: Selector = selector(".set");
    static ref CAPTION: Selector = selector(".highslide-caption");
    static ref HEADING: Selector = selector("h1");
    static ref LINK: Selector = selector("a");
    static ref DETAILS: Selector = selector("div.col");
    static ref TERM: Selector = selector("dt");
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid listing selector")
}

/// Fetch (or load from cache) the listing for `theme` in `year` and parse it.
///
/// A listing that could not be fetched yields no sets; the run moves on to
/// the next year.
pub fn fetch_listing<F: Fetch>(
    fetcher: &F,
    endpoints: &Endpoints,
    documents: &DocumentCache,
    theme: &str,
    year: CatalogYear,
) -> Vec<ListedSet> {
    let key = DocumentKey::ThemeYear { theme, year };
    let document = documents.fetch_or_load(fetcher, endpoints, &key);
    if !document.is_usable() {
        return Vec::new();
    }
    parse_listing(&document.body, year)
}

/// Every well-formed set entry of a listing page, in page order.
///
/// Entries without a name, set number or piece count are skipped.
pub fn parse_listing(html: &str, year: CatalogYear) -> Vec<ListedSet> {
    let document = Html::parse_document(html);
    let mut sets = Vec::new();

    for entry in document.select(&SET) {
        match parse_entry(entry, year) {
            Ok(set) => sets.push(set),
            Err(reason) => log::debug!("Skipping listing entry for {}: {}", year, reason),
        }
    }

    log::debug!("Parsed {} sets from {} listing", sets.len(), year);
    sets
}

fn parse_entry(entry: ElementRef<'_>, year: CatalogYear) -> Result<ListedSet, String> {
    let caption = entry.select(&CAPTION).next().ok_or("no caption")?;
    let name = text_of(caption.select(&HEADING).next().ok_or("no name")?);
    let number = text_of(caption.select(&LINK).next().ok_or("no set number")?);
    let set_id = number.strip_suffix("-1").unwrap_or(&number).to_string();
    if name.is_empty() || set_id.is_empty() {
        return Err(format!("incomplete caption '{}' '{}'", name, number));
    }
    // Only the first variant has an inventory at `<id>-1`
    if set_id.contains('-') {
        return Err(format!("unsupported set variant {}", number));
    }

    let details = entry.select(&DETAILS).next().ok_or("no details column")?;
    let pieces_text = definition(details, "Pieces")
        .and_then(|dd| dd.select(&LINK).next())
        .map(text_of)
        .ok_or_else(|| format!("no piece count for {}", set_id))?;
    let pieces = pieces_text
        .replace(',', "")
        .parse::<u32>()
        .map_err(|e| format!("bad piece count '{}' for {}: {}", pieces_text, set_id, e))?;

    let msrp = definition(details, "RRP").and_then(|dd| dollar_price(&text_of(dd)));
    if msrp.is_none() {
        log::warn!("No dollar price found for {} {}", set_id, name);
    }

    Ok(ListedSet {
        year,
        name,
        set_id,
        msrp,
        pieces,
    })
}

/// The `dd` element following the `dt` labelled `label`
fn definition<'a>(details: ElementRef<'a>, label: &str) -> Option<ElementRef<'a>> {
    let term = details.select(&TERM).find(|dt| text_of(*dt) == label)?;
    term.next_siblings().find_map(ElementRef::wrap)
}

/// First readable `$` amount in a price list such as `$19.99, £14.99 | 19.99€`
fn dollar_price(prices: &str) -> Option<f64> {
    prices
        .split([',', '|'])
        .filter(|p| p.contains('$'))
        .find_map(|p| p.replace('$', "").trim().parse::<f64>().ok())
}

fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .replace('\u{a0}', " ")
        .trim()
        .to_string()
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
