//! Part inventories of sets
//!
//! An inventory page lists one row per part line. Rows after the
//! "Counterparts:" header describe alternates and assemblies that are not in
//! the box, so they are cut off before quantities are summed.

use crate::cache::{DocumentCache, DocumentKey, FetchOutcome};
use crate::classifier::is_sticker;
use crate::http::Fetch;
use brick_common::Endpoints;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

lazy_static! {
    static ref ITEM: Selector = selector(".IV_ITEM");
    static ref CELL: Selector = selector("td");
    static ref BOLD: Selector = selector("b");
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid inventory selector")
}

const ITEM_CLASS: &str = "IV_ITEM";
const ID_PREFIX: &str = "IV_";
const COUNTERPARTS_LABEL: &str = "Counterparts:";
const SECTION_HEADER_COLOR: &str = "#000000";

/// One inventory line: a part id and how many of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartEntry {
    pub part_id: String,
    pub quantity: u32,
}

/// Read access to an inventory document.
///
/// Aggregation only needs the lines and where the counterpart section
/// begins, so the document format can change without touching it.
pub trait InventoryQuery {
    /// Inventory lines in document order. A line that cannot be read is an
    /// `Err` describing why.
    fn lines(&self) -> Vec<Result<PartEntry, String>>;

    /// Index into [`lines`](Self::lines) of the first counterpart line
    fn counterpart_boundary(&self) -> Option<usize>;
}

/// Inventory page parsed as HTML
pub struct HtmlInventory {
    document: Html,
}

impl HtmlInventory {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    fn items(&self) -> Vec<ElementRef<'_>> {
        self.document.select(&ITEM).collect()
    }
}

impl InventoryQuery for HtmlInventory {
    fn lines(&self) -> Vec<Result<PartEntry, String>> {
        self.items().into_iter().map(read_line).collect()
    }

    fn counterpart_boundary(&self) -> Option<usize> {
        let label = self
            .document
            .select(&BOLD)
            .find(|b| b.text().collect::<String>().trim() == COUNTERPARTS_LABEL)?;

        let header = label.ancestors().filter_map(ElementRef::wrap).find(|e| {
            e.value()
                .attr("bgcolor")
                .is_some_and(|c| c.eq_ignore_ascii_case(SECTION_HEADER_COLOR))
        })?;

        let first = header
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|e| is_item(*e))?;

        self.items().iter().position(|item| item.id() == first.id())
    }
}

fn is_item(element: ElementRef<'_>) -> bool {
    element
        .value()
        .attr("class")
        .is_some_and(|classes| classes.split_whitespace().any(|c| c == ITEM_CLASS))
}

/// Part id from the row's `IV_<id>` class, quantity from its second cell
fn read_line(item: ElementRef<'_>) -> Result<PartEntry, String> {
    let part_id = item
        .value()
        .attr("class")
        .unwrap_or_default()
        .split_whitespace()
        .filter(|class| *class != ITEM_CLASS)
        .find_map(|class| class.strip_prefix(ID_PREFIX))
        .filter(|id| !id.is_empty())
        .ok_or("no part id class")?
        .to_string();

    let cell = item
        .select(&CELL)
        .nth(1)
        .ok_or_else(|| format!("no quantity cell for {}", part_id))?;
    let text = cell.text().collect::<String>().replace('\u{a0}', "");
    let quantity = text
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad quantity '{}' for {}: {}", text.trim(), part_id, e))?;

    Ok(PartEntry { part_id, quantity })
}

/// Summed quantities per part id for one set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    parts: BTreeMap<String, u32>,
    total_quantity: u32,
}

impl Inventory {
    /// Add a line's quantity. A line that would overflow a count is dropped.
    pub fn add(&mut self, entry: PartEntry) {
        if entry.quantity == 0 {
            return;
        }
        let summed = self
            .quantity(&entry.part_id)
            .checked_add(entry.quantity)
            .zip(self.total_quantity.checked_add(entry.quantity));
        match summed {
            Some((part_quantity, total_quantity)) => {
                self.total_quantity = total_quantity;
                self.parts.insert(entry.part_id, part_quantity);
            }
            None => log::warn!(
                "Skipping inventory line {} x{}: quantity overflow",
                entry.part_id,
                entry.quantity
            ),
        }
    }

    pub fn parts(&self) -> &BTreeMap<String, u32> {
        &self.parts
    }

    pub fn quantity(&self, part_id: &str) -> u32 {
        self.parts.get(part_id).copied().unwrap_or(0)
    }

    /// Pieces across all lines
    pub fn total_quantity(&self) -> u32 {
        self.total_quantity
    }

    /// Number of different part ids
    pub fn distinct(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl FromIterator<PartEntry> for Inventory {
    fn from_iter<I: IntoIterator<Item = PartEntry>>(iter: I) -> Self {
        let mut inventory = Inventory::default();
        for entry in iter {
            inventory.add(entry);
        }
        inventory
    }
}

/// Sum the set's lines up to the counterpart boundary, without stickers
pub fn extract_inventory<Q: InventoryQuery>(query: &Q) -> Inventory {
    let mut lines = query.lines();
    if let Some(boundary) = query.counterpart_boundary() {
        log::debug!(
            "Dropping {} counterpart lines",
            lines.len().saturating_sub(boundary)
        );
        lines.truncate(boundary);
    }

    lines
        .into_iter()
        .filter_map(|line| match line {
            Ok(entry) => Some(entry),
            Err(reason) => {
                log::debug!("Skipping inventory line: {}", reason);
                None
            }
        })
        .filter(|entry| !is_sticker(&entry.part_id))
        .collect()
}

/// What a set's inventory lookup produced
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryStatus {
    Found(Inventory),
    /// The document was read but listed no countable parts
    NoParts,
    /// The document could not be fetched
    Unavailable(String),
}

/// Fetch (or load from cache) a set's inventory page and extract its parts
pub fn fetch_inventory<F: Fetch>(
    fetcher: &F,
    endpoints: &Endpoints,
    documents: &DocumentCache,
    set_id: &str,
) -> InventoryStatus {
    let key = DocumentKey::Set(set_id);
    let document = documents.fetch_or_load(fetcher, endpoints, &key);
    if let FetchOutcome::Failed(reason) = document.outcome {
        return InventoryStatus::Unavailable(reason);
    }

    let inventory = extract_inventory(&HtmlInventory::parse(&document.body));
    if inventory.is_empty() {
        InventoryStatus::NoParts
    } else {
        InventoryStatus::Found(inventory)
    }
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
