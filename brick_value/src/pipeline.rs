//! Theme analysis: years, listings, inventories, weights, records

use crate::aggregate::{aggregate_set, set_weight};
use crate::cache::{DocumentCache, WeightStore};
use crate::config::Config;
use crate::discovery::discover_years;
use crate::http::Fetch;
use crate::inventory::{fetch_inventory, InventoryStatus};
use crate::listing::fetch_listing;
use crate::pricing::InflationTable;
use crate::weight::WeightResolver;
use brick_common::{BrickResult, CatalogYear, Endpoints, SetRecord};

/// Runs the analysis of one theme, strictly in order: years ascending,
/// sets in listing order.
pub struct Pipeline<'a, F: Fetch, S: WeightStore> {
    fetcher: &'a F,
    endpoints: &'a Endpoints,
    documents: &'a DocumentCache,
    inflation: &'a InflationTable,
    resolver: WeightResolver<'a, F, S>,
}

impl<'a, F: Fetch, S: WeightStore> Pipeline<'a, F, S> {
    pub fn new(
        fetcher: &'a F,
        endpoints: &'a Endpoints,
        documents: &'a DocumentCache,
        inflation: &'a InflationTable,
        store: &'a mut S,
    ) -> Self {
        Self {
            fetcher,
            endpoints,
            documents,
            inflation,
            resolver: WeightResolver::new(fetcher, endpoints, store),
        }
    }

    pub fn retry_failed(mut self, retry: bool) -> Self {
        self.resolver = self.resolver.retry_failed(retry);
        self
    }

    /// Records of every year that has at least one set, oldest year first
    pub fn run(&mut self, theme: &str) -> BrickResult<Vec<Vec<SetRecord>>> {
        let years = discover_years(self.fetcher, self.endpoints, theme)?;

        let mut all_sets = Vec::new();
        for year in years {
            log::info!("Getting {} year {}", theme, year);
            let records = self.run_year(theme, year)?;
            log::info!("{} had {} sets", year, records.len());
            if !records.is_empty() {
                all_sets.push(records);
            }
        }
        Ok(all_sets)
    }

    /// Records of one year's listing
    pub fn run_year(&mut self, theme: &str, year: CatalogYear) -> BrickResult<Vec<SetRecord>> {
        let listed = fetch_listing(self.fetcher, self.endpoints, self.documents, theme, year);
        if listed.is_empty() {
            return Ok(Vec::new());
        }
        // Fail before any weighing if prices cannot be normalised
        self.inflation.multiplier(year)?;

        let mut records = Vec::with_capacity(listed.len());
        for set in listed {
            let weight = self.weigh_set(&set.set_id);
            let record = aggregate_set(set, weight, self.inflation)?;
            log::info!(
                "Set {}:{} weight = {}g",
                record.set_id,
                record.name,
                record.weight
            );
            records.push(record);
        }
        Ok(records)
    }

    /// Total grams of a set's inventory; zero when it has none
    pub fn weigh_set(&mut self, set_id: &str) -> f64 {
        match fetch_inventory(self.fetcher, self.endpoints, self.documents, set_id) {
            InventoryStatus::Found(inventory) => {
                log::info!(
                    "Set {}, has ({}) parts with ({}) unique.",
                    set_id,
                    inventory.total_quantity(),
                    inventory.distinct()
                );
                let resolver = &mut self.resolver;
                set_weight(inventory.parts(), |part_id| resolver.resolve(part_id).grams())
            }
            InventoryStatus::NoParts => {
                log::warn!("Set {} lists no countable parts", set_id);
                0.0
            }
            InventoryStatus::Unavailable(reason) => {
                log::warn!("Set {} inventory unavailable: {}", set_id, reason);
                0.0
            }
        }
    }

    /// Entries currently held by the weight store
    pub fn cached_weights(&self) -> usize {
        self.resolver.store().len()
    }
}

/// Analyse `config.theme` and flush the weight store afterwards.
///
/// The store is flushed even when the run stops on a fatal error, so
/// weights resolved before the failure are kept.
pub fn analyse_theme<F: Fetch, S: WeightStore>(
    fetcher: &F,
    config: &Config,
    store: &mut S,
) -> BrickResult<Vec<Vec<SetRecord>>> {
    let documents = DocumentCache::new(&config.cache_dir);
    let inflation = InflationTable::default();

    let result = {
        let mut pipeline = Pipeline::new(fetcher, &config.endpoints, &documents, &inflation, store)
            .retry_failed(config.retry_failed);
        let result = pipeline.run(&config.theme);
        log::info!("Total cached parts: {}", pipeline.cached_weights());
        result
    };

    if let Err(e) = store.flush() {
        log::error!("Failed to save weight cache: {}", e);
        return match result {
            Err(run_error) => Err(run_error),
            Ok(_) => Err(e),
        };
    }
    result
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
