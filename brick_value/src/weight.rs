//! Part weight resolution through the weight store

use crate::cache::{WeightState, WeightStore};
use crate::classifier::{classify, PartClass};
use crate::http::{Fetch, FetchRequest};
use brick_common::{Endpoints, ResourceKind};
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use std::collections::HashSet;

lazy_static! {
    static ref WEIGHT_INFO: Selector = Selector::parse("#item-weight-info").expect("valid weight selector");
}

/// Resolves part weights, consulting the store before the network.
///
/// Detail pages are fetched directly and never kept as raw documents; only
/// the resolved state is stored. A failed lookup is stored too, so it is
/// not repeated while the entry exists.
pub struct WeightResolver<'a, F: Fetch, S: WeightStore> {
    fetcher: &'a F,
    endpoints: &'a Endpoints,
    store: &'a mut S,
    retry_failed: bool,
    attempted: HashSet<String>,
}

impl<'a, F: Fetch, S: WeightStore> WeightResolver<'a, F, S> {
    pub fn new(fetcher: &'a F, endpoints: &'a Endpoints, store: &'a mut S) -> Self {
        Self {
            fetcher,
            endpoints,
            store,
            retry_failed: false,
            attempted: HashSet::new(),
        }
    }

    /// Look up entries stored as failed again, once per resolver
    pub fn retry_failed(mut self, retry: bool) -> Self {
        self.retry_failed = retry;
        self
    }

    pub fn store(&self) -> &S {
        &*self.store
    }

    /// Weight state of `part_id`, fetching it on a store miss
    pub fn resolve(&mut self, part_id: &str) -> WeightState {
        if let Some(state) = self.store.get(part_id) {
            let retry = self.retry_failed
                && state == WeightState::Failed
                && !self.attempted.contains(part_id);
            if !retry {
                return state;
            }
            log::debug!("Retrying failed weight lookup for ({})", part_id);
        }

        let state = self.fetch_weight(part_id);
        self.attempted.insert(part_id.to_string());
        self.store.insert(part_id, state);
        state
    }

    fn fetch_weight(&self, part_id: &str) -> WeightState {
        let (kind, url) = match classify(part_id) {
            PartClass::Figure => (
                ResourceKind::FigureDetail,
                self.endpoints.figure_detail(part_id),
            ),
            PartClass::Part => (ResourceKind::PartDetail, self.endpoints.part_detail(part_id)),
        };

        let request = FetchRequest {
            kind,
            url,
            agent: part_id,
            cookie: None,
        };
        match self.fetcher.get(&request) {
            Ok(response) if response.is_success() => match parse_weight(&response.body) {
                Some(grams) => WeightState::Resolved(grams),
                None => {
                    log::warn!("Failed to get {} weight for ({})", kind.label(), part_id);
                    WeightState::Failed
                }
            },
            Ok(response) => {
                log::warn!(
                    "Failed to fetch {} ({}), status code: {}",
                    kind.label(),
                    part_id,
                    response.status
                );
                WeightState::Failed
            }
            Err(e) => {
                log::warn!("Failed to fetch {} ({}): {}", kind.label(), part_id, e);
                WeightState::Failed
            }
        }
    }
}

/// Grams shown in the detail page's weight box, e.g. `2.32g`
pub fn parse_weight(html: &str) -> Option<f64> {
    let document = Html::parse_document(html);
    let text: String = document.select(&WEIGHT_INFO).next()?.text().collect();
    let grams = text.trim().trim_end_matches('g').trim().parse::<f64>().ok()?;
    (grams.is_finite() && grams >= 0.0).then_some(grams)
}

#[cfg(test)]
#[path = "weight_tests.rs"]
mod tests;
