//! Per-set weight totals and record assembly

use crate::classifier::counts_toward_weight;
use crate::pricing::InflationTable;
use brick_common::{round_to, BrickResult, ListedSet, SetRecord};
use std::collections::BTreeMap;

/// Total grams of a set, one decimal.
///
/// Printed parts and stickers are skipped without looking up their weight.
/// `weight_of` is called once per remaining part id.
pub fn set_weight<W>(parts: &BTreeMap<String, u32>, mut weight_of: W) -> f64
where
    W: FnMut(&str) -> f64,
{
    let total: f64 = parts
        .iter()
        .filter(|(part_id, _)| counts_toward_weight(part_id))
        .map(|(part_id, &quantity)| weight_of(part_id) * quantity as f64)
        .sum();
    round_to(total, 1)
}

/// Combine listing metadata with the resolved weight and normalised price
pub fn aggregate_set(
    listed: ListedSet,
    weight: f64,
    inflation: &InflationTable,
) -> BrickResult<SetRecord> {
    let multiplier = inflation.multiplier(listed.year)?;
    let price = listed.msrp.map(|msrp| round_to(msrp * multiplier, 2));

    Ok(SetRecord {
        year: listed.year,
        name: listed.name,
        set_id: listed.set_id,
        msrp: listed.msrp,
        price,
        pieces: listed.pieces,
        weight,
    })
}
