//! Inflation normalisation of retail prices to 2024 dollars

use brick_common::{round_to, BrickError, BrickResult, CatalogYear};
use std::collections::BTreeMap;

/// US consumer price multipliers to 2024 dollars
const INFLATION_TO_2024: [(CatalogYear, f64); 26] = [
    (1999, 1.886),
    (2000, 1.824),
    (2001, 1.775),
    (2002, 1.746),
    (2003, 1.707),
    (2004, 1.663),
    (2005, 1.609),
    (2006, 1.558),
    (2007, 1.515),
    (2008, 1.459),
    (2009, 1.464),
    (2010, 1.441),
    (2011, 1.397),
    (2012, 1.368),
    (2013, 1.349),
    (2014, 1.327),
    (2015, 1.326),
    (2016, 1.309),
    (2017, 1.282),
    (2018, 1.251),
    (2019, 1.229),
    (2020, 1.214),
    (2021, 1.159),
    (2022, 1.074),
    (2023, 1.031),
    (2024, 1.000),
];

/// Year -> multiplier lookup
#[derive(Debug, Clone)]
pub struct InflationTable {
    multipliers: BTreeMap<CatalogYear, f64>,
}

impl Default for InflationTable {
    fn default() -> Self {
        Self::from_pairs(INFLATION_TO_2024)
    }
}

impl InflationTable {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (CatalogYear, f64)>) -> Self {
        Self {
            multipliers: pairs.into_iter().collect(),
        }
    }

    /// Multiplier for `year`. A missing year means the run cannot continue.
    pub fn multiplier(&self, year: CatalogYear) -> BrickResult<f64> {
        self.multipliers
            .get(&year)
            .copied()
            .ok_or(BrickError::UnsupportedYear(year))
    }

    /// `msrp` in 2024 dollars, rounded to cents
    pub fn normalize(&self, msrp: f64, year: CatalogYear) -> BrickResult<f64> {
        Ok(round_to(msrp * self.multiplier(year)?, 2))
    }

    pub fn years(&self) -> impl Iterator<Item = CatalogYear> + '_ {
        self.multipliers.keys().copied()
    }
}
