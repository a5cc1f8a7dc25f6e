//! Service URL layout for the listing and part catalog sites

/// Kinds of remote resource the pipeline reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// All years a theme has sets in
    ThemeYears,
    /// Sets of a theme released in one year
    ThemeYearListing,
    /// Part inventory of one set
    SetInventory,
    /// Detail page of an ordinary part
    PartDetail,
    /// Detail page of a minifigure
    FigureDetail,
}

impl ResourceKind {
    /// Short label used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::ThemeYears => "theme",
            ResourceKind::ThemeYearListing => "listing",
            ResourceKind::SetInventory => "inventory",
            ResourceKind::PartDetail => "part",
            ResourceKind::FigureDetail => "figure",
        }
    }
}

pub const DEFAULT_BRICKSET_URL: &str = "https://brickset.com";
pub const DEFAULT_BRICKLINK_URL: &str = "https://www.bricklink.com";

/// Base URLs of the two services. Tests point these at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub brickset: String,
    pub bricklink: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BRICKSET_URL, DEFAULT_BRICKLINK_URL)
    }
}

impl Endpoints {
    pub fn new(brickset: &str, bricklink: &str) -> Self {
        Self {
            brickset: brickset.trim_end_matches('/').to_string(),
            bricklink: bricklink.trim_end_matches('/').to_string(),
        }
    }

    pub fn theme_years(&self, theme: &str) -> String {
        format!("{}/sets/theme-{}", self.brickset, theme)
    }

    pub fn theme_year_listing(&self, theme: &str, year: u16) -> String {
        format!("{}/sets/theme-{}/year-{}", self.brickset, theme, year)
    }

    /// Inventory of the first variant (`-1`) of a set
    pub fn set_inventory(&self, set_id: &str) -> String {
        format!("{}/CatalogItemInv.asp?S={}-1", self.bricklink, set_id)
    }

    pub fn part_detail(&self, part_id: &str) -> String {
        format!("{}/v2/catalog/catalogitem.page?P={}", self.bricklink, part_id)
    }

    pub fn figure_detail(&self, figure_id: &str) -> String {
        format!("{}/v2/catalog/catalogitem.page?M={}", self.bricklink, figure_id)
    }
}
