use serde::{Deserialize, Serialize};

use crate::domain::sales_record::SalesRecord;

/// Year facet of the filter bar: the full timeline or one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearFilter {
    All,
    Year(i32),
}

impl YearFilter {
    /// Parses the value of the year dropdown; anything unrecognized means
    /// no year constraint.
    pub fn parse(value: &str) -> Self {
        match value.parse::<i32>() {
            Ok(year) => Self::Year(year),
            Err(_) => Self::All,
        }
    }

    pub fn matches(&self, month: &str) -> bool {
        match self {
            Self::All => true,
            Self::Year(year) => month.starts_with(&format!("{year:04}")),
        }
    }
}

impl Default for YearFilter {
    fn default() -> Self {
        Self::All
    }
}

/// The user's current selection, captured from the UI controls once per
/// refresh and threaded through the query pipeline. Empty region/product
/// sets mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub regions: Vec<String>,
    pub products: Vec<String>,
    pub year: YearFilter,
}

impl FilterSelection {
    /// Whether `record` belongs to the filtered view. The `ignore_year`
    /// variant feeds year-over-year growth, which is computed across the
    /// full timeline regardless of the active year filter.
    pub fn matches(&self, record: &SalesRecord, ignore_year: bool) -> bool {
        let region_ok = self.regions.is_empty() || self.regions.iter().any(|r| *r == record.region);
        let product_ok =
            self.products.is_empty() || self.products.iter().any(|p| *p == record.product);
        let year_ok = ignore_year || self.year.matches(&record.month);
        region_ok && product_ok && year_ok && record.revenue > 0.0
    }

    /// Number of constrained facets, shown as the filter panel badge.
    pub fn active_count(&self) -> usize {
        usize::from(!self.regions.is_empty())
            + usize::from(!self.products.is_empty())
            + usize::from(self.year != YearFilter::All)
    }
}
