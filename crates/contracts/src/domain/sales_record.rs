use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One project-month revenue observation.
///
/// Serialized with camelCase field names so the persisted blob stays
/// compatible with data written by earlier versions of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    pub project: String,
    pub region: String,
    pub product: String,
    /// Year-month label in `YYYY-MM` form; lexicographic order is time order.
    pub month: String,
    pub revenue: f64,
    /// Planned revenue for the same period.
    pub target: f64,
    /// Signed percentage of revenue variance attributable to pricing.
    pub price_impact: f64,
}

impl SalesRecord {
    /// A record is storable when every label is present, the month label is
    /// well formed and revenue is strictly positive.
    pub fn is_valid(&self) -> bool {
        !self.project.trim().is_empty()
            && !self.region.trim().is_empty()
            && !self.product.trim().is_empty()
            && is_well_formed_month(&self.month)
            && self.revenue > 0.0
    }
}

/// `YYYY-MM` with a calendar month between 01 and 12.
pub fn is_well_formed_month(month: &str) -> bool {
    let Some((year, mon)) = month.split_once('-') else {
        return false;
    };
    year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && mon.len() == 2
        && matches!(mon.parse::<u32>(), Ok(1..=12))
}

/// Drops records that must never be retained in the store. Applied on both
/// load and persist so a non-positive revenue entry can never survive a
/// round-trip through storage.
pub fn sanitize(records: Vec<SalesRecord>) -> Vec<SalesRecord> {
    records.into_iter().filter(|r| r.revenue > 0.0).collect()
}

static SEED: Lazy<Vec<SalesRecord>> = Lazy::new(|| {
    let rec = |project: &str,
               region: &str,
               product: &str,
               month: &str,
               revenue: f64,
               target: f64,
               price_impact: f64| SalesRecord {
        project: project.to_string(),
        region: region.to_string(),
        product: product.to_string(),
        month: month.to_string(),
        revenue,
        target,
        price_impact,
    };

    vec![
        rec("Hydro Alpha", "MEA", "Inverter", "2024-01", 91000.0, 95000.0, 1.2),
        rec("Solar Reach", "APAC", "Storage", "2024-02", 115000.0, 110000.0, 2.1),
        rec("Grid Pulse", "LATAM", "Controller", "2024-03", 87000.0, 92000.0, -0.7),
        rec("Eco Volt", "MEA", "Inverter", "2024-04", 122000.0, 120000.0, 0.8),
        rec("Wind Nexus", "APAC", "Controller", "2024-05", 99000.0, 102000.0, -1.1),
        rec("Terra Sync", "LATAM", "Storage", "2024-06", 134000.0, 128000.0, 3.2),
        rec("Hydro Alpha", "MEA", "Inverter", "2025-01", 102000.0, 100000.0, 1.9),
        rec("Solar Reach", "APAC", "Storage", "2025-02", 126000.0, 120000.0, 2.7),
        rec("Grid Pulse", "LATAM", "Controller", "2025-03", 98000.0, 97000.0, 0.6),
        rec("Eco Volt", "MEA", "Inverter", "2025-04", 136000.0, 130000.0, 1.4),
        rec("Wind Nexus", "APAC", "Controller", "2025-05", 111000.0, 109000.0, -0.2),
        rec("Terra Sync", "LATAM", "Storage", "2025-06", 149000.0, 140000.0, 2.4),
    ]
});

/// The built-in dataset used on first run, before anything has been
/// persisted.
pub fn seed_records() -> Vec<SalesRecord> {
    SEED.clone()
}
