use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};

use crate::domain::sales_record::SalesRecord;
use crate::shared::filters::{FilterSelection, YearFilter};

/// Fixed English month labels used on chart axes.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `"2024-01"` -> `"Jan 2024"`; malformed labels pass through unchanged.
pub fn month_label(month: &str) -> String {
    if let Some((year, mon)) = month.split_once('-') {
        if let Ok(m @ 1..=12) = mon.parse::<usize>() {
            return format!("{} {}", MONTH_NAMES[m - 1], year);
        }
    }
    month.to_string()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// The filtered view driving KPI cards, charts and the table.
pub fn apply_filters(records: &[SalesRecord], selection: &FilterSelection) -> Vec<SalesRecord> {
    records
        .iter()
        .filter(|r| selection.matches(r, false))
        .cloned()
        .collect()
}

/// Same selection with the year condition dropped; feeds year-over-year
/// growth so it can compare against the previous year even when a single
/// year is selected.
pub fn apply_filters_ignoring_year(
    records: &[SalesRecord],
    selection: &FilterSelection,
) -> Vec<SalesRecord> {
    records
        .iter()
        .filter(|r| selection.matches(r, true))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Revenue summed per distinct month, ascending by month label.
pub fn group_by_month(records: &[SalesRecord]) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.month.clone()).or_insert(0.0) += r.revenue;
    }
    totals.into_iter().collect()
}

/// Monthly totals folded into quarters (`YYYY-Qn`), ascending by key.
pub fn compute_qoq(monthly: &[(String, f64)]) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for (month, revenue) in monthly {
        if let Some(key) = quarter_key(month) {
            *totals.entry(key).or_insert(0.0) += revenue;
        }
    }
    totals.into_iter().collect()
}

fn quarter_key(month: &str) -> Option<String> {
    let (year, mon) = month.split_once('-')?;
    let m: u32 = mon.parse().ok()?;
    if !(1..=12).contains(&m) {
        return None;
    }
    Some(format!("{year}-Q{}", (m - 1) / 3 + 1))
}

/// Mean price impact per product, ascending by product label.
pub fn price_impact_by_product(records: &[SalesRecord]) -> Vec<(String, f64)> {
    let mut acc: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for r in records {
        let entry = acc.entry(r.product.clone()).or_insert((0.0, 0));
        entry.0 += r.price_impact;
        entry.1 += 1;
    }
    acc.into_iter()
        .map(|(product, (sum, count))| (product, sum / count as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// Facets
// ---------------------------------------------------------------------------

/// Sorted distinct region labels, used to populate the region checkboxes.
pub fn unique_regions(records: &[SalesRecord]) -> Vec<String> {
    unique_by(records, |r| r.region.clone())
}

/// Sorted distinct product labels, used to populate the product checkboxes.
pub fn unique_products(records: &[SalesRecord]) -> Vec<String> {
    unique_by(records, |r| r.product.clone())
}

/// Sorted distinct calendar years, used to populate the year dropdown.
pub fn unique_years(records: &[SalesRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().filter_map(|r| record_year(r)).collect();
    years.sort_unstable();
    years.dedup();
    years
}

fn unique_by(records: &[SalesRecord], key: impl Fn(&SalesRecord) -> String) -> Vec<String> {
    let mut values: Vec<String> = records.iter().map(key).collect();
    values.sort();
    values.dedup();
    values
}

fn record_year(record: &SalesRecord) -> Option<i32> {
    record.month.get(..4)?.parse().ok()
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

/// Month-over-month growth from the last two entries of the monthly series.
/// `None` when fewer than two months exist or the previous total is zero.
pub fn compute_mom(monthly: &[(String, f64)]) -> Option<f64> {
    if monthly.len() < 2 {
        return None;
    }
    let prev = monthly[monthly.len() - 2].1;
    let curr = monthly[monthly.len() - 1].1;
    if prev == 0.0 {
        return None;
    }
    Some((curr - prev) / prev * 100.0)
}

/// Year-over-year growth over the year-ignoring filtered view. A selected
/// year is compared against the immediately preceding one; with no year
/// selected, the two most recent years present are compared. `None` when
/// either total is missing or zero.
pub fn compute_yoy(records_ignoring_year: &[SalesRecord], year: YearFilter) -> Option<f64> {
    let by_year = totals_by_year(records_ignoring_year);
    let (curr, prev) = match year {
        YearFilter::Year(y) => (
            by_year.get(&y).copied().unwrap_or(0.0),
            by_year.get(&(y - 1)).copied().unwrap_or(0.0),
        ),
        YearFilter::All => {
            let years: Vec<i32> = by_year.keys().copied().collect();
            if years.len() < 2 {
                return None;
            }
            (
                by_year[&years[years.len() - 1]],
                by_year[&years[years.len() - 2]],
            )
        }
    };
    if curr == 0.0 || prev == 0.0 {
        return None;
    }
    Some((curr - prev) / prev * 100.0)
}

fn totals_by_year(records: &[SalesRecord]) -> BTreeMap<i32, f64> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    for r in records {
        if let Some(year) = record_year(r) {
            *totals.entry(year).or_insert(0.0) += r.revenue;
        }
    }
    totals
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

/// Trailing-average forecast: mean of the last three monthly totals,
/// projected over the next three calendar months with a fixed 1% uplift per
/// step, rounded to whole units. Empty when fewer than three months exist.
pub fn build_forecast(monthly: &[(String, f64)]) -> Vec<(String, f64)> {
    if monthly.len() < 3 {
        return Vec::new();
    }
    let last3 = &monthly[monthly.len() - 3..];
    let avg = last3.iter().map(|(_, v)| v).sum::<f64>() / 3.0;
    let Some(last_month) = first_of_month(&monthly[monthly.len() - 1].0) else {
        return Vec::new();
    };
    (1..=3u32)
        .filter_map(|i| {
            let date = last_month.checked_add_months(Months::new(i))?;
            let key = format!("{:04}-{:02}", date.year(), date.month());
            Some((key, (avg * (1.0 + f64::from(i) * 0.01)).round()))
        })
        .collect()
}

fn first_of_month(month: &str) -> Option<NaiveDate> {
    let (year, mon) = month.split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, mon.parse().ok()?, 1)
}

// ---------------------------------------------------------------------------
// KPI bundle
// ---------------------------------------------------------------------------

/// The scalar metrics shown as KPI cards and in the exported report.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_target: f64,
    /// Mean price impact over the selection; 0 for an empty selection.
    pub price_impact_avg: f64,
    /// Month-over-month growth, `None` when not available.
    pub mom: Option<f64>,
    /// Year-over-year growth, `None` when not available.
    pub yoy: Option<f64>,
}

impl Kpis {
    /// Actual revenue as a percentage of planned revenue; 0 when no plan.
    pub fn target_attainment(&self) -> f64 {
        if self.total_target > 0.0 {
            self.total_revenue / self.total_target * 100.0
        } else {
            0.0
        }
    }
}

/// Bundles the KPI scalars for one refresh. `filtered_view` drives the
/// totals and month-over-month growth; `filtered_ignoring_year` drives
/// year-over-year growth.
pub fn compute_kpis(
    filtered_view: &[SalesRecord],
    filtered_ignoring_year: &[SalesRecord],
    year: YearFilter,
) -> Kpis {
    let total_revenue = filtered_view.iter().map(|r| r.revenue).sum();
    let total_target = filtered_view.iter().map(|r| r.target).sum();
    let price_impact_avg = if filtered_view.is_empty() {
        0.0
    } else {
        filtered_view.iter().map(|r| r.price_impact).sum::<f64>() / filtered_view.len() as f64
    };
    let mom = compute_mom(&group_by_month(filtered_view));
    let yoy = compute_yoy(filtered_ignoring_year, year);

    Kpis {
        total_revenue,
        total_target,
        price_impact_avg,
        mom,
        yoy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sales_record::{seed_records, SalesRecord};

    fn rec(month: &str, revenue: f64) -> SalesRecord {
        SalesRecord {
            project: "P".to_string(),
            region: "MEA".to_string(),
            product: "Inverter".to_string(),
            month: month.to_string(),
            revenue,
            target: revenue,
            price_impact: 0.0,
        }
    }

    #[test]
    fn monthly_totals_sorted_and_sum_preserving() {
        let records = vec![
            rec("2024-03", 10.0),
            rec("2024-01", 20.0),
            rec("2024-03", 30.0),
            rec("2024-02", 40.0),
        ];
        let monthly = group_by_month(&records);
        let months: Vec<&str> = monthly.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(months, ["2024-01", "2024-02", "2024-03"]);
        let grand: f64 = monthly.iter().map(|(_, v)| v).sum();
        assert_eq!(grand, 100.0);
        assert_eq!(monthly[2].1, 40.0);
    }

    #[test]
    fn quarterly_totals_match_monthly_grand_total() {
        let monthly = group_by_month(&seed_records());
        let qoq = compute_qoq(&monthly);
        let monthly_total: f64 = monthly.iter().map(|(_, v)| v).sum();
        let quarterly_total: f64 = qoq.iter().map(|(_, v)| v).sum();
        assert!((monthly_total - quarterly_total).abs() < 1e-9);
        assert_eq!(qoq[0].0, "2024-Q1");
        // 2024-01 .. 2024-03 fall into Q1.
        assert_eq!(qoq[0].1, 91000.0 + 115000.0 + 87000.0);
    }

    #[test]
    fn quarter_keys_cover_all_four_quarters() {
        assert_eq!(quarter_key("2024-01").as_deref(), Some("2024-Q1"));
        assert_eq!(quarter_key("2024-03").as_deref(), Some("2024-Q1"));
        assert_eq!(quarter_key("2024-04").as_deref(), Some("2024-Q2"));
        assert_eq!(quarter_key("2024-12").as_deref(), Some("2024-Q4"));
        assert_eq!(quarter_key("garbage"), None);
    }

    #[test]
    fn filtering_is_idempotent() {
        let selection = FilterSelection {
            regions: vec!["MEA".to_string()],
            products: Vec::new(),
            year: YearFilter::Year(2025),
        };
        let once = apply_filters(&seed_records(), &selection);
        let twice = apply_filters(&once, &selection);
        assert_eq!(once, twice);
    }

    #[test]
    fn mea_2025_end_to_end() {
        let selection = FilterSelection {
            regions: vec!["MEA".to_string()],
            products: Vec::new(),
            year: YearFilter::Year(2025),
        };
        let view = apply_filters(&seed_records(), &selection);
        let projects: Vec<&str> = view.iter().map(|r| r.project.as_str()).collect();
        assert_eq!(projects, ["Hydro Alpha", "Eco Volt"]);
        let total: f64 = view.iter().map(|r| r.revenue).sum();
        assert_eq!(total, 238000.0);
    }

    #[test]
    fn mom_requires_two_months_and_nonzero_previous() {
        assert_eq!(compute_mom(&[]), None);
        assert_eq!(compute_mom(&[("2024-01".to_string(), 100.0)]), None);
        assert_eq!(
            compute_mom(&[
                ("2024-01".to_string(), 0.0),
                ("2024-02".to_string(), 100.0),
            ]),
            None
        );
        let growth = compute_mom(&[
            ("2024-01".to_string(), 100.0),
            ("2024-02".to_string(), 150.0),
        ]);
        assert_eq!(growth, Some(50.0));
    }

    #[test]
    fn yoy_for_selected_year_compares_with_preceding() {
        let records = seed_records();
        let yoy = compute_yoy(&records, YearFilter::Year(2025)).unwrap();
        let y2024 = 91000.0 + 115000.0 + 87000.0 + 122000.0 + 99000.0 + 134000.0;
        let y2025 = 102000.0 + 126000.0 + 98000.0 + 136000.0 + 111000.0 + 149000.0;
        let expected = (y2025 - y2024) / y2024 * 100.0;
        assert!((yoy - expected).abs() < 1e-9);
    }

    #[test]
    fn yoy_unavailable_without_comparable_years() {
        let records = vec![rec("2024-01", 10.0)];
        assert_eq!(compute_yoy(&records, YearFilter::All), None);
        assert_eq!(compute_yoy(&records, YearFilter::Year(2024)), None);
        // Selected year with no data at all.
        assert_eq!(compute_yoy(&seed_records(), YearFilter::Year(2030)), None);
    }

    #[test]
    fn yoy_all_years_uses_two_most_recent() {
        let records = vec![
            rec("2022-01", 100.0),
            rec("2023-01", 200.0),
            rec("2024-01", 300.0),
        ];
        assert_eq!(compute_yoy(&records, YearFilter::All), Some(50.0));
    }

    #[test]
    fn forecast_needs_three_months() {
        let monthly = vec![
            ("2025-01".to_string(), 100.0),
            ("2025-02".to_string(), 100.0),
        ];
        assert!(build_forecast(&monthly).is_empty());
    }

    #[test]
    fn forecast_rolls_over_year_boundary() {
        let monthly = vec![
            ("2025-09".to_string(), 100.0),
            ("2025-10".to_string(), 100.0),
            ("2025-11".to_string(), 100.0),
        ];
        let forecast = build_forecast(&monthly);
        let months: Vec<&str> = forecast.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(months, ["2025-12", "2026-01", "2026-02"]);
        let values: Vec<f64> = forecast.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, [101.0, 102.0, 103.0]);
    }

    #[test]
    fn forecast_keys_strictly_increase() {
        let monthly = group_by_month(&seed_records());
        let forecast = build_forecast(&monthly);
        assert_eq!(forecast.len(), 3);
        assert!(forecast.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn price_impact_averaged_per_product_sorted_by_label() {
        let impacts = price_impact_by_product(&seed_records());
        let labels: Vec<&str> = impacts.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(labels, ["Controller", "Inverter", "Storage"]);
        // Inverter: (1.2 + 0.8 + 1.9 + 1.4) / 4
        assert!((impacts[1].1 - 1.325).abs() < 1e-9);
    }

    #[test]
    fn facets_are_sorted_and_distinct() {
        let records = seed_records();
        assert_eq!(unique_regions(&records), ["APAC", "LATAM", "MEA"]);
        assert_eq!(
            unique_products(&records),
            ["Controller", "Inverter", "Storage"]
        );
        assert_eq!(unique_years(&records), [2024, 2025]);
    }

    #[test]
    fn empty_selection_yields_neutral_kpis() {
        let kpis = compute_kpis(&[], &[], YearFilter::All);
        assert_eq!(kpis.total_revenue, 0.0);
        assert_eq!(kpis.total_target, 0.0);
        assert_eq!(kpis.price_impact_avg, 0.0);
        assert_eq!(kpis.mom, None);
        assert_eq!(kpis.yoy, None);
        assert_eq!(kpis.target_attainment(), 0.0);
    }

    #[test]
    fn kpis_over_mea_2025_selection() {
        let selection = FilterSelection {
            regions: vec!["MEA".to_string()],
            products: Vec::new(),
            year: YearFilter::Year(2025),
        };
        let records = seed_records();
        let view = apply_filters(&records, &selection);
        let full = apply_filters_ignoring_year(&records, &selection);
        let kpis = compute_kpis(&view, &full, selection.year);

        assert_eq!(kpis.total_revenue, 238000.0);
        assert_eq!(kpis.total_target, 230000.0);
        // Jan 102000 -> Apr 136000.
        let mom = kpis.mom.unwrap();
        assert!((mom - (136000.0 - 102000.0) / 102000.0 * 100.0).abs() < 1e-9);
        // MEA 2025 vs MEA 2024 = 238000 vs 213000.
        let yoy = kpis.yoy.unwrap();
        assert!((yoy - (238000.0 - 213000.0) / 213000.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn month_labels_use_fixed_names() {
        assert_eq!(month_label("2024-01"), "Jan 2024");
        assert_eq!(month_label("2025-12"), "Dec 2025");
        assert_eq!(month_label("bogus"), "bogus");
    }
}
