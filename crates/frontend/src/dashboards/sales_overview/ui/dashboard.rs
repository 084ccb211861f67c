use std::collections::HashSet;

use chrono::Utc;
use contracts::shared::filters::{FilterSelection, YearFilter};
use contracts::shared::indicators::kpi_values;
use contracts::shared::metrics::{
    apply_filters, apply_filters_ignoring_year, build_forecast, compute_kpis, compute_qoq,
    group_by_month, month_label, price_impact_by_product, unique_products, unique_regions,
    unique_years,
};
use leptos::prelude::*;

use crate::dashboards::sales_overview::ui::record_form::RecordForm;
use crate::dashboards::sales_overview::ui::records_table::RecordsTable;
use crate::shared::components::charts::{BarChart, ChartCard, LineChart};
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::ui::{Button, Checkbox, Select};
use crate::shared::export::{build_report, download_report, REPORT_FILENAME};
use crate::shared::store::RecordStore;

/// The dashboard page: filter signals feed a `FilterSelection` memo, the
/// query pipeline memos derive from it, and every card, chart and table row
/// below re-renders from those.
#[component]
pub fn SalesOverviewDashboard() -> impl IntoView {
    let store = expect_context::<RecordStore>();
    let records = store.records();

    // Facets come from the data, so a newly appended region or product shows
    // up in the controls on the next render.
    let region_facet = Memo::new(move |_| unique_regions(&records.get()));
    let product_facet = Memo::new(move |_| unique_products(&records.get()));
    let year_options = Memo::new(move |_| {
        let mut options = vec![("all".to_string(), "All Years".to_string())];
        options.extend(
            unique_years(&records.get())
                .into_iter()
                .map(|y| (y.to_string(), y.to_string())),
        );
        options
    });

    // Checkbox state is tracked as the set of UNCHECKED values: an untouched
    // facet is an empty set, which the selection maps to "no constraint".
    // A facet value appearing later is therefore checked by default.
    let excluded_regions: RwSignal<HashSet<String>> = RwSignal::new(HashSet::new());
    let excluded_products: RwSignal<HashSet<String>> = RwSignal::new(HashSet::new());
    let year_value = RwSignal::new("all".to_string());
    let filters_expanded = RwSignal::new(true);

    // Captured once per refresh; the pure pipeline never reads widget state.
    let selection = Memo::new(move |_| FilterSelection {
        regions: constrained_facet(&region_facet.get(), &excluded_regions.get()),
        products: constrained_facet(&product_facet.get(), &excluded_products.get()),
        year: YearFilter::parse(&year_value.get()),
    });

    let filtered_view = Memo::new(move |_| {
        let mut filtered = apply_filters(&records.get(), &selection.get());
        filtered.sort_by(|a, b| a.month.cmp(&b.month));
        filtered
    });
    let filtered_full_timeline =
        Memo::new(move |_| apply_filters_ignoring_year(&records.get(), &selection.get()));

    let monthly = Memo::new(move |_| group_by_month(&filtered_view.get()));
    let kpis = Memo::new(move |_| {
        compute_kpis(
            &filtered_view.get(),
            &filtered_full_timeline.get(),
            selection.get().year,
        )
    });
    let cards = Memo::new(move |_| kpi_values(&kpis.get()));

    let monthly_series = Memo::new(move |_| {
        monthly
            .get()
            .into_iter()
            .map(|(m, v)| (month_label(&m), v))
            .collect::<Vec<_>>()
    });
    let qoq_series = Memo::new(move |_| compute_qoq(&monthly.get()));
    let forecast_series = Memo::new(move |_| build_forecast(&monthly.get()));
    let target_series = Memo::new(move |_| {
        let k = kpis.get();
        vec![
            ("Actual".to_string(), k.total_revenue),
            ("Target".to_string(), k.total_target),
        ]
    });
    let impact_series = Memo::new(move |_| price_impact_by_product(&filtered_view.get()));

    let active_filters = Signal::derive(move || selection.get().active_count());

    let on_reset = Callback::new(move |_| {
        excluded_regions.set(HashSet::new());
        excluded_products.set(HashSet::new());
        year_value.set("all".to_string());
    });

    let on_export = Callback::new(move |_| {
        let report = build_report(
            &kpis.get_untracked(),
            &filtered_view.get_untracked(),
            Utc::now(),
        );
        if let Err(err) = download_report(&report, REPORT_FILENAME) {
            log::warn!("report download failed: {err}");
        }
    });

    view! {
        <div class="page page--dashboard">
            <header class="page__header">
                <h1 class="page__title">"Bosch Power Solutions ROW Sales Dashboard"</h1>
            </header>

            <FilterPanel
                is_expanded=filters_expanded
                active_filters_count=active_filters
                actions=move || {
                    view! {
                        <Button variant="secondary" on_click=on_reset>"Reset Filters"</Button>
                        <Button on_click=on_export>"Download Report"</Button>
                    }
                }
            >
                <FacetCheckboxes
                    label="Region"
                    values=region_facet
                    excluded=excluded_regions
                />
                <FacetCheckboxes
                    label="Product"
                    values=product_facet
                    excluded=excluded_products
                />
                <Select
                    label="Year"
                    value=year_value
                    options=year_options
                    on_change=Callback::new(move |v| year_value.set(v))
                />
            </FilterPanel>

            <div class="kpi-grid">
                {move || {
                    cards
                        .get()
                        .into_iter()
                        .map(|card| view! { <StatCard card=card /> })
                        .collect_view()
                }}
            </div>

            <div class="chart-grid">
                <ChartCard title="Monthly Revenue">
                    <LineChart series=monthly_series />
                </ChartCard>
                <ChartCard title="QoQ Revenue">
                    <BarChart series=qoq_series color="#ea0016" />
                </ChartCard>
                <ChartCard title="Actual vs Target">
                    <BarChart series=target_series />
                </ChartCard>
                <ChartCard title="Forecast Revenue">
                    <LineChart series=forecast_series color="#2f9e44" dashed=true />
                </ChartCard>
                <ChartCard title="Avg Price Impact by Product">
                    <BarChart series=impact_series />
                </ChartCard>
            </div>

            <RecordForm />

            <RecordsTable records=filtered_view />
        </div>
    }
}

/// Maps a facet and its unchecked values onto the selection's region/product
/// list: nothing unchecked means "no constraint" (empty list), anything else
/// lists the remaining checked values. Unchecking every value also yields an
/// empty list, which keeps every record visible exactly like an untouched
/// facet.
fn constrained_facet(facet: &[String], excluded: &HashSet<String>) -> Vec<String> {
    if excluded.is_empty() {
        return Vec::new();
    }
    facet
        .iter()
        .filter(|value| !excluded.contains(*value))
        .cloned()
        .collect()
}

/// One checkbox group of the filter panel.
#[component]
fn FacetCheckboxes(
    /// Group heading
    label: &'static str,
    /// Facet values, sorted
    #[prop(into)]
    values: Signal<Vec<String>>,
    /// Unchecked values, shared with the dashboard
    excluded: RwSignal<HashSet<String>>,
) -> impl IntoView {
    view! {
        <div class="filter-group">
            <div class="filter-group__label">{label}</div>
            {move || {
                values
                    .get()
                    .into_iter()
                    .map(|value| {
                        let for_checked = value.clone();
                        let for_toggle = value.clone();
                        let checked =
                            Signal::derive(move || !excluded.with(|ex| ex.contains(&for_checked)));
                        let on_change = Callback::new(move |is_checked: bool| {
                            excluded.update(|ex| {
                                if is_checked {
                                    ex.remove(&for_toggle);
                                } else {
                                    ex.insert(for_toggle.clone());
                                }
                            });
                        });
                        view! { <Checkbox label=value checked=checked on_change=on_change /> }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_facet_means_no_constraint() {
        let facet = vec!["APAC".to_string(), "MEA".to_string()];
        assert!(constrained_facet(&facet, &HashSet::new()).is_empty());
    }

    #[test]
    fn unchecking_narrows_to_remaining_values() {
        let facet = vec!["APAC".to_string(), "LATAM".to_string(), "MEA".to_string()];
        let excluded: HashSet<String> = ["LATAM".to_string()].into_iter().collect();
        assert_eq!(constrained_facet(&facet, &excluded), ["APAC", "MEA"]);
    }

    #[test]
    fn unchecking_everything_behaves_like_untouched() {
        let facet = vec!["APAC".to_string(), "MEA".to_string()];
        let excluded: HashSet<String> = facet.iter().cloned().collect();
        assert!(constrained_facet(&facet, &excluded).is_empty());
    }
}
