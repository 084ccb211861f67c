use contracts::domain::sales_record::SalesRecord;
use leptos::prelude::*;

use crate::shared::components::table::number_format::format_number_int;

/// Table of the filtered records, already sorted ascending by month.
#[component]
pub fn RecordsTable(
    /// Filtered view to display
    #[prop(into)]
    records: Signal<Vec<SalesRecord>>,
) -> impl IntoView {
    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Project"</th>
                    <th>"Region"</th>
                    <th>"Product"</th>
                    <th>"Month"</th>
                    <th>"Revenue"</th>
                    <th>"Target"</th>
                    <th>"Price Impact %"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    records
                        .get()
                        .into_iter()
                        .map(|r| {
                            view! {
                                <tr>
                                    <td>{r.project}</td>
                                    <td>{r.region}</td>
                                    <td>{r.product}</td>
                                    <td>{r.month}</td>
                                    <td class="num">{format_number_int(r.revenue)}</td>
                                    <td class="num">{format_number_int(r.target)}</td>
                                    <td class="num">{format!("{:.2}", r.price_impact)}</td>
                                </tr>
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}
