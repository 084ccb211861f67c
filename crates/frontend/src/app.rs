use leptos::prelude::*;

use crate::dashboards::sales_overview::ui::dashboard::SalesOverviewDashboard;
use crate::shared::store::RecordStore;

#[component]
pub fn App() -> impl IntoView {
    // The store is the single owner of the record list; every other
    // component receives read-only filtered views through the pipeline.
    provide_context(RecordStore::load());

    view! { <SalesOverviewDashboard /> }
}
