use contracts::domain::sales_record::SalesRecord;
use leptos::prelude::*;

use crate::shared::components::ui::{Button, Input};
use crate::shared::store::RecordStore;

/// Record entry form. An invalid submission is silently rejected and keeps
/// the user's input; an accepted one clears the form and the dashboard
/// refreshes reactively through the store signal.
#[component]
pub fn RecordForm() -> impl IntoView {
    let store = expect_context::<RecordStore>();

    let project = RwSignal::new(String::new());
    let region = RwSignal::new(String::new());
    let product = RwSignal::new(String::new());
    let month = RwSignal::new(String::new());
    let revenue = RwSignal::new(String::new());
    let target = RwSignal::new(String::new());
    let price_impact = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let record = SalesRecord {
            project: project.get_untracked().trim().to_string(),
            region: region.get_untracked().trim().to_string(),
            product: product.get_untracked().trim().to_string(),
            month: month.get_untracked().trim().to_string(),
            revenue: parse_amount(&revenue.get_untracked()),
            target: parse_amount(&target.get_untracked()),
            price_impact: parse_amount(&price_impact.get_untracked()),
        };

        if store.append(record) {
            for field in [project, region, product, month, revenue, target, price_impact] {
                field.set(String::new());
            }
        }
    };

    view! {
        <form class="record-form" on:submit=on_submit>
            <Input label="Project" value=project on_input=Callback::new(move |v| project.set(v)) />
            <Input label="Region" value=region on_input=Callback::new(move |v| region.set(v)) />
            <Input label="Product" value=product on_input=Callback::new(move |v| product.set(v)) />
            <Input
                label="Month"
                input_type="month"
                placeholder="YYYY-MM"
                value=month
                on_input=Callback::new(move |v| month.set(v))
            />
            <Input
                label="Revenue"
                input_type="number"
                value=revenue
                on_input=Callback::new(move |v| revenue.set(v))
            />
            <Input
                label="Target"
                input_type="number"
                value=target
                on_input=Callback::new(move |v| target.set(v))
            />
            <Input
                label="Price Impact %"
                input_type="number"
                value=price_impact
                on_input=Callback::new(move |v| price_impact.set(v))
            />
            <Button button_type="submit">"Add Record"</Button>
        </form>
    }
}

/// Empty or unparseable amounts become 0, which validation then rejects for
/// the revenue field.
fn parse_amount(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_parse_leniently() {
        assert_eq!(parse_amount("102000"), 102000.0);
        assert_eq!(parse_amount(" 1.9 "), 1.9);
        assert_eq!(parse_amount("-0.7"), -0.7);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
    }
}
