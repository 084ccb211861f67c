use contracts::shared::indicators::{IndicatorStatus, KpiValue, ValueFormat};
use leptos::prelude::*;

use crate::shared::components::table::number_format::{
    format_number_int, format_number_with_decimals,
};

fn format_value(value: Option<f64>, format: &ValueFormat) -> String {
    let Some(v) = value else {
        return "N/A".to_string();
    };
    match format {
        ValueFormat::Money { currency } => {
            format!("{currency} {}", format_number_int(v.round()))
        }
        ValueFormat::Percent { decimals } => {
            format!("{}%", format_number_with_decimals(v, *decimals))
        }
    }
}

/// One KPI card. The whole KPI grid is re-derived per refresh, so the card
/// takes a plain snapshot value rather than signals.
#[component]
pub fn StatCard(card: KpiValue) -> impl IntoView {
    let status_class = match card.status {
        IndicatorStatus::Good => "stat-card stat-card--success",
        IndicatorStatus::Bad => "stat-card stat-card--error",
        IndicatorStatus::Neutral => "stat-card",
    };
    let formatted = format_value(card.value, &card.format);

    view! {
        <article class=status_class>
            <div class="stat-card__label">{card.label}</div>
            <div class="stat-card__value">{formatted}</div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_is_rounded_and_grouped() {
        let format = ValueFormat::Money {
            currency: "€".to_string(),
        };
        assert_eq!(format_value(Some(1369999.6), &format), "€ 1 370 000");
    }

    #[test]
    fn percent_respects_decimals() {
        let format = ValueFormat::Percent { decimals: 2 };
        assert_eq!(format_value(Some(11.737), &format), "11.74%");
        assert_eq!(
            format_value(Some(103.5), &ValueFormat::Percent { decimals: 1 }),
            "103.5%"
        );
    }

    #[test]
    fn missing_value_renders_na() {
        let format = ValueFormat::Percent { decimals: 2 };
        assert_eq!(format_value(None, &format), "N/A");
    }
}
