use serde::{Deserialize, Serialize};

use crate::shared::metrics::Kpis;

// ---------------------------------------------------------------------------
// Display metadata
// ---------------------------------------------------------------------------

/// How to format the numeric value on the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Money { currency: String },
    Percent { decimals: u8 },
}

/// Visual status of the indicator (drives the card colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorStatus {
    Good,
    Bad,
    Neutral,
}

// ---------------------------------------------------------------------------
// Computed card values
// ---------------------------------------------------------------------------

/// One KPI card: label, value (`None` renders as "N/A"), format, status.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiValue {
    pub label: &'static str,
    pub value: Option<f64>,
    pub format: ValueFormat,
    pub status: IndicatorStatus,
}

/// The five dashboard cards derived from one KPI bundle, in display order.
pub fn kpi_values(kpis: &Kpis) -> Vec<KpiValue> {
    let attainment = if kpis.total_target > 0.0 {
        Some(kpis.target_attainment())
    } else {
        None
    };
    let attainment_status = match attainment {
        Some(v) if v >= 100.0 => IndicatorStatus::Good,
        Some(_) => IndicatorStatus::Bad,
        None => IndicatorStatus::Neutral,
    };

    vec![
        KpiValue {
            label: "Total Revenue",
            value: Some(kpis.total_revenue),
            format: ValueFormat::Money {
                currency: "€".to_string(),
            },
            status: IndicatorStatus::Neutral,
        },
        KpiValue {
            label: "Target Attainment",
            value: Some(attainment.unwrap_or(0.0)),
            format: ValueFormat::Percent { decimals: 1 },
            status: attainment_status,
        },
        KpiValue {
            label: "MoM Growth",
            value: kpis.mom,
            format: ValueFormat::Percent { decimals: 2 },
            status: growth_status(kpis.mom),
        },
        KpiValue {
            label: "YoY Growth",
            value: kpis.yoy,
            format: ValueFormat::Percent { decimals: 2 },
            status: growth_status(kpis.yoy),
        },
        KpiValue {
            label: "Avg Price Impact",
            value: Some(kpis.price_impact_avg),
            format: ValueFormat::Percent { decimals: 2 },
            status: growth_status(Some(kpis.price_impact_avg)),
        },
    ]
}

fn growth_status(value: Option<f64>) -> IndicatorStatus {
    match value {
        Some(v) if v > 0.0 => IndicatorStatus::Good,
        Some(v) if v < 0.0 => IndicatorStatus::Bad,
        _ => IndicatorStatus::Neutral,
    }
}
