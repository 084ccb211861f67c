//! Report exporter: formats the current KPI snapshot plus a row sample and
//! hands it to the browser as a downloadable text document.

use chrono::{DateTime, Utc};
use contracts::domain::sales_record::SalesRecord;
use contracts::shared::metrics::Kpis;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::shared::components::table::number_format::format_number_int;

/// The snapshot section is capped at this many rows.
const SNAPSHOT_ROWS: usize = 18;

pub const REPORT_FILENAME: &str = "bosch-row-sales-report.txt";

/// Builds the report body. Pure so it is testable on the host; the caller
/// supplies the generation timestamp.
pub fn build_report(kpis: &Kpis, records: &[SalesRecord], generated_at: DateTime<Utc>) -> String {
    let mut lines = vec![
        "Bosch Power Solutions ROW Sales Report".to_string(),
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        String::new(),
        format!(
            "Total Revenue: € {}",
            format_number_int(kpis.total_revenue.round())
        ),
        format!("Target Attainment: {:.1}%", kpis.target_attainment()),
        format!("MoM Growth: {}", growth_figure(kpis.mom)),
        format!("YoY Growth: {}", growth_figure(kpis.yoy)),
        format!("Average Price Impact: {:.2}%", kpis.price_impact_avg),
        String::new(),
        "Project Snapshot:".to_string(),
    ];
    for r in records.iter().take(SNAPSHOT_ROWS) {
        lines.push(format!(
            "{} | {} | {} | € {}",
            r.month,
            r.region,
            r.product,
            format_number_int(r.revenue)
        ));
    }
    lines.join("\n")
}

fn growth_figure(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}%"),
        None => "N/A".to_string(),
    }
}

/// Wraps the report text in a Blob and triggers a browser download through a
/// transient anchor element.
pub fn download_report(contents: &str, filename: &str) -> Result<(), String> {
    let blob = create_text_blob(contents)?;

    let window = web_sys::window().ok_or("no window object")?;
    let document = window.document().ok_or("no document object")?;
    let body = document.body().ok_or("no body element")?;

    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("failed to create object URL: {e:?}"))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("failed to create anchor: {e:?}"))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("failed to cast to anchor: {e:?}"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    let _ = anchor.style().set_property("display", "none");

    body.append_child(&anchor)
        .map_err(|e| format!("failed to append anchor: {e:?}"))?;
    anchor.click();
    let _ = body.remove_child(&anchor);

    Url::revoke_object_url(&url).map_err(|e| format!("failed to revoke URL: {e:?}"))?;

    Ok(())
}

fn create_text_blob(contents: &str) -> Result<Blob, String> {
    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(contents));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/plain;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&parts, &properties)
        .map_err(|e| format!("failed to create blob: {e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use contracts::domain::sales_record::seed_records;
    use contracts::shared::filters::YearFilter;
    use contracts::shared::metrics::compute_kpis;

    fn report_at_epoch(records: &[SalesRecord]) -> String {
        let kpis = compute_kpis(records, records, YearFilter::All);
        let generated = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();
        build_report(&kpis, records, generated)
    }

    #[test]
    fn report_carries_title_timestamp_and_kpis() {
        let records = seed_records();
        let report = report_at_epoch(&records);
        assert!(report.starts_with("Bosch Power Solutions ROW Sales Report"));
        assert!(report.contains("Generated: 2025-07-01 12:00:00 UTC"));
        assert!(report.contains("Total Revenue: € 1 370 000"));
        assert!(report.contains("Target Attainment:"));
        assert!(report.contains("Average Price Impact:"));
    }

    #[test]
    fn unavailable_growth_prints_na() {
        let records: Vec<SalesRecord> = seed_records().into_iter().take(1).collect();
        let report = report_at_epoch(&records);
        assert!(report.contains("MoM Growth: N/A"));
        assert!(report.contains("YoY Growth: N/A"));
    }

    #[test]
    fn snapshot_is_capped_at_eighteen_rows() {
        let mut records = seed_records();
        let more = seed_records();
        records.extend(more.clone());
        records.extend(more);
        assert!(records.len() > 18);

        let report = report_at_epoch(&records);
        let snapshot_lines = report
            .lines()
            .skip_while(|l| *l != "Project Snapshot:")
            .skip(1)
            .count();
        assert_eq!(snapshot_lines, 18);
    }

    #[test]
    fn snapshot_lines_follow_input_order() {
        let records = seed_records();
        let report = report_at_epoch(&records);
        assert!(report.contains("2024-01 | MEA | Inverter | € 91 000"));
    }
}
