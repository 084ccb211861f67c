//! Self-contained SVG chart views.
//!
//! Each chart is derived from a `Memo` of its series, so a filter change
//! rebuilds the whole SVG in place; the previous rendering is fully replaced
//! in its display slot.

use leptos::prelude::*;

const WIDTH: f64 = 360.0;
const HEIGHT: f64 = 220.0;
const PAD_LEFT: f64 = 10.0;
const PAD_RIGHT: f64 = 10.0;
const PAD_TOP: f64 = 12.0;
const PAD_BOTTOM: f64 = 26.0;

const DEFAULT_COLOR: &str = "#005691";

/// Inclusive value bounds for the y axis. Always spans zero so bars keep a
/// baseline and line scales stay honest; degenerate ranges are widened.
fn value_bounds(values: &[f64]) -> (f64, f64) {
    let mut min: f64 = 0.0;
    let mut max: f64 = 0.0;
    for &v in values {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    if max == min {
        max = min + 1.0;
    }
    (min, max)
}

fn y_pos(value: f64, min: f64, max: f64) -> f64 {
    PAD_TOP + (max - value) / (max - min) * (HEIGHT - PAD_TOP - PAD_BOTTOM)
}

/// Horizontal centre of slot `index` out of `len` equal slots.
fn x_pos(index: usize, len: usize) -> f64 {
    let slot = (WIDTH - PAD_LEFT - PAD_RIGHT) / len as f64;
    PAD_LEFT + slot * (index as f64 + 0.5)
}

fn polyline_points(values: &[f64]) -> String {
    let (min, max) = value_bounds(values);
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| format!("{:.1},{:.1}", x_pos(i, values.len()), y_pos(v, min, max)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every n-th axis label is drawn so a long series stays readable.
fn label_step(len: usize) -> usize {
    (len / 6).max(1)
}

fn axis_labels(series: &[(String, f64)]) -> AnyView {
    let step = label_step(series.len());
    let y = HEIGHT - 8.0;
    series
        .iter()
        .enumerate()
        .filter(|(i, _)| i % step == 0)
        .map(|(i, (label, _))| {
            let x = x_pos(i, series.len());
            view! {
                <text x=x y=y text-anchor="middle" class="chart__label">
                    {label.clone()}
                </text>
            }
        })
        .collect_view()
        .into_any()
}

fn baseline(min: f64, max: f64) -> AnyView {
    let y = y_pos(0.0, min, max);
    let x2 = WIDTH - PAD_RIGHT;
    view! { <line x1=PAD_LEFT y1=y x2=x2 y2=y class="chart__axis" /> }.into_any()
}

fn empty_notice() -> AnyView {
    view! { <text x="12" y="24" class="chart__label">"No data"</text> }.into_any()
}

/// Card wrapper giving every chart slot a title and a frame.
#[component]
pub fn ChartCard(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="chart-card">
            <h3 class="chart-card__title">{title}</h3>
            {children()}
        </div>
    }
}

/// Polyline chart over a labeled series.
#[component]
pub fn LineChart(
    /// Labeled series to plot
    #[prop(into)]
    series: Signal<Vec<(String, f64)>>,
    /// Stroke colour
    #[prop(optional, into)]
    color: MaybeProp<String>,
    /// Render the line dashed (used for the forecast)
    #[prop(optional)]
    dashed: bool,
) -> impl IntoView {
    let view_box = format!("0 0 {WIDTH} {HEIGHT}");
    let dash = if dashed { "6 6" } else { "" };

    view! {
        <svg class="chart" viewBox=view_box>
            {move || {
                let series = series.get();
                if series.is_empty() {
                    return empty_notice();
                }
                let stroke = color.get().unwrap_or_else(|| DEFAULT_COLOR.to_string());
                let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
                let (min, max) = value_bounds(&values);
                let points = polyline_points(&values);
                let dots = values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| {
                        let cx = x_pos(i, values.len());
                        let cy = y_pos(v, min, max);
                        let fill = stroke.clone();
                        view! { <circle cx=cx cy=cy r="2.5" fill=fill /> }
                    })
                    .collect_view();

                view! {
                    <g>
                        {baseline(min, max)}
                        <polyline
                            points=points
                            fill="none"
                            stroke=stroke
                            stroke-width="2"
                            stroke-dasharray=dash
                        />
                        {dots}
                        {axis_labels(&series)}
                    </g>
                }
                    .into_any()
            }}
        </svg>
    }
}

/// Bar chart over a labeled series; negative values hang below the zero
/// baseline.
#[component]
pub fn BarChart(
    /// Labeled series to plot
    #[prop(into)]
    series: Signal<Vec<(String, f64)>>,
    /// Bar fill colour
    #[prop(optional, into)]
    color: MaybeProp<String>,
) -> impl IntoView {
    let view_box = format!("0 0 {WIDTH} {HEIGHT}");

    view! {
        <svg class="chart" viewBox=view_box>
            {move || {
                let series = series.get();
                if series.is_empty() {
                    return empty_notice();
                }
                let fill = color.get().unwrap_or_else(|| DEFAULT_COLOR.to_string());
                let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
                let (min, max) = value_bounds(&values);
                let slot = (WIDTH - PAD_LEFT - PAD_RIGHT) / values.len() as f64;
                let bar_width = (slot * 0.6).min(48.0);
                let bars = values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| {
                        let top = y_pos(v.max(0.0), min, max);
                        let bottom = y_pos(v.min(0.0), min, max);
                        let x = x_pos(i, values.len()) - bar_width / 2.0;
                        let height = (bottom - top).max(0.5);
                        let bar_fill = fill.clone();
                        view! { <rect x=x y=top width=bar_width height=height fill=bar_fill /> }
                    })
                    .collect_view();

                view! {
                    <g>
                        {baseline(min, max)}
                        {bars}
                        {axis_labels(&series)}
                    </g>
                }
                    .into_any()
            }}
        </svg>
    }
}
