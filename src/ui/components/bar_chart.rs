use dioxus::prelude::*;

use crate::domain::charts::{polyline_points, series_max, BarDatum, LineSeries};
use crate::domain::format::{format_value, ValueFormat};
use crate::ui::styles::{bar_fill_style, bar_track_style, card_style, section_title_style};

/// Horizontal bars scaled to the largest value.
#[component]
pub fn BarChart(
    data: Vec<BarDatum>,
    title: Option<String>,
    #[props(default = ValueFormat::Number)] format: ValueFormat,
    #[props(default = "No hay datos disponibles".to_string())] empty_text: String,
) -> Element {
    let max = data.iter().map(|datum| datum.value).fold(0.0, f64::max);
    rsx! {
        div { style: "{card_style()}",
            if let Some(title) = title {
                h3 { style: "{section_title_style()}", "{title}" }
            }
            if data.is_empty() {
                p { style: "color: #6b7280; text-align: center; padding: 24px 0;", "{empty_text}" }
            }
            for (idx, datum) in data.iter().enumerate() {
                {
                    let width = if max > 0.0 { datum.value / max * 100.0 } else { 0.0 };
                    let shown = format_value(datum.value, format);
                    rsx! {
                        div { key: "{idx}", style: "margin-bottom: 10px;",
                            div { style: "display: flex; justify-content: space-between; font-size: 13px; margin-bottom: 4px;",
                                span { style: "color: #374151; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;", title: "{datum.label}", "{datum.label}" }
                                span { style: "font-weight: 600;", "{shown}" }
                            }
                            div { style: "{bar_track_style(14)}",
                                div { style: "{bar_fill_style(width, datum.color)}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 220.0;

/// Line chart over shared x labels; only every few labels are printed.
#[component]
pub fn SeriesChart(title: String, labels: Vec<String>, series: Vec<LineSeries>) -> Element {
    let max = series_max(&series);
    let label_every = (labels.len() / 8).max(1);
    let step = if labels.len() > 1 {
        CHART_WIDTH / (labels.len() - 1) as f64
    } else {
        0.0
    };
    let empty = labels.is_empty() || series.is_empty();
    rsx! {
        div { style: "{card_style()}",
            h3 { style: "{section_title_style()}", "{title}" }
            if empty {
                p { style: "color: #6b7280; text-align: center; padding: 24px 0;", "No hay datos disponibles" }
            } else {
                svg {
                    view_box: "-10 -10 {CHART_WIDTH + 20.0} {CHART_HEIGHT + 40.0}",
                    width: "100%",
                    height: "280",
                    line { x1: "0", y1: "{CHART_HEIGHT}", x2: "{CHART_WIDTH}", y2: "{CHART_HEIGHT}", stroke: "#d1d5db" }
                    for line in series.iter() {
                        polyline {
                            key: "{line.name}",
                            points: "{polyline_points(&line.values, max, CHART_WIDTH, CHART_HEIGHT)}",
                            fill: "none",
                            stroke: "{line.color}",
                            stroke_width: "2",
                        }
                    }
                    for (idx, label) in labels.iter().enumerate().filter(|(idx, _)| idx % label_every == 0) {
                        text {
                            x: "{idx as f64 * step}",
                            y: "{CHART_HEIGHT + 18.0}",
                            font_size: "10",
                            fill: "#6b7280",
                            text_anchor: "middle",
                            "{label}"
                        }
                    }
                }
                div { style: "display: flex; flex-wrap: wrap; gap: 12px; margin-top: 8px; font-size: 12px;",
                    for line in series.iter() {
                        span { style: "display: inline-flex; align-items: center; gap: 4px;",
                            span { style: "width: 10px; height: 10px; border-radius: 2px; background: {line.color};" }
                            "{line.name}"
                        }
                    }
                }
            }
        }
    }
}
