use dioxus::prelude::*;

use crate::domain::format::{format_value, Trend, TrendDirection, ValueFormat};
use crate::ui::components::stat_card::StatColor;
use crate::ui::styles::card_style;

/// KPI card with an optional trend against the previous period.
#[component]
pub fn MetricCard(
    title: String,
    value: f64,
    previous: Option<f64>,
    #[props(default = ValueFormat::Number)] format: ValueFormat,
    subtitle: Option<String>,
    #[props(default)] color: StatColor,
    #[props(default)] loading: bool,
) -> Element {
    let trend = previous.map(|previous| Trend::compute(value, Some(previous)));
    let formatted = format_value(value, format);
    let accent = color.hex();
    rsx! {
        div { style: "{card_style()} border-top: 3px solid {accent};",
            p { style: "font-size: 13px; font-weight: 500; color: #4b5563; margin: 0 0 6px 0;", "{title}" }
            if loading {
                div { style: "height: 30px; width: 96px; background: #e5e7eb; border-radius: 4px;" }
            } else {
                p { style: "font-size: 28px; font-weight: 700; margin: 0;", "{formatted}" }
            }
            if let Some(trend) = trend {
                {
                    let (arrow, color) = match trend.direction {
                        TrendDirection::Up => ("▲", "#16a34a"),
                        TrendDirection::Down => ("▼", "#dc2626"),
                        TrendDirection::Neutral => ("■", "#6b7280"),
                    };
                    rsx! {
                        p { style: "font-size: 13px; margin: 6px 0 0 0; color: {color};",
                            "{arrow} {trend.percentage}% "
                            span { style: "color: #6b7280;", "vs periodo anterior" }
                        }
                    }
                }
            }
            if let Some(subtitle) = subtitle {
                p { style: "font-size: 13px; color: #6b7280; margin: 4px 0 0 0;", "{subtitle}" }
            }
        }
    }
}
