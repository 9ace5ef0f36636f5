use dioxus::prelude::*;

use crate::domain::entities::analytics::GeoLocation;
use crate::domain::format::format_number;
use crate::domain::geo::{display_name, Choropleth, GeoMetric, HOVER_COLOR};
use crate::ui::styles::{card_style, section_title_style};

/// Country tiles shaded on the choropleth scale, with legend and top list.
#[component]
pub fn WorldMap(
    locations: Vec<GeoLocation>,
    title: Option<String>,
    #[props(default = GeoMetric::Users)] metric: GeoMetric,
) -> Element {
    let mut hovered = use_signal(|| None::<String>);
    let map = Choropleth::from_rows(&locations, metric);
    let ranked = map.ranked();
    let top = map.top(5);
    let unit = metric.label();

    rsx! {
        div { style: "{card_style()}",
            if let Some(title) = title {
                h3 { style: "{section_title_style()}", "{title}" }
            }
            div { style: "display: flex; flex-wrap: wrap; gap: 6px; min-height: 120px; padding: 12px; background: #f9fafb; border-radius: 8px; align-content: flex-start;",
                if ranked.is_empty() {
                    p { style: "color: #6b7280; margin: auto;", "No hay datos geográficos disponibles" }
                }
                for (code, value) in ranked.iter() {
                    {
                        let code = code.clone();
                        let is_hovered = hovered.read().as_deref() == Some(code.as_str());
                        let fill = if is_hovered { HOVER_COLOR } else { map.bucket(*value) };
                        let name = display_name(&code, None);
                        let shown = format_number(*value);
                        rsx! {
                            div {
                                key: "{code}",
                                style: "width: 72px; height: 52px; border-radius: 6px; background: {fill}; color: #fff; display: flex; flex-direction: column; align-items: center; justify-content: center; cursor: pointer; border: 1px solid #fff;",
                                title: "{name}: {shown} {unit}",
                                onmouseenter: {
                                    let code = code.clone();
                                    move |_| hovered.set(Some(code.clone()))
                                },
                                onmouseleave: move |_| hovered.set(None),
                                span { style: "font-size: 13px; font-weight: 700;", "{code}" }
                                span { style: "font-size: 11px;", "{shown}" }
                            }
                        }
                    }
                }
            }
            if let Some(code) = hovered() {
                p { style: "font-size: 13px; color: #374151; margin: 8px 0 0 0;",
                    "{display_name(&code, None)}: {format_number(map.value(Some(&code), None))} {unit}"
                }
            }
            div { style: "display: flex; justify-content: space-between; align-items: center; margin-top: 16px;",
                div { style: "display: flex; align-items: center; gap: 8px;",
                    span { style: "font-size: 12px; color: #6b7280;", "Menos" }
                    div { style: "display: flex;",
                        for color in map.legend().iter() {
                            div { key: "{color}", style: "width: 24px; height: 12px; background: {color};" }
                        }
                    }
                    span { style: "font-size: 12px; color: #6b7280;", "Más" }
                }
                span { style: "font-size: 14px; color: #4b5563;", "{locations.len()} países con datos" }
            }
            if !top.is_empty() {
                div { style: "margin-top: 16px; padding-top: 16px; border-top: 1px solid #e5e7eb;",
                    p { style: "font-size: 14px; font-weight: 500; color: #374151; margin: 0 0 8px 0;", "Top países" }
                    for (code, value) in top.iter() {
                        div { key: "top-{code}", style: "display: flex; justify-content: space-between; font-size: 14px; margin-bottom: 6px;",
                            span { style: "color: #4b5563;", "{display_name(code, None)}" }
                            span { style: "font-weight: 500;", "{format_number(*value)}" }
                        }
                    }
                }
            }
        }
    }
}
