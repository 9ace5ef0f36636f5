use dioxus::prelude::*;

use crate::domain::entities::analytics::FunnelStep;
use crate::domain::format::format_number;
use crate::domain::funnel::{overall_conversion, step_color, step_width, users_lost};
use crate::ui::styles::{bar_track_style, card_style, section_title_style};

#[component]
pub fn FunnelChart(steps: Vec<FunnelStep>, title: Option<String>) -> Element {
    if steps.is_empty() {
        return rsx! {
            div { style: "{card_style()}",
                p { style: "color: #6b7280; text-align: center;", "No hay datos de funnel disponibles" }
            }
        };
    }

    let total = steps.len();
    let overall = overall_conversion(&steps);
    let completed = format_number(steps.last().map(|step| step.users).unwrap_or(0) as f64);
    rsx! {
        div { style: "{card_style()}",
            if let Some(title) = title {
                h3 { style: "{section_title_style()}", "{title}" }
            }
            for (index, step) in steps.iter().enumerate() {
                {
                    let width = step_width(&steps, index);
                    let color = step_color(index, total);
                    let users = format_number(step.users as f64);
                    let lost = users_lost(&steps, index);
                    let lost_text = format_number(lost as f64);
                    rsx! {
                        div { key: "{step.step_name}-{index}", style: "margin-bottom: 16px;",
                            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 6px;",
                                div { style: "display: flex; align-items: center; gap: 8px;",
                                    span { style: "display: inline-flex; align-items: center; justify-content: center; width: 24px; height: 24px; border-radius: 50%; background: #f3f4f6; font-size: 12px; font-weight: 700; color: #4b5563;",
                                        "{index + 1}"
                                    }
                                    span { style: "font-weight: 500;", "{step.step_name}" }
                                }
                                div { style: "display: flex; align-items: center; gap: 12px;",
                                    span { style: "font-size: 14px; font-weight: 600;", "{users} usuarios" }
                                    if lost > 0 {
                                        span { style: "font-size: 12px; color: #dc2626;", "{lost_text} perdidos" }
                                    }
                                    if let Some(secs) = step.avg_duration.filter(|secs| *secs > 0.0) {
                                        span { style: "font-size: 12px; color: #6b7280;", "~{secs}s" }
                                    }
                                }
                            }
                            div { style: "{bar_track_style(40)}",
                                div { style: "height: 100%; width: {width:.1}%; background: {color}; border-radius: 6px;" }
                                if index > 0 {
                                    div { style: "position: absolute; right: 8px; top: 50%; transform: translateY(-50%); display: flex; gap: 8px;",
                                        span { style: "font-size: 12px; font-weight: 500; color: #fff; background: rgba(0,0,0,0.2); padding: 1px 8px; border-radius: 4px;",
                                            "{step.conversion_rate:.1}% conversión"
                                        }
                                        if step.drop_off_rate > 0.0 {
                                            span { style: "font-size: 12px; font-weight: 500; color: #dc2626; background: #fee2e2; padding: 1px 8px; border-radius: 4px;",
                                                "-{step.drop_off_rate:.1}%"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            div { style: "display: flex; justify-content: space-between; margin-top: 20px; padding-top: 16px; border-top: 1px solid #e5e7eb;",
                div {
                    p { style: "font-size: 14px; color: #6b7280; margin: 0;", "Conversión total" }
                    p { style: "font-size: 24px; font-weight: 700; margin: 0;", "{overall:.1}%" }
                }
                div { style: "text-align: right;",
                    p { style: "font-size: 14px; color: #6b7280; margin: 0;", "Usuarios completaron" }
                    p { style: "font-size: 24px; font-weight: 700; color: #16a34a; margin: 0;", "{completed}" }
                }
            }
        }
    }
}
