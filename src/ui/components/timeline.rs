use dioxus::prelude::*;

use crate::domain::diff::{field_diff, pretty_json};
use crate::domain::entities::audit::{Operation, TimelineEvent};
use crate::domain::format::{format_timestamp, operation_accent, operation_colors};
use crate::ui::styles::{badge_style, card_style};

/// Change history of one record, in server order.
#[component]
pub fn Timeline(events: Vec<TimelineEvent>) -> Element {
    rsx! {
        div { style: "{card_style()}",
            h3 { style: "font-size: 17px; font-weight: 600; margin: 0 0 20px 0;", "Línea de Tiempo de Cambios" }
            div { style: "position: relative; padding-left: 40px;",
                div { style: "position: absolute; left: 15px; top: 0; bottom: 0; width: 2px; background: #d1d5db;" }
                for (idx, event) in events.iter().enumerate() {
                    TimelineEntry { key: "{idx}", event: event.clone() }
                }
            }
        }
    }
}

#[component]
fn TimelineEntry(event: TimelineEvent) -> Element {
    let accent = operation_accent(event.operation);
    let badge = badge_style(operation_colors(event.operation));
    let when = format_timestamp(&event.timestamp);
    let user = event.user_name.clone().unwrap_or_default();
    let body = match (event.operation, &event.old_values, &event.new_values) {
        (Operation::Update, Some(old), Some(new)) => {
            let changes = field_diff(old, new);
            rsx! {
                div { style: "margin-top: 12px; display: flex; flex-direction: column; gap: 6px;",
                    for change in changes {
                        div { key: "{change.field}", style: "display: flex; gap: 8px; font-size: 14px; border-left: 2px solid #d1d5db; padding-left: 10px;",
                            span { style: "font-weight: 500; width: 140px; flex-shrink: 0;", "{change.field}:" }
                            span { style: "color: #dc2626; text-decoration: line-through; overflow: hidden; text-overflow: ellipsis;", "{change.old}" }
                            span { style: "color: #9ca3af;", "→" }
                            span { style: "color: #16a34a; font-weight: 500; overflow: hidden; text-overflow: ellipsis;", "{change.new}" }
                        }
                    }
                }
            }
        }
        (Operation::Insert, _, Some(new)) => rsx! {
            ValuesBlock { title: "Valores insertados:", text: pretty_json(new) }
        },
        (Operation::Delete, Some(old), _) => rsx! {
            ValuesBlock { title: "Valores eliminados:", text: pretty_json(old) }
        },
        _ => rsx! {},
    };
    rsx! {
        div { style: "position: relative; margin-bottom: 20px;",
            div { style: "position: absolute; left: -40px; top: 4px; width: 30px; height: 30px; border-radius: 50%; background: {accent}; border: 3px solid #fff;" }
            div { style: "background: #f9fafb; border: 1px solid #e5e7eb; border-radius: 8px; padding: 14px;",
                div { style: "display: flex; justify-content: space-between; margin-bottom: 8px;",
                    span { style: "{badge}", "{event.operation.label()}" }
                    span { style: "font-size: 13px; color: #4b5563;", "{when}" }
                }
                div { style: "font-size: 14px; color: #374151;",
                    span { style: "font-weight: 500;", "Usuario: " }
                    "{user}"
                    if let Some(user_id) = event.user_id.as_ref() {
                        span { style: "color: #6b7280; margin-left: 6px;", "({user_id})" }
                    }
                }
                if !event.changed_fields.is_empty() {
                    div { style: "margin-top: 8px;",
                        span { style: "font-size: 13px; font-weight: 500;", "Campos modificados:" }
                        div { style: "display: flex; flex-wrap: wrap; gap: 4px; margin-top: 4px;",
                            for field in event.changed_fields.iter() {
                                span { style: "padding: 1px 8px; font-size: 12px; background: #30bce1; color: #fff; border-radius: 4px;", "{field}" }
                            }
                        }
                    }
                }
                {body}
            }
        }
    }
}

#[component]
fn ValuesBlock(title: &'static str, text: String) -> Element {
    rsx! {
        div { style: "margin-top: 12px;",
            span { style: "font-size: 13px; font-weight: 500;", "{title}" }
            pre { style: "margin: 6px 0 0 0; padding: 10px; background: #fff; border: 1px solid #e5e7eb; border-radius: 6px; font-size: 12px; overflow-x: auto;", "{text}" }
        }
    }
}
