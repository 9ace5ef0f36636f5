use dioxus::prelude::*;

use crate::domain::entities::date_range::{DatePreset, DateRange};
use crate::ui::styles::{button_style, input_style, ButtonKind, PRIMARY};

#[component]
pub fn DateRangePicker(value: DateRange, on_change: EventHandler<DateRange>) -> Element {
    let mut open = use_signal(|| false);
    let mut custom_start = use_signal(String::new);
    let mut custom_end = use_signal(String::new);

    let start = custom_start();
    let end = custom_end();
    let custom = if start.is_empty() || end.is_empty() {
        None
    } else {
        Some(DateRange::custom(&start, &end))
    };
    let custom_error = match &custom {
        Some(Err(message)) => Some(message.clone()),
        _ => None,
    };
    let can_apply = matches!(custom, Some(Ok(_)));
    let current_label = value.label.clone().unwrap_or_default();

    rsx! {
        div { style: "position: relative;",
            button {
                style: "display: flex; align-items: center; gap: 8px; padding: 8px 14px; background: #fff; border: 1px solid #d1d5db; border-radius: 8px; cursor: pointer; font-size: 14px;",
                onclick: move |_| open.toggle(),
                "📅 {value.display()}"
            }
            if open() {
                div {
                    style: "position: fixed; inset: 0; z-index: 40;",
                    onclick: move |_| open.set(false),
                }
                div { style: "position: absolute; right: 0; margin-top: 8px; width: 320px; background: #fff; border: 1px solid #e5e7eb; border-radius: 12px; box-shadow: 0 10px 25px rgba(0,0,0,0.15); z-index: 50;",
                    div { style: "padding: 12px; border-bottom: 1px solid #f3f4f6;",
                        p { style: "font-size: 12px; font-weight: 600; color: #6b7280; text-transform: uppercase; margin: 0 0 8px 0;", "Rangos predefinidos" }
                        div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 4px;",
                            for preset in DatePreset::ALL {
                                {
                                    let active = current_label == preset.label();
                                    let (background, color) = if active { (PRIMARY, "#fff") } else { ("transparent", "#374151") };
                                    rsx! {
                                        button {
                                            key: "{preset.label()}",
                                            style: "padding: 6px 10px; font-size: 14px; text-align: left; border: none; border-radius: 6px; cursor: pointer; background: {background}; color: {color};",
                                            onclick: move |_| {
                                                on_change.call(DateRange::from_preset(preset));
                                                open.set(false);
                                            },
                                            "{preset.label()}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                    div { style: "padding: 12px;",
                        p { style: "font-size: 12px; font-weight: 600; color: #6b7280; text-transform: uppercase; margin: 0 0 8px 0;", "Rango personalizado" }
                        div { style: "display: flex; gap: 8px; margin-bottom: 8px;",
                            input {
                                r#type: "date",
                                style: "{input_style()}",
                                value: "{start}",
                                oninput: move |evt| custom_start.set(evt.value()),
                            }
                            input {
                                r#type: "date",
                                style: "{input_style()}",
                                value: "{end}",
                                oninput: move |evt| custom_end.set(evt.value()),
                            }
                        }
                        if let Some(message) = custom_error {
                            p { style: "font-size: 12px; color: #dc2626; margin: 0 0 8px 0;", "{message}" }
                        }
                        button {
                            style: "{button_style(ButtonKind::Primary, !can_apply)} width: 100%;",
                            disabled: !can_apply,
                            onclick: move |_| {
                                if let Ok(range) = DateRange::custom(&custom_start.peek(), &custom_end.peek()) {
                                    on_change.call(range);
                                    open.set(false);
                                }
                            },
                            "Aplicar"
                        }
                    }
                }
            }
        }
    }
}
