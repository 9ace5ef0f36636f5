use dioxus::prelude::*;

use crate::domain::entities::filter::{FieldKind, FilterState};
use crate::ui::styles::{button_style, card_style, input_style, label_style, ButtonKind};

/// Edits stay local until "Buscar"; nothing is fetched on keystrokes.
#[component]
pub fn FilterPanel(
    mut filters: Signal<FilterState>,
    on_search: EventHandler<()>,
    on_clear: EventHandler<()>,
) -> Element {
    let state = filters.read().clone();
    rsx! {
        div { style: "{card_style()} margin-bottom: 16px;",
            h3 { style: "font-size: 17px; font-weight: 600; margin: 0 0 12px 0;", "Filtros" }
            div { style: "display: grid; grid-template-columns: repeat(4, minmax(0, 1fr)); gap: 12px;",
                for field in state.fields() {
                    {
                        let name = field.name;
                        let current = state.get(name).to_string();
                        rsx! {
                            div { key: "{name}",
                                label { style: "{label_style()}", "{field.label}" }
                                match field.kind {
                                    FieldKind::Select => rsx! {
                                        select {
                                            style: "{input_style()}",
                                            value: "{current}",
                                            onchange: move |evt| filters.write().set(name, evt.value()),
                                            option { value: "", "Todos" }
                                            for (value, label) in field.options.iter() {
                                                option {
                                                    value: "{value}",
                                                    selected: *value == current,
                                                    "{label}"
                                                }
                                            }
                                        }
                                    },
                                    FieldKind::DateTime => rsx! {
                                        input {
                                            r#type: "datetime-local",
                                            style: "{input_style()}",
                                            value: "{current}",
                                            oninput: move |evt| filters.write().set(name, evt.value()),
                                        }
                                    },
                                    FieldKind::Number => rsx! {
                                        input {
                                            r#type: "number",
                                            min: "0",
                                            style: "{input_style()}",
                                            placeholder: "{field.placeholder}",
                                            value: "{current}",
                                            oninput: move |evt| filters.write().set(name, evt.value()),
                                        }
                                    },
                                    FieldKind::Text => rsx! {
                                        input {
                                            r#type: "text",
                                            style: "{input_style()}",
                                            placeholder: "{field.placeholder}",
                                            value: "{current}",
                                            oninput: move |evt| filters.write().set(name, evt.value()),
                                        }
                                    },
                                }
                            }
                        }
                    }
                }
            }
            div { style: "display: flex; gap: 12px; margin-top: 16px;",
                button {
                    style: "{button_style(ButtonKind::Primary, false)}",
                    onclick: move |_| on_search.call(()),
                    "Buscar"
                }
                button {
                    style: "{button_style(ButtonKind::Secondary, false)}",
                    onclick: move |_| {
                        filters.write().clear();
                        on_clear.call(());
                    },
                    "Limpiar Filtros"
                }
            }
        }
    }
}
