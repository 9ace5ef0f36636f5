use dioxus::prelude::*;

use crate::domain::entities::filter::{DimensionFilterState, FacetOptions};
use crate::ui::styles::{input_style, PRIMARY};

/// One select per facet. Picking the selected value again clears it.
#[component]
pub fn DimensionFilter(
    facets: Vec<FacetOptions>,
    value: DimensionFilterState,
    on_change: EventHandler<DimensionFilterState>,
) -> Element {
    let active = value.active_count();
    let cleared = value.clone();
    let any_selected = !value.is_empty();
    rsx! {
        div { style: "display: flex; align-items: center; flex-wrap: wrap; gap: 8px; margin-bottom: 16px;",
            div { style: "display: flex; align-items: center; gap: 6px; padding: 8px 12px; background: #f3f4f6; border-radius: 8px;",
                span { style: "font-size: 14px; font-weight: 500; color: #374151;", "Filtros" }
                if active > 0 {
                    span { style: "display: inline-flex; align-items: center; justify-content: center; width: 20px; height: 20px; border-radius: 50%; background: {PRIMARY}; color: #fff; font-size: 12px; font-weight: 700;",
                        "{active}"
                    }
                }
            }
            for group in facets.iter() {
                {
                    let facet = group.facet;
                    let selected = value.get(facet).unwrap_or_default().to_string();
                    let border = if selected.is_empty() { "#d1d5db" } else { PRIMARY };
                    let current = value.clone();
                    let without = value.clone();
                    rsx! {
                        span { key: "{facet.param()}", style: "display: inline-flex; align-items: center; gap: 2px;",
                            select {
                                style: "{input_style()} width: auto; border-color: {border};",
                                value: "{selected}",
                                onchange: move |evt| {
                                    let mut next = current.clone();
                                    next.toggle(facet, &evt.value());
                                    on_change.call(next);
                                },
                                option { value: "", "{facet.label()}" }
                                for (option_value, label) in group.options.iter() {
                                    option {
                                        value: "{option_value}",
                                        selected: *option_value == selected,
                                        "{label}"
                                    }
                                }
                            }
                            if !selected.is_empty() {
                                button {
                                    style: "padding: 2px 6px; font-size: 12px; color: #6b7280; background: none; border: none; cursor: pointer;",
                                    title: "Quitar filtro",
                                    onclick: move |_| {
                                        let mut next = without.clone();
                                        next.clear(facet);
                                        on_change.call(next);
                                    },
                                    "✕"
                                }
                            }
                        }
                    }
                }
            }
            if any_selected {
                button {
                    style: "padding: 8px 12px; font-size: 14px; color: #dc2626; background: none; border: none; cursor: pointer;",
                    onclick: move |_| {
                        let mut next = cleared.clone();
                        next.clear_all();
                        on_change.call(next);
                    },
                    "✕ Limpiar filtros"
                }
            }
        }
    }
}
