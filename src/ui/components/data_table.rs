use dioxus::prelude::*;

use crate::domain::entities::pagination::PaginationState;
use crate::ui::styles::{
    button_style, card_style, table_cell_style, table_container_style, table_header_cell_style,
    ButtonKind,
};

/// One column: header text and a cell renderer that sees the whole row.
pub struct Column<T> {
    pub label: &'static str,
    pub render: fn(&T) -> Element,
}

impl<T> Column<T> {
    pub const fn new(label: &'static str, render: fn(&T) -> Element) -> Self {
        Self { label, render }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T> PartialEq for Column<T> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.render as usize == other.render as usize
    }
}

#[component]
pub fn DataTable<T: Clone + PartialEq + 'static>(
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    #[props(default)] loading: bool,
    pagination: Option<PaginationState>,
    on_page_change: Option<EventHandler<u32>>,
    on_row_click: Option<EventHandler<T>>,
) -> Element {
    let span = columns.len().max(1);
    let clickable = on_row_click.is_some();
    let row_cursor = if clickable { "pointer" } else { "default" };
    rsx! {
        div { style: "{card_style()} padding: 0;",
            div { style: "{table_container_style()}",
                table { style: "border-collapse: collapse; width: 100%;",
                    thead {
                        tr {
                            for column in columns.iter() {
                                th { style: "{table_header_cell_style()}", "{column.label}" }
                            }
                        }
                    }
                    tbody {
                        if loading {
                            tr {
                                td {
                                    colspan: "{span}",
                                    style: "{table_cell_style()} text-align: center; padding: 32px; color: #6b7280;",
                                    "Cargando..."
                                }
                            }
                        } else if rows.is_empty() {
                            tr {
                                td {
                                    colspan: "{span}",
                                    style: "{table_cell_style()} text-align: center; padding: 32px; color: #6b7280;",
                                    "No hay datos disponibles"
                                }
                            }
                        } else {
                            for (idx, row) in rows.iter().enumerate() {
                                tr {
                                    key: "{idx}",
                                    style: "cursor: {row_cursor};",
                                    onclick: {
                                        let row = row.clone();
                                        move |_| {
                                            if let Some(handler) = on_row_click {
                                                handler.call(row.clone());
                                            }
                                        }
                                    },
                                    for column in columns.iter() {
                                        td { style: "{table_cell_style()}", {(column.render)(row)} }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            if let Some(pagination) = pagination.filter(|p| p.shows_controls()) {
                PaginationBar { pagination, on_page_change }
            }
        }
    }
}

#[component]
fn PaginationBar(pagination: PaginationState, on_page_change: Option<EventHandler<u32>>) -> Element {
    let prev = pagination.prev();
    let next = pagination.next();
    let range = pagination.range_text();
    let page_text = pagination.page_text();
    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 16px; border-top: 1px solid #e5e7eb; font-size: 14px;",
            span { style: "color: #374151;", "{range}" }
            div { style: "display: flex; gap: 8px; align-items: center;",
                button {
                    style: "{button_style(ButtonKind::Secondary, prev.is_none())}",
                    disabled: prev.is_none(),
                    onclick: move |_| {
                        if let (Some(page), Some(handler)) = (prev, on_page_change) {
                            handler.call(page);
                        }
                    },
                    "‹"
                }
                span { style: "padding: 4px 12px; border: 1px solid #d1d5db; border-radius: 6px;", "{page_text}" }
                button {
                    style: "{button_style(ButtonKind::Secondary, next.is_none())}",
                    disabled: next.is_none(),
                    onclick: move |_| {
                        if let (Some(page), Some(handler)) = (next, on_page_change) {
                            handler.call(page);
                        }
                    },
                    "›"
                }
            }
        }
    }
}
