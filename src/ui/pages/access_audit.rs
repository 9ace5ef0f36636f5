use dioxus::prelude::*;

use crate::domain::entities::audit::{AccessLogRecord, Paged};
use crate::domain::entities::filter::{FilterState, SubmittedSearch};
use crate::domain::entities::pagination::{PaginationState, DEFAULT_PAGE_LIMIT};
use crate::domain::format::{format_timestamp, method_colors, or_dash, status_colors};
use crate::ui::components::{Column, DataTable, ErrorBanner, FilterPanel, PageHeader};
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::badge_style;

fn timestamp_cell(row: &AccessLogRecord) -> Element {
    rsx! { "{format_timestamp(&row.timestamp)}" }
}

fn method_cell(row: &AccessLogRecord) -> Element {
    let method = row.request_method.clone().unwrap_or_default();
    rsx! {
        span { style: "{badge_style(method_colors(&method))}", "{method}" }
    }
}

fn path_cell(row: &AccessLogRecord) -> Element {
    rsx! {
        span { style: "font-family: monospace; font-size: 13px;", "{or_dash(row.request_path.as_deref())}" }
    }
}

fn status_cell(row: &AccessLogRecord) -> Element {
    match row.response_status {
        Some(status) => rsx! {
            span { style: "{badge_style(status_colors(status))}", "{status}" }
        },
        None => rsx! { "-" },
    }
}

fn user_cell(row: &AccessLogRecord) -> Element {
    rsx! { "{or_dash(row.user_name.as_deref())}" }
}

fn ip_cell(row: &AccessLogRecord) -> Element {
    rsx! { "{or_dash(row.ip_address.as_deref())}" }
}

fn duration_cell(row: &AccessLogRecord) -> Element {
    match row.duration_ms.filter(|ms| *ms > 0.0) {
        Some(ms) => rsx! { "{ms}ms" },
        None => rsx! { "-" },
    }
}

fn columns() -> Vec<Column<AccessLogRecord>> {
    vec![
        Column::new("Fecha y Hora", timestamp_cell),
        Column::new("Método", method_cell),
        Column::new("Ruta", path_cell),
        Column::new("Estado", status_cell),
        Column::new("Usuario", user_cell),
        Column::new("Dirección IP", ip_cell),
        Column::new("Duración", duration_cell),
    ]
}

#[component]
pub fn AccessAudit() -> Element {
    let api = use_context::<ApiContext>();
    let records = use_query::<Paged<AccessLogRecord>>();
    let filters = use_signal(FilterState::access_audit);

    let mut submitted = use_signal(SubmittedSearch::default);

    let load = use_callback(move |page: u32| {
        let params = submitted.peek().page(page, DEFAULT_PAGE_LIMIT);
        let api = api.clone();
        records.run(async move { api.audit.query_access(params).await });
    });
    let search = use_callback(move |_: ()| {
        let outcome = submitted.write().submit(&filters.peek());
        match outcome {
            Ok(()) => load.call(1),
            Err(err) => records.reject(err),
        }
    });
    use_effect(move || search.call(()));

    let state = records.snapshot();
    let pagination = state.data.as_ref().map(PaginationState::from_server);
    let rows = state.data.clone().map(|paged| paged.data).unwrap_or_default();

    rsx! {
        PageHeader { title: "Auditoría de Acceso", subtitle: "Seguimiento de accesos de usuarios y peticiones API" }
        FilterPanel {
            filters,
            on_search: move |_| search.call(()),
            on_clear: move |_| {},
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| records.dismiss_error() }
        DataTable {
            columns: columns(),
            rows,
            loading: state.is_loading(),
            pagination,
            on_page_change: move |page| load.call(page),
        }
    }
}
