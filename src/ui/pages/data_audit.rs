use dioxus::prelude::*;

use crate::domain::entities::audit::{DataAuditRecord, Paged, RecordLocator};
use crate::domain::entities::filter::{FilterState, SubmittedSearch};
use crate::domain::entities::pagination::{PaginationState, DEFAULT_PAGE_LIMIT};
use crate::domain::format::{format_timestamp, operation_colors, or_dash};
use crate::router::Route;
use crate::ui::components::{Column, DataTable, ErrorBanner, FilterPanel, PageHeader};
use crate::ui::state::app_state::{ApiContext, AppState};
use crate::ui::state::query::use_query;
use crate::ui::styles::badge_style;

fn timestamp_cell(row: &DataAuditRecord) -> Element {
    rsx! { "{format_timestamp(&row.timestamp)}" }
}

fn operation_cell(row: &DataAuditRecord) -> Element {
    rsx! {
        span { style: "{badge_style(operation_colors(row.operation))}", "{row.operation.label()}" }
    }
}

fn system_cell(row: &DataAuditRecord) -> Element {
    rsx! { "{or_dash(row.system_id.as_deref())}" }
}

fn schema_cell(row: &DataAuditRecord) -> Element {
    rsx! { "{or_dash(row.schema_name.as_deref())}" }
}

fn table_cell(row: &DataAuditRecord) -> Element {
    rsx! { "{or_dash(row.table_name.as_deref())}" }
}

fn user_cell(row: &DataAuditRecord) -> Element {
    rsx! { "{or_dash(row.user_name.as_deref())}" }
}

fn changed_fields_cell(row: &DataAuditRecord) -> Element {
    let fields = if row.changed_fields.is_empty() {
        "-".to_string()
    } else {
        row.changed_fields.join(", ")
    };
    rsx! { "{fields}" }
}

/// Clicks bubble to the row handler, which opens the timeline.
fn timeline_cell(_row: &DataAuditRecord) -> Element {
    rsx! {
        button {
            style: "padding: 2px 10px; font-size: 13px; color: #2563eb; background: none; border: 1px solid #bfdbfe; border-radius: 4px; cursor: pointer;",
            title: "Ver línea de tiempo del registro",
            "Timeline"
        }
    }
}

fn columns() -> Vec<Column<DataAuditRecord>> {
    vec![
        Column::new("Fecha y Hora", timestamp_cell),
        Column::new("Operación", operation_cell),
        Column::new("Sistema", system_cell),
        Column::new("Esquema", schema_cell),
        Column::new("Tabla", table_cell),
        Column::new("Usuario", user_cell),
        Column::new("Campos Modificados", changed_fields_cell),
        Column::new("Acciones", timeline_cell),
    ]
}

#[component]
pub fn DataAudit() -> Element {
    let api = use_context::<ApiContext>();
    let app = use_context::<AppState>();
    let records = use_query::<Paged<DataAuditRecord>>();
    let filters = use_signal(FilterState::data_audit);
    let mut row_error = use_signal(|| None::<String>);

    let mut submitted = use_signal(SubmittedSearch::default);

    let load = use_callback(move |page: u32| {
        let params = submitted.peek().page(page, DEFAULT_PAGE_LIMIT);
        let api = api.clone();
        records.run(async move { api.audit.query_data(params).await });
    });
    let search = use_callback(move |_: ()| {
        let outcome = submitted.write().submit(&filters.peek());
        match outcome {
            Ok(()) => load.call(1),
            Err(err) => records.reject(err),
        }
    });
    use_effect(move || search.call(()));

    let open_timeline = move |row: DataAuditRecord| match RecordLocator::from_row(&row) {
        Ok(locator) => {
            row_error.set(None);
            let mut target = app.timeline_target;
            target.set(Some(locator));
            navigator().push(Route::RecordTimeline {});
        }
        Err(message) => {
            tracing::warn!(%message, "row has no usable record key");
            row_error.set(Some(format!("Error al obtener los datos del registro: {message}")));
        }
    };

    let state = records.snapshot();
    let pagination = state.data.as_ref().map(PaginationState::from_server);
    let rows = state.data.clone().map(|paged| paged.data).unwrap_or_default();

    rsx! {
        PageHeader { title: "Auditoría de Datos", subtitle: "Seguimiento y análisis de cambios en base de datos" }
        FilterPanel {
            filters,
            on_search: move |_| search.call(()),
            on_clear: move |_| {},
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| records.dismiss_error() }
        ErrorBanner { message: row_error(), on_dismiss: move |_| row_error.set(None) }
        DataTable {
            columns: columns(),
            rows,
            loading: state.is_loading(),
            pagination,
            on_page_change: move |page| load.call(page),
            on_row_click: open_timeline,
        }
    }
}
