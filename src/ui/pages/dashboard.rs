use dioxus::prelude::*;
use serde_json::Value;

use crate::domain::charts::{error_distribution, operation_distribution};
use crate::domain::diff::js_string;
use crate::domain::entities::audit::{
    ChangeBreakdown, ErrorStats, LegalHoldRequest, OperationCounts, RetentionStats,
    TableChangeStat, UserChangeStat,
};
use crate::domain::entities::date_range::DateRange;
use crate::domain::format::format_number;
use crate::platform;
use crate::ui::components::{BarChart, ErrorBanner, PageHeader, StatCard, StatColor};
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::{
    button_style, card_style, grid_style, input_style, label_style, section_title_style,
    table_cell_style, table_header_cell_style, ButtonKind,
};
use crate::usecase::ports::api::ApiError;

#[derive(Debug, Clone, Default, PartialEq)]
struct Summary {
    operations: OperationCounts,
    errors: ErrorStats,
    top_users: Vec<UserChangeStat>,
    top_tables: Vec<TableChangeStat>,
}

async fn load_summary(api: ApiContext) -> Result<Summary, ApiError> {
    let params = DateRange::last_days(7).to_params();
    let (operations, errors, top_users, mut top_tables) = futures::try_join!(
        api.audit.data_stats_by_operation(params.clone()),
        api.audit.access_error_stats(params.clone()),
        api.audit.data_stats_by_user(params.clone().with("limit", "5")),
        api.audit.data_stats_by_table(params),
    )?;
    top_tables.truncate(5);
    Ok(Summary {
        operations,
        errors,
        top_users,
        top_tables,
    })
}

#[component]
pub fn Dashboard() -> Element {
    let api = use_context::<ApiContext>();
    let summary = use_query::<Summary>();

    let reload = {
        let api = api.clone();
        move || summary.run(load_summary(api.clone()))
    };
    use_effect({
        let reload = reload.clone();
        move || reload()
    });

    let state = summary.snapshot();
    let data = state.data.clone().unwrap_or_default();
    let changes = data.operations.total();
    let errors_total = data.errors.errors_4xx + data.errors.errors_5xx;
    let loading = state.is_loading();

    rsx! {
        PageHeader {
            title: "Panel Principal",
            subtitle: "Resumen de los últimos 7 días",
            actions: rsx! {
                button {
                    style: "{button_style(ButtonKind::Secondary, loading)}",
                    disabled: loading,
                    onclick: move |_| reload(),
                    if loading { "Cargando..." } else { "Actualizar" }
                }
            },
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| summary.dismiss_error() }
        div { style: "{grid_style(4)}",
            StatCard { title: "Total de Cambios", value: format_number(changes as f64), subtitle: "Modificaciones de datos", color: StatColor::Main }
            StatCard { title: "Registros de Acceso", value: format_number(errors_total as f64), subtitle: "Peticiones con error", color: StatColor::Accent }
            StatCard { title: "Errores 4xx", value: format_number(data.errors.errors_4xx as f64), subtitle: "Errores de cliente", color: StatColor::Yellow }
            StatCard { title: "Errores 5xx", value: format_number(data.errors.errors_5xx as f64), subtitle: "Errores de servidor", color: StatColor::Red }
        }
        div { style: "{grid_style(2)}",
            BarChart { title: "Distribución de Operaciones de Datos", data: operation_distribution(&data.operations) }
            BarChart { title: "Errores HTTP", data: error_distribution(&data.errors) }
        }
        div { style: "{grid_style(2)}",
            BreakdownTable {
                title: "Usuarios Más Activos",
                key_label: "Usuario",
                rows: data.top_users.iter().map(|user| (user.user_name.clone(), user.counts.clone())).collect::<Vec<_>>(),
            }
            BreakdownTable {
                title: "Tablas Más Modificadas",
                key_label: "Tabla",
                rows: data.top_tables.iter().map(|table| (table.table_name.clone(), table.counts.clone())).collect::<Vec<_>>(),
            }
        }
        RetentionPanel {}
    }
}

#[component]
fn BreakdownTable(title: String, key_label: String, rows: Vec<(String, ChangeBreakdown)>) -> Element {
    let header = table_header_cell_style();
    let cell = table_cell_style();
    rsx! {
        div { style: "{card_style()}",
            h3 { style: "{section_title_style()}", "{title}" }
            table { style: "width: 100%; border-collapse: collapse;",
                thead {
                    tr {
                        th { style: "{header}", "{key_label}" }
                        th { style: "{header}", "Cambios" }
                        th { style: "{header}", "Inserciones" }
                        th { style: "{header}", "Actualizaciones" }
                        th { style: "{header}", "Eliminaciones" }
                    }
                }
                tbody {
                    if rows.is_empty() {
                        tr { td { colspan: "5", style: "{cell} text-align: center; color: #6b7280;", "No hay datos disponibles" } }
                    }
                    for (idx, (name, counts)) in rows.iter().enumerate() {
                        tr { key: "{idx}",
                            td { style: "{cell} font-weight: 500;", "{name}" }
                            td { style: "{cell}", "{counts.total}" }
                            td { style: "{cell} color: #16a34a;", "{counts.inserts}" }
                            td { style: "{cell} color: #2563eb;", "{counts.updates}" }
                            td { style: "{cell} color: #dc2626;", "{counts.deletes}" }
                        }
                    }
                }
            }
        }
    }
}

/// Retention policy status, manual cleanup and legal holds.
#[component]
fn RetentionPanel() -> Element {
    let api = use_context::<ApiContext>();
    let stats = use_query::<RetentionStats>();
    let action = use_query::<Value>();
    let mut hold = use_signal(LegalHoldRequest::default);
    let notice = use_signal(|| None::<String>);

    let reload_stats = use_callback({
        let api = api.clone();
        move |_: ()| {
            let api = api.clone();
            stats.run(async move { api.audit.retention_stats().await })
        }
    });
    use_effect(move || reload_stats.call(()));

    let run_action = use_callback(move |kind: HoldAction| {
        let api = api.clone();
        let request = hold.peek().clone();
        let mut notice = notice;
        notice.set(None);
        action.run(async move {
            let result = match kind {
                HoldAction::Cleanup => api.audit.run_retention_cleanup().await,
                HoldAction::Apply => api.audit.apply_legal_hold(&request).await,
                HoldAction::Remove => api.audit.remove_legal_hold(&request).await,
            };
            if result.is_ok() {
                notice.set(Some(kind.done_message().to_string()));
                reload_stats.call(());
            }
            result
        });
    });

    let stats_state = stats.snapshot();
    let action_state = action.snapshot();
    let busy = action_state.is_loading();
    let entries: Vec<(String, String)> = stats_state
        .data
        .clone()
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, js_string(&value)))
        .collect();
    let form = hold.read().clone();

    rsx! {
        div { style: "{card_style()} margin-top: 16px;",
            h3 { style: "{section_title_style()}", "Retención de Datos" }
            ErrorBanner { message: stats_state.error.clone(), on_dismiss: move |_| stats.dismiss_error() }
            ErrorBanner { message: action_state.error.clone(), on_dismiss: move |_| action.dismiss_error() }
            if let Some(text) = notice() {
                p { style: "color: #166534; background: #f0fdf4; padding: 8px 12px; border-radius: 6px; font-size: 14px;", "{text}" }
            }
            if entries.is_empty() {
                p { style: "color: #6b7280; font-size: 14px;", "Sin estadísticas de retención" }
            }
            div { style: "display: grid; grid-template-columns: repeat(3, minmax(0, 1fr)); gap: 8px; margin-bottom: 16px;",
                for (key, value) in entries.iter() {
                    div { key: "{key}", style: "background: #f9fafb; border-radius: 6px; padding: 8px 10px;",
                        p { style: "font-size: 12px; color: #6b7280; margin: 0;", "{key}" }
                        p { style: "font-size: 15px; font-weight: 600; margin: 2px 0 0 0; word-break: break-all;", "{value}" }
                    }
                }
            }
            div { style: "display: grid; grid-template-columns: repeat(4, minmax(0, 1fr)); gap: 12px;",
                div {
                    label { style: "{label_style()}", "Sistema" }
                    input {
                        style: "{input_style()}",
                        value: "{form.system_id.clone().unwrap_or_default()}",
                        oninput: move |evt| hold.write().system_id = non_blank(evt.value()),
                    }
                }
                div {
                    label { style: "{label_style()}", "Tabla" }
                    input {
                        style: "{input_style()}",
                        value: "{form.table_name.clone().unwrap_or_default()}",
                        oninput: move |evt| hold.write().table_name = non_blank(evt.value()),
                    }
                }
                div {
                    label { style: "{label_style()}", "ID de Correlación" }
                    input {
                        style: "{input_style()}",
                        value: "{form.correlation_id.clone().unwrap_or_default()}",
                        oninput: move |evt| hold.write().correlation_id = non_blank(evt.value()),
                    }
                }
                div {
                    label { style: "{label_style()}", "Motivo" }
                    input {
                        style: "{input_style()}",
                        value: "{form.reason}",
                        oninput: move |evt| hold.write().reason = evt.value(),
                    }
                }
            }
            div { style: "display: flex; gap: 12px; margin-top: 12px;",
                button {
                    style: "{button_style(ButtonKind::Primary, busy)}",
                    disabled: busy,
                    onclick: move |_| run_action.call(HoldAction::Apply),
                    "Aplicar retención legal"
                }
                button {
                    style: "{button_style(ButtonKind::Secondary, busy)}",
                    disabled: busy,
                    onclick: move |_| run_action.call(HoldAction::Remove),
                    "Quitar retención legal"
                }
                button {
                    style: "{button_style(ButtonKind::Danger, busy)}",
                    disabled: busy,
                    onclick: move |_| {
                        if platform::confirm(
                            "Limpieza de retención",
                            "Se eliminarán los registros vencidos que no tengan retención legal. ¿Continuar?",
                        ) {
                            run_action.call(HoldAction::Cleanup);
                        }
                    },
                    "Ejecutar limpieza"
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoldAction {
    Apply,
    Remove,
    Cleanup,
}

impl HoldAction {
    fn done_message(self) -> &'static str {
        match self {
            HoldAction::Apply => "Retención legal aplicada",
            HoldAction::Remove => "Retención legal retirada",
            HoldAction::Cleanup => "Limpieza ejecutada",
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
