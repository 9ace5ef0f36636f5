use chrono::Utc;
use dioxus::prelude::*;

use crate::domain::charts::{errors_by_status, series_color, BarDatum};
use crate::domain::entities::audit::{
    AccessEndpointStat, AccessGeoStats, AccessLogRecord, AccessUserStat, DataAuditRecord,
    ErrorStats, IpStat,
};
use crate::domain::entities::date_range::{to_local_input, DateRange};
use crate::domain::format::{
    format_millis, format_number, format_timestamp, method_colors, operation_colors, or_dash,
    status_colors,
};
use crate::ui::components::{BarChart, ErrorBanner, PageHeader, StatCard, StatColor};
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::{
    badge_style, button_style, card_style, grid_style, input_style, label_style,
    section_title_style, table_cell_style, table_header_cell_style, ButtonKind,
};
use crate::usecase::ports::api::ApiError;

const SLOW_REQUEST_MS: &str = "1000";

#[derive(Debug, Clone, Default, PartialEq)]
struct ForensicData {
    errors: ErrorStats,
    users: Vec<AccessUserStat>,
    endpoints: Vec<AccessEndpointStat>,
    slow: Vec<AccessLogRecord>,
    geo: AccessGeoStats,
    ips: Vec<IpStat>,
}

async fn load_forensics(api: ApiContext, start: String, end: String) -> Result<ForensicData, ApiError> {
    let range = DateRange::from_local_inputs(&start, &end).map_err(ApiError::InvalidInput)?;
    let params = range.to_params();
    let top = params.clone().with("limit", "10");
    let (errors, users, endpoints, slow, geo, ips) = futures::try_join!(
        api.audit.access_error_stats(params.clone()),
        api.audit.access_stats_by_user(top.clone()),
        api.audit.access_stats_by_endpoint(top.clone()),
        api.audit.slow_requests(top.clone().with("minDuration", SLOW_REQUEST_MS)),
        api.audit.access_geo_stats(params),
        api.audit.access_stats_by_ip(top),
    )?;
    Ok(ForensicData {
        errors,
        users,
        endpoints,
        slow,
        geo,
        ips,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupKind {
    Correlation,
    Session,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct TraceResult {
    changes: Vec<DataAuditRecord>,
    requests: Vec<AccessLogRecord>,
}

async fn trace(api: ApiContext, kind: LookupKind, id: String) -> Result<TraceResult, ApiError> {
    match kind {
        LookupKind::Correlation => {
            let (changes, requests) = futures::try_join!(
                api.audit.data_by_correlation(&id),
                api.audit.access_by_correlation(&id),
            )?;
            Ok(TraceResult { changes, requests })
        }
        LookupKind::Session => Ok(TraceResult {
            changes: Vec::new(),
            requests: api.audit.access_by_session(&id).await?,
        }),
    }
}

#[component]
pub fn ForensicAnalysis() -> Element {
    let api = use_context::<ApiContext>();
    let forensics = use_query::<ForensicData>();
    let mut start = use_signal(|| to_local_input(Utc::now() - chrono::Duration::days(7)));
    let mut end = use_signal(|| to_local_input(Utc::now()));

    let load = use_callback(move |_: ()| {
        forensics.run(load_forensics(api.clone(), start.peek().clone(), end.peek().clone()));
    });
    use_effect(move || load.call(()));

    let state = forensics.snapshot();
    let data = state.data.clone().unwrap_or_default();
    let loading = state.is_loading();
    let countries: Vec<BarDatum> = data
        .geo
        .by_country
        .iter()
        .take(6)
        .enumerate()
        .map(|(idx, row)| {
            BarDatum::new(
                row.country.clone().unwrap_or_else(|| "Desconocido".to_string()),
                row.count as f64,
                series_color(idx),
            )
        })
        .collect();
    let cities: Vec<BarDatum> = data
        .geo
        .by_city
        .iter()
        .take(6)
        .enumerate()
        .map(|(idx, row)| {
            let city = row.city.clone().unwrap_or_else(|| "Desconocido".to_string());
            let label = match row.country.as_deref() {
                Some(country) => format!("{city}, {country}"),
                None => city,
            };
            BarDatum::new(label, row.count as f64, series_color(idx))
        })
        .collect();
    let header = table_header_cell_style();
    let cell = table_cell_style();

    rsx! {
        PageHeader { title: "Análisis Forense", subtitle: "Análisis avanzado de seguridad y rendimiento" }
        div { style: "{card_style()} margin-bottom: 16px;",
            h3 { style: "{section_title_style()}", "Rango de Tiempo" }
            div { style: "display: grid; grid-template-columns: repeat(3, minmax(0, 1fr)); gap: 12px; align-items: end;",
                div {
                    label { style: "{label_style()}", "Fecha Inicio" }
                    input { r#type: "datetime-local", style: "{input_style()}", value: "{start}", oninput: move |evt| start.set(evt.value()) }
                }
                div {
                    label { style: "{label_style()}", "Fecha Fin" }
                    input { r#type: "datetime-local", style: "{input_style()}", value: "{end}", oninput: move |evt| end.set(evt.value()) }
                }
                button {
                    style: "{button_style(ButtonKind::Primary, loading)}",
                    disabled: loading,
                    onclick: move |_| load.call(()),
                    if loading { "Cargando..." } else { "Analizar" }
                }
            }
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| forensics.dismiss_error() }
        div { style: "{grid_style(4)}",
            StatCard { title: "Errores 4xx", value: format_number(data.errors.errors_4xx as f64), subtitle: "Errores de cliente", color: StatColor::Yellow }
            StatCard { title: "Errores 5xx", value: format_number(data.errors.errors_5xx as f64), subtitle: "Errores de servidor", color: StatColor::Red }
            StatCard { title: "Usuarios Activos", value: format_number(data.users.len() as f64), subtitle: "Usuarios únicos", color: StatColor::Main }
            StatCard { title: "Países", value: format_number(data.geo.by_country.len() as f64), subtitle: "Distribución geográfica", color: StatColor::Accent }
        }
        div { style: "{grid_style(2)}",
            BarChart { title: "Distribución de Errores por Código de Estado", data: errors_by_status(&data.errors) }
            BarChart { title: "Principales Países por Acceso", data: countries }
        }
        div { style: "margin-bottom: 16px;",
            BarChart { title: "Principales Ciudades por Acceso", data: cities }
        }
        div { style: "{grid_style(2)}",
            div { style: "{card_style()}",
                h3 { style: "{section_title_style()}", "Usuarios Más Activos" }
                table { style: "width: 100%; border-collapse: collapse;",
                    thead { tr {
                        th { style: "{header}", "Usuario" }
                        th { style: "{header}", "Peticiones" }
                        th { style: "{header}", "Errores" }
                        th { style: "{header}", "Duración Promedio" }
                    } }
                    tbody {
                        for (idx, user) in data.users.iter().enumerate() {
                            tr { key: "{idx}",
                                td { style: "{cell} font-weight: 500;", "{user.user_name}" }
                                td { style: "{cell}", "{user.total_requests}" }
                                td { style: "{cell} color: #dc2626;", "{user.errors}" }
                                td { style: "{cell}", "{format_millis(user.avg_duration.unwrap_or_default())}" }
                            }
                        }
                    }
                }
            }
            div { style: "{card_style()}",
                h3 { style: "{section_title_style()}", "Endpoints Más Utilizados" }
                table { style: "width: 100%; border-collapse: collapse;",
                    thead { tr {
                        th { style: "{header}", "Método" }
                        th { style: "{header}", "Endpoint" }
                        th { style: "{header}", "Cantidad" }
                        th { style: "{header}", "Errores" }
                    } }
                    tbody {
                        for (idx, endpoint) in data.endpoints.iter().enumerate() {
                            {
                                let method = endpoint.method.clone().unwrap_or_default();
                                rsx! {
                                    tr { key: "{idx}",
                                        td { style: "{cell}", span { style: "{badge_style(method_colors(&method))}", "{method}" } }
                                        td { style: "{cell} font-family: monospace; font-size: 12px;", "{endpoint.endpoint}" }
                                        td { style: "{cell}", "{endpoint.count}" }
                                        td { style: "{cell} color: #dc2626;", "{endpoint.errors}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        div { style: "{card_style()} margin-bottom: 16px;",
            h3 { style: "{section_title_style()}", "Peticiones Más Lentas (más de 1 segundo)" }
            AccessRows { rows: data.slow.clone() }
        }
        div { style: "{card_style()} margin-bottom: 16px;",
            h3 { style: "{section_title_style()}", "Direcciones IP Más Activas" }
            table { style: "width: 100%; border-collapse: collapse;",
                thead { tr {
                    th { style: "{header}", "Dirección IP" }
                    th { style: "{header}", "Peticiones" }
                    th { style: "{header}", "Usuarios Únicos" }
                    th { style: "{header}", "Errores" }
                } }
                tbody {
                    for ip in data.ips.iter() {
                        tr { key: "{ip.ip_address}",
                            td { style: "{cell} font-family: monospace;", "{ip.ip_address}" }
                            td { style: "{cell}", "{ip.requests}" }
                            td { style: "{cell}", "{ip.unique_users}" }
                            td { style: "{cell} color: #dc2626;", "{ip.errors}" }
                        }
                    }
                }
            }
        }
        TraceLookup {}
    }
}

#[component]
fn AccessRows(rows: Vec<AccessLogRecord>) -> Element {
    let header = table_header_cell_style();
    let cell = table_cell_style();
    if rows.is_empty() {
        return rsx! {
            p { style: "color: #6b7280; text-align: center;", "No hay datos disponibles" }
        };
    }
    rsx! {
        table { style: "width: 100%; border-collapse: collapse;",
            thead { tr {
                th { style: "{header}", "Fecha y Hora" }
                th { style: "{header}", "Método" }
                th { style: "{header}", "Ruta" }
                th { style: "{header}", "Usuario" }
                th { style: "{header}", "Duración" }
                th { style: "{header}", "Estado" }
            } }
            tbody {
                for (idx, req) in rows.iter().enumerate() {
                    {
                        let method = req.request_method.clone().unwrap_or_default();
                        let status = req.response_status.unwrap_or_default();
                        rsx! {
                            tr { key: "{idx}",
                                td { style: "{cell}", "{format_timestamp(&req.timestamp)}" }
                                td { style: "{cell}", span { style: "{badge_style(method_colors(&method))}", "{method}" } }
                                td { style: "{cell} font-family: monospace; font-size: 12px;", "{or_dash(req.request_path.as_deref())}" }
                                td { style: "{cell}", "{or_dash(req.user_name.as_deref())}" }
                                td { style: "{cell} color: #dc2626; font-weight: 500;", "{format_millis(req.duration_ms.unwrap_or_default())}" }
                                td { style: "{cell}", span { style: "{badge_style(status_colors(status))}", "{status}" } }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Follows one correlation id (or session id) across both logs.
#[component]
fn TraceLookup() -> Element {
    let api = use_context::<ApiContext>();
    let result = use_query::<TraceResult>();
    let mut kind = use_signal(|| LookupKind::Correlation);
    let mut id = use_signal(String::new);

    let search = move |_| {
        let api = api.clone();
        let value = id.peek().trim().to_string();
        result.run(trace(api, *kind.peek(), value));
    };

    let state = result.snapshot();
    let found = state.data.clone();
    let loading = state.is_loading();
    let header = table_header_cell_style();
    let cell = table_cell_style();

    rsx! {
        div { style: "{card_style()}",
            h3 { style: "{section_title_style()}", "Rastreo de Peticiones" }
            div { style: "display: grid; grid-template-columns: 180px 1fr 160px; gap: 12px; align-items: end;",
                div {
                    label { style: "{label_style()}", "Buscar por" }
                    select {
                        style: "{input_style()}",
                        onchange: move |evt| {
                            kind.set(if evt.value() == "session" { LookupKind::Session } else { LookupKind::Correlation });
                        },
                        option { value: "correlation", selected: kind() == LookupKind::Correlation, "ID de Correlación" }
                        option { value: "session", selected: kind() == LookupKind::Session, "ID de Sesión" }
                    }
                }
                div {
                    label { style: "{label_style()}", "Identificador" }
                    input { style: "{input_style()}", value: "{id}", oninput: move |evt| id.set(evt.value()) }
                }
                button {
                    style: "{button_style(ButtonKind::Primary, loading)}",
                    disabled: loading,
                    onclick: search,
                    if loading { "Buscando..." } else { "Rastrear" }
                }
            }
            ErrorBanner { message: state.error.clone(), on_dismiss: move |_| result.dismiss_error() }
            if let Some(found) = found {
                if !found.changes.is_empty() {
                    h4 { style: "margin: 16px 0 8px 0;", "Cambios de datos ({found.changes.len()})" }
                    table { style: "width: 100%; border-collapse: collapse;",
                        thead { tr {
                            th { style: "{header}", "Fecha y Hora" }
                            th { style: "{header}", "Operación" }
                            th { style: "{header}", "Tabla" }
                            th { style: "{header}", "Usuario" }
                        } }
                        tbody {
                            for (idx, change) in found.changes.iter().enumerate() {
                                tr { key: "{idx}",
                                    td { style: "{cell}", "{format_timestamp(&change.timestamp)}" }
                                    td { style: "{cell}", span { style: "{badge_style(operation_colors(change.operation))}", "{change.operation.label()}" } }
                                    td { style: "{cell}", "{or_dash(change.table_name.as_deref())}" }
                                    td { style: "{cell}", "{or_dash(change.user_name.as_deref())}" }
                                }
                            }
                        }
                    }
                }
                h4 { style: "margin: 16px 0 8px 0;", "Peticiones ({found.requests.len()})" }
                AccessRows { rows: found.requests.clone() }
            }
        }
    }
}
