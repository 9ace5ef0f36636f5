use chrono::Utc;
use dioxus::prelude::*;

use crate::domain::charts::{
    access_endpoint_share, data_endpoint_rows, share, EndpointSummary, TimelinePivot,
};
use crate::domain::entities::audit::{AccessEndpointStat, DataEndpointStat, EndpointTimelinePoint};
use crate::domain::entities::date_range::{to_local_input, DateRange};
use crate::domain::format::{format_number, method_colors};
use crate::ui::components::{ErrorBanner, PageHeader, SeriesChart, StatCard, StatColor};
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::{
    badge_style, bar_track_style, button_style, card_style, grid_style, input_style, label_style,
    section_title_style, table_cell_style, table_header_cell_style, ButtonKind,
};
use crate::usecase::ports::api::ApiError;

#[derive(Debug, Clone, Default, PartialEq)]
struct EndpointData {
    data: Vec<DataEndpointStat>,
    access: Vec<AccessEndpointStat>,
    timeline: Vec<EndpointTimelinePoint>,
}

#[derive(Debug, Clone, PartialEq)]
struct RangeForm {
    start: String,
    end: String,
    interval: &'static str,
}

impl Default for RangeForm {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            start: to_local_input(now - chrono::Duration::days(7)),
            end: to_local_input(now),
            interval: "hour",
        }
    }
}

async fn load_endpoints(api: ApiContext, form: RangeForm) -> Result<EndpointData, ApiError> {
    let range = DateRange::from_local_inputs(&form.start, &form.end).map_err(ApiError::InvalidInput)?;
    let params = range.to_params();
    let (data, access, timeline) = futures::try_join!(
        api.audit.data_stats_by_endpoint(params.clone().with("limit", "10")),
        api.audit.access_stats_by_endpoint(params.clone().with("limit", "10")),
        api.audit.endpoint_timeline(params.with("interval", form.interval)),
    )?;
    Ok(EndpointData {
        data,
        access,
        timeline,
    })
}

#[component]
pub fn EndpointAnalytics() -> Element {
    let api = use_context::<ApiContext>();
    let endpoints = use_query::<EndpointData>();
    let mut form = use_signal(RangeForm::default);

    let load = use_callback(move |_: ()| {
        let api = api.clone();
        let form = form.peek().clone();
        endpoints.run(load_endpoints(api, form));
    });
    use_effect(move || load.call(()));

    let state = endpoints.snapshot();
    let data = state.data.clone().unwrap_or_default();
    let loading = state.is_loading();
    let summary = EndpointSummary::compute(&data.data, &data.access);
    let pivot = TimelinePivot::build(&data.timeline, &data.access, 5);
    let share_data = access_endpoint_share(&data.access);
    let current = form.read().clone();

    rsx! {
        PageHeader { title: "Análisis de Endpoints", subtitle: "Análisis completo de uso de endpoints" }
        div { style: "{card_style()} margin-bottom: 16px;",
            h3 { style: "{section_title_style()}", "Rango de Tiempo" }
            div { style: "display: grid; grid-template-columns: repeat(4, minmax(0, 1fr)); gap: 12px; align-items: end;",
                div {
                    label { style: "{label_style()}", "Fecha Inicio" }
                    input {
                        r#type: "datetime-local",
                        style: "{input_style()}",
                        value: "{current.start}",
                        oninput: move |evt| form.write().start = evt.value(),
                    }
                }
                div {
                    label { style: "{label_style()}", "Fecha Fin" }
                    input {
                        r#type: "datetime-local",
                        style: "{input_style()}",
                        value: "{current.end}",
                        oninput: move |evt| form.write().end = evt.value(),
                    }
                }
                div {
                    label { style: "{label_style()}", "Intervalo" }
                    select {
                        style: "{input_style()}",
                        value: "{current.interval}",
                        onchange: move |evt| {
                            form.write().interval = if evt.value() == "day" { "day" } else { "hour" };
                        },
                        option { value: "hour", selected: current.interval == "hour", "Por Hora" }
                        option { value: "day", selected: current.interval == "day", "Diario" }
                    }
                }
                button {
                    style: "{button_style(ButtonKind::Primary, loading)}",
                    disabled: loading,
                    onclick: move |_| load.call(()),
                    if loading { "Cargando..." } else { "Aplicar Filtro" }
                }
            }
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| endpoints.dismiss_error() }
        div { style: "{grid_style(4)}",
            StatCard { title: "Total de Peticiones de Acceso", value: format_number(summary.total_requests as f64), subtitle: "Llamadas API", color: StatColor::Main }
            StatCard { title: "Modificaciones de Datos", value: format_number(summary.total_changes as f64), subtitle: "Cambios en base de datos", color: StatColor::Accent }
            StatCard { title: "Tiempo de Respuesta Promedio", value: format!("{}ms", summary.avg_response_time.round()), subtitle: "Duración promedio", color: StatColor::Yellow }
            StatCard { title: "Total de Errores", value: format_number(summary.total_errors as f64), subtitle: "Peticiones fallidas", color: StatColor::Red }
        }
        div { style: "{grid_style(2)}",
            StackedEndpoints { data: data.data.clone() }
            div { style: "{card_style()}",
                h3 { style: "{section_title_style()}", "Principales Endpoints por Peticiones de Acceso" }
                for (idx, datum) in share_data.iter().enumerate() {
                    div { key: "{idx}", style: "display: flex; align-items: center; gap: 8px; font-size: 13px; margin-bottom: 8px;",
                        span { style: "width: 12px; height: 12px; border-radius: 2px; background: {datum.color};" }
                        span { style: "flex: 1;", "{datum.label}" }
                        span { style: "font-weight: 600;", "{share(&share_data, idx):.0}%" }
                    }
                }
                if share_data.is_empty() {
                    p { style: "color: #6b7280; text-align: center;", "No hay datos disponibles" }
                }
            }
        }
        div { style: "margin-bottom: 16px;",
            SeriesChart { title: "Uso de Endpoints en el Tiempo", labels: pivot.labels(), series: pivot.line_series() }
        }
        div { style: "{grid_style(2)}",
            DataEndpointTable { rows: data.data.clone() }
            AccessEndpointTable { rows: data.access.clone() }
        }
    }
}

#[component]
fn StackedEndpoints(data: Vec<DataEndpointStat>) -> Element {
    let rows = data_endpoint_rows(&data);
    let max = rows
        .iter()
        .map(|(_, parts)| parts.iter().map(|part| part.value).sum::<f64>())
        .fold(0.0, f64::max);
    rsx! {
        div { style: "{card_style()}",
            h3 { style: "{section_title_style()}", "Principales Endpoints por Cambios de Datos" }
            if rows.is_empty() {
                p { style: "color: #6b7280; text-align: center;", "No hay datos disponibles" }
            }
            for (idx, (label, parts)) in rows.iter().enumerate() {
                div { key: "{idx}", style: "margin-bottom: 10px;",
                    p { style: "font-size: 13px; margin: 0 0 4px 0;", "{label}" }
                    div { style: "{bar_track_style(14)} display: flex;",
                        for part in parts.iter() {
                            div {
                                title: "{part.label}: {part.value}",
                                style: "height: 100%; width: {width_of(part.value, max):.1}%; background: {part.color};",
                            }
                        }
                    }
                }
            }
            div { style: "display: flex; gap: 12px; font-size: 12px; margin-top: 8px;",
                for (label, color) in [("Inserts", "#10b981"), ("Updates", "#3b82f6"), ("Deletes", "#ef4444")] {
                    span { style: "display: inline-flex; align-items: center; gap: 4px;",
                        span { style: "width: 10px; height: 10px; background: {color};" }
                        "{label}"
                    }
                }
            }
        }
    }
}

fn width_of(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max * 100.0
    } else {
        0.0
    }
}

#[component]
fn DataEndpointTable(rows: Vec<DataEndpointStat>) -> Element {
    let header = table_header_cell_style();
    let cell = table_cell_style();
    rsx! {
        div { style: "{card_style()}",
            h3 { style: "{section_title_style()}", "Endpoints de Cambios de Datos" }
            table { style: "width: 100%; border-collapse: collapse;",
                thead {
                    tr {
                        th { style: "{header}", "Endpoint" }
                        th { style: "{header}", "Total" }
                        th { style: "{header}", "INS" }
                        th { style: "{header}", "ACT" }
                        th { style: "{header}", "ELI" }
                    }
                }
                tbody {
                    for (idx, row) in rows.iter().enumerate() {
                        tr { key: "{idx}",
                            td { style: "{cell} font-family: monospace; font-size: 12px; max-width: 260px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;", title: "{row.endpoint}", "{row.endpoint}" }
                            td { style: "{cell} font-weight: 600;", "{row.counts.total}" }
                            td { style: "{cell} color: #16a34a;", "{row.counts.inserts}" }
                            td { style: "{cell} color: #2563eb;", "{row.counts.updates}" }
                            td { style: "{cell} color: #dc2626;", "{row.counts.deletes}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AccessEndpointTable(rows: Vec<AccessEndpointStat>) -> Element {
    let header = table_header_cell_style();
    let cell = table_cell_style();
    rsx! {
        div { style: "{card_style()}",
            h3 { style: "{section_title_style()}", "Endpoints de Acceso" }
            table { style: "width: 100%; border-collapse: collapse;",
                thead {
                    tr {
                        th { style: "{header}", "Método" }
                        th { style: "{header}", "Endpoint" }
                        th { style: "{header}", "Peticiones" }
                        th { style: "{header}", "Errores" }
                        th { style: "{header}", "Tiempo Promedio" }
                    }
                }
                tbody {
                    for (idx, row) in rows.iter().enumerate() {
                        {
                            let method = row.method.clone().unwrap_or_default();
                            let error_color = if row.errors > 0 { "#dc2626" } else { "#16a34a" };
                            rsx! {
                                tr { key: "{idx}",
                                    td { style: "{cell}", span { style: "{badge_style(method_colors(&method))}", "{method}" } }
                                    td { style: "{cell} font-family: monospace; font-size: 12px; max-width: 220px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;", title: "{row.endpoint}", "{row.endpoint}" }
                                    td { style: "{cell}", "{row.count}" }
                                    td { style: "{cell} color: {error_color};", "{row.errors}" }
                                    td { style: "{cell}", "{row.avg_duration.round()}ms" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
