use dioxus::prelude::*;

use crate::domain::charts::{series_color, BarDatum, LineSeries};
use crate::domain::diff::js_string;
use crate::domain::entities::analytics::{
    ActivePeriod, ActiveUserSummary, EventPage, NotificationsDashboard, OverviewDashboard,
    TimeSeries, UserEvent,
};
use crate::domain::entities::date_range::DateRange;
use crate::domain::entities::filter::{facets_from_options, DimensionFilterState, FacetOptions};
use crate::domain::format::{
    format_date, format_number, format_time, format_timestamp, or_dash, ValueFormat,
};
use crate::ui::components::{
    BarChart, Column, DataTable, DimensionFilter, ErrorBanner, MetricCard, SeriesChart, StatColor,
};
use crate::ui::pages::analytics::{default_range, use_auto_refresh, RangeHeader};
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::{card_style, grid_style, section_title_style, ACCENT, PRIMARY};
use crate::usecase::ports::api::ApiError;
use crate::usecase::services::refresh::RefreshSchedule;

#[derive(Debug, Clone, Default, PartialEq)]
struct Overview {
    dashboard: OverviewDashboard,
    active: ActiveUserSummary,
    series: TimeSeries,
    recent: EventPage,
    notifications: NotificationsDashboard,
}

const RECENT_EVENTS: u32 = 10;

async fn load_overview(
    api: ApiContext,
    range: DateRange,
    dimensions: DimensionFilterState,
) -> Result<Overview, ApiError> {
    let mut params = range.to_params();
    dimensions.apply_to(&mut params);
    let analytics = &api.analytics;
    let recent_params = params
        .clone()
        .with("page", "1")
        .with("limit", RECENT_EVENTS.to_string());
    let (dashboard, dau, wau, mau, series, recent, notifications) = futures::try_join!(
        analytics.dashboard_overview(params.clone()),
        analytics.active_users(ActivePeriod::Daily, params.clone()),
        analytics.active_users(ActivePeriod::Weekly, params.clone()),
        analytics.active_users(ActivePeriod::Monthly, params.clone()),
        analytics.timeseries(params.clone().with("interval", "day")),
        analytics.query_events(recent_params),
        analytics.dashboard_notifications(params),
    )?;
    Ok(Overview {
        dashboard,
        active: ActiveUserSummary {
            dau: dau.active_users,
            wau: wau.active_users,
            mau: mau.active_users,
        },
        series,
        recent,
        notifications,
    })
}

/// Scalar entries of the notifications dashboard, in key order.
fn notification_rows(dashboard: &NotificationsDashboard) -> Vec<(String, String)> {
    dashboard
        .iter()
        .filter(|(_, value)| !value.is_object() && !value.is_array())
        .map(|(key, value)| match value.as_f64() {
            Some(number) => (key.clone(), format_number(number)),
            None => (key.clone(), js_string(value)),
        })
        .collect()
}

fn recent_time_cell(row: &UserEvent) -> Element {
    rsx! { "{format_timestamp(&row.timestamp)}" }
}

fn recent_type_cell(row: &UserEvent) -> Element {
    rsx! { "{or_dash(row.event_type.as_deref())}" }
}

fn recent_name_cell(row: &UserEvent) -> Element {
    rsx! { span { style: "font-weight: 500;", "{or_dash(row.event_name.as_deref())}" } }
}

fn recent_session_cell(row: &UserEvent) -> Element {
    rsx! { span { style: "font-family: monospace; font-size: 12px;", "{or_dash(row.session_id.as_deref())}" } }
}

fn recent_columns() -> Vec<Column<UserEvent>> {
    vec![
        Column::new("Fecha y Hora", recent_time_cell),
        Column::new("Tipo", recent_type_cell),
        Column::new("Evento", recent_name_cell),
        Column::new("Sesión", recent_session_cell),
    ]
}

#[derive(Debug, Clone, PartialEq)]
struct EventShare {
    name: String,
    count: u64,
    share: f64,
}

fn event_shares(dashboard: &OverviewDashboard) -> Vec<EventShare> {
    let total = dashboard.total_events;
    dashboard
        .top_events
        .iter()
        .map(|event| EventShare {
            name: event.name.clone(),
            count: event.count,
            share: if total > 0 {
                event.count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

fn event_name_cell(row: &EventShare) -> Element {
    rsx! { span { style: "font-weight: 500;", "{row.name}" } }
}

fn event_count_cell(row: &EventShare) -> Element {
    rsx! { "{format_number(row.count as f64)}" }
}

fn event_share_cell(row: &EventShare) -> Element {
    rsx! { "{row.share:.1}%" }
}

fn event_columns() -> Vec<Column<EventShare>> {
    vec![
        Column::new("Evento", event_name_cell),
        Column::new("Cantidad", event_count_cell),
        Column::new("% del Total", event_share_cell),
    ]
}

#[component]
pub fn AnalyticsOverview() -> Element {
    let api = use_context::<ApiContext>();
    let overview = use_query::<Overview>();
    let filters = use_query::<Vec<FacetOptions>>();
    let range = use_signal(default_range);
    let mut dimensions = use_signal(DimensionFilterState::default);
    let period = api.config.refresh_interval;
    let mut schedule = use_signal(move || RefreshSchedule::new(period));

    use_effect({
        let api = api.clone();
        move || {
            let api = api.clone();
            filters.run(async move {
                match api.analytics.filter_options().await {
                    Ok(options) => Ok(facets_from_options(&options)),
                    Err(err) => {
                        tracing::warn!(error = %err, "filter options unavailable");
                        Ok(Vec::new())
                    }
                }
            })
        }
    });

    let load = use_callback(move |_: ()| {
        overview.run(load_overview(
            api.clone(),
            range.peek().clone(),
            dimensions.peek().clone(),
        ));
    });
    use_effect(move || {
        range.read();
        dimensions.read();
        load.call(());
    });
    use_auto_refresh(schedule, load);

    let state = overview.snapshot();
    let data = state.data.clone().unwrap_or_default();
    let loading = state.is_loading();
    let facets = filters.snapshot();
    let current_dimensions = dimensions();
    let auto = schedule();

    let event_types: Vec<BarDatum> = data
        .dashboard
        .event_type_counts
        .iter()
        .enumerate()
        .map(|(idx, (name, count))| {
            BarDatum::new(name.replacen('_', " ", 1), *count as f64, series_color(idx))
        })
        .collect();
    let top_events: Vec<BarDatum> = data
        .dashboard
        .top_events
        .iter()
        .take(8)
        .map(|event| BarDatum::new(event.name.clone(), event.count as f64, PRIMARY))
        .collect();
    let labels: Vec<String> = data.series.timeline.iter().map(|point| format_date(&point.time)).collect();
    let series = vec![
        LineSeries {
            name: "Usuarios".to_string(),
            color: PRIMARY,
            values: data.series.timeline.iter().map(|point| point.users as f64).collect(),
        },
        LineSeries {
            name: "Eventos".to_string(),
            color: ACCENT,
            values: data.series.timeline.iter().map(|point| point.events as f64).collect(),
        },
    ];
    let shares = event_shares(&data.dashboard);
    let notices = notification_rows(&data.notifications);

    rsx! {
        RangeHeader {
            title: "Analytics Overview",
            subtitle: "Visión general del comportamiento de usuarios y eventos",
            range,
            loading,
            on_refresh: move |_| load.call(()),
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| overview.dismiss_error() }
        div { style: "margin-bottom: 16px;",
            {match facets.data.as_ref() {
                None => rsx! { p { style: "font-size: 13px; color: #6b7280;", "Cargando filtros..." } },
                Some(list) if list.is_empty() => rsx! {
                    p { style: "font-size: 13px; color: #6b7280;",
                        "No hay filtros disponibles. Los filtros aparecerán cuando haya datos de eventos."
                    }
                },
                Some(list) => rsx! {
                    DimensionFilter {
                        facets: list.clone(),
                        value: current_dimensions,
                        on_change: move |next| dimensions.set(next),
                    }
                },
            }}
        }
        if let Some(updated) = state.last_updated {
            div { style: "display: flex; justify-content: space-between; font-size: 13px; color: #6b7280; margin-bottom: 16px;",
                span { "Última actualización: {format_time(updated)}" }
                label { style: "display: flex; align-items: center; gap: 6px; cursor: pointer;",
                    input {
                        r#type: "checkbox",
                        checked: auto.enabled,
                        onchange: move |_| schedule.write().toggle(),
                    }
                    "{auto.label()}"
                }
            }
        }
        div { style: "{grid_style(3)}",
            MetricCard { title: "Usuarios Activos Hoy (DAU)", value: data.active.dau as f64, loading }
            MetricCard { title: "Usuarios Activos Semana (WAU)", value: data.active.wau as f64, color: StatColor::Accent, loading }
            MetricCard { title: "Usuarios Activos Mes (MAU)", value: data.active.mau as f64, color: StatColor::Dark, loading }
        }
        div { style: "{grid_style(4)}",
            MetricCard { title: "Total Eventos", value: data.dashboard.total_events as f64, loading }
            MetricCard { title: "Usuarios Únicos", value: data.dashboard.unique_users as f64, color: StatColor::Accent, loading }
            MetricCard { title: "Sesiones", value: data.dashboard.unique_sessions as f64, color: StatColor::Green, loading }
            MetricCard {
                title: "Tiempo Promedio Sesión",
                value: data.dashboard.avg_session_duration,
                format: ValueFormat::Duration,
                color: StatColor::Dark,
                loading,
            }
        }
        div { style: "{grid_style(2)}",
            SeriesChart { title: "Actividad en el Tiempo", labels, series }
            BarChart { title: "Eventos por Tipo", data: event_types }
        }
        div { style: "margin-bottom: 16px;",
            BarChart { title: "Eventos Más Frecuentes", data: top_events }
        }
        h3 { style: "{section_title_style()}", "Detalle de Eventos" }
        DataTable { columns: event_columns(), rows: shares, loading }
        if !notices.is_empty() {
            div { style: "{card_style()} margin: 16px 0;",
                h3 { style: "{section_title_style()}", "Notificaciones" }
                for (key, value) in notices {
                    div { key: "{key}", style: "display: flex; justify-content: space-between; font-size: 14px; padding: 4px 0;",
                        span { style: "color: #4b5563;", "{key}" }
                        span { style: "font-weight: 600;", "{value}" }
                    }
                }
            }
        }
        h3 { style: "{section_title_style()} margin-top: 16px;", "Eventos Recientes" }
        DataTable { columns: recent_columns(), rows: data.recent.events.clone(), loading }
    }
}
