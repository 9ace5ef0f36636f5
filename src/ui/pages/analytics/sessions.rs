use dioxus::prelude::*;

use crate::domain::charts::{series_color, BarDatum};
use crate::domain::entities::analytics::{AuthDashboard, AuthMethodStat, FailureReason, SessionsDashboard};
use crate::domain::entities::date_range::DateRange;
use crate::domain::format::{format_number, ValueFormat};
use crate::ui::components::{BarChart, Column, DataTable, ErrorBanner, MetricCard, StatColor};
use crate::ui::pages::analytics::{default_range, RangeHeader};
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::{card_style, grid_style, section_title_style, ACCENT};
use crate::usecase::ports::api::ApiError;

#[derive(Debug, Clone, Default, PartialEq)]
struct SessionData {
    sessions: SessionsDashboard,
    auth: AuthDashboard,
}

async fn load_sessions(api: ApiContext, range: DateRange) -> Result<SessionData, ApiError> {
    let params = range.to_params();
    let (sessions, auth) = futures::try_join!(
        api.analytics.dashboard_sessions(params.clone()),
        api.analytics.dashboard_auth(params),
    )?;
    Ok(SessionData { sessions, auth })
}

#[derive(Debug, Clone, PartialEq)]
struct FailureRow {
    reason: FailureReason,
    share: f64,
}

fn failure_rows(auth: &AuthDashboard) -> Vec<FailureRow> {
    let total = auth.login_failures;
    auth.failure_reasons
        .iter()
        .map(|reason| FailureRow {
            share: if total > 0 {
                reason.count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
            reason: reason.clone(),
        })
        .collect()
}

fn reason_cell(row: &FailureRow) -> Element {
    rsx! { span { style: "color: #b91c1c; font-weight: 500;", "{row.reason.reason}" } }
}

fn count_cell(row: &FailureRow) -> Element {
    rsx! { "{format_number(row.reason.count as f64)}" }
}

fn share_cell(row: &FailureRow) -> Element {
    rsx! { "{row.share:.1}%" }
}

fn users_cell(row: &FailureRow) -> Element {
    if row.reason.users.is_empty() {
        return rsx! { span { style: "color: #9ca3af;", "-" } };
    }
    rsx! {
        div { style: "display: flex; flex-wrap: wrap; gap: 4px;",
            for user in row.reason.users.iter() {
                span { key: "{user}", style: "background: #f3f4f6; border-radius: 4px; padding: 1px 6px; font-size: 12px;", "{user}" }
            }
        }
    }
}

fn failure_columns() -> Vec<Column<FailureRow>> {
    vec![
        Column::new("Razón del Fallo", reason_cell),
        Column::new("Cantidad", count_cell),
        Column::new("% del Total", share_cell),
        Column::new("Usuarios Afectados", users_cell),
    ]
}

#[component]
pub fn SessionAnalytics() -> Element {
    let api = use_context::<ApiContext>();
    let query = use_query::<SessionData>();
    let range = use_signal(default_range);

    let load = use_callback(move |range: DateRange| {
        query.run(load_sessions(api.clone(), range));
    });
    use_effect(move || load.call(range()));

    let state = query.snapshot();
    let data = state.data.clone().unwrap_or_default();
    let loading = state.is_loading();

    let platforms: Vec<BarDatum> = data
        .sessions
        .sessions_by_platform
        .iter()
        .enumerate()
        .map(|(idx, row)| BarDatum::new(row.platform.clone(), row.count as f64, series_color(idx)))
        .collect();
    let hourly: Vec<BarDatum> = data
        .sessions
        .sessions_by_hour
        .iter()
        .map(|row| BarDatum::new(format!("{}:00", row.hour), row.count as f64, ACCENT))
        .collect();
    let failures = failure_rows(&data.auth);

    rsx! {
        RangeHeader {
            title: "Sesiones & Autenticación",
            subtitle: "Análisis de sesiones de usuario y métodos de autenticación",
            range,
            loading,
            on_refresh: move |_| load.call(range.peek().clone()),
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| query.dismiss_error() }
        div { style: "{grid_style(4)}",
            MetricCard { title: "Total Sesiones", value: data.sessions.total_sessions as f64, loading }
            MetricCard { title: "Duración Promedio", value: data.sessions.avg_session_duration, format: ValueFormat::Duration, color: StatColor::Accent, loading }
            MetricCard { title: "Tasa de Rebote", value: data.sessions.bounce_rate, format: ValueFormat::Percentage, color: StatColor::Yellow, loading }
            MetricCard { title: "Tasa de Éxito Login", value: data.auth.success_rate, format: ValueFormat::Percentage, color: StatColor::Green, loading }
        }
        div { style: "{grid_style(4)}",
            MetricCard { title: "Intentos de Login", value: data.auth.login_attempts as f64, color: StatColor::Dark, loading }
            MetricCard { title: "Logins Exitosos", value: data.auth.login_successes as f64, color: StatColor::Green, loading }
            MetricCard { title: "Logins Fallidos", value: data.auth.login_failures as f64, color: StatColor::Red, loading }
            MetricCard { title: "Tiempo Promedio Login", value: data.auth.avg_login_time.round(), subtitle: "milisegundos", color: StatColor::Accent, loading }
        }
        div { style: "{grid_style(2)}",
            BarChart { title: "Sesiones por Plataforma", data: platforms }
            AuthMethods { methods: data.auth.method_stats.clone() }
        }
        div { style: "margin-bottom: 16px;",
            BarChart { title: "Sesiones por Hora del Día", data: hourly }
        }
        if !failures.is_empty() {
            h3 { style: "{section_title_style()} margin-bottom: 2px;", "Errores de Autenticación" }
            p { style: "font-size: 13px; color: #6b7280; margin: 0 0 12px 0;", "Razones de fallo y usuarios afectados" }
            DataTable { columns: failure_columns(), rows: failures }
        }
    }
}

/// Successes and failures per method on one stacked bar.
#[component]
fn AuthMethods(methods: Vec<AuthMethodStat>) -> Element {
    let max = methods
        .iter()
        .map(|method| method.successes + method.failures)
        .max()
        .unwrap_or(0);
    rsx! {
        div { style: "{card_style()}",
            h3 { style: "{section_title_style()}", "Métodos de Autenticación" }
            if methods.is_empty() {
                p { style: "color: #6b7280; text-align: center; padding: 24px 0;", "No hay datos disponibles" }
            }
            for method in methods.iter() {
                {
                    let scale = |value: u64| if max > 0 { value as f64 / max as f64 * 100.0 } else { 0.0 };
                    let ok = scale(method.successes);
                    let failed = scale(method.failures);
                    rsx! {
                        div { key: "{method.method}", style: "margin-bottom: 10px;",
                            div { style: "display: flex; justify-content: space-between; font-size: 13px; margin-bottom: 4px;",
                                span { "{method.method}" }
                                span { style: "color: #6b7280;",
                                    "{format_number(method.successes as f64)} exitosos · {format_number(method.failures as f64)} fallidos"
                                }
                            }
                            div { style: "display: flex; height: 14px; background: #f3f4f6; border-radius: 6px; overflow: hidden;",
                                div { style: "width: {ok:.1}%; background: #10b981;" }
                                div { style: "width: {failed:.1}%; background: #ef4444;" }
                            }
                        }
                    }
                }
            }
            div { style: "display: flex; gap: 12px; font-size: 12px; margin-top: 8px;",
                span { style: "color: #10b981;", "■ Exitosos" }
                span { style: "color: #ef4444;", "■ Fallidos" }
            }
        }
    }
}
