use dioxus::prelude::*;

use crate::domain::charts::{load_distribution, series_color, BarDatum, HealthLevel, LineSeries};
use crate::domain::entities::analytics::{PerformanceDashboard, PlatformHealth, SlowEndpoint};
use crate::domain::entities::date_range::{DatePreset, DateRange};
use crate::domain::format::{format_date, format_millis, format_number, method_colors, ValueFormat};
use crate::ui::components::{BarChart, Column, DataTable, ErrorBanner, MetricCard, SeriesChart, StatColor};
use crate::ui::pages::analytics::RangeHeader;
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::{badge_style, card_style, grid_style, input_style, section_title_style, ACCENT, PRIMARY};
use crate::usecase::ports::api::ApiError;

const PLATFORMS: [(&str, &str); 4] = [
    ("all", "Todas las Plataformas"),
    ("web", "Web"),
    ("ios", "iOS"),
    ("android", "Android"),
];

async fn load_performance(
    api: ApiContext,
    range: DateRange,
    platform: String,
) -> Result<PerformanceDashboard, ApiError> {
    let mut params = range.to_params();
    if platform != "all" {
        params.insert("platform", platform);
    }
    api.analytics.dashboard_performance(params).await
}

fn endpoint_cell(row: &SlowEndpoint) -> Element {
    let method = row.method.clone().unwrap_or_default();
    rsx! {
        div { style: "display: flex; align-items: center; gap: 6px;",
            if !method.is_empty() {
                span { style: "{badge_style(method_colors(&method))}", "{method}" }
            }
            span { style: "font-family: monospace; font-size: 12px;", "{row.path}" }
        }
    }
}

fn calls_cell(row: &SlowEndpoint) -> Element {
    rsx! { "{format_number(row.calls as f64)}" }
}

fn avg_time_cell(row: &SlowEndpoint) -> Element {
    let color = if row.avg_time > 3000.0 { "#dc2626" } else if row.avg_time > 1000.0 { "#ca8a04" } else { "#16a34a" };
    rsx! { span { style: "color: {color}; font-weight: 500;", "{format_millis(row.avg_time)}" } }
}

fn error_rate_cell(row: &SlowEndpoint) -> Element {
    let color = if row.error_rate > 5.0 { "#dc2626" } else { "#4b5563" };
    rsx! { span { style: "color: {color};", "{row.error_rate:.1}%" } }
}

fn endpoint_columns() -> Vec<Column<SlowEndpoint>> {
    vec![
        Column::new("Endpoint", endpoint_cell),
        Column::new("Llamadas", calls_cell),
        Column::new("Tiempo Promedio", avg_time_cell),
        Column::new("Tasa de Error", error_rate_cell),
    ]
}

#[component]
pub fn PerformanceAnalytics() -> Element {
    let api = use_context::<ApiContext>();
    let query = use_query::<PerformanceDashboard>();
    let range = use_signal(|| DateRange::from_preset(DatePreset::Last7Days));
    let mut platform = use_signal(|| "all".to_string());

    let load = use_callback(move |_: ()| {
        query.run(load_performance(api.clone(), range.peek().clone(), platform.peek().clone()));
    });
    use_effect(move || {
        range.read();
        platform.read();
        load.call(());
    });

    let state = query.snapshot();
    let data = state.data.clone().unwrap_or_default();
    let loading = state.is_loading();
    let selected = platform();
    let health = HealthLevel::classify(data.health_score);

    let labels: Vec<String> = data.timeline.iter().map(|point| format_date(&point.date)).collect();
    let series = vec![
        LineSeries {
            name: "Carga (ms)".to_string(),
            color: PRIMARY,
            values: data.timeline.iter().map(|point| point.avg_load_time).collect(),
        },
        LineSeries {
            name: "API (ms)".to_string(),
            color: ACCENT,
            values: data.timeline.iter().map(|point| point.avg_api_time).collect(),
        },
    ];
    let errors: Vec<BarDatum> = data
        .errors_by_type
        .iter()
        .enumerate()
        .map(|(idx, row)| BarDatum::new(row.kind.clone(), row.count as f64, series_color(idx + 4)))
        .collect();
    let bands = load_distribution(data.fast_loads, data.moderate_loads, data.slow_loads);

    rsx! {
        RangeHeader {
            title: "Rendimiento & Errores",
            subtitle: "Métricas de rendimiento, tiempos de carga y errores del sistema",
            range,
            loading,
            on_refresh: move |_| load.call(()),
        }
        div { style: "display: flex; justify-content: flex-end; margin-bottom: 12px;",
            select {
                style: "{input_style()} width: 220px;",
                onchange: move |evt| platform.set(evt.value()),
                for (value, label) in PLATFORMS {
                    option { key: "{value}", value, selected: selected == value, "{label}" }
                }
            }
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| query.dismiss_error() }
        div { style: "{card_style()} border-left: 4px solid {health.color()}; display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;",
            div {
                h4 { style: "margin: 0; color: {health.color()};", "Índice de Salud del Sistema · {health.label()}" }
                p { style: "margin: 4px 0 0 0; font-size: 13px; color: #4b5563;",
                    "Basado en tiempos de respuesta, tasa de errores y disponibilidad"
                }
            }
            span { style: "font-size: 30px; font-weight: 700; color: {health.color()};", "{data.health_score}%" }
        }
        div { style: "{grid_style(4)}",
            MetricCard { title: "Tiempo de Carga Promedio", value: data.avg_load_time.round(), subtitle: "milisegundos", loading }
            MetricCard { title: "Tiempo de API Promedio", value: data.avg_api_response_time.round(), subtitle: "milisegundos", color: StatColor::Accent, loading }
            MetricCard { title: "Errores Totales", value: data.total_errors as f64, color: StatColor::Red, loading }
            MetricCard { title: "Tasa de Crash", value: data.crash_rate, format: ValueFormat::Percentage, color: StatColor::Yellow, loading }
        }
        div { style: "margin-bottom: 16px;",
            BarChart { title: "Distribución de Tiempos de Carga", data: bands, format: ValueFormat::Percentage }
        }
        div { style: "{grid_style(2)}",
            SeriesChart { title: "Rendimiento en el Tiempo", labels, series }
            BarChart { title: "Distribución de Errores", data: errors }
        }
        h3 { style: "{section_title_style()}", "Endpoints Más Lentos" }
        div { style: "margin-bottom: 16px;",
            DataTable { columns: endpoint_columns(), rows: data.slow_endpoints.clone(), loading }
        }
        PlatformComparison { platforms: data.platform_comparison.clone() }
    }
}

#[component]
fn PlatformComparison(platforms: Vec<PlatformHealth>) -> Element {
    rsx! {
        div { style: "{card_style()}",
            h3 { style: "{section_title_style()}", "Rendimiento por Plataforma" }
            if platforms.is_empty() {
                p { style: "color: #6b7280; text-align: center; padding: 24px 0;", "No hay datos disponibles" }
            }
            div { style: "display: grid; grid-template-columns: repeat(3, minmax(0, 1fr)); gap: 12px;",
                for row in platforms.iter() {
                    div { key: "{row.platform}", style: "background: #f9fafb; border-radius: 8px; padding: 12px;",
                        p { style: "font-weight: 600; margin: 0 0 6px 0; text-transform: capitalize;", "{row.platform}" }
                        p { style: "font-size: 13px; margin: 0; color: #4b5563;", "Errores: {format_number(row.errors as f64)}" }
                        p { style: "font-size: 13px; margin: 2px 0 0 0; color: #4b5563;", "Crashes: {format_number(row.crashes as f64)}" }
                    }
                }
            }
        }
    }
}
