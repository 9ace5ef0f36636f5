use dioxus::prelude::*;

use crate::domain::charts::{flow_shares, series_color, BarDatum, FlowGraph};
use crate::domain::entities::analytics::{NavigationDashboard, NavigationFlow, ScreenCount};
use crate::domain::entities::date_range::{DatePreset, DateRange};
use crate::domain::format::{format_number, truncate_label, ValueFormat};
use crate::ui::components::{BarChart, Column, DataTable, ErrorBanner, MetricCard, StatColor};
use crate::ui::pages::analytics::RangeHeader;
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::{bar_fill_style, bar_track_style, card_style, grid_style, section_title_style, PRIMARY};

const FLOW_LIMIT: usize = 12;
const TRANSITION_ROWS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
struct TransitionRow {
    flow: NavigationFlow,
    share: f64,
}

fn from_cell(row: &TransitionRow) -> Element {
    rsx! { span { style: "font-weight: 500;", "{row.flow.from}" } }
}

fn arrow_cell(_row: &TransitionRow) -> Element {
    rsx! { span { style: "color: #9ca3af;", "→" } }
}

fn to_cell(row: &TransitionRow) -> Element {
    rsx! { span { style: "font-weight: 500;", "{row.flow.to}" } }
}

fn transitions_cell(row: &TransitionRow) -> Element {
    rsx! { "{format_number(row.flow.count as f64)}" }
}

fn share_cell(row: &TransitionRow) -> Element {
    rsx! {
        div { style: "display: flex; align-items: center; gap: 8px;",
            div { style: "{bar_track_style(8)} width: 64px;",
                div { style: "{bar_fill_style(row.share, PRIMARY)}" }
            }
            span { "{row.share:.1}%" }
        }
    }
}

fn transition_columns() -> Vec<Column<TransitionRow>> {
    vec![
        Column::new("Desde", from_cell),
        Column::new("→", arrow_cell),
        Column::new("Hacia", to_cell),
        Column::new("Transiciones", transitions_cell),
        Column::new("% del Total", share_cell),
    ]
}

#[component]
pub fn NavigationAnalytics() -> Element {
    let api = use_context::<ApiContext>();
    let query = use_query::<NavigationDashboard>();
    let range = use_signal(|| DateRange::from_preset(DatePreset::Last30Days));

    let load = use_callback(move |range: DateRange| {
        let api = api.clone();
        query.run(async move { api.analytics.dashboard_navigation(range.to_params()).await });
    });
    use_effect(move || load.call(range()));

    let state = query.snapshot();
    let data = state.data.clone().unwrap_or_default();
    let loading = state.is_loading();

    let screens: Vec<BarDatum> = data
        .top_screens
        .iter()
        .take(15)
        .map(|row| BarDatum::new(row.screen.clone(), row.views as f64, PRIMARY))
        .collect();
    let graph = FlowGraph::build(&data.flows, FLOW_LIMIT);
    let transitions: Vec<TransitionRow> = data
        .flows
        .iter()
        .cloned()
        .zip(flow_shares(&data.flows))
        .take(TRANSITION_ROWS)
        .map(|(flow, share)| TransitionRow { flow, share })
        .collect();

    rsx! {
        RangeHeader {
            title: "Análisis de Navegación",
            subtitle: "Patrones de navegación y flujos de usuario",
            range,
            loading,
            on_refresh: move |_| load.call(range.peek().clone()),
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| query.dismiss_error() }
        div { style: "{grid_style(4)}",
            MetricCard { title: "Vistas de Pantalla", value: data.total_screen_views as f64, loading }
            MetricCard { title: "Pantallas Únicas", value: data.unique_screens as f64, color: StatColor::Accent, loading }
            MetricCard { title: "Promedio por Sesión", value: data.avg_screens_per_session, color: StatColor::Green, loading }
            MetricCard { title: "Tiempo Promedio en Pantalla", value: data.avg_time_on_screen, format: ValueFormat::Duration, color: StatColor::Dark, loading }
        }
        div { style: "margin-bottom: 16px;",
            BarChart { title: "Pantallas Más Visitadas", data: screens }
        }
        FlowDiagram { graph }
        div { style: "{grid_style(2)}",
            PointList { title: "Puntos de Entrada", points: data.entry_points.clone(), total: data.total_sessions, color: "#22c55e" }
            PointList { title: "Puntos de Salida", points: data.exit_points.clone(), total: data.total_sessions, color: "#ef4444" }
        }
        if !transitions.is_empty() {
            h3 { style: "{section_title_style()}", "Transiciones Entre Pantallas" }
            DataTable { columns: transition_columns(), rows: transitions }
        }
    }
}

#[component]
fn PointList(title: String, points: Vec<ScreenCount>, total: u64, color: &'static str) -> Element {
    rsx! {
        div { style: "{card_style()}",
            h3 { style: "{section_title_style()}", "{title}" }
            for (idx, point) in points.iter().take(8).enumerate() {
                {
                    let width = if total > 0 { point.count as f64 / total as f64 * 100.0 } else { 0.0 };
                    rsx! {
                        div { key: "{idx}", style: "display: flex; align-items: center; justify-content: space-between; gap: 12px; margin-bottom: 8px;",
                            div { style: "display: flex; align-items: center; gap: 8px; min-width: 0;",
                                span { style: "width: 22px; height: 22px; border-radius: 9999px; background: #f3f4f6; color: {color}; font-size: 12px; font-weight: 700; display: inline-flex; align-items: center; justify-content: center;",
                                    "{idx + 1}"
                                }
                                span { style: "font-size: 14px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;", title: "{point.screen}", "{point.screen}" }
                            }
                            div { style: "display: flex; align-items: center; gap: 8px;",
                                div { style: "{bar_track_style(8)} width: 96px;",
                                    div { style: "{bar_fill_style(width, color)}" }
                                }
                                span { style: "font-size: 13px; color: #4b5563; width: 56px; text-align: right;", "{format_number(point.count as f64)}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

const FLOW_WIDTH: f64 = 640.0;
const NODE_GAP: f64 = 34.0;
const NODE_WIDTH: f64 = 12.0;

/// Origins on the left, destinations on the right, link thickness by count.
#[component]
fn FlowDiagram(graph: FlowGraph) -> Element {
    let rows = graph.sources.len().max(graph.targets.len()).max(1);
    let height = rows as f64 * NODE_GAP;
    let max = graph.max().max(1) as f64;
    let node_y = |idx: usize| idx as f64 * NODE_GAP + NODE_GAP / 2.0;
    let right = FLOW_WIDTH - NODE_WIDTH;
    rsx! {
        div { style: "{card_style()} margin-bottom: 16px;",
            h3 { style: "{section_title_style()}", "Flujos de Navegación" }
            if graph.is_empty() {
                div { style: "text-align: center; color: #6b7280; padding: 40px 0;",
                    p { style: "margin: 0;", "No hay suficientes datos de flujo para mostrar" }
                    p { style: "margin: 4px 0 0 0; font-size: 13px;", "Los flujos se generan con más navegación de usuarios" }
                }
            } else {
                svg { view_box: "-170 0 {FLOW_WIDTH + 340.0} {height}", width: "100%", height: "{height.max(160.0)}",
                    for (idx, link) in graph.links.iter().enumerate() {
                        {
                            let y1 = node_y(link.source);
                            let y2 = node_y(link.target);
                            let mid = FLOW_WIDTH / 2.0;
                            let stroke = (link.value as f64 / max * 14.0).max(1.5);
                            rsx! {
                                path {
                                    key: "{idx}",
                                    d: "M{NODE_WIDTH},{y1} C{mid},{y1} {mid},{y2} {right},{y2}",
                                    fill: "none",
                                    stroke: "#94a3b8",
                                    stroke_opacity: "0.4",
                                    stroke_width: "{stroke:.1}",
                                }
                            }
                        }
                    }
                    for (idx, name) in graph.sources.iter().enumerate() {
                        rect { key: "s{idx}", x: "0", y: "{node_y(idx) - 10.0}", width: "{NODE_WIDTH}", height: "20", fill: "{series_color(idx)}" }
                        text { x: "-6", y: "{node_y(idx) + 4.0}", font_size: "11", text_anchor: "end", fill: "#374151", "{truncate_label(name, 24)}" }
                    }
                    for (idx, name) in graph.targets.iter().enumerate() {
                        rect { key: "t{idx}", x: "{right}", y: "{node_y(idx) - 10.0}", width: "{NODE_WIDTH}", height: "20", fill: "{series_color(idx + 3)}" }
                        text { x: "{FLOW_WIDTH + 6.0}", y: "{node_y(idx) + 4.0}", font_size: "11", fill: "#374151", "{truncate_label(name, 24)}" }
                    }
                }
            }
        }
    }
}
