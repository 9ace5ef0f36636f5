use dioxus::prelude::*;

use crate::domain::charts::{series_color, BarDatum};
use crate::domain::entities::analytics::{
    BehaviorUserStat, CareerStat, FacultyStat, FilterOptions, PageStat, RoleStat, UserBehaviorDashboard,
};
use crate::domain::entities::date_range::{DatePreset, DateRange};
use crate::domain::format::{format_duration_ms, format_number, format_timestamp, ValueFormat};
use crate::ui::components::{BarChart, Column, DataTable, ErrorBanner, StatCard, StatColor};
use crate::ui::pages::analytics::RangeHeader;
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::{badge_style, card_style, grid_style, input_style, label_style, section_title_style, tab_style, PRIMARY};
use crate::usecase::ports::api::ApiError;

const TOP_USERS: usize = 50;
const ROLE_BADGE: (&str, &str) = ("#dbeafe", "#1e40af");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BehaviorTab {
    Pages,
    Roles,
    Users,
    Faculties,
    Careers,
}

impl BehaviorTab {
    const ALL: [BehaviorTab; 5] = [
        BehaviorTab::Pages,
        BehaviorTab::Roles,
        BehaviorTab::Users,
        BehaviorTab::Faculties,
        BehaviorTab::Careers,
    ];

    fn label(self) -> &'static str {
        match self {
            BehaviorTab::Pages => "Tiempo en Página",
            BehaviorTab::Roles => "Por Rol",
            BehaviorTab::Users => "Top Usuarios",
            BehaviorTab::Faculties => "Facultades",
            BehaviorTab::Careers => "Carreras",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct BehaviorFilter {
    system: String,
    role: String,
}

async fn load_behavior(
    api: ApiContext,
    range: DateRange,
    filter: BehaviorFilter,
) -> Result<UserBehaviorDashboard, ApiError> {
    let mut params = range.to_params();
    params
        .insert_opt("systemId", Some(filter.system).filter(|value| !value.is_empty()))
        .insert_opt("role", Some(filter.role).filter(|value| !value.is_empty()));
    api.analytics.dashboard_user_behavior(params).await
}

fn page_cell(row: &PageStat) -> Element {
    rsx! { span { style: "font-weight: 500;", "{row.page}" } }
}

fn page_views_cell(row: &PageStat) -> Element {
    rsx! { "{format_number(row.views as f64)}" }
}

fn page_users_cell(row: &PageStat) -> Element {
    rsx! { "{format_number(row.unique_users as f64)}" }
}

fn page_avg_cell(row: &PageStat) -> Element {
    rsx! { "{format_duration_ms(row.avg_time_on_page)}" }
}

fn page_total_cell(row: &PageStat) -> Element {
    rsx! { "{format_duration_ms(row.total_time_on_page)}" }
}

fn page_columns() -> Vec<Column<PageStat>> {
    vec![
        Column::new("Página", page_cell),
        Column::new("Vistas", page_views_cell),
        Column::new("Usuarios", page_users_cell),
        Column::new("Tiempo Promedio", page_avg_cell),
        Column::new("Tiempo Total", page_total_cell),
    ]
}

#[derive(Debug, Clone, PartialEq)]
struct RankedUser {
    rank: usize,
    stat: BehaviorUserStat,
}

fn rank_cell(row: &RankedUser) -> Element {
    rsx! { span { style: "color: #6b7280;", "{row.rank}" } }
}

fn user_cell(row: &RankedUser) -> Element {
    rsx! { span { style: "font-weight: 500;", "{row.stat.user_id}" } }
}

fn user_role_cell(row: &RankedUser) -> Element {
    let role = row.stat.role.clone().unwrap_or_else(|| "N/A".to_string());
    let style = badge_style(ROLE_BADGE);
    rsx! { span { style: "{style}", "{role}" } }
}

fn user_events_cell(row: &RankedUser) -> Element {
    rsx! { "{format_number(row.stat.events as f64)}" }
}

fn user_sessions_cell(row: &RankedUser) -> Element {
    rsx! { "{format_number(row.stat.sessions as f64)}" }
}

fn user_views_cell(row: &RankedUser) -> Element {
    rsx! { "{format_number(row.stat.page_views as f64)}" }
}

fn user_last_cell(row: &RankedUser) -> Element {
    let last = row
        .stat
        .last_activity
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_else(|| "N/A".to_string());
    rsx! { "{last}" }
}

fn user_columns() -> Vec<Column<RankedUser>> {
    vec![
        Column::new("#", rank_cell),
        Column::new("Usuario", user_cell),
        Column::new("Rol", user_role_cell),
        Column::new("Eventos", user_events_cell),
        Column::new("Sesiones", user_sessions_cell),
        Column::new("Páginas Vistas", user_views_cell),
        Column::new("Última Actividad", user_last_cell),
    ]
}

/// Faculty and career rows share one table shape.
#[derive(Debug, Clone, PartialEq)]
struct SegmentRow {
    name: String,
    users: u64,
    events: u64,
    sessions: u64,
}

impl From<&FacultyStat> for SegmentRow {
    fn from(stat: &FacultyStat) -> Self {
        let name = if stat.faculty_name.trim().is_empty() {
            stat.faculty_id.clone()
        } else {
            stat.faculty_name.clone()
        };
        Self {
            name,
            users: stat.users,
            events: stat.events,
            sessions: stat.sessions,
        }
    }
}

impl From<&CareerStat> for SegmentRow {
    fn from(stat: &CareerStat) -> Self {
        let name = if stat.career_name.trim().is_empty() {
            stat.career_id.clone()
        } else {
            stat.career_name.clone()
        };
        Self {
            name,
            users: stat.users,
            events: stat.events,
            sessions: stat.sessions,
        }
    }
}

fn segment_name_cell(row: &SegmentRow) -> Element {
    rsx! { span { style: "font-weight: 500;", "{row.name}" } }
}

fn segment_users_cell(row: &SegmentRow) -> Element {
    rsx! { "{format_number(row.users as f64)}" }
}

fn segment_events_cell(row: &SegmentRow) -> Element {
    rsx! { "{format_number(row.events as f64)}" }
}

fn segment_sessions_cell(row: &SegmentRow) -> Element {
    rsx! { "{format_number(row.sessions as f64)}" }
}

fn faculty_columns() -> Vec<Column<SegmentRow>> {
    vec![
        Column::new("Facultad", segment_name_cell),
        Column::new("Usuarios", segment_users_cell),
        Column::new("Eventos", segment_events_cell),
        Column::new("Sesiones", segment_sessions_cell),
    ]
}

fn career_columns() -> Vec<Column<SegmentRow>> {
    vec![
        Column::new("Carrera", segment_name_cell),
        Column::new("Usuarios", segment_users_cell),
        Column::new("Eventos", segment_events_cell),
        Column::new("Sesiones", segment_sessions_cell),
    ]
}

#[component]
pub fn UserBehavior() -> Element {
    let api = use_context::<ApiContext>();
    let query = use_query::<UserBehaviorDashboard>();
    let options = use_query::<FilterOptions>();
    let range = use_signal(|| DateRange::from_preset(DatePreset::Last30Days));
    let mut filter = use_signal(BehaviorFilter::default);
    let mut tab = use_signal(|| BehaviorTab::Pages);

    use_effect({
        let api = api.clone();
        move || {
            let api = api.clone();
            options.run(async move {
                match api.analytics.filter_options().await {
                    Ok(found) => Ok(found),
                    Err(err) => {
                        tracing::warn!(error = %err, "filter options unavailable");
                        Ok(FilterOptions::default())
                    }
                }
            })
        }
    });

    let load = use_callback(move |_: ()| {
        query.run(load_behavior(api.clone(), range.peek().clone(), filter.peek().clone()));
    });
    use_effect(move || {
        range.read();
        filter.read();
        load.call(());
    });

    let state = query.snapshot();
    let loading = state.is_loading();
    let data = state.data.clone();
    let FilterOptions { systems, roles, .. } = options.data().unwrap_or_default();
    let current = filter();
    let active = tab();
    let content = match (loading, data.clone()) {
        (true, _) => rsx! {
            p { style: "color: #6b7280; text-align: center; padding: 48px 0;", "Cargando..." }
        },
        (false, None) => rsx! {},
        (false, Some(data)) => match active {
            BehaviorTab::Pages => rsx! { PagesTab { pages: data.page_stats } },
            BehaviorTab::Roles => rsx! { RolesTab { roles: data.role_stats } },
            BehaviorTab::Users => rsx! { UsersTab { users: data.user_stats } },
            BehaviorTab::Faculties => rsx! {
                SegmentTab {
                    title: "Actividad por Facultad",
                    empty_text: "No hay datos de facultades disponibles.",
                    empty_hint: "Asegúrate de enviar facultyId y facultyName en los eventos.",
                    rows: data.faculty_stats.iter().map(SegmentRow::from).collect::<Vec<_>>(),
                    faculties: true,
                }
            },
            BehaviorTab::Careers => rsx! {
                SegmentTab {
                    title: "Actividad por Carrera",
                    empty_text: "No hay datos de carreras disponibles.",
                    empty_hint: "Asegúrate de enviar careerId y careerName en los eventos.",
                    rows: data.career_stats.iter().map(SegmentRow::from).collect::<Vec<_>>(),
                    faculties: false,
                }
            },
        },
    };

    rsx! {
        RangeHeader {
            title: "Comportamiento de Usuarios",
            subtitle: "Tiempo en página, usuarios más activos y segmentación",
            range,
            loading,
            on_refresh: move |_| load.call(()),
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| query.dismiss_error() }
        div { style: "{card_style()} margin-bottom: 16px;",
            div { style: "{grid_style(2)} margin-bottom: 0;",
                div {
                    label { style: "{label_style()}", "Sistema" }
                    select {
                        style: "{input_style()}",
                        onchange: move |evt| filter.write().system = evt.value(),
                        option { value: "", selected: current.system.is_empty(), "Todos" }
                        for system in systems {
                            option { key: "{system}", selected: current.system == system, value: "{system}", "{system}" }
                        }
                    }
                }
                div {
                    label { style: "{label_style()}", "Rol" }
                    select {
                        style: "{input_style()}",
                        onchange: move |evt| filter.write().role = evt.value(),
                        option { value: "", selected: current.role.is_empty(), "Todos" }
                        for role in roles {
                            option { key: "{role}", selected: current.role == role, value: "{role}", "{role}" }
                        }
                    }
                }
            }
        }
        if let Some(data) = data.as_ref() {
            div { style: "{grid_style(4)}",
                StatCard { title: "Páginas Únicas", value: format_number(data.page_stats.len() as f64), subtitle: "páginas visitadas" }
                StatCard { title: "Tiempo Promedio", value: format_duration_ms(data.mean_time_on_page()), subtitle: "por página", color: StatColor::Green }
                StatCard { title: "Usuarios Activos", value: format_number(data.user_stats.len() as f64), subtitle: "en el periodo", color: StatColor::Accent }
                StatCard { title: "Roles Activos", value: format_number(data.role_stats.len() as f64), subtitle: "roles diferentes", color: StatColor::Yellow }
            }
        }
        div { style: "display: flex; gap: 8px; border-bottom: 1px solid #e5e7eb; margin-bottom: 16px;",
            for item in BehaviorTab::ALL {
                button {
                    key: "{item.label()}",
                    style: "{tab_style(active == item)}",
                    onclick: move |_| tab.set(item),
                    "{item.label()}"
                }
            }
        }
        {content}
    }
}

#[component]
fn PagesTab(pages: Vec<PageStat>) -> Element {
    let chart: Vec<BarDatum> = pages
        .iter()
        .take(15)
        .map(|page| BarDatum::new(page.page.clone(), (page.avg_time_on_page / 1000.0).floor(), PRIMARY))
        .collect();
    rsx! {
        div { style: "margin-bottom: 16px;",
            BarChart { title: "Tiempo en Página", data: chart, format: ValueFormat::Duration }
        }
        DataTable { columns: page_columns(), rows: pages }
    }
}

#[component]
fn RolesTab(roles: Vec<RoleStat>) -> Element {
    let total: u64 = roles.iter().map(|role| role.events).sum();
    let chart: Vec<BarDatum> = roles
        .iter()
        .enumerate()
        .map(|(idx, role)| {
            let share = if total > 0 { role.events as f64 / total as f64 * 100.0 } else { 0.0 };
            let name = if role.role.is_empty() { "Sin rol" } else { role.role.as_str() };
            BarDatum::new(format!("{name} ({share:.0}%)"), role.events as f64, series_color(idx))
        })
        .collect();
    rsx! {
        div { style: "{grid_style(2)}",
            BarChart { title: "Actividad por Rol", data: chart }
            div { style: "{card_style()}",
                h3 { style: "{section_title_style()}", "Detalle por Rol" }
                table { style: "width: 100%; border-collapse: collapse; font-size: 14px;",
                    thead {
                        tr {
                            th { style: "text-align: left; padding: 6px;", "Rol" }
                            th { style: "text-align: right; padding: 6px;", "Usuarios" }
                            th { style: "text-align: right; padding: 6px;", "Eventos" }
                            th { style: "text-align: right; padding: 6px;", "Sesiones" }
                        }
                    }
                    tbody {
                        for (idx, role) in roles.iter().enumerate() {
                            tr { key: "{idx}", style: "border-top: 1px solid #f3f4f6;",
                                td { style: "padding: 6px;",
                                    span { style: "display: inline-block; width: 10px; height: 10px; border-radius: 9999px; margin-right: 8px; background: {series_color(idx)};" }
                                    if role.role.is_empty() { "Sin rol" } else { "{role.role}" }
                                }
                                td { style: "text-align: right; padding: 6px;", "{format_number(role.users as f64)}" }
                                td { style: "text-align: right; padding: 6px;", "{format_number(role.events as f64)}" }
                                td { style: "text-align: right; padding: 6px;", "{format_number(role.sessions as f64)}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn UsersTab(users: Vec<BehaviorUserStat>) -> Element {
    let rows: Vec<RankedUser> = users
        .into_iter()
        .take(TOP_USERS)
        .enumerate()
        .map(|(idx, stat)| RankedUser { rank: idx + 1, stat })
        .collect();
    rsx! {
        h3 { style: "{section_title_style()}", "Top 50 Usuarios Más Activos" }
        DataTable { columns: user_columns(), rows }
    }
}

#[component]
fn SegmentTab(
    title: String,
    empty_text: String,
    empty_hint: String,
    rows: Vec<SegmentRow>,
    faculties: bool,
) -> Element {
    if rows.is_empty() {
        return rsx! {
            div { style: "{card_style()} text-align: center; color: #6b7280; padding: 48px;",
                h3 { style: "{section_title_style()}", "{title}" }
                p { style: "margin: 0;", "{empty_text}" }
                p { style: "font-size: 13px; margin: 8px 0 0 0;", "{empty_hint}" }
            }
        };
    }
    let users: Vec<BarDatum> = rows
        .iter()
        .take(15)
        .map(|row| BarDatum::new(row.name.clone(), row.users as f64, PRIMARY))
        .collect();
    let columns = if faculties { faculty_columns() } else { career_columns() };
    rsx! {
        div { style: "margin-bottom: 16px;",
            BarChart { title: "{title}", data: users }
        }
        DataTable { columns, rows }
    }
}
