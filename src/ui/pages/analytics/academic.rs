use dioxus::prelude::*;

use crate::domain::charts::{series_color, BarDatum, LineSeries};
use crate::domain::entities::analytics::{AcademicDashboard, CourseActivity};
use crate::domain::entities::date_range::{DatePreset, DateRange};
use crate::domain::format::{format_date, format_number};
use crate::ui::components::{BarChart, Column, DataTable, ErrorBanner, MetricCard, SeriesChart, StatColor};
use crate::ui::pages::analytics::RangeHeader;
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::{card_style, grid_style, input_style, section_title_style, ACCENT, PRIMARY};
use crate::usecase::ports::api::ApiError;

const ROLES: [(&str, &str); 3] = [
    ("all", "Todos los Roles"),
    ("estudiante", "Estudiantes"),
    ("profesor", "Profesores"),
];

async fn load_academic(api: ApiContext, range: DateRange, role: String) -> Result<AcademicDashboard, ApiError> {
    let mut params = range.to_params();
    if role != "all" {
        params.insert("role", role);
    }
    api.analytics.dashboard_academic(params).await
}

fn course_name_cell(row: &CourseActivity) -> Element {
    rsx! { span { style: "font-weight: 500;", "{row.name}" } }
}

fn course_views_cell(row: &CourseActivity) -> Element {
    rsx! { "{format_number(row.views as f64)}" }
}

fn course_downloads_cell(row: &CourseActivity) -> Element {
    rsx! { "{format_number(row.downloads as f64)}" }
}

fn course_columns() -> Vec<Column<CourseActivity>> {
    vec![
        Column::new("Curso / Material", course_name_cell),
        Column::new("Vistas", course_views_cell),
        Column::new("Descargas", course_downloads_cell),
    ]
}

#[component]
pub fn AcademicAnalytics() -> Element {
    let api = use_context::<ApiContext>();
    let query = use_query::<AcademicDashboard>();
    let range = use_signal(|| DateRange::from_preset(DatePreset::Last30Days));
    let mut role = use_signal(|| "all".to_string());

    let load = use_callback(move |_: ()| {
        query.run(load_academic(api.clone(), range.peek().clone(), role.peek().clone()));
    });
    use_effect(move || {
        range.read();
        role.read();
        load.call(());
    });

    let state = query.snapshot();
    let data = state.data.clone().unwrap_or_default();
    let loading = state.is_loading();
    let selected_role = role();

    let timeline = &data.activity_timeline;
    let labels: Vec<String> = timeline.iter().map(|point| format_date(&point.date)).collect();
    let series = vec![
        LineSeries {
            name: "Notas consultadas".to_string(),
            color: PRIMARY,
            values: timeline.iter().map(|point| point.grades_viewed as f64).collect(),
        },
        LineSeries {
            name: "Materiales descargados".to_string(),
            color: ACCENT,
            values: timeline.iter().map(|point| point.materials_downloaded as f64).collect(),
        },
        LineSeries {
            name: "Tareas creadas".to_string(),
            color: "#10b981",
            values: timeline.iter().map(|point| point.tasks_created as f64).collect(),
        },
    ];
    let by_type: Vec<BarDatum> = data
        .events_by_type
        .iter()
        .enumerate()
        .map(|(idx, row)| BarDatum::new(row.event_type.clone(), row.count as f64, series_color(idx)))
        .collect();
    let by_day: Vec<BarDatum> = data
        .activity_by_day_of_week
        .iter()
        .map(|row| BarDatum::new(row.day.clone(), row.events as f64, PRIMARY))
        .collect();
    let student = data.student_metrics;
    let professor = data.professor_metrics;
    let forum = data.forum_metrics;

    rsx! {
        RangeHeader {
            title: "Análisis Académico",
            subtitle: "Métricas de actividad académica de profesores y estudiantes",
            range,
            loading,
            on_refresh: move |_| load.call(()),
        }
        div { style: "display: flex; justify-content: flex-end; margin-bottom: 12px;",
            select {
                style: "{input_style()} width: 200px;",
                onchange: move |evt| role.set(evt.value()),
                for (value, label) in ROLES {
                    option { key: "{value}", value, selected: selected_role == value, "{label}" }
                }
            }
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| query.dismiss_error() }
        div { style: "{grid_style(4)}",
            MetricCard { title: "Notas Consultadas", value: student.grades_viewed as f64, loading }
            MetricCard { title: "Materiales Descargados", value: student.materials_downloaded as f64, color: StatColor::Accent, loading }
            MetricCard { title: "Tareas Creadas", value: professor.tasks_created as f64, color: StatColor::Green, loading }
            MetricCard { title: "Asistencias Marcadas", value: professor.attendance_marked as f64, color: StatColor::Dark, loading }
        }
        div { style: "{grid_style(3)}",
            MetricCard { title: "Encuestas Completadas", value: student.surveys_completed as f64, color: StatColor::Green, loading }
            MetricCard { title: "Cursos Matriculados", value: student.courses_enrolled as f64, loading }
            MetricCard { title: "Encuestas Iniciadas", value: student.surveys_started as f64, color: StatColor::Yellow, loading }
        }
        div { style: "{card_style()} margin-bottom: 16px;",
            h3 { style: "{section_title_style()}", "Actividad en el Foro" }
            div { style: "display: grid; grid-template-columns: repeat(4, minmax(0, 1fr)); gap: 12px; text-align: center;",
                ForumFigure { label: "Posts Creados", value: forum.posts_created, color: PRIMARY }
                ForumFigure { label: "Respuestas", value: forum.replies_created, color: ACCENT }
                ForumFigure { label: "Temas Eliminados", value: forum.topics_deleted, color: "#f59e0b" }
                ForumFigure { label: "Posts Eliminados", value: forum.posts_deleted, color: "#ef4444" }
            }
        }
        div { style: "{grid_style(2)}",
            SeriesChart { title: "Actividad Académica en el Tiempo", labels, series }
            BarChart { title: "Distribución por Tipo de Evento", data: by_type }
        }
        h3 { style: "{section_title_style()}", "Cursos/Materiales Más Accedidos" }
        div { style: "margin-bottom: 16px;",
            DataTable { columns: course_columns(), rows: data.top_courses.clone(), loading }
        }
        div { style: "{grid_style(2)}",
            div { style: "{card_style()}",
                h3 { style: "{section_title_style()}", "Métricas de Estudiantes" }
                MetricRow { label: "Consultas de Notas", value: student.grades_viewed }
                MetricRow { label: "Materiales Descargados", value: student.materials_downloaded }
                MetricRow { label: "Tareas Entregadas", value: student.tasks_submitted }
                MetricRow { label: "Encuestas Completadas", value: student.surveys_completed }
            }
            div { style: "{card_style()}",
                h3 { style: "{section_title_style()}", "Métricas de Profesores" }
                MetricRow { label: "Tareas Creadas", value: professor.tasks_created }
                MetricRow { label: "Asistencias Marcadas", value: professor.attendance_marked }
                MetricRow { label: "Materiales Subidos", value: professor.materials_uploaded }
                MetricRow { label: "Notas Asignadas", value: professor.grades_assigned }
            }
        }
        BarChart { title: "Actividad por Día de la Semana", data: by_day }
    }
}

#[component]
fn ForumFigure(label: &'static str, value: u64, color: &'static str) -> Element {
    rsx! {
        div { style: "background: #f9fafb; border-radius: 8px; padding: 12px;",
            p { style: "font-size: 24px; font-weight: 700; margin: 0; color: {color};", "{format_number(value as f64)}" }
            p { style: "font-size: 13px; color: #4b5563; margin: 4px 0 0 0;", "{label}" }
        }
    }
}

#[component]
fn MetricRow(label: &'static str, value: u64) -> Element {
    rsx! {
        div { style: "display: flex; justify-content: space-between; padding: 8px 0; border-bottom: 1px solid #f3f4f6; font-size: 14px;",
            span { style: "color: #4b5563;", "{label}" }
            span { style: "font-weight: 600;", "{format_number(value as f64)}" }
        }
    }
}
