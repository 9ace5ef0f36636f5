use dioxus::prelude::*;

use crate::domain::entities::analytics::{FunnelResult, ProcedureStat, ProceduresDashboard};
use crate::domain::entities::date_range::{DatePreset, DateRange};
use crate::domain::format::{format_number, truncate_label, ValueFormat};
use crate::domain::funnel::{conversion_colors, parse_steps, rate};
use crate::ui::components::{ErrorBanner, FunnelChart, MetricCard, StatColor};
use crate::ui::pages::analytics::RangeHeader;
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::{
    badge_style, bar_fill_style, bar_track_style, button_style, card_style, grid_style,
    input_style, label_style, section_title_style, ButtonKind, PRIMARY,
};
use crate::usecase::ports::api::ApiError;

const DEFAULT_STEPS: &str =
    "procedure_started, procedure_step_completed, procedure_document_uploaded, procedure_submitted";
const ABANDONMENT_ALERT: f64 = 30.0;

async fn load_funnel(api: ApiContext, range: DateRange, raw_steps: String) -> Result<FunnelResult, ApiError> {
    let steps = parse_steps(&raw_steps);
    api.analytics.funnel(&steps, range.to_params()).await
}

#[component]
pub fn ProcedureAnalytics() -> Element {
    let api = use_context::<ApiContext>();
    let procedures = use_query::<ProceduresDashboard>();
    let funnel = use_query::<FunnelResult>();
    let range = use_signal(|| DateRange::from_preset(DatePreset::Last30Days));
    let mut steps_input = use_signal(|| DEFAULT_STEPS.to_string());

    let load_procedures = use_callback({
        let api = api.clone();
        move |range: DateRange| {
            let api = api.clone();
            procedures.run(async move { api.analytics.dashboard_procedures(range.to_params()).await });
        }
    });
    let analyze = use_callback(move |range: DateRange| {
        funnel.run(load_funnel(api.clone(), range, steps_input.peek().clone()));
    });
    use_effect(move || {
        let current = range();
        load_procedures.call(current.clone());
        analyze.call(current);
    });

    let state = procedures.snapshot();
    let data = state.data.clone().unwrap_or_default();
    let loading = state.is_loading();
    let funnel_state = funnel.snapshot();
    let funnel_loading = funnel_state.is_loading();
    let steps = funnel_state.data.clone().map(|result| result.steps).unwrap_or_default();
    let conversion = rate(data.total_completed, data.total_started);
    let abandonment = rate(data.total_abandoned, data.total_started);
    let comparison: Vec<ProcedureStat> = data.procedures.iter().take(10).cloned().collect();
    let highlighted: Vec<ProcedureStat> = data.procedures.iter().take(4).cloned().collect();

    rsx! {
        RangeHeader {
            title: "Análisis de Procedimientos",
            subtitle: "Funnels de conversión y análisis de abandono de procedimientos",
            range,
            loading,
            on_refresh: move |_| {
                let current = range.peek().clone();
                load_procedures.call(current.clone());
                analyze.call(current);
            },
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| procedures.dismiss_error() }
        div { style: "{grid_style(4)}",
            MetricCard { title: "Procedimientos Iniciados", value: data.total_started as f64, loading }
            MetricCard { title: "Procedimientos Completados", value: data.total_completed as f64, color: StatColor::Green, loading }
            MetricCard { title: "Procedimientos Abandonados", value: data.total_abandoned as f64, color: StatColor::Red, loading }
            MetricCard { title: "Tasa de Conversión", value: conversion, format: ValueFormat::Percentage, color: StatColor::Accent, loading }
        }
        div { style: "{card_style()} margin-bottom: 16px;",
            label { style: "{label_style()}", "Pasos del funnel (separados por coma)" }
            div { style: "display: flex; gap: 8px;",
                input {
                    style: "{input_style()}",
                    value: "{steps_input}",
                    oninput: move |evt| steps_input.set(evt.value()),
                }
                button {
                    style: "{button_style(ButtonKind::Primary, funnel_loading)}",
                    disabled: funnel_loading,
                    onclick: move |_| analyze.call(range.peek().clone()),
                    "Analizar"
                }
                button {
                    style: "{button_style(ButtonKind::Secondary, funnel_loading)}",
                    disabled: funnel_loading,
                    onclick: move |_| {
                        steps_input.set(DEFAULT_STEPS.to_string());
                        analyze.call(range.peek().clone());
                    },
                    "Restablecer"
                }
            }
        }
        ErrorBanner { message: funnel_state.error.clone(), on_dismiss: move |_| funnel.dismiss_error() }
        div { style: "margin-bottom: 16px;",
            FunnelChart { title: "Funnel General de Procedimientos", steps }
        }
        ProcedureComparison { procedures: comparison }
        div { style: "{grid_style(2)}",
            for procedure in highlighted.iter() {
                ProcedureCard { key: "{procedure.procedure_type}", procedure: procedure.clone() }
            }
        }
        if abandonment > ABANDONMENT_ALERT {
            div { style: "{card_style()} background: #fefce8; border-color: #fde68a;",
                h4 { style: "margin: 0; color: #854d0e;", "Alta tasa de abandono detectada" }
                p { style: "margin: 4px 0 0 0; font-size: 14px; color: #a16207;",
                    "El {abandonment:.1}% de los procedimientos están siendo abandonados. "
                    "Considera revisar los pasos con mayor tasa de abandono y optimizar la experiencia del usuario."
                }
            }
        }
    }
}

/// Started, completed and abandoned per procedure type, on a shared scale.
#[component]
fn ProcedureComparison(procedures: Vec<ProcedureStat>) -> Element {
    let max = procedures.iter().map(|procedure| procedure.started).max().unwrap_or(0);
    let width = |value: u64| if max > 0 { value as f64 / max as f64 * 100.0 } else { 0.0 };
    rsx! {
        div { style: "{card_style()} margin-bottom: 16px;",
            h3 { style: "{section_title_style()}", "Comparación de Procedimientos" }
            if procedures.is_empty() {
                p { style: "color: #6b7280; text-align: center; padding: 24px 0;", "No hay datos disponibles" }
            }
            for procedure in procedures.iter() {
                div { key: "{procedure.procedure_type}", style: "margin-bottom: 12px;",
                    p { style: "font-size: 13px; margin: 0 0 4px 0;", title: "{procedure.procedure_type}",
                        "{truncate_label(&procedure.procedure_type, 15)}"
                    }
                    for (value, color) in [(procedure.started, PRIMARY), (procedure.completed, "#10b981"), (procedure.abandoned, "#ef4444")] {
                        div { style: "display: flex; align-items: center; gap: 8px; margin-bottom: 2px;",
                            div { style: "{bar_track_style(8)} flex: 1;",
                                div { style: "{bar_fill_style(width(value), color)}" }
                            }
                            span { style: "font-size: 12px; width: 48px; text-align: right;", "{format_number(value as f64)}" }
                        }
                    }
                }
            }
            div { style: "display: flex; gap: 12px; font-size: 12px;",
                span { style: "color: {PRIMARY};", "■ Iniciados" }
                span { style: "color: #10b981;", "■ Completados" }
                span { style: "color: #ef4444;", "■ Abandonados" }
            }
        }
    }
}

#[component]
fn ProcedureCard(procedure: ProcedureStat) -> Element {
    let minutes = procedure.avg_duration.filter(|secs| *secs > 0.0).map(|secs| (secs / 60.0).round());
    rsx! {
        div { style: "{card_style()}",
            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 12px;",
                h3 { style: "{section_title_style()} margin: 0;", "{procedure.procedure_type}" }
                span { style: "{badge_style(conversion_colors(procedure.conversion_rate))}",
                    "{procedure.conversion_rate}% conversión"
                }
            }
            MiniBar { label: "Iniciados", value: procedure.started, width: 100.0, color: PRIMARY }
            MiniBar { label: "Completados", value: procedure.completed, width: procedure.conversion_rate, color: "#22c55e" }
            MiniBar { label: "Abandonados", value: procedure.abandoned, width: procedure.abandonment_rate, color: "#ef4444" }
            if let Some(minutes) = minutes {
                p { style: "font-size: 13px; color: #4b5563; border-top: 1px solid #e5e7eb; padding-top: 8px; margin: 12px 0 0 0;",
                    "Tiempo promedio: {minutes} minutos"
                }
            }
            if !procedure.funnel.is_empty() {
                p { style: "font-size: 13px; font-weight: 500; margin: 12px 0 6px 0;", "Pasos del procedimiento" }
                for (idx, step) in procedure.funnel.iter().enumerate() {
                    div { key: "{idx}", style: "display: flex; align-items: center; gap: 8px; margin-bottom: 4px;",
                        span { style: "font-size: 11px; color: #4b5563; min-width: 120px;", "{step.step_name}" }
                        div { style: "{bar_track_style(8)} flex: 1;",
                            div { style: "{bar_fill_style(rate(step.users, procedure.started), PRIMARY)}" }
                        }
                        span { style: "font-size: 12px; color: #6b7280;", "{step.users}" }
                    }
                }
            }
        }
    }
}

#[component]
fn MiniBar(label: &'static str, value: u64, width: f64, color: &'static str) -> Element {
    rsx! {
        div { style: "margin-bottom: 8px;",
            div { style: "display: flex; justify-content: space-between; font-size: 13px; margin-bottom: 2px;",
                span { style: "color: #4b5563;", "{label}" }
                span { style: "font-weight: 500; color: {color};", "{value}" }
            }
            div { style: "{bar_track_style(8)}",
                div { style: "{bar_fill_style(width, color)}" }
            }
        }
    }
}
