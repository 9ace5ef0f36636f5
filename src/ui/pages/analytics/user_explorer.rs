use dioxus::prelude::*;

use crate::domain::diff::param_chips;
use crate::domain::entities::analytics::{UserEvent, UserTimeline};
use crate::domain::entities::date_range::DateRange;
use crate::domain::format::{format_date, format_timestamp, or_dash};
use crate::ui::components::{ErrorBanner, MetricCard, StatColor, StatCard};
use crate::ui::pages::analytics::{default_range, export_user, RangeHeader};
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::{button_style, card_style, grid_style, input_style, section_title_style, ButtonKind, PRIMARY};
use crate::usecase::ports::api::ApiError;

const EVENT_TYPES: [(&str, &str); 8] = [
    ("all", "Todos los eventos"),
    ("SESSION", "Sesiones"),
    ("AUTH", "Autenticación"),
    ("NAVIGATION", "Navegación"),
    ("PROCEDURE", "Procedimientos"),
    ("ACADEMIC", "Académico"),
    ("PERFORMANCE", "Rendimiento"),
    ("PRIVACY", "Privacidad"),
];

#[derive(Debug, Clone, PartialEq)]
struct TimelineRequest {
    user_id: String,
    range: DateRange,
    event_type: String,
    page: u32,
}

async fn load_timeline(api: ApiContext, request: TimelineRequest) -> Result<UserTimeline, ApiError> {
    let mut params = request.range.to_params().with("page", request.page.to_string());
    if request.event_type != "all" {
        params.insert("eventType", request.event_type);
    }
    api.analytics.user_timeline(&request.user_id, params).await
}

#[component]
pub fn UserExplorer() -> Element {
    let api = use_context::<ApiContext>();
    let timeline = use_query::<UserTimeline>();
    let export = use_query::<String>();
    let range = use_signal(default_range);
    let mut search = use_signal(String::new);
    let mut selected = use_signal(|| None::<String>);
    let mut event_type = use_signal(|| "all".to_string());
    let mut page = use_signal(|| 1u32);

    let load = use_callback({
        let api = api.clone();
        move |request: TimelineRequest| timeline.run(load_timeline(api.clone(), request))
    });
    use_effect(move || {
        let Some(user_id) = selected() else {
            return;
        };
        load.call(TimelineRequest {
            user_id,
            range: range(),
            event_type: event_type(),
            page: page(),
        });
    });

    let mut select_user = move |_| {
        let id = search.peek().trim().to_string();
        if id.is_empty() {
            timeline.reject(ApiError::InvalidInput("Ingrese un ID de usuario".to_string()));
            return;
        }
        page.set(1);
        selected.set(Some(id));
        search.set(String::new());
    };
    let on_export = move |_| {
        if let Some(id) = selected.peek().clone() {
            export.run(export_user(api.clone(), id));
        }
    };

    let state = timeline.snapshot();
    let data = state.data.clone().unwrap_or_default();
    let loading = state.is_loading();
    let export_state = export.snapshot();
    let current_type = event_type();
    let current_page = data.current_page.max(1);
    let first_seen = data.events.last().map(|event| format_date(&event.timestamp));
    let shown = data.events.len();

    rsx! {
        RangeHeader {
            title: "Explorador de Usuarios",
            subtitle: "Busca y analiza la actividad de usuarios individuales",
            range,
            loading,
            on_refresh: move |_| {
                if let Some(user_id) = selected.peek().clone() {
                    load.call(TimelineRequest {
                        user_id,
                        range: range.peek().clone(),
                        event_type: event_type.peek().clone(),
                        page: *page.peek(),
                    });
                }
            },
        }
        div { style: "{card_style()} margin-bottom: 16px; display: flex; gap: 8px;",
            input {
                style: "{input_style()}",
                placeholder: "Buscar por ID de usuario...",
                value: "{search}",
                oninput: move |evt| search.set(evt.value()),
                onkeydown: move |evt| {
                    if evt.key() == Key::Enter {
                        select_user(());
                    }
                },
            }
            button { style: "{button_style(ButtonKind::Primary, loading)}", disabled: loading, onclick: move |_| select_user(()), "Buscar" }
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| timeline.dismiss_error() }
        {match selected() {
            None => rsx! {
                div { style: "{card_style()} text-align: center; padding: 48px;",
                    h3 { style: "margin: 0 0 8px 0;", "Busca un usuario para explorar" }
                    p { style: "color: #6b7280; max-width: 420px; margin: 0 auto;",
                        "Utiliza el campo de búsqueda para encontrar usuarios por ID. "
                        "Podrás ver su línea de tiempo de actividad y estadísticas detalladas."
                    }
                }
            },
            Some(user_id) => rsx! {
                div { style: "{card_style()} margin-bottom: 16px; display: flex; justify-content: space-between; align-items: center;",
                    div {
                        h2 { style: "margin: 0; font-size: 20px;", "{user_id}" }
                        p { style: "margin: 4px 0 0 0; font-size: 13px; color: #6b7280;",
                            "Plataforma: {or_dash(data.platform())}"
                        }
                    }
                    div { style: "display: flex; gap: 8px;",
                        button {
                            style: "{button_style(ButtonKind::Secondary, export_state.is_loading())}",
                            disabled: export_state.is_loading(),
                            onclick: on_export,
                            "Exportar datos"
                        }
                        button {
                            style: "{button_style(ButtonKind::Secondary, false)}",
                            onclick: move |_| selected.set(None),
                            "Cerrar"
                        }
                    }
                }
                ErrorBanner { message: export_state.error.clone(), on_dismiss: move |_| export.dismiss_error() }
                if let Some(message) = export_state.data.clone().filter(|_| export_state.error.is_none()) {
                    p { style: "font-size: 14px; color: #166534;", "{message}" }
                }
                div { style: "{grid_style(3)}",
                    MetricCard { title: "Total de Eventos", value: data.total_events as f64, loading }
                    MetricCard { title: "Sesiones", value: data.session_count() as f64, color: StatColor::Accent, loading }
                    StatCard { title: "Primera Actividad", value: first_seen.unwrap_or_else(|| "-".to_string()), color: StatColor::Dark }
                }
                div { style: "{card_style()}",
                    div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 12px;",
                        h3 { style: "{section_title_style()} margin: 0;", "Línea de Tiempo de Actividad" }
                        label { style: "display: flex; align-items: center; gap: 8px; font-size: 13px;",
                            "Filtrar por tipo:"
                            select {
                                style: "{input_style()} width: 180px;",
                                onchange: move |evt| {
                                    page.set(1);
                                    event_type.set(evt.value());
                                },
                                for (value, label) in EVENT_TYPES {
                                    option { key: "{value}", value, selected: current_type == value, "{label}" }
                                }
                            }
                        }
                    }
                    if data.events.is_empty() && !loading {
                        div { style: "text-align: center; color: #6b7280; padding: 40px 0;",
                            p { style: "margin: 0;", "No hay eventos para mostrar" }
                            p { style: "margin: 4px 0 0 0; font-size: 13px;", "Intenta ajustar el rango de fechas o filtros" }
                        }
                    }
                    for (idx, event) in data.events.iter().enumerate() {
                        EventRow { key: "{idx}", event: event.clone() }
                    }
                    if data.total_pages > 1 {
                        div { style: "display: flex; justify-content: space-between; align-items: center; border-top: 1px solid #e5e7eb; padding-top: 12px; margin-top: 8px;",
                            span { style: "font-size: 13px; color: #6b7280;",
                                "Mostrando {shown} de {data.total_events} eventos"
                            }
                            div { style: "display: flex; gap: 8px;",
                                button {
                                    style: "{button_style(ButtonKind::Secondary, current_page <= 1)}",
                                    disabled: current_page <= 1,
                                    onclick: move |_| page.set(current_page.saturating_sub(1).max(1)),
                                    "Anterior"
                                }
                                button {
                                    style: "{button_style(ButtonKind::Secondary, current_page >= data.total_pages)}",
                                    disabled: current_page >= data.total_pages,
                                    onclick: move |_| page.set(current_page + 1),
                                    "Siguiente"
                                }
                            }
                        }
                    }
                }
            },
        }}
    }
}

#[component]
fn EventRow(event: UserEvent) -> Element {
    let chips = param_chips(&event.parameters, 5);
    let name = event.event_name.clone().unwrap_or_else(|| "evento".to_string());
    rsx! {
        div { style: "display: flex; gap: 12px; padding: 10px 0; border-bottom: 1px solid #f3f4f6;",
            div { style: "width: 8px; height: 8px; border-radius: 9999px; background: {PRIMARY}; margin-top: 6px; flex-shrink: 0;" }
            div { style: "flex: 1; min-width: 0;",
                div { style: "display: flex; justify-content: space-between; gap: 8px;",
                    span { style: "font-weight: 600;", "{name}" }
                    span { style: "font-size: 12px; color: #6b7280;", "{format_timestamp(&event.timestamp)}" }
                }
                div { style: "font-size: 12px; color: #6b7280; margin: 2px 0 4px 0;",
                    "{or_dash(event.event_type.as_deref())}"
                    if let Some(platform) = event.platform() {
                        " · {platform}"
                    }
                }
                div { style: "display: flex; flex-wrap: wrap; gap: 4px;",
                    for (key, value) in chips {
                        span { key: "{key}", style: "background: #f3f4f6; color: #4b5563; border-radius: 4px; padding: 1px 6px; font-size: 12px;",
                            "{key}: {value}"
                        }
                    }
                }
            }
        }
    }
}
