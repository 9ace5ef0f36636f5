use dioxus::prelude::*;
use serde_json::{Map, Value};

use crate::domain::entities::audit::{RecordKey, RecordLocator, TimelineEvent};
use crate::ui::components::{ErrorBanner, PageHeader, Timeline};
use crate::ui::state::app_state::{ApiContext, AppState};
use crate::ui::state::query::use_query;
use crate::ui::styles::{button_style, card_style, input_style, label_style, section_title_style, ButtonKind};

#[derive(Debug, Clone, Default, PartialEq)]
struct SearchForm {
    record_id: String,
    system_id: String,
    schema_name: String,
    table_name: String,
    /// Set when arriving from the data audit table; typing a record id drops it.
    composite: Option<Map<String, Value>>,
}

impl SearchForm {
    fn from_locator(locator: RecordLocator) -> Self {
        let record_id = locator.key.display_id();
        let composite = match locator.key {
            RecordKey::Composite(values) => Some(values),
            RecordKey::Id(_) => None,
        };
        Self {
            record_id,
            system_id: locator.system_id,
            schema_name: locator.schema_name,
            table_name: locator.table_name,
            composite,
        }
    }

    fn locator(&self) -> RecordLocator {
        let key = match &self.composite {
            Some(values) => RecordKey::Composite(values.clone()),
            None => RecordKey::Id(self.record_id.trim().to_string()),
        };
        RecordLocator {
            key,
            system_id: self.system_id.trim().to_string(),
            schema_name: self.schema_name.trim().to_string(),
            table_name: self.table_name.trim().to_string(),
        }
    }
}

#[component]
pub fn RecordTimeline() -> Element {
    let api = use_context::<ApiContext>();
    let app = use_context::<AppState>();
    let timeline = use_query::<Vec<TimelineEvent>>();
    let mut form = use_signal(SearchForm::default);
    let mut prefilled = use_signal(|| false);

    let search = use_callback(move |_: ()| {
        let locator = form.peek().locator();
        let api = api.clone();
        timeline.run(async move { api.audit.record_timeline(&locator).await });
    });

    use_effect(move || {
        let mut target = app.timeline_target;
        let Some(locator) = target.write().take() else {
            return;
        };
        form.set(SearchForm::from_locator(locator));
        prefilled.set(true);
        search.call(());
    });

    let state = timeline.snapshot();
    let events = state.data.clone().unwrap_or_default();
    let loading = state.is_loading();
    let current = form.read().clone();

    rsx! {
        PageHeader { title: "Línea de Tiempo de Registro", subtitle: "Ver historial completo de cambios de un registro específico" }
        if prefilled() {
            div { style: "background: #eff6ff; border-left: 4px solid #3b82f6; padding: 12px 16px; margin-bottom: 16px; font-size: 14px; color: #1d4ed8;",
                "✓ Parámetros cargados automáticamente desde la búsqueda anterior"
            }
        }
        div { style: "{card_style()} margin-bottom: 16px;",
            h3 { style: "{section_title_style()}", "Parámetros de Búsqueda" }
            div { style: "display: grid; grid-template-columns: repeat(4, minmax(0, 1fr)); gap: 12px;",
                div {
                    label { style: "{label_style()}", "ID de Registro " span { style: "color: #ef4444;", "*" } }
                    input {
                        style: "{input_style()}",
                        placeholder: "ej: 123",
                        value: "{current.record_id}",
                        oninput: move |evt| {
                            let mut form = form.write();
                            form.record_id = evt.value();
                            form.composite = None;
                        },
                    }
                }
                div {
                    label { style: "{label_style()}", "ID del Sistema " span { style: "color: #ef4444;", "*" } }
                    input {
                        style: "{input_style()}",
                        placeholder: "ej: intranet",
                        value: "{current.system_id}",
                        oninput: move |evt| form.write().system_id = evt.value(),
                    }
                }
                div {
                    label { style: "{label_style()}", "Nombre del Esquema " span { style: "color: #ef4444;", "*" } }
                    input {
                        style: "{input_style()}",
                        placeholder: "ej: dbo",
                        value: "{current.schema_name}",
                        oninput: move |evt| form.write().schema_name = evt.value(),
                    }
                }
                div {
                    label { style: "{label_style()}", "Nombre de la Tabla " span { style: "color: #ef4444;", "*" } }
                    input {
                        style: "{input_style()}",
                        placeholder: "ej: usuarios",
                        value: "{current.table_name}",
                        oninput: move |evt| form.write().table_name = evt.value(),
                    }
                }
            }
            if current.composite.is_some() {
                p { style: "font-size: 12px; color: #6b7280; margin: 8px 0 0 0;", "Clave compuesta del registro seleccionado" }
            }
            button {
                style: "{button_style(ButtonKind::Primary, loading)} margin-top: 16px;",
                disabled: loading,
                onclick: move |_| search.call(()),
                if loading { "Cargando..." } else { "Buscar Línea de Tiempo" }
            }
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| timeline.dismiss_error() }
        if events.is_empty() {
            div { style: "{card_style()} text-align: center; padding: 48px 16px;",
                p { style: "color: #6b7280; margin: 0;",
                    "Sin datos en la línea de tiempo. Ingrese los parámetros de búsqueda y haga clic en Buscar Línea de Tiempo."
                }
            }
        } else {
            Timeline { events }
        }
    }
}
