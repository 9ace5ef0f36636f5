use dioxus::prelude::*;

use crate::domain::charts::BarDatum;
use crate::domain::entities::analytics::PrivacyDashboard;
use crate::domain::entities::date_range::{DatePreset, DateRange};
use crate::domain::format::{format_number, ValueFormat};
use crate::platform;
use crate::ui::components::{BarChart, ErrorBanner, MetricCard, StatColor};
use crate::ui::pages::analytics::{export_user, RangeHeader};
use crate::ui::state::app_state::ApiContext;
use crate::ui::state::query::use_query;
use crate::ui::styles::{
    bar_fill_style, bar_track_style, button_style, card_style, grid_style, input_style, label_style,
    section_title_style, ButtonKind,
};
use crate::usecase::ports::api::ApiError;

const USER_RIGHTS: [&str; 4] = [
    "Derecho de acceso a sus datos personales",
    "Derecho de rectificación de datos inexactos",
    "Derecho de cancelación (eliminación)",
    "Derecho de oposición al tratamiento",
];

const MEASURES: [&str; 4] = [
    "Consentimiento explícito requerido para analytics",
    "Anonimización de datos sin consentimiento",
    "Exportación de datos en formato portable",
    "Eliminación completa bajo solicitud",
];

/// Headline and colours for a consent rate: good from 80%, moderate from 50%.
fn compliance(rate: f64) -> (&'static str, &'static str, &'static str) {
    if rate >= 80.0 {
        ("Buen nivel de cumplimiento", "#f0fdf4", "#166534")
    } else if rate >= 50.0 {
        ("Nivel de cumplimiento moderado", "#fefce8", "#854d0e")
    } else {
        ("Nivel de cumplimiento bajo", "#fef2f2", "#991b1b")
    }
}

#[component]
pub fn PrivacyAnalytics() -> Element {
    let api = use_context::<ApiContext>();
    let query = use_query::<PrivacyDashboard>();
    let range = use_signal(|| DateRange::from_preset(DatePreset::Last30Days));

    let load = use_callback(move |range: DateRange| {
        let api = api.clone();
        query.run(async move { api.analytics.dashboard_privacy(range.to_params()).await });
    });
    use_effect(move || load.call(range()));

    let state = query.snapshot();
    let data = state.data.clone().unwrap_or_default();
    let loading = state.is_loading();
    let (headline, background, foreground) = compliance(data.consent_rate);
    let consented = data.total_with_consent + data.total_without_consent;
    let with_share = if consented > 0 { data.total_with_consent as f64 / consented as f64 * 100.0 } else { 0.0 };
    let consent_fill = bar_fill_style(with_share, "#10b981");
    let changes = vec![
        BarDatum::new("Otorgados", data.consents_granted as f64, "#10b981"),
        BarDatum::new("Revocados", data.consents_revoked as f64, "#ef4444"),
    ];

    rsx! {
        RangeHeader {
            title: "Privacidad & Consentimiento",
            subtitle: "Cumplimiento con Ley 29733 de Protección de Datos Personales",
            range,
            loading,
            on_refresh: move |_| load.call(range.peek().clone()),
        }
        ErrorBanner { message: state.error.clone(), on_dismiss: move |_| query.dismiss_error() }
        div { style: "{card_style()} background: {background}; margin-bottom: 16px;",
            h4 { style: "margin: 0; color: {foreground};", "{headline}" }
            p { style: "margin: 4px 0 0 0; font-size: 14px; color: {foreground};",
                "El {data.consent_rate:.1}% de los eventos tienen consentimiento de analytics."
            }
        }
        div { style: "{grid_style(4)}",
            MetricCard { title: "Tasa de Consentimiento", value: data.consent_rate, format: ValueFormat::Percentage, loading }
            MetricCard { title: "Consentimientos Otorgados", value: data.consents_granted as f64, color: StatColor::Green, loading }
            MetricCard { title: "Consentimientos Revocados", value: data.consents_revoked as f64, color: StatColor::Red, loading }
            MetricCard { title: "Cambio Neto", value: data.net_consent_change() as f64, color: StatColor::Accent, loading }
        }
        div { style: "{grid_style(2)}",
            MetricCard { title: "Solicitudes de Exportación", value: data.export_requests as f64, color: StatColor::Dark, loading }
            MetricCard { title: "Solicitudes de Eliminación", value: data.deletion_requests as f64, color: StatColor::Yellow, loading }
        }
        div { style: "{grid_style(2)}",
            div { style: "{card_style()}",
                h3 { style: "{section_title_style()}", "Distribución de Consentimiento" }
                div { style: "{bar_track_style(22)} background: #ef4444;",
                    div { style: "{consent_fill} border-radius: 0;" }
                }
                div { style: "display: flex; justify-content: space-between; font-size: 13px; color: #4b5563; margin-top: 8px;",
                    span { "■ Con Consentimiento ({format_number(data.total_with_consent as f64)})" }
                    span { "■ Sin Consentimiento ({format_number(data.total_without_consent as f64)})" }
                }
            }
            BarChart { title: "Cambios de Consentimiento", data: changes }
        }
        div { style: "{card_style()} margin-bottom: 16px;",
            h3 { style: "{section_title_style()}", "Información de Cumplimiento - Ley 29733" }
            div { style: "display: grid; grid-template-columns: repeat(2, minmax(0, 1fr)); gap: 16px;",
                div {
                    h4 { style: "margin: 0 0 8px 0;", "Derechos del Usuario" }
                    ul { style: "margin: 0; padding-left: 18px; font-size: 14px; color: #4b5563;",
                        for item in USER_RIGHTS { li { key: "{item}", "{item}" } }
                    }
                }
                div {
                    h4 { style: "margin: 0 0 8px 0;", "Medidas Implementadas" }
                    ul { style: "margin: 0; padding-left: 18px; font-size: 14px; color: #4b5563;",
                        for item in MEASURES { li { key: "{item}", "{item}" } }
                    }
                }
            }
        }
        DataRequests {}
        if state.data.is_some() && data.consent_rate < 50.0 {
            div { style: "{card_style()} background: #fef2f2; border-color: #fecaca; margin-top: 16px;",
                h4 { style: "margin: 0; color: #991b1b;", "Atención: Nivel bajo de consentimiento" }
                p { style: "margin: 4px 0 0 0; font-size: 14px; color: #b91c1c;",
                    "Menos del 50% de los usuarios han otorgado consentimiento para analytics. "
                    "Considera revisar el flujo de solicitud de consentimiento y la claridad de la política de privacidad."
                }
            }
        }
    }
}

/// Export or erase everything stored about one user.
#[component]
fn DataRequests() -> Element {
    let api = use_context::<ApiContext>();
    let action = use_query::<String>();
    let mut user_id = use_signal(String::new);

    let export = {
        let api = api.clone();
        move |_| action.run(export_user(api.clone(), user_id.peek().trim().to_string()))
    };
    let erase = move |_| {
        let id = user_id.peek().trim().to_string();
        if id.is_empty() {
            action.reject(ApiError::InvalidInput(
                "Ingrese un ID de usuario".to_string(),
            ));
            return;
        }
        let prompt = format!("Se eliminarán permanentemente todos los datos de analytics del usuario {id}. ¿Continuar?");
        if !platform::confirm("Eliminar datos de usuario", &prompt) {
            return;
        }
        let api = api.clone();
        action.run(async move {
            api.analytics.delete_user_data(&id).await?;
            tracing::info!(user = %id, "user analytics data deleted");
            Ok(format!("Datos del usuario {id} eliminados"))
        });
    };

    let state = action.snapshot();
    let busy = state.is_loading();
    rsx! {
        div { style: "{card_style()}",
            h3 { style: "{section_title_style()}", "Solicitudes de Datos Personales" }
            label { style: "{label_style()}", "ID de Usuario" }
            div { style: "display: flex; gap: 8px;",
                input {
                    style: "{input_style()}",
                    value: "{user_id}",
                    placeholder: "Ej: 12345",
                    oninput: move |evt| user_id.set(evt.value()),
                }
                button { style: "{button_style(ButtonKind::Primary, busy)}", disabled: busy, onclick: export, "Exportar datos" }
                button { style: "{button_style(ButtonKind::Danger, busy)}", disabled: busy, onclick: erase, "Eliminar datos" }
            }
            ErrorBanner { message: state.error.clone(), on_dismiss: move |_| action.dismiss_error() }
            if let Some(message) = state.data.clone().filter(|_| state.error.is_none()) {
                p { style: "margin: 8px 0 0 0; font-size: 14px; color: #166534;", "{message}" }
            }
        }
    }
}
