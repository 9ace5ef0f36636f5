use chrono::Utc;
use dioxus::prelude::*;

use crate::domain::entities::analytics::AnalyticsEvent;

use crate::ui::pages::analytics::{
    AcademicAnalytics, AnalyticsOverview, GeoAnalytics, NavigationAnalytics, PerformanceAnalytics,
    PrivacyAnalytics, ProcedureAnalytics, SessionAnalytics, UserBehavior, UserExplorer,
};
use crate::ui::pages::{
    AccessAudit, Dashboard, DataAudit, EndpointAnalytics, ForensicAnalysis, NotFound,
    RecordTimeline,
};
use crate::ui::state::app_state::{ApiContext, AppState};
use crate::ui::styles::{content_style, nav_link_style, root_container_style, sidebar_style};

#[derive(Routable, Clone, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[redirect("/", || Route::Dashboard {})]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/data-audit")]
        DataAudit {},
        #[route("/access-audit")]
        AccessAudit {},
        #[route("/record-timeline")]
        RecordTimeline {},
        #[route("/endpoint-analytics")]
        EndpointAnalytics {},
        #[route("/forensic-analysis")]
        ForensicAnalysis {},
        #[nest("/analytics")]
            #[redirect("/", || Route::AnalyticsOverview {})]
            #[route("/overview")]
            AnalyticsOverview {},
            #[route("/behavior")]
            UserBehavior {},
            #[route("/sessions")]
            SessionAnalytics {},
            #[route("/navigation")]
            NavigationAnalytics {},
            #[route("/procedures")]
            ProcedureAnalytics {},
            #[route("/academic")]
            AcademicAnalytics {},
            #[route("/performance")]
            PerformanceAnalytics {},
            #[route("/geo")]
            GeoAnalytics {},
            #[route("/privacy")]
            PrivacyAnalytics {},
            #[route("/users")]
            UserExplorer {},
        #[end_nest]
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

pub struct NavSection {
    pub title: &'static str,
    pub items: Vec<(Route, &'static str)>,
}

pub fn nav_sections() -> Vec<NavSection> {
    vec![
        NavSection {
            title: "Auditoría",
            items: vec![
                (Route::Dashboard {}, "Panel Principal"),
                (Route::DataAudit {}, "Auditoría de Datos"),
                (Route::AccessAudit {}, "Auditoría de Acceso"),
                (Route::RecordTimeline {}, "Línea de Tiempo"),
                (Route::EndpointAnalytics {}, "Análisis de Endpoints"),
                (Route::ForensicAnalysis {}, "Análisis Forense"),
            ],
        },
        NavSection {
            title: "Analytics Avanzado",
            items: vec![
                (Route::AnalyticsOverview {}, "Overview"),
                (Route::UserBehavior {}, "User Behavior"),
                (Route::SessionAnalytics {}, "Sesiones & Auth"),
                (Route::NavigationAnalytics {}, "Navegación"),
                (Route::ProcedureAnalytics {}, "Procedimientos"),
                (Route::AcademicAnalytics {}, "Académico"),
                (Route::PerformanceAnalytics {}, "Rendimiento"),
                (Route::GeoAnalytics {}, "Geográfico"),
                (Route::PrivacyAnalytics {}, "Privacidad"),
                (Route::UserExplorer {}, "Explorador"),
            ],
        },
    ]
}

/// Persistent frame: sidebar navigation around the routed page.
#[component]
fn Shell() -> Element {
    let current = use_route::<Route>();
    let api = use_context::<ApiContext>();
    let host = api.config.api_base_url.host_str().unwrap_or_default().to_string();
    let path = current.to_string();

    rsx! {
        div { style: "{root_container_style()}",
            nav { style: "{sidebar_style()}",
                h1 { style: "font-size: 20px; font-weight: 700; padding: 0 20px; margin: 0 0 20px 0;", "Sistema de Auditoría" }
                for section in nav_sections() {
                    div { key: "{section.title}", style: "margin-bottom: 20px;",
                        p { style: "padding: 0 20px; font-size: 11px; font-weight: 600; text-transform: uppercase; letter-spacing: 0.05em; color: rgba(255,255,255,0.6); margin: 0 0 6px 0;",
                            "{section.title}"
                        }
                        for (route, label) in section.items {
                            Link {
                                key: "{label}",
                                to: route.clone(),
                                style: "{nav_link_style(route == current)}",
                                "{label}"
                            }
                        }
                    }
                }
                p { style: "margin-top: auto; padding: 0 20px; font-size: 12px; color: rgba(255,255,255,0.6);",
                    "API: {host}"
                }
            }
            main { style: "{content_style()}",
                PageViewTracker { key: "{path}", path: path.clone() }
                Outlet::<Route> {}
            }
        }
    }
}

/// Reports one page view each time a route is mounted. Undelivered views are
/// kept and retried with the next one.
#[component]
fn PageViewTracker(path: String) -> Element {
    let api = use_context::<ApiContext>();
    let mut outbox = use_context::<AppState>().outbox;
    use_effect(move || {
        let events = {
            let mut pending = outbox.write();
            pending.push(AnalyticsEvent::page_view(&path, Utc::now()));
            pending.take()
        };
        let api = api.clone();
        spawn(async move {
            if let Err(err) = api.analytics.send_events(&events).await {
                tracing::warn!(error = %err, count = events.len(), "page view not delivered");
                outbox.write().restore(events);
            }
        });
    });
    rsx! {}
}
