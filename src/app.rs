use std::sync::Arc;

use anyhow::Result;
use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::infra::http::client::HttpTransport;
use crate::router::Route;
use crate::ui::state::app_state::{ApiContext, AppState};

pub fn load_api_context() -> Result<ApiContext> {
    let config = AppConfig::load()?;
    let transport = HttpTransport::new(&config)?;
    tracing::info!(base_url = %config.api_base_url, auth = ?config.auth, "api client ready");
    Ok(ApiContext::new(config, Arc::new(transport)))
}

#[component]
pub fn App() -> Element {
    let loaded = use_hook(|| load_api_context().map_err(|err| format!("{err:#}")));
    match loaded {
        Ok(api) => rsx! {
            Console { api }
        },
        Err(err) => {
            tracing::error!(error = %err, "startup failed");
            rsx! {
                div { style: "font-family: sans-serif; padding: 24px; color: #991b1b;",
                    p { "No se pudo cargar la configuración: {err}" }
                }
            }
        }
    }
}

#[component]
fn Console(api: ApiContext) -> Element {
    use_context_provider(|| api.clone());
    let state = AppState::new();
    use_context_provider(|| state);
    rsx! {
        Router::<Route> {}
    }
}
