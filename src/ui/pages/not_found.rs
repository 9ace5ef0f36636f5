use dioxus::prelude::*;

use crate::router::Route;
use crate::ui::styles::{card_style, page_title_style, PRIMARY};

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    tracing::debug!(%path, "unknown route");
    rsx! {
        div { style: "{card_style()} max-width: 520px; margin: 48px auto; text-align: center;",
            h1 { style: "{page_title_style()}", "Página no encontrada" }
            p { style: "color: #6b7280; margin: 12px 0 20px 0;",
                "La ruta "
                code { "{path}" }
                " no existe."
            }
            Link {
                to: Route::Dashboard {},
                style: "color: {PRIMARY}; font-weight: 600;",
                "Volver al Panel Principal"
            }
        }
    }
}
