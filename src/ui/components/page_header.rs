use dioxus::prelude::*;

use crate::ui::styles::{page_subtitle_style, page_title_style};

#[component]
pub fn PageHeader(title: String, subtitle: String, actions: Option<Element>) -> Element {
    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: flex-start; gap: 16px; flex-wrap: wrap;",
            div {
                h1 { style: "{page_title_style()}", "{title}" }
                p { style: "{page_subtitle_style()}", "{subtitle}" }
            }
            if let Some(actions) = actions {
                div { style: "display: flex; gap: 8px; align-items: center; flex-wrap: wrap;", {actions} }
            }
        }
    }
}
