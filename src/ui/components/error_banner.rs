use dioxus::prelude::*;

/// Dismissible failure notice, shown above whatever data is still on screen.
#[component]
pub fn ErrorBanner(message: Option<String>, on_dismiss: EventHandler<()>) -> Element {
    let Some(message) = message else {
        return rsx! {};
    };
    rsx! {
        div {
            role: "alert",
            style: "display: flex; align-items: center; justify-content: space-between; gap: 12px; background: #fef2f2; border: 1px solid #fecaca; color: #991b1b; padding: 10px 14px; border-radius: 8px; margin-bottom: 16px; font-size: 14px;",
            span { "{message}" }
            button {
                style: "border: none; background: none; color: #991b1b; cursor: pointer; font-size: 16px;",
                title: "Cerrar",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}
