use dioxus::prelude::*;

use crate::ui::styles::{card_style, ACCENT, PRIMARY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatColor {
    #[default]
    Main,
    Accent,
    Dark,
    Green,
    Red,
    Yellow,
}

impl StatColor {
    pub fn hex(self) -> &'static str {
        match self {
            StatColor::Main => PRIMARY,
            StatColor::Accent => ACCENT,
            StatColor::Dark => "#072d3e",
            StatColor::Green => "#22c55e",
            StatColor::Red => "#ef4444",
            StatColor::Yellow => "#eab308",
        }
    }
}

#[component]
pub fn StatCard(
    title: String,
    value: String,
    subtitle: Option<String>,
    #[props(default)] color: StatColor,
) -> Element {
    let accent = color.hex();
    rsx! {
        div { style: "{card_style()} border-left: 4px solid {accent};",
            p { style: "font-size: 13px; font-weight: 500; color: #4b5563; margin: 0 0 4px 0;", "{title}" }
            p { style: "font-size: 28px; font-weight: 700; margin: 0;", "{value}" }
            if let Some(subtitle) = subtitle {
                p { style: "font-size: 13px; color: #6b7280; margin: 4px 0 0 0;", "{subtitle}" }
            }
        }
    }
}
