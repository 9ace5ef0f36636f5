use crate::domain::format::BadgeColors;

pub const PRIMARY: &str = "#2c3b95";
pub const ACCENT: &str = "#30bce1";

pub fn root_container_style() -> String {
    "font-family: 'Inter', 'Segoe UI', sans-serif; display: flex; height: 100vh; overflow: hidden; background: #f3f4f6; color: #111827;".to_string()
}

pub fn sidebar_style() -> String {
    format!("width: 240px; flex-shrink: 0; background: {PRIMARY}; color: #fff; display: flex; flex-direction: column; padding: 16px 0; overflow-y: auto;")
}

pub fn nav_link_style(active: bool) -> String {
    let background = if active { "rgba(255,255,255,0.18)" } else { "transparent" };
    let weight = if active { 600 } else { 400 };
    format!("display: block; padding: 8px 20px; color: #fff; text-decoration: none; background: {background}; font-weight: {weight}; font-size: 14px;")
}

pub fn content_style() -> String {
    "flex: 1; min-width: 0; overflow: auto; padding: 24px;".to_string()
}

pub fn card_style() -> &'static str {
    "background: #fff; border: 1px solid #e5e7eb; border-radius: 10px; padding: 16px; box-shadow: 0 1px 2px rgba(0,0,0,0.05);"
}

pub fn grid_style(columns: usize) -> String {
    format!("display: grid; grid-template-columns: repeat({columns}, minmax(0, 1fr)); gap: 16px; margin-bottom: 16px;")
}

pub fn page_title_style() -> &'static str {
    "font-size: 26px; font-weight: 700; margin: 0;"
}

pub fn page_subtitle_style() -> &'static str {
    "color: #4b5563; margin: 4px 0 20px 0;"
}

pub fn section_title_style() -> &'static str {
    "font-size: 17px; font-weight: 600; margin: 0 0 12px 0;"
}

pub fn table_container_style() -> String {
    "overflow: auto; flex: 1; min-height: 0; border: 1px solid #e5e7eb; border-radius: 8px; background: #fff;".to_string()
}

pub fn table_header_cell_style() -> String {
    "position: sticky; top: 0; background: #f9fafb; border-bottom: 1px solid #e5e7eb; padding: 8px 12px; text-align: left; font-size: 12px; text-transform: uppercase; color: #6b7280; z-index: 1;".to_string()
}

pub fn table_cell_style() -> &'static str {
    "border-bottom: 1px solid #f3f4f6; padding: 8px 12px; font-size: 14px; vertical-align: top;"
}

pub fn badge_style(colors: BadgeColors) -> String {
    let (background, foreground) = colors;
    format!("display: inline-block; padding: 2px 8px; border-radius: 9999px; font-size: 12px; font-weight: 600; background: {background}; color: {foreground};")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Primary,
    Secondary,
    Danger,
}

pub fn button_style(kind: ButtonKind, disabled: bool) -> String {
    let (background, color, border) = match kind {
        ButtonKind::Primary => (PRIMARY, "#fff", PRIMARY),
        ButtonKind::Secondary => ("#fff", "#374151", "#d1d5db"),
        ButtonKind::Danger => ("#dc2626", "#fff", "#dc2626"),
    };
    let (opacity, cursor) = if disabled { ("0.5", "not-allowed") } else { ("1", "pointer") };
    format!("border: 1px solid {border}; background: {background}; color: {color}; padding: 6px 14px; border-radius: 6px; cursor: {cursor}; opacity: {opacity}; font-size: 14px;")
}

pub fn input_style() -> &'static str {
    "border: 1px solid #d1d5db; border-radius: 6px; padding: 6px 10px; font-size: 14px; width: 100%; box-sizing: border-box;"
}

pub fn label_style() -> &'static str {
    "display: block; font-size: 13px; font-weight: 500; color: #374151; margin-bottom: 4px;"
}

pub fn bar_track_style(height_px: u32) -> String {
    format!("position: relative; height: {height_px}px; background: #f3f4f6; border-radius: 6px; overflow: hidden;")
}

pub fn bar_fill_style(width_pct: f64, color: &str) -> String {
    let width = width_pct.clamp(0.0, 100.0);
    format!("height: 100%; width: {width:.1}%; background: {color}; border-radius: 6px;")
}

pub fn tab_style(active: bool) -> String {
    let border = if active { PRIMARY } else { "transparent" };
    let color = if active { PRIMARY } else { "#6b7280" };
    format!("padding: 8px 14px; border: none; border-bottom: 2px solid {border}; background: none; color: {color}; cursor: pointer; font-weight: 500;")
}
