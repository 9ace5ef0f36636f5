//! Display formatting for metric values, timestamps and status badges.

use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::domain::entities::audit::Operation;

/// How a metric value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Number,
    Percentage,
    Duration,
    Bytes,
}

pub fn format_value(value: f64, format: ValueFormat) -> String {
    match format {
        ValueFormat::Number => format_number(value),
        ValueFormat::Percentage => format_percentage(value),
        ValueFormat::Duration => format_duration(value),
        ValueFormat::Bytes => format_bytes(value),
    }
}

/// es-PE grouping: `,` for thousands, `.` for decimals, at most three
/// fraction digits.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let text = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative && (grouped != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Seconds to `Ns`, `Mm Ss` or `Hh Mm`.
pub fn format_duration(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    if seconds >= 3600.0 {
        let hours = (seconds / 3600.0).floor();
        let minutes = ((seconds % 3600.0) / 60.0).floor();
        format!("{hours}h {minutes}m")
    } else if seconds >= 60.0 {
        let minutes = (seconds / 60.0).floor();
        let secs = (seconds % 60.0).floor();
        format!("{minutes}m {secs}s")
    } else {
        format!("{}s", seconds.floor())
    }
}

/// Milliseconds, truncated to whole seconds first.
pub fn format_duration_ms(ms: f64) -> String {
    if !ms.is_finite() || ms <= 0.0 {
        return "0s".to_string();
    }
    format_duration((ms / 1000.0).floor())
}

pub fn format_bytes(bytes: f64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    if bytes >= GB {
        format!("{:.1} GB", bytes / GB)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{bytes} B")
    }
}

pub fn format_millis(value: f64) -> String {
    format!("{value:.0}ms")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Absolute change, one decimal.
    pub percentage: String,
}

impl Trend {
    pub fn compute(value: f64, previous: Option<f64>) -> Self {
        let previous = match previous {
            Some(previous) if previous != 0.0 && previous.is_finite() => previous,
            _ => {
                return Self {
                    direction: TrendDirection::Neutral,
                    percentage: "0".to_string(),
                }
            }
        };
        let change = (value - previous) / previous * 100.0;
        let direction = if change > 0.0 {
            TrendDirection::Up
        } else if change < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Neutral
        };
        Self {
            direction,
            percentage: format!("{:.1}", change.abs()),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc().with_timezone(&Local))
}

/// `dd/MM/yyyy HH:mm:ss` in local time; unparsable input is shown as-is.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_time(value: DateTime<Utc>) -> String {
    value.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Badge colours as `(background, foreground)`.
pub type BadgeColors = (&'static str, &'static str);

const GREEN: BadgeColors = ("#dcfce7", "#166534");
const BLUE: BadgeColors = ("#dbeafe", "#1e40af");
const YELLOW: BadgeColors = ("#fef9c3", "#854d0e");
const RED: BadgeColors = ("#fee2e2", "#991b1b");
const GRAY: BadgeColors = ("#f3f4f6", "#1f2937");

pub fn status_colors(status: u16) -> BadgeColors {
    match status {
        0..=299 => GREEN,
        300..=399 => BLUE,
        400..=499 => YELLOW,
        _ => RED,
    }
}

pub fn method_colors(method: &str) -> BadgeColors {
    match method.to_ascii_uppercase().as_str() {
        "GET" => BLUE,
        "POST" => GREEN,
        "PUT" | "PATCH" => YELLOW,
        "DELETE" => RED,
        _ => GRAY,
    }
}

pub fn operation_colors(operation: Operation) -> BadgeColors {
    match operation {
        Operation::Insert => GREEN,
        Operation::Update => BLUE,
        Operation::Delete => RED,
        Operation::Other => GRAY,
    }
}

/// Solid dot colour used on the change timeline.
pub fn operation_accent(operation: Operation) -> &'static str {
    match operation {
        Operation::Insert => "#22c55e",
        Operation::Update => "#3b82f6",
        Operation::Delete => "#ef4444",
        Operation::Other => "#6b7280",
    }
}

pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() > max {
        let head: String = label.chars().take(max).collect();
        format!("{head}...")
    } else {
        label.to_string()
    }
}

/// Missing or blank text cells render as a dash.
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|text| !text.trim().is_empty()).unwrap_or("-")
}
