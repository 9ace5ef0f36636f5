use crate::domain::entities::analytics::FunnelStep;
use crate::domain::format::BadgeColors;

const STEP_COLORS: [&str; 10] = [
    "#22c55e", "#10b981", "#14b8a6", "#06b6d4", "#3b82f6", "#6366f1", "#8b5cf6", "#a855f7",
    "#ec4899", "#ef4444",
];

/// Last step over first step, as a percentage. Zero when nobody entered.
pub fn overall_conversion(steps: &[FunnelStep]) -> f64 {
    match (steps.first(), steps.last()) {
        (Some(first), Some(last)) if first.users > 0 => {
            last.users as f64 / first.users as f64 * 100.0
        }
        _ => 0.0,
    }
}

/// Bar width in percent of the widest step.
pub fn step_width(steps: &[FunnelStep], index: usize) -> f64 {
    let max = steps.iter().map(|step| step.users).max().unwrap_or(0);
    match steps.get(index) {
        Some(step) if max > 0 => step.users as f64 / max as f64 * 100.0,
        _ => 0.0,
    }
}

/// Green at the top of the funnel, red at the bottom.
pub fn step_color(index: usize, total: usize) -> &'static str {
    if total <= 1 {
        return STEP_COLORS[0];
    }
    let last = STEP_COLORS.len() - 1;
    let slot = (index as f64 / (total - 1) as f64 * last as f64).floor() as usize;
    STEP_COLORS[slot.min(last)]
}

/// Users lost between `index - 1` and `index`.
pub fn users_lost(steps: &[FunnelStep], index: usize) -> u64 {
    if index == 0 {
        return 0;
    }
    match (steps.get(index - 1), steps.get(index)) {
        (Some(prev), Some(step)) => prev.users.saturating_sub(step.users),
        _ => 0,
    }
}

/// Splits a comma-separated step list, dropping blanks.
pub fn parse_steps(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(str::to_string)
        .collect()
}

/// `part` over `whole` as a percentage; zero when `whole` is zero.
pub fn rate(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Green from 70%, yellow from 40%, red below.
pub fn conversion_colors(conversion: f64) -> BadgeColors {
    if conversion >= 70.0 {
        ("#dcfce7", "#166534")
    } else if conversion >= 40.0 {
        ("#fef9c3", "#854d0e")
    } else {
        ("#fee2e2", "#991b1b")
    }
}
