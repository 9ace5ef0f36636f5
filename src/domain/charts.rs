//! Shapes API aggregates into the series the bar and line charts draw.

use crate::domain::entities::analytics::NavigationFlow;
use crate::domain::entities::audit::{
    AccessEndpointStat, DataEndpointStat, EndpointTimelinePoint, ErrorStats, OperationCounts,
};
use crate::domain::format::truncate_label;

pub const SERIES_COLORS: [&str; 10] = [
    "#2c3b95", "#30bce1", "#072d3e", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899",
    "#14b8a6", "#f97316",
];

pub fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

impl BarDatum {
    pub fn new(label: impl Into<String>, value: f64, color: &'static str) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }
}

pub fn operation_distribution(counts: &OperationCounts) -> Vec<BarDatum> {
    vec![
        BarDatum::new("INSERT", counts.insert as f64, "#10b981"),
        BarDatum::new("UPDATE", counts.update as f64, "#3b82f6"),
        BarDatum::new("DELETE", counts.delete as f64, "#ef4444"),
    ]
}

pub fn error_distribution(stats: &ErrorStats) -> Vec<BarDatum> {
    vec![
        BarDatum::new("Errores 4xx", stats.errors_4xx as f64, "#f59e0b"),
        BarDatum::new("Errores 5xx", stats.errors_5xx as f64, "#ef4444"),
    ]
}

/// Per-status counts, ordered by status code.
pub fn errors_by_status(stats: &ErrorStats) -> Vec<BarDatum> {
    stats
        .by_status
        .iter()
        .map(|(status, count)| {
            let color = if status.starts_with('5') {
                "#ef4444"
            } else {
                "#f59e0b"
            };
            BarDatum::new(status.clone(), *count as f64, color)
        })
        .collect()
}

/// Share of each bar in the total, in percent.
pub fn share(data: &[BarDatum], index: usize) -> f64 {
    let total: f64 = data.iter().map(|datum| datum.value).sum();
    match data.get(index) {
        Some(datum) if total > 0.0 => datum.value / total * 100.0,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EndpointSummary {
    pub total_requests: u64,
    pub total_changes: u64,
    pub avg_response_time: f64,
    pub total_errors: u64,
}

impl EndpointSummary {
    pub fn compute(data: &[DataEndpointStat], access: &[AccessEndpointStat]) -> Self {
        let total_requests = access.iter().map(|ep| ep.count).sum();
        let total_changes = data.iter().map(|ep| ep.counts.total).sum();
        let total_errors = access.iter().map(|ep| ep.errors).sum();
        let avg_response_time = if access.is_empty() {
            0.0
        } else {
            access.iter().map(|ep| ep.avg_duration).sum::<f64>() / access.len() as f64
        };
        Self {
            total_requests,
            total_changes,
            avg_response_time,
            total_errors,
        }
    }
}

/// Per-endpoint change breakdown as three stacked series.
pub fn data_endpoint_rows(data: &[DataEndpointStat]) -> Vec<(String, [BarDatum; 3])> {
    data.iter()
        .map(|ep| {
            (
                truncate_label(&ep.endpoint, 30),
                [
                    BarDatum::new("Inserts", ep.counts.inserts as f64, "#10b981"),
                    BarDatum::new("Updates", ep.counts.updates as f64, "#3b82f6"),
                    BarDatum::new("Deletes", ep.counts.deletes as f64, "#ef4444"),
                ],
            )
        })
        .collect()
}

/// Request share of the six busiest endpoints.
pub fn access_endpoint_share(access: &[AccessEndpointStat]) -> Vec<BarDatum> {
    access
        .iter()
        .take(6)
        .enumerate()
        .map(|(idx, ep)| {
            BarDatum::new(truncate_label(&ep.endpoint, 20), ep.count as f64, series_color(idx))
        })
        .collect()
}

/// Trims the year off long bucket labels (`2024-05-01 10:00:00` -> `05-01 10:00:00`).
pub fn short_time_label(time: &str) -> String {
    if time.chars().count() > 16 {
        time.chars().skip(5).collect()
    } else {
        time.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePivot {
    pub series: Vec<String>,
    pub rows: Vec<(String, Vec<f64>)>,
}

impl TimelinePivot {
    /// One column per endpoint among the first `top` of `endpoints`; missing
    /// counts are zero.
    pub fn build(points: &[EndpointTimelinePoint], endpoints: &[AccessEndpointStat], top: usize) -> Self {
        let series: Vec<String> = endpoints
            .iter()
            .take(top)
            .map(|ep| ep.endpoint.clone())
            .collect();
        let rows = points
            .iter()
            .map(|point| {
                let values = series
                    .iter()
                    .map(|endpoint| point.counts.get(endpoint).copied().unwrap_or(0.0))
                    .collect();
                (short_time_label(&point.time), values)
            })
            .collect();
        Self { series, rows }
    }

    pub fn max(&self) -> f64 {
        self.rows
            .iter()
            .flat_map(|(_, values)| values.iter().copied())
            .fold(0.0, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.series.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthLevel {
    Good,
    Fair,
    Poor,
}

impl HealthLevel {
    pub fn classify(score: f64) -> Self {
        if score >= 90.0 {
            HealthLevel::Good
        } else if score >= 70.0 {
            HealthLevel::Fair
        } else {
            HealthLevel::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthLevel::Good => "Excelente",
            HealthLevel::Fair => "Aceptable",
            HealthLevel::Poor => "Crítico",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            HealthLevel::Good => "#16a34a",
            HealthLevel::Fair => "#ca8a04",
            HealthLevel::Poor => "#dc2626",
        }
    }
}

/// Load-time bands as bars; values are percentages.
pub fn load_distribution(fast: f64, moderate: f64, slow: f64) -> Vec<BarDatum> {
    vec![
        BarDatum::new("Cargas Rápidas (<1s)", fast, "#22c55e"),
        BarDatum::new("Cargas Moderadas (1-3s)", moderate, "#f59e0b"),
        BarDatum::new("Cargas Lentas (>3s)", slow, "#ef4444"),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub color: &'static str,
    pub values: Vec<f64>,
}

impl TimelinePivot {
    pub fn line_series(&self) -> Vec<LineSeries> {
        self.series
            .iter()
            .enumerate()
            .map(|(idx, name)| LineSeries {
                name: name.clone(),
                color: series_color(idx),
                values: self
                    .rows
                    .iter()
                    .map(|(_, values)| values.get(idx).copied().unwrap_or(0.0))
                    .collect(),
            })
            .collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|(label, _)| label.clone()).collect()
    }
}

/// SVG `points` for a series scaled into a `width` x `height` box, origin at
/// the bottom left.
pub fn polyline_points(values: &[f64], max: f64, width: f64, height: f64) -> String {
    let step = if values.len() > 1 {
        width / (values.len() - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
            format!("{:.1},{:.1}", idx as f64 * step, height - ratio * height)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn series_max(series: &[LineSeries]) -> f64 {
    series
        .iter()
        .flat_map(|line| line.values.iter().copied())
        .fold(0.0, f64::max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: u64,
}

/// Screen-to-screen transitions as a two-column graph: origins on the left,
/// destinations on the right. A screen can appear on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowGraph {
    pub sources: Vec<String>,
    pub targets: Vec<String>,
    pub links: Vec<FlowLink>,
}

impl FlowGraph {
    /// Keeps the `limit` busiest transitions. Node order follows first
    /// appearance in that ranking.
    pub fn build(flows: &[NavigationFlow], limit: usize) -> Self {
        let mut ranked: Vec<&NavigationFlow> = flows.iter().filter(|flow| flow.count > 0).collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);

        let mut graph = FlowGraph::default();
        for flow in ranked {
            let source = position_or_push(&mut graph.sources, &flow.from);
            let target = position_or_push(&mut graph.targets, &flow.to);
            graph.links.push(FlowLink {
                source,
                target,
                value: flow.count,
            });
        }
        graph
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn max(&self) -> u64 {
        self.links.iter().map(|link| link.value).max().unwrap_or(0)
    }
}

fn position_or_push(nodes: &mut Vec<String>, name: &str) -> usize {
    match nodes.iter().position(|node| node == name) {
        Some(idx) => idx,
        None => {
            nodes.push(name.to_string());
            nodes.len() - 1
        }
    }
}

/// Share of each transition in the total, as a percentage.
pub fn flow_shares(flows: &[NavigationFlow]) -> Vec<f64> {
    let total: u64 = flows.iter().map(|flow| flow.count).sum();
    flows
        .iter()
        .map(|flow| {
            if total > 0 {
                flow.count as f64 / total as f64 * 100.0
            } else {
                0.0
            }
        })
        .collect()
}
