pub mod bar_chart;
pub mod data_table;
pub mod date_range_picker;
pub mod dimension_filter;
pub mod error_banner;
pub mod filter_panel;
pub mod funnel_chart;
pub mod metric_card;
pub mod page_header;
pub mod stat_card;
pub mod timeline;
pub mod world_map;

pub use bar_chart::{BarChart, SeriesChart};
pub use data_table::{Column, DataTable};
pub use date_range_picker::DateRangePicker;
pub use dimension_filter::DimensionFilter;
pub use error_banner::ErrorBanner;
pub use filter_panel::FilterPanel;
pub use funnel_chart::FunnelChart;
pub use metric_card::MetricCard;
pub use page_header::PageHeader;
pub use stat_card::{StatCard, StatColor};
pub use timeline::Timeline;
pub use world_map::WorldMap;
