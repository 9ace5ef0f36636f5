pub mod access_audit;
pub mod analytics;
pub mod dashboard;
pub mod data_audit;
pub mod endpoint_analytics;
pub mod forensic_analysis;
pub mod not_found;
pub mod record_timeline;

pub use access_audit::AccessAudit;
pub use dashboard::Dashboard;
pub use data_audit::DataAudit;
pub use endpoint_analytics::EndpointAnalytics;
pub use forensic_analysis::ForensicAnalysis;
pub use not_found::NotFound;
pub use record_timeline::RecordTimeline;
