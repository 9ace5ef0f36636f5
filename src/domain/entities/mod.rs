pub mod analytics;
pub mod audit;
pub mod date_range;
pub mod filter;
mod lenient;
pub mod pagination;
pub mod query;
