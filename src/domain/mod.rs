pub mod charts;
pub mod diff;
pub mod entities;
pub mod format;
pub mod funnel;
pub mod geo;
