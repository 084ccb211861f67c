pub mod filters;
pub mod indicators;
pub mod metrics;
