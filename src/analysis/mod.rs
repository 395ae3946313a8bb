pub mod correlation;
pub mod curves;
pub mod stats;

pub use correlation::{correlation_by_timing, CorrelationSeries, TimingCorrelation};
pub use curves::{default_retention_buckets, error_curves_by_retention, ErrorCurve};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("need at least 2 distinct tRCD values for a correlation, found {found}")]
    InsufficientData { found: usize },

    #[error("t distribution unavailable: {0}")]
    Distribution(String),
}
