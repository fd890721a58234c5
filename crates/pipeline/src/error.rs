//! Errors raised by the aggregation engine.
//!
//! Join misses are not errors: they surface as `None` companions.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KpiError {
    /// An internal guarantee of the engine was broken, e.g. an average was
    /// requested for a key that has no contributing ratings.
    #[error("Invariant violated in {kpi} for key {key}: {reason}")]
    InvariantViolation {
        kpi: &'static str,
        key: String,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, KpiError>;
