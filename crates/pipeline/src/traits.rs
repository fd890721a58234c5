//! Core trait for the report pipelines.
//!
//! Each report is a pure function of the parsed dataset and the
//! configuration. Implementations hold no state, so they can be run
//! concurrently against the same `Dataset`.

use crate::config::KpiConfig;
use crate::error::Result;
use data_loader::Dataset;

pub trait Kpi: Send + Sync {
    /// Row type produced by this report
    type Row: Send;

    /// Returns the name of this report (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Compute the ordered report rows.
    ///
    /// # Returns
    /// * `Ok(Vec<Row>)` - The rows in report order
    /// * `Err` - If an engine invariant was violated
    fn compute(&self, dataset: &Dataset, config: &KpiConfig) -> Result<Vec<Self::Row>>;
}
