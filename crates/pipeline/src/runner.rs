//! Runs every report against one dataset.
//!
//! The reports share nothing but the read-only `Dataset`, so they are
//! computed in parallel with `rayon::join`.

use crate::config::KpiConfig;
use crate::error::Result;
use crate::kpis::{
    DemographicRating, DemographicRatings, MostRatedMovie, MostRatedMovies, TopRatedMovie, TopRatedMovies,
};
use crate::traits::Kpi;
use data_loader::Dataset;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Rows of all three reports from one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiReports {
    pub most_rated: Vec<MostRatedMovie>,
    pub top_rated: Vec<TopRatedMovie>,
    pub demographics: Vec<DemographicRating>,
}

/// ## Usage
/// ```ignore
/// let runner = KpiRunner::new(KpiConfig::default().with_min_votes(100));
/// let reports = runner.run(&dataset)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct KpiRunner {
    config: KpiConfig,
}

impl KpiRunner {
    pub fn new(config: KpiConfig) -> Self {
        Self { config }
    }

    /// Run a single report, logging its duration and row count
    pub fn run_kpi<K: Kpi>(&self, kpi: &K, dataset: &Dataset) -> Result<Vec<K::Row>> {
        debug!("Running {} over {} ratings", kpi.name(), dataset.ratings.len());
        let start = Instant::now();
        let rows = kpi.compute(dataset, &self.config)?;
        info!("{} produced {} rows in {:?}", kpi.name(), rows.len(), start.elapsed());
        Ok(rows)
    }

    /// Run all three reports in parallel
    pub fn run(&self, dataset: &Dataset) -> Result<KpiReports> {
        let (most_rated, (top_rated, demographics)) = rayon::join(
            || self.run_kpi(&MostRatedMovies, dataset),
            || {
                rayon::join(
                    || self.run_kpi(&TopRatedMovies, dataset),
                    || self.run_kpi(&DemographicRatings, dataset),
                )
            },
        );

        Ok(KpiReports {
            most_rated: most_rated?,
            top_rated: top_rated?,
            demographics: demographics?,
        })
    }
}
