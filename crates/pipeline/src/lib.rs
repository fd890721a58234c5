//! Join/aggregate engine for the MovieLens reports.
//!
//! This crate provides:
//! - Reduce-by-key and left-outer-join primitives (`aggregate`)
//! - The `Kpi` trait and the three report implementations
//! - `KpiRunner` for computing all reports in one go
//!
//! ## Reports
//! 1. Most-rated movies (top 10 by rating count)
//! 2. Top-rated movies (top 20 by average, more than 40 ratings)
//! 3. Average rating by age group × occupation × genre
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{KpiConfig, KpiRunner};
//!
//! let runner = KpiRunner::new(KpiConfig::default());
//! let reports = runner.run(&dataset)?;
//! for row in &reports.most_rated {
//!     println!("{:?} {}", row.title, row.ratings);
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod kpis;
pub mod runner;
pub mod traits;

// Re-export main types
pub use config::{JoinPolicy, KpiConfig};
pub use error::{KpiError, Result};
pub use kpis::{
    DemographicRating, DemographicRatings, MostRatedMovie, MostRatedMovies, TopRatedMovie, TopRatedMovies,
};
pub use runner::{KpiReports, KpiRunner};
pub use traits::Kpi;
