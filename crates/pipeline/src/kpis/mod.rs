//! Report implementations.
//!
//! Each report is a unit struct implementing `Kpi`; the `KpiRunner` runs
//! all of them together.

pub mod demographics;
pub mod most_rated;
pub mod top_rated;

// Re-export for convenience
pub use demographics::{DemographicKey, DemographicRating, DemographicRatings};
pub use most_rated::{MostRatedMovie, MostRatedMovies, movie_rating_counts};
pub use top_rated::{TopRatedMovie, TopRatedMovies};
