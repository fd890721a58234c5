//! Highest-average-rated movies with a minimum vote threshold.
//!
//! ## Algorithm
//! 1. Sum and count ratings per movie in one pass
//! 2. Keep movies with strictly more than `min_votes` ratings
//! 3. Average = sum / count, rounded to 5 decimal digits
//! 4. Rank by average (descending), ties by first arrival
//! 5. Attach titles with a left outer join

use crate::aggregate::{left_outer_join, round_to};
use crate::config::KpiConfig;
use crate::error::Result;
use crate::kpis::most_rated::movie_rating_counts;
use crate::traits::Kpi;
use data_loader::{Dataset, MovieId};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Decimal digits kept on the working average
pub const AVERAGE_DIGITS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopRatedMovie {
    pub movie_id: MovieId,
    pub title: Option<String>,
    pub average: f64,
    pub ratings: u64,
}

/// Ranks movies by average rating
pub struct TopRatedMovies;

impl Kpi for TopRatedMovies {
    type Row = TopRatedMovie;

    fn name(&self) -> &'static str {
        "top_rated_movies"
    }

    #[instrument(skip_all, fields(limit = config.top_rated_limit, min_votes = config.min_votes))]
    fn compute(&self, dataset: &Dataset, config: &KpiConfig) -> Result<Vec<TopRatedMovie>> {
        let totals = movie_rating_counts(dataset);

        let mut ranked = Vec::new();
        for (movie_id, acc) in totals {
            if acc.count <= config.min_votes {
                continue;
            }
            let average = acc.average(self.name(), &movie_id)?;
            ranked.push((movie_id, (round_to(average, AVERAGE_DIGITS), acc.count, acc.first_seen)));
        }
        debug!("{} movies above the vote threshold", ranked.len());

        ranked.sort_by(|(_, a), (_, b)| b.0.total_cmp(&a.0).then(a.2.cmp(&b.2)));
        ranked.truncate(config.top_rated_limit);

        let titles: HashMap<MovieId, &str> = dataset
            .movie_lookup()
            .into_iter()
            .map(|(id, movie)| (id, movie.title.as_str()))
            .collect();

        let rows = left_outer_join(ranked, &titles)
            .into_iter()
            .map(|(movie_id, ((average, ratings, _), title))| TopRatedMovie {
                movie_id,
                title: title.map(str::to_string),
                average,
                ratings,
            })
            .collect();

        Ok(rows)
    }
}
