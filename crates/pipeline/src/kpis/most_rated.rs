//! Most-rated movies.
//!
//! Counts ratings per movie, ranks by count and attaches titles.
//! Only movies that appear in the ratings are considered, and a rating for
//! a movie missing from `movies.dat` is still counted; its row simply has
//! no title.

use crate::aggregate::{RatingAccumulator, left_outer_join, reduce_by_key};
use crate::config::KpiConfig;
use crate::error::Result;
use crate::traits::Kpi;
use data_loader::{Dataset, MovieId};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostRatedMovie {
    pub movie_id: MovieId,
    /// `None` when the movie id is not present in the movies file
    pub title: Option<String>,
    pub ratings: u64,
}

/// Per-movie rating sums and counts over the whole ratings collection
pub fn movie_rating_counts(dataset: &Dataset) -> HashMap<MovieId, RatingAccumulator> {
    reduce_by_key(&dataset.ratings, |rating| Some(rating.movie_id))
}

/// Ranks movies by number of ratings
pub struct MostRatedMovies;

impl Kpi for MostRatedMovies {
    type Row = MostRatedMovie;

    fn name(&self) -> &'static str {
        "most_rated_movies"
    }

    #[instrument(skip_all, fields(limit = config.most_rated_limit))]
    fn compute(&self, dataset: &Dataset, config: &KpiConfig) -> Result<Vec<MostRatedMovie>> {
        let totals = movie_rating_counts(dataset);
        debug!("Counted ratings for {} movies", totals.len());

        let mut ranked: Vec<(MovieId, RatingAccumulator)> = totals.into_iter().collect();
        ranked.sort_by_key(|(_, acc)| (Reverse(acc.count), acc.first_seen));
        ranked.truncate(config.most_rated_limit);

        let titles: HashMap<MovieId, &str> = dataset
            .movie_lookup()
            .into_iter()
            .map(|(id, movie)| (id, movie.title.as_str()))
            .collect();

        let rows = left_outer_join(ranked, &titles)
            .into_iter()
            .map(|(movie_id, (acc, title))| MostRatedMovie {
                movie_id,
                title: title.map(str::to_string),
                ratings: acc.count,
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Movie, Rating};

    fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            genre: "Drama".to_string(),
        }
    }

    fn ratings_for(movie_id: MovieId, count: u32) -> Vec<Rating> {
        (0..count)
            .map(|user_id| Rating {
                user_id,
                movie_id,
                rating: 4,
                timestamp: 1000000,
            })
            .collect()
    }

    fn create_test_dataset() -> Dataset {
        let movies = vec![movie(1, "Popular"), movie(2, "Niche"), movie(3, "Unrated")];
        let mut ratings = ratings_for(2, 2);
        ratings.extend(ratings_for(1, 5));
        ratings.extend(ratings_for(99, 3));
        Dataset::new(vec![], movies, ratings)
    }

    #[test]
    fn test_ranks_by_count() {
        let dataset = create_test_dataset();
        let rows = MostRatedMovies.compute(&dataset, &KpiConfig::default()).unwrap();

        let ids: Vec<MovieId> = rows.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![1, 99, 2]);
        assert_eq!(rows[0].title.as_deref(), Some("Popular"));
        assert_eq!(rows[0].ratings, 5);
    }

    #[test]
    fn test_movies_without_ratings_are_excluded() {
        let dataset = create_test_dataset();
        let rows = MostRatedMovies.compute(&dataset, &KpiConfig::default()).unwrap();
        assert!(rows.iter().all(|r| r.movie_id != 3));
    }

    #[test]
    fn test_dangling_rating_keeps_row_without_title() {
        let dataset = create_test_dataset();

        let totals = movie_rating_counts(&dataset);
        assert_eq!(totals[&99].count, 3);

        let rows = MostRatedMovies.compute(&dataset, &KpiConfig::default()).unwrap();
        let dangling = rows.iter().find(|r| r.movie_id == 99).unwrap();
        assert_eq!(dangling.title, None);
    }

    #[test]
    fn test_ties_follow_first_arrival() {
        let mut ratings = ratings_for(5, 2);
        ratings.extend(ratings_for(4, 2));
        ratings.extend(ratings_for(6, 2));
        let dataset = Dataset::new(vec![], vec![], ratings);

        let rows = MostRatedMovies.compute(&dataset, &KpiConfig::default()).unwrap();
        let ids: Vec<MovieId> = rows.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![5, 4, 6]);
    }

    #[test]
    fn test_limit() {
        let dataset = create_test_dataset();
        let config = KpiConfig::default().with_most_rated_limit(1);
        let rows = MostRatedMovies.compute(&dataset, &config).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
