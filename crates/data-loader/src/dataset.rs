//! The three parsed record collections a report run works over.
//!
//! A `Dataset` is built once from raw lines and is read-only afterwards.
//! Lookup maps are derived on demand so callers can join against them.

use crate::error::Result;
use crate::parser::{self, ParsePolicy, Parsed};
use crate::types::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{info, warn};

/// Per-file record and skip counts from one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub users: usize,
    pub movies: usize,
    pub ratings: usize,
    pub skipped_users: usize,
    pub skipped_movies: usize,
    pub skipped_ratings: usize,
}

impl LoadSummary {
    pub fn skipped(&self) -> usize {
        self.skipped_users + self.skipped_movies + self.skipped_ratings
    }
}

/// Users, movies and ratings held in arrival order
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub movies: Vec<Movie>,
    pub ratings: Vec<Rating>,
    summary: LoadSummary,
}

impl Dataset {
    /// Build a dataset directly from already-typed records
    pub fn new(users: Vec<User>, movies: Vec<Movie>, ratings: Vec<Rating>) -> Self {
        let summary = LoadSummary {
            users: users.len(),
            movies: movies.len(),
            ratings: ratings.len(),
            ..LoadSummary::default()
        };
        Self {
            users,
            movies,
            ratings,
            summary,
        }
    }

    /// Parse the three files' lines into a dataset.
    ///
    /// Each argument is the full sequence of raw lines for one file.
    pub fn from_lines<U, M, R>(users: U, movies: M, ratings: R, policy: ParsePolicy) -> Result<Self>
    where
        U: IntoIterator,
        U::Item: AsRef<str>,
        M: IntoIterator,
        M::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let Parsed { records: users, skipped: skipped_users } = parser::parse_records(users, policy)?;
        let Parsed { records: movies, skipped: skipped_movies } = parser::parse_records(movies, policy)?;
        let Parsed { records: ratings, skipped: skipped_ratings } = parser::parse_records(ratings, policy)?;

        let mut dataset = Self::new(users, movies, ratings);
        dataset.summary.skipped_users = skipped_users;
        dataset.summary.skipped_movies = skipped_movies;
        dataset.summary.skipped_ratings = skipped_ratings;

        info!(
            "Loaded {} users, {} movies, {} ratings ({} lines skipped)",
            dataset.summary.users,
            dataset.summary.movies,
            dataset.summary.ratings,
            dataset.summary.skipped()
        );
        Ok(dataset)
    }

    pub fn summary(&self) -> LoadSummary {
        self.summary
    }

    /// (users, movies, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.users.len(), self.movies.len(), self.ratings.len())
    }

    /// Users keyed by id. The first occurrence of a duplicated id wins.
    pub fn user_lookup(&self) -> HashMap<UserId, &User> {
        first_by_key(&self.users, "user", |u| u.id)
    }

    /// Movies keyed by id. The first occurrence of a duplicated id wins.
    pub fn movie_lookup(&self) -> HashMap<MovieId, &Movie> {
        first_by_key(&self.movies, "movie", |m| m.id)
    }
}

fn first_by_key<'a, T>(
    items: &'a [T],
    entity: &str,
    key: impl Fn(&T) -> u32,
) -> HashMap<u32, &'a T> {
    let mut lookup = HashMap::with_capacity(items.len());
    for item in items {
        match lookup.entry(key(item)) {
            Entry::Vacant(slot) => {
                slot.insert(item);
            }
            Entry::Occupied(slot) => {
                warn!("Duplicate {} id {}, keeping first occurrence", entity, slot.key());
            }
        }
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataLoadError;

    const USERS: &str = "1::F::1::10::48067\n2::M::56::16::70072\n";
    const MOVIES: &str = "1::Toy Story (1995)::Animation|Children's|Comedy\n2::Jumanji (1995)::Adventure|Children's|Fantasy\n";
    const RATINGS: &str = "1::1::5::978300760\n2::1::3::978302109\n2::2::4::978301968\n";

    #[test]
    fn test_from_lines() {
        let dataset =
            Dataset::from_lines(USERS.lines(), MOVIES.lines(), RATINGS.lines(), ParsePolicy::Abort).unwrap();

        assert_eq!(dataset.counts(), (2, 2, 3));
        assert_eq!(dataset.summary().skipped(), 0);
        assert_eq!(dataset.ratings[2].movie_id, 2);
    }

    #[test]
    fn test_from_lines_abort_reports_file_and_line() {
        let ratings = "1::1::5::978300760\n1::1::five::978300760\n";
        let err = Dataset::from_lines(USERS.lines(), MOVIES.lines(), ratings.lines(), ParsePolicy::Abort)
            .unwrap_err();

        let DataLoadError::Parse(parse) = err;
        assert_eq!(parse.line(), 2);
        assert!(parse.to_string().starts_with("ratings.dat line 2"));
    }

    #[test]
    fn test_from_lines_skip_records_summary() {
        let users = "1::F::1::10::48067\nbroken\n";
        let dataset =
            Dataset::from_lines(users.lines(), MOVIES.lines(), RATINGS.lines(), ParsePolicy::Skip).unwrap();

        let summary = dataset.summary();
        assert_eq!(summary.users, 1);
        assert_eq!(summary.skipped_users, 1);
        assert_eq!(summary.skipped(), 1);
    }

    #[test]
    fn test_lookup_keeps_first_duplicate() {
        let movies = vec![
            Movie { id: 7, title: "First".to_string(), genre: "Drama".to_string() },
            Movie { id: 7, title: "Second".to_string(), genre: "Comedy".to_string() },
        ];
        let dataset = Dataset::new(vec![], movies, vec![]);

        let lookup = dataset.movie_lookup();
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup[&7].title, "First");
    }

    #[test]
    fn test_empty_lookups() {
        let dataset = Dataset::default();
        assert!(dataset.user_lookup().is_empty());
        assert!(dataset.movie_lookup().get(&999).is_none());
    }
}
