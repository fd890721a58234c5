//! Average rating by age group × occupation × genre.
//!
//! Every rating is joined against its user (for age group and occupation)
//! and its movie (for genre). The resulting composite key is a typed struct,
//! so field values containing separators cannot collide.
//!
//! Under `JoinPolicy::Outer` a rating whose user or movie is unknown still
//! contributes, under a key with the unresolved segments set to `None`.
//! Under `JoinPolicy::Inner` such ratings are dropped.
//!
//! Output is grouped by (age group, occupation) with genres ranked by
//! average rating inside each group.

use crate::aggregate::{reduce_by_key, round_to};
use crate::config::{JoinPolicy, KpiConfig};
use crate::error::Result;
use crate::traits::Kpi;
use data_loader::{AgeGroup, Dataset};
use serde::Serialize;
use tracing::{debug, instrument};

/// Decimal digits kept on the reported average
pub const AVERAGE_DIGITS: u32 = 4;

/// Grouping key borrowed from the dataset while reducing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DemographicKey<'a> {
    pub age_group: Option<AgeGroup>,
    pub occupation: Option<&'a str>,
    pub genre: Option<&'a str>,
}

impl DemographicKey<'_> {
    pub fn is_complete(&self) -> bool {
        self.age_group.is_some() && self.occupation.is_some() && self.genre.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicRating {
    pub age_group: Option<AgeGroup>,
    pub occupation: Option<String>,
    pub genre: Option<String>,
    /// Rounded to `AVERAGE_DIGITS`
    pub average: f64,
    pub ratings: u64,
}

/// Average rating per age group, occupation and genre
pub struct DemographicRatings;

impl Kpi for DemographicRatings {
    type Row = DemographicRating;

    fn name(&self) -> &'static str {
        "demographic_ratings"
    }

    #[instrument(skip_all, fields(join_policy = ?config.join_policy))]
    fn compute(&self, dataset: &Dataset, config: &KpiConfig) -> Result<Vec<DemographicRating>> {
        let users = dataset.user_lookup();
        let movies = dataset.movie_lookup();

        let totals = reduce_by_key(&dataset.ratings, |rating| {
            let user = users.get(&rating.user_id).copied();
            let movie = movies.get(&rating.movie_id).copied();
            let key = DemographicKey {
                age_group: user.map(|u| u.age_group()),
                occupation: user.map(|u| u.occupation.as_str()),
                genre: movie.map(|m| m.genre.as_str()),
            };
            match config.join_policy {
                JoinPolicy::Inner if !key.is_complete() => None,
                _ => Some(key),
            }
        });

        let unresolved = totals.keys().filter(|key| !key.is_complete()).count();
        debug!("{} buckets, {} with unresolved segments", totals.len(), unresolved);

        let mut rows = Vec::with_capacity(totals.len());
        for (key, acc) in totals {
            let average = acc.average(self.name(), &key)?;
            rows.push(DemographicRating {
                age_group: key.age_group,
                occupation: key.occupation.map(str::to_string),
                genre: key.genre.map(str::to_string),
                average: round_to(average, AVERAGE_DIGITS),
                ratings: acc.count,
            });
        }

        rows.sort_by(|a, b| {
            (a.age_group, &a.occupation)
                .cmp(&(b.age_group, &b.occupation))
                .then(b.average.total_cmp(&a.average))
                .then_with(|| a.genre.cmp(&b.genre))
        });

        Ok(rows)
    }
}
