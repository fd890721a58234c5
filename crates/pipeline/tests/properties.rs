//! Property tests for the report invariants.

use data_loader::{AgeGroup, Dataset, Movie, Rating, User};
use pipeline::{DemographicRatings, Kpi, KpiConfig, KpiRunner, MostRatedMovies, TopRatedMovies};
use pipeline::kpis::movie_rating_counts;
use proptest::prelude::*;

fn arb_dataset() -> impl Strategy<Value = Dataset> {
    let users = prop::collection::vec((0u32..20, 1i32..80, 0u32..5), 0..20);
    let movies = prop::collection::vec((0u32..30, prop::sample::select(vec!["Drama", "Comedy", "War"])), 0..30);
    let ratings = prop::collection::vec((0u32..25, 0u32..35, 1u8..=5), 0..300);

    (users, movies, ratings).prop_map(|(users, movies, ratings)| {
        let users = users
            .into_iter()
            .map(|(id, age, occupation)| User {
                id,
                gender: "M".to_string(),
                age,
                occupation: occupation.to_string(),
                zipcode: "00000".to_string(),
            })
            .collect();
        let movies = movies
            .into_iter()
            .map(|(id, genre)| Movie {
                id,
                title: format!("Movie {id}"),
                genre: genre.to_string(),
            })
            .collect();
        let ratings = ratings
            .into_iter()
            .enumerate()
            .map(|(i, (user_id, movie_id, rating))| Rating {
                user_id,
                movie_id,
                rating,
                timestamp: i as i64,
            })
            .collect();
        Dataset::new(users, movies, ratings)
    })
}

proptest! {
    #[test]
    fn prop_counts_are_conserved(dataset in arb_dataset()) {
        let totals = movie_rating_counts(&dataset);
        let counted: u64 = totals.values().map(|acc| acc.count).sum();
        prop_assert_eq!(counted as usize, dataset.ratings.len());

        let config = KpiConfig::default().with_most_rated_limit(usize::MAX);
        let rows = MostRatedMovies.compute(&dataset, &config).unwrap();
        let reported: u64 = rows.iter().map(|r| r.ratings).sum();
        prop_assert_eq!(reported as usize, dataset.ratings.len());
    }

    #[test]
    fn prop_most_rated_is_sorted(dataset in arb_dataset()) {
        let rows = MostRatedMovies.compute(&dataset, &KpiConfig::default()).unwrap();
        prop_assert!(rows.len() <= 10);
        prop_assert!(rows.windows(2).all(|w| w[0].ratings >= w[1].ratings));
    }

    #[test]
    fn prop_top_rated_respects_threshold(dataset in arb_dataset(), min_votes in 0u64..10) {
        let config = KpiConfig::default().with_min_votes(min_votes).with_top_rated_limit(usize::MAX);
        let rows = TopRatedMovies.compute(&dataset, &config).unwrap();

        prop_assert!(rows.iter().all(|r| r.ratings > min_votes));
        prop_assert!(rows.windows(2).all(|w| w[0].average >= w[1].average));

        let totals = movie_rating_counts(&dataset);
        let excluded = totals
            .iter()
            .filter(|(id, _)| rows.iter().all(|r| r.movie_id != **id));
        for (_, acc) in excluded {
            prop_assert!(acc.count <= min_votes);
        }
    }

    #[test]
    fn prop_every_rating_lands_in_one_bucket(dataset in arb_dataset()) {
        let rows = DemographicRatings.compute(&dataset, &KpiConfig::default()).unwrap();
        let total: u64 = rows.iter().map(|r| r.ratings).sum();
        prop_assert_eq!(total as usize, dataset.ratings.len());
        prop_assert!(rows.iter().all(|r| (1.0..=5.0).contains(&r.average)));
    }

    #[test]
    fn prop_reports_are_deterministic(dataset in arb_dataset()) {
        let runner = KpiRunner::new(KpiConfig::default().with_min_votes(1));
        prop_assert_eq!(runner.run(&dataset).unwrap(), runner.run(&dataset).unwrap());
    }

    #[test]
    fn prop_age_groups_partition(age in any::<i32>()) {
        let group = AgeGroup::from_age(age);
        let expected = if age <= 35 {
            AgeGroup::Age18To35
        } else if age <= 50 {
            AgeGroup::Age36To50
        } else {
            AgeGroup::Age50Plus
        };
        prop_assert_eq!(group, expected);
    }
}
