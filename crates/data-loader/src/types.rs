//! Core domain types for the MovieLens dataset.
//!
//! All records are immutable facts: they are parsed once and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user (1-6040 in MovieLens 1M)
pub type UserId = u32;

/// Unique identifier for a movie (varies in MovieLens 1M)
pub type MovieId = u32;

// =============================================================================
// Records
// =============================================================================

/// A user from `users.dat`.
///
/// Gender and zipcode are not used by any report but are kept so a parsed
/// line can be written back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub gender: String,
    pub age: i32,
    /// Occupation code as it appears in the source ("0".."20" in MovieLens)
    pub occupation: String,
    pub zipcode: String,
}

impl User {
    pub fn age_group(&self) -> AgeGroup {
        AgeGroup::from_age(self.age)
    }
}

/// A movie from `movies.dat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Genre label exactly as present in the source, e.g. `Animation|Children's|Comedy`
    pub genre: String,
}

/// A single rating from a user for a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value from 1 to 5
    pub rating: u8,
    /// Unix timestamp when rating was made (not used by the reports)
    pub timestamp: i64,
}

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
}

// =============================================================================
// Age groups
// =============================================================================

/// Reporting age bucket derived from a user's numeric age.
///
/// The buckets partition the whole `i32` domain: there is no lower bound on
/// the youngest bucket, so ages below 18 land in `Age18To35`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "18-35")]
    Age18To35,
    #[serde(rename = "36-50")]
    Age36To50,
    #[serde(rename = "50+")]
    Age50Plus,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 3] = [AgeGroup::Age18To35, AgeGroup::Age36To50, AgeGroup::Age50Plus];

    pub fn from_age(age: i32) -> Self {
        match age {
            i32::MIN..=35 => AgeGroup::Age18To35,
            36..=50 => AgeGroup::Age36To50,
            _ => AgeGroup::Age50Plus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Age18To35 => "18-35",
            AgeGroup::Age36To50 => "36-50",
            AgeGroup::Age50Plus => "50+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_group_boundaries() {
        assert_eq!(AgeGroup::from_age(1), AgeGroup::Age18To35);
        assert_eq!(AgeGroup::from_age(18), AgeGroup::Age18To35);
        assert_eq!(AgeGroup::from_age(35), AgeGroup::Age18To35);
        assert_eq!(AgeGroup::from_age(36), AgeGroup::Age36To50);
        assert_eq!(AgeGroup::from_age(50), AgeGroup::Age36To50);
        assert_eq!(AgeGroup::from_age(51), AgeGroup::Age50Plus);
        assert_eq!(AgeGroup::from_age(56), AgeGroup::Age50Plus);
    }

    #[test]
    fn test_age_group_extremes() {
        assert_eq!(AgeGroup::from_age(i32::MIN), AgeGroup::Age18To35);
        assert_eq!(AgeGroup::from_age(-4), AgeGroup::Age18To35);
        assert_eq!(AgeGroup::from_age(i32::MAX), AgeGroup::Age50Plus);
    }

    #[test]
    fn test_age_group_labels() {
        let labels: Vec<String> = AgeGroup::ALL.iter().map(|g| g.to_string()).collect();
        assert_eq!(labels, vec!["18-35", "36-50", "50+"]);
    }

    #[test]
    fn test_user_age_group() {
        let user = User {
            id: 1,
            gender: "F".to_string(),
            age: 45,
            occupation: "7".to_string(),
            zipcode: "02460".to_string(),
        };
        assert_eq!(user.age_group(), AgeGroup::Age36To50);
    }
}
