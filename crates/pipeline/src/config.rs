//! Tunables for the three reports.

/// How the age-group × occupation × genre report treats ratings whose user
/// or movie cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinPolicy {
    /// Keep the rating; unresolved key segments are left empty
    #[default]
    Outer,
    /// Drop the rating
    Inner,
}

/// Report configuration
///
/// ## Usage
/// ```ignore
/// let config = KpiConfig::default()
///     .with_top_rated_limit(50)
///     .with_min_votes(100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiConfig {
    /// Rows kept by the most-rated report (default: 10)
    pub most_rated_limit: usize,
    /// Rows kept by the top-rated report (default: 20)
    pub top_rated_limit: usize,
    /// A movie needs strictly more than this many ratings to be ranked by average (default: 40)
    pub min_votes: u64,
    pub join_policy: JoinPolicy,
}

impl Default for KpiConfig {
    fn default() -> Self {
        Self {
            most_rated_limit: 10,
            top_rated_limit: 20,
            min_votes: 40,
            join_policy: JoinPolicy::Outer,
        }
    }
}

impl KpiConfig {
    pub fn with_most_rated_limit(mut self, limit: usize) -> Self {
        self.most_rated_limit = limit;
        self
    }

    pub fn with_top_rated_limit(mut self, limit: usize) -> Self {
        self.top_rated_limit = limit;
        self
    }

    pub fn with_min_votes(mut self, min_votes: u64) -> Self {
        self.min_votes = min_votes;
        self
    }

    pub fn with_join_policy(mut self, join_policy: JoinPolicy) -> Self {
        self.join_policy = join_policy;
        self
    }
}
