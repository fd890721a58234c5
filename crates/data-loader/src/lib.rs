//! # Data Loader Crate
//!
//! Parses the MovieLens `users.dat`, `movies.dat` and `ratings.dat` files
//! into typed records.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (User, Movie, Rating, AgeGroup)
//! - **parser**: `::` line codec and the `Record` trait
//! - **dataset**: The three record collections plus join lookups
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Dataset, ParsePolicy, decode_latin1};
//!
//! let users = decode_latin1(&std::fs::read("data/ml-1m/users.dat")?);
//! let movies = decode_latin1(&std::fs::read("data/ml-1m/movies.dat")?);
//! let ratings = decode_latin1(&std::fs::read("data/ml-1m/ratings.dat")?);
//!
//! let dataset = Dataset::from_lines(users.lines(), movies.lines(), ratings.lines(), ParsePolicy::Abort)?;
//! let (users, movies, ratings) = dataset.counts();
//! ```

pub mod dataset;
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use dataset::{Dataset, LoadSummary};
pub use error::{DataLoadError, ParseError, Result};
pub use parser::{DELIMITER, ParsePolicy, Parsed, Record, decode_latin1, parse_line, parse_records};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    User,
    Movie,
    Rating,
    AgeGroup,
};
