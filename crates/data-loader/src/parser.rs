//! Parser for MovieLens data files.
//!
//! All three files share one layout: newline-delimited records whose
//! fields are separated by `::`.
//! - users.dat: userId::gender::age::occupation::zipcode
//! - movies.dat: movieId::title::genres
//! - ratings.dat: userId::movieId::rating::timestamp
//!
//! Fields are assigned by fixed position. A line with the wrong number of
//! fields, or a non-numeric id/age/rating/timestamp, is a `ParseError`.

use crate::error::ParseError;
use crate::types::*;
use std::str::FromStr;
use tracing::warn;

/// Field separator shared by all MovieLens files
pub const DELIMITER: &str = "::";

/// A record type that can be read from (and written back to) one `::` line.
pub trait Record: Sized {
    /// File name used in error messages
    const FILE: &'static str;

    /// Exact number of fields on a line
    const FIELDS: usize;

    /// Build the record from already-split fields.
    ///
    /// `fields.len()` is guaranteed to equal `Self::FIELDS`.
    fn from_fields(fields: &[&str], line: usize) -> Result<Self, ParseError>;

    /// Serialize back to a single `::` line
    fn to_line(&self) -> String;
}

/// What to do when a line fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Stop at the first malformed line
    #[default]
    Abort,
    /// Log the malformed line and continue
    Skip,
}

/// Records parsed from one file plus the number of lines that were skipped
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<R> {
    pub records: Vec<R>,
    pub skipped: usize,
}

/// Parse a single line into a record.
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_line<R: Record>(line: &str, line_no: usize) -> Result<R, ParseError> {
    let fields: Vec<&str> = line.trim().split(DELIMITER).collect();
    if fields.len() != R::FIELDS {
        return Err(ParseError::FieldCount {
            file: R::FILE,
            line: line_no,
            expected: R::FIELDS,
            found: fields.len(),
        });
    }
    R::from_fields(&fields, line_no)
}

/// Parse every non-blank line of a file.
///
/// Blank lines are ignored. Malformed lines either abort the whole parse or
/// are skipped with a warning, depending on `policy`.
pub fn parse_records<R, I, S>(lines: I, policy: ParsePolicy) -> Result<Parsed<R>, ParseError>
where
    R: Record,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    let mut skipped = 0;

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }

        match parse_line::<R>(line, idx + 1) {
            Ok(record) => records.push(record),
            Err(err) => match policy {
                ParsePolicy::Abort => return Err(err),
                ParsePolicy::Skip => {
                    warn!("Skipping malformed line: {}", err);
                    skipped += 1;
                }
            },
        }
    }

    Ok(Parsed { records, skipped })
}

/// Decode ISO-8859-1 (Latin-1) bytes.
///
/// The MovieLens dataset is not UTF-8; every Latin-1 byte maps directly to
/// the Unicode code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn parse_field<T>(
    file: &'static str,
    line: usize,
    field: &'static str,
    value: &str,
) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ParseError::InvalidField {
        file,
        line,
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

impl Record for User {
    const FILE: &'static str = "users.dat";
    const FIELDS: usize = 5;

    fn from_fields(fields: &[&str], line: usize) -> Result<Self, ParseError> {
        Ok(User {
            id: parse_field(Self::FILE, line, "userId", fields[0])?,
            gender: fields[1].to_string(),
            age: parse_field(Self::FILE, line, "age", fields[2])?,
            occupation: fields[3].to_string(),
            zipcode: fields[4].to_string(),
        })
    }

    fn to_line(&self) -> String {
        [
            self.id.to_string(),
            self.gender.clone(),
            self.age.to_string(),
            self.occupation.clone(),
            self.zipcode.clone(),
        ]
        .join(DELIMITER)
    }
}

impl Record for Movie {
    const FILE: &'static str = "movies.dat";
    const FIELDS: usize = 3;

    fn from_fields(fields: &[&str], line: usize) -> Result<Self, ParseError> {
        Ok(Movie {
            id: parse_field(Self::FILE, line, "movieId", fields[0])?,
            title: fields[1].to_string(),
            genre: fields[2].to_string(),
        })
    }

    fn to_line(&self) -> String {
        [self.id.to_string(), self.title.clone(), self.genre.clone()].join(DELIMITER)
    }
}

impl Record for Rating {
    const FILE: &'static str = "ratings.dat";
    const FIELDS: usize = 4;

    fn from_fields(fields: &[&str], line: usize) -> Result<Self, ParseError> {
        let user_id = parse_field(Self::FILE, line, "userId", fields[0])?;
        let movie_id = parse_field(Self::FILE, line, "movieId", fields[1])?;
        let rating: u8 = parse_field(Self::FILE, line, "rating", fields[2])?;
        if !(Rating::MIN..=Rating::MAX).contains(&rating) {
            return Err(ParseError::InvalidField {
                file: Self::FILE,
                line,
                field: "rating",
                value: fields[2].to_string(),
                reason: format!("out of range {}..={}", Rating::MIN, Rating::MAX),
            });
        }

        Ok(Rating {
            user_id,
            movie_id,
            rating,
            timestamp: parse_field(Self::FILE, line, "timestamp", fields[3])?,
        })
    }

    fn to_line(&self) -> String {
        [
            self.user_id.to_string(),
            self.movie_id.to_string(),
            self.rating.to_string(),
            self.timestamp.to_string(),
        ]
        .join(DELIMITER)
    }
}
