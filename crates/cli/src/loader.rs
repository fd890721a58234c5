//! Reads the three MovieLens files from disk.
//!
//! Files are read concurrently, decoded as Latin-1 and handed to the
//! parser on a blocking thread.

use anyhow::{Context, Result};
use data_loader::{Dataset, ParsePolicy, decode_latin1};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Locations of the users, movies and ratings files
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub users: PathBuf,
    pub movies: PathBuf,
    pub ratings: PathBuf,
}

impl DataFiles {
    pub fn in_dir(dir: &Path, users: &str, movies: &str, ratings: &str) -> Self {
        Self {
            users: dir.join(users),
            movies: dir.join(movies),
            ratings: dir.join(ratings),
        }
    }
}

async fn read_latin1(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(decode_latin1(&bytes))
}

#[instrument(skip_all, fields(policy = ?policy))]
pub async fn load_dataset(files: &DataFiles, policy: ParsePolicy) -> Result<Dataset> {
    let (users, movies, ratings) = tokio::try_join!(
        read_latin1(&files.users),
        read_latin1(&files.movies),
        read_latin1(&files.ratings),
    )?;

    let dataset = tokio::task::spawn_blocking(move || {
        Dataset::from_lines(users.lines(), movies.lines(), ratings.lines(), policy)
    })
    .await
    .context("Parser task panicked")?
    .context("Failed to parse MovieLens dataset")?;

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_files(dir: &Path, ratings: &[u8]) -> DataFiles {
        fs::write(dir.join("users.dat"), "1::F::1::10::48067\n").unwrap();
        // 0xE9 is Latin-1 for 'é'
        fs::write(dir.join("movies.dat"), b"1::Am\xE9lie (2001)::Comedy|Romance\n").unwrap();
        fs::write(dir.join("ratings.dat"), ratings).unwrap();
        DataFiles::in_dir(dir, "users.dat", "movies.dat", "ratings.dat")
    }

    #[tokio::test]
    async fn test_load_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_files(dir.path(), b"1::1::5::978300760\n");

        let dataset = load_dataset(&files, ParsePolicy::Abort).await.unwrap();
        assert_eq!(dataset.counts(), (1, 1, 1));
        assert_eq!(dataset.movies[0].title, "Amélie (2001)");
    }

    #[tokio::test]
    async fn test_load_dataset_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_files(dir.path(), b"1::1::5::978300760\n1::1\n");

        let err = load_dataset(&files, ParsePolicy::Abort).await.unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("ratings.dat line 2"), "{chain}");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let files = DataFiles::in_dir(dir.path(), "users.dat", "movies.dat", "ratings.dat");

        let err = load_dataset(&files, ParsePolicy::Skip).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
