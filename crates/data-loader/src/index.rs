//! Dataset loading and table building.
//!
//! Parses both files, builds the `BookTable` and `RatingTable` indices and
//! reports ratings that point at ISBNs missing from the books table.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default file name of the books table
pub const DEFAULT_BOOKS_FILE: &str = "BX_Books.csv";

/// Default file name of the ratings table
pub const DEFAULT_RATINGS_FILE: &str = "BX-Book-Ratings.csv";

/// Locations of the two source files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub books: PathBuf,
    pub ratings: PathBuf,
}

impl DataFiles {
    /// Resolve the default file names inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::with_names(data_dir, DEFAULT_BOOKS_FILE, DEFAULT_RATINGS_FILE)
    }

    /// Resolve custom file names inside `data_dir`
    pub fn with_names(data_dir: &Path, books: impl AsRef<Path>, ratings: impl AsRef<Path>) -> Self {
        Self {
            books: data_dir.join(books),
            ratings: data_dir.join(ratings),
        }
    }
}

impl Dataset {
    /// Load the Book-Crossing dataset from a directory using the default file names
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        Self::load_from_files(&DataFiles::in_dir(data_dir))
    }

    /// Load both tables
    ///
    /// Steps:
    /// 1. Parse both files in parallel
    /// 2. Build the table indices
    /// 3. Log sizes and dangling ratings
    pub fn load_from_files(files: &DataFiles) -> Result<Self> {
        info!(
            books = %files.books.display(),
            ratings = %files.ratings.display(),
            "Loading Book-Crossing dataset"
        );

        let (books, ratings) = rayon::join(
            || parser::parse_books(&files.books),
            || parser::parse_ratings(&files.ratings),
        );
        let books = books?;
        let ratings = ratings?;

        let dataset = Dataset::from_rows(books, ratings);
        let stats = dataset.stats();

        info!(
            "Loaded {} books, {} ratings from {} users",
            stats.books, stats.ratings, stats.users
        );
        if stats.dangling_ratings > 0 {
            warn!(
                "{} ratings reference ISBNs missing from the books table",
                stats.dangling_ratings
            );
        }

        Ok(dataset)
    }

    /// Build both tables from parsed rows, keeping source order
    pub fn from_rows(books: Vec<Book>, ratings: Vec<Rating>) -> Self {
        Self {
            books: books.into_iter().collect(),
            ratings: ratings.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_dataset(dir: &Path) {
        fs::write(
            dir.join(DEFAULT_BOOKS_FILE),
            "ISBN;Book-Title;Book-Author;Year-Of-Publication;Publisher;Image-URL-S;Image-URL-M;Image-URL-L\n\
             A;Alpha;Ann;1999;Pub;s;m;l\n\
             B;Beta;Bob;2001;Pub;s;m;l\n",
        )
        .unwrap();
        fs::write(
            dir.join(DEFAULT_RATINGS_FILE),
            "User-ID;ISBN;Book-Rating\n500;A;9\n500;B;7\n300;Z;4\n",
        )
        .unwrap();
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        write_dataset(dir.path());

        let dataset = Dataset::load_from_dir(dir.path()).unwrap();
        let stats = dataset.stats();

        assert_eq!(stats.books, 2);
        assert_eq!(stats.ratings, 3);
        assert_eq!(stats.users, 2);
        assert_eq!(stats.dangling_ratings, 1);
        assert_eq!(dataset.books.title_of("B"), Some("Beta"));
        assert_eq!(dataset.ratings.count_for_user(500), 2);
    }

    #[test]
    fn test_load_missing_ratings_file() {
        let dir = TempDir::new().unwrap();
        write_dataset(dir.path());
        fs::remove_file(dir.path().join(DEFAULT_RATINGS_FILE)).unwrap();

        let err = Dataset::load_from_dir(dir.path()).unwrap_err();
        assert!(err.is_missing_file());
    }

    #[test]
    fn test_custom_file_names() {
        let files = DataFiles::with_names(Path::new("data"), "books.csv", "ratings.csv");
        assert_eq!(files.books, Path::new("data/books.csv"));
        assert_eq!(files.ratings, Path::new("data/ratings.csv"));
    }
}
