//! # Data Loader Crate
//!
//! This crate loads and indexes the Book-Crossing dataset.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Book, Rating, BookTable, RatingTable, Dataset)
//! - **parser**: Parse the `;`-separated Latin-1 files into Rust structs
//! - **index**: Build the tables from parsed rows
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_dir(Path::new("data"))?;
//!
//! let title = dataset.books.title_of("0002005018");
//! let ratings: Vec<_> = dataset.ratings.for_user(276725).collect();
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{DataFiles, DEFAULT_BOOKS_FILE, DEFAULT_RATINGS_FILE};
pub use types::{
    // Type aliases
    UserId,
    Isbn,
    Score,
    // Core types
    Book,
    Rating,
    BookTable,
    RatingTable,
    Dataset,
    DatasetStats,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_creation() {
        let dataset = Dataset::default();
        let stats = dataset.stats();

        assert_eq!(stats.books, 0);
        assert_eq!(stats.ratings, 0);
        assert_eq!(stats.users, 0);
    }

    #[test]
    fn test_insert_book() {
        let mut books = BookTable::new();
        books.push(Book::with_title("0002005018", "Clara Callan"));

        let retrieved = books.get("0002005018").unwrap();
        assert_eq!(retrieved.title, "Clara Callan");
        assert!(books.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_isbn_keeps_first_row() {
        let books: BookTable = vec![
            Book::with_title("A", "First"),
            Book::with_title("A", "Second"),
        ]
        .into_iter()
        .collect();

        assert_eq!(books.len(), 2);
        assert_eq!(books.title_of("A"), Some("First"));
    }

    #[test]
    fn test_user_ratings_keep_table_order() {
        let ratings: RatingTable = vec![
            Rating::new(1, "X", 3),
            Rating::new(2, "Y", 8),
            Rating::new(1, "Z", 3),
            Rating::new(1, "X", 3),
        ]
        .into_iter()
        .collect();

        let isbns: Vec<&str> = ratings.for_user(1).map(|r| r.isbn.as_str()).collect();
        assert_eq!(isbns, vec!["X", "Z", "X"]);
        assert_eq!(ratings.count_for_user(2), 1);
        assert_eq!(ratings.user_count(), 2);
    }

    #[test]
    fn test_empty_queries() {
        let dataset = Dataset::default();

        assert!(dataset.books.title_of("A").is_none());
        assert_eq!(dataset.ratings.for_user(999).count(), 0);
        assert_eq!(dataset.ratings.count_for_user(999), 0);
    }
}
