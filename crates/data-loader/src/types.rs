//! Core domain types for the Book-Crossing dataset.
//!
//! Two read-only tables are defined here:
//! - `BookTable`: book metadata keyed by ISBN
//! - `RatingTable`: (user, ISBN, score) triples
//!
//! Both keep their rows in source order. The secondary indices only store row
//! positions, so every query that walks them sees rows in the order the file
//! listed them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a user in the ratings table
pub type UserId = i64;

/// ISBN of a book edition, the join key between the two tables
pub type Isbn = String;

/// Integer score a user gave a book (0-10 in Book-Crossing, 0 = implicit)
pub type Score = i32;

// =============================================================================
// Rows
// =============================================================================

/// One row of the books table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: Isbn,
    pub title: String,
    pub author: String,
    /// `None` when the source column is `0` or not a number
    pub year: Option<u16>,
    pub publisher: String,
    pub image_url_small: String,
    pub image_url_medium: String,
    pub image_url_large: String,
}

impl Book {
    /// Book with only the ISBN and title filled in
    pub fn with_title(isbn: impl Into<Isbn>, title: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: String::new(),
            year: None,
            publisher: String::new(),
            image_url_small: String::new(),
            image_url_medium: String::new(),
            image_url_large: String::new(),
        }
    }
}

/// One row of the ratings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub isbn: Isbn,
    pub rating: Score,
}

impl Rating {
    pub fn new(user_id: UserId, isbn: impl Into<Isbn>, rating: Score) -> Self {
        Self {
            user_id,
            isbn: isbn.into(),
            rating,
        }
    }
}

// =============================================================================
// BookTable
// =============================================================================

/// The books table.
///
/// ISBNs are not required to be unique. `first_row_by_isbn` remembers the
/// first row seen for each ISBN, which is the row title lookups resolve to.
#[derive(Debug, Clone, Default)]
pub struct BookTable {
    rows: Vec<Book>,
    first_row_by_isbn: HashMap<Isbn, usize>,
}

impl BookTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row; an ISBN already present keeps pointing at its earlier row
    pub fn push(&mut self, book: Book) {
        let position = self.rows.len();
        self.first_row_by_isbn
            .entry(book.isbn.clone())
            .or_insert(position);
        self.rows.push(book);
    }

    /// First row whose ISBN equals `isbn`
    pub fn get(&self, isbn: &str) -> Option<&Book> {
        self.first_row_by_isbn
            .get(isbn)
            .map(|&position| &self.rows[position])
    }

    /// Title of the first row whose ISBN equals `isbn`
    pub fn title_of(&self, isbn: &str) -> Option<&str> {
        self.get(isbn).map(|book| book.title.as_str())
    }

    pub fn contains(&self, isbn: &str) -> bool {
        self.first_row_by_isbn.contains_key(isbn)
    }

    /// All rows in source order
    pub fn rows(&self) -> &[Book] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<Book> for BookTable {
    fn from_iter<I: IntoIterator<Item = Book>>(iter: I) -> Self {
        let mut table = BookTable::new();
        for book in iter {
            table.push(book);
        }
        table
    }
}

// =============================================================================
// RatingTable
// =============================================================================

/// The ratings table.
///
/// `rows_by_user` holds, for every user, the positions of that user's rows in
/// ascending order, so `for_user` yields them in table order.
#[derive(Debug, Clone, Default)]
pub struct RatingTable {
    rows: Vec<Rating>,
    rows_by_user: HashMap<UserId, Vec<usize>>,
}

impl RatingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rating: Rating) {
        let position = self.rows.len();
        self.rows_by_user
            .entry(rating.user_id)
            .or_default()
            .push(position);
        self.rows.push(rating);
    }

    /// Every rating made by `user_id`, in table order
    pub fn for_user(&self, user_id: UserId) -> impl Iterator<Item = &Rating> + '_ {
        self.rows_by_user
            .get(&user_id)
            .map(|positions| positions.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&position| &self.rows[position])
    }

    /// Number of ratings made by `user_id`
    pub fn count_for_user(&self, user_id: UserId) -> usize {
        self.rows_by_user.get(&user_id).map_or(0, Vec::len)
    }

    /// All rows in source order
    pub fn rows(&self) -> &[Rating] {
        &self.rows
    }

    /// Number of distinct users with at least one rating
    pub fn user_count(&self) -> usize {
        self.rows_by_user.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<Rating> for RatingTable {
    fn from_iter<I: IntoIterator<Item = Rating>>(iter: I) -> Self {
        let mut table = RatingTable::new();
        for rating in iter {
            table.push(rating);
        }
        table
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// Both tables, loaded once and then only read
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub books: BookTable,
    pub ratings: RatingTable,
}

/// Sizes of a loaded dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub books: usize,
    pub ratings: usize,
    pub users: usize,
    /// Ratings whose ISBN has no row in the books table
    pub dangling_ratings: usize,
}

impl Dataset {
    pub fn new(books: BookTable, ratings: RatingTable) -> Self {
        Self { books, ratings }
    }

    pub fn stats(&self) -> DatasetStats {
        let dangling_ratings = self
            .ratings
            .rows()
            .iter()
            .filter(|rating| !self.books.contains(&rating.isbn))
            .count();

        DatasetStats {
            books: self.books.len(),
            ratings: self.ratings.len(),
            users: self.ratings.user_count(),
            dangling_ratings,
        }
    }
}
