//! The recommendation query as free functions over the two tables.

use crate::recommender::Recommender;
use data_loader::{BookTable, RatingTable, UserId};

/// Title returned for an ISBN with no row in the books table
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Maximum number of top-rated rows resolved to titles, whatever the requested count
pub const TOP_RATED_CAP: usize = 10;

/// Number of titles returned when the caller doesn't ask for a specific count
pub const DEFAULT_RECOMMENDATIONS: usize = 5;

/// Title of the first books row whose ISBN equals `isbn`, or `"Unknown Title"`
pub fn lookup_title<'a>(isbn: &str, books: &'a BookTable) -> &'a str {
    books.title_of(isbn).unwrap_or(UNKNOWN_TITLE)
}

/// Titles of the user's highest-rated books.
///
/// Returns `min(count, TOP_RATED_CAP, ratings by user)` titles. A user with
/// no ratings gets an empty list.
pub fn recommend_for_user(
    user_id: UserId,
    ratings: &RatingTable,
    books: &BookTable,
    count: usize,
) -> Vec<String> {
    Recommender::new().recommend(user_id, ratings, books, count)
}
