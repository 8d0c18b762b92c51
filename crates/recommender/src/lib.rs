//! Top-rated book recommendations for a single user.
//!
//! This crate provides:
//! - `lookup_title` / `recommend_for_user`: the query as plain functions over
//!   the two tables
//! - `Recommender`: the same query with a configurable cap, default count and
//!   tie-break
//! - `summarize_user`: rating count and mean for a user
//!
//! ## Query
//! 1. Select the user's rows from the ratings table
//! 2. Sort them by rating, highest first; equal ratings keep table order
//! 3. Keep at most `TOP_RATED_CAP` rows
//! 4. Resolve each ISBN to a title, `"Unknown Title"` when the book is missing
//! 5. Truncate to the requested count
//!
//! ## Example Usage
//! ```ignore
//! use recommender::{recommend_for_user, DEFAULT_RECOMMENDATIONS};
//!
//! let dataset = Dataset::load_from_dir(Path::new("data"))?;
//! let titles = recommend_for_user(500, &dataset.ratings, &dataset.books, DEFAULT_RECOMMENDATIONS);
//! ```

pub mod query;
pub mod recommender;
pub mod summary;

// Re-export main types
pub use query::{
    lookup_title, recommend_for_user, DEFAULT_RECOMMENDATIONS, TOP_RATED_CAP, UNKNOWN_TITLE,
};
pub use recommender::{Recommendation, Recommender, TieBreak};
pub use summary::{summarize_user, UserSummary};
