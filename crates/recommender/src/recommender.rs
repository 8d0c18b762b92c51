//! Configurable recommendation query.
//!
//! `Recommender` runs the top-rated query with its cap, default count and
//! tie-break set through builder methods. `Recommender::new()` reproduces
//! `recommend_for_user` exactly.

use crate::query::{lookup_title, DEFAULT_RECOMMENDATIONS, TOP_RATED_CAP};
use data_loader::{BookTable, Isbn, Rating, RatingTable, Score, UserId};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// How ratings with equal scores are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Keep the order the rows have in the ratings table
    #[default]
    SourceOrder,
    /// Ascending ISBN, then table order
    Isbn,
}

/// One entry of a recommendation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// 1-based position in the list
    pub rank: usize,
    pub isbn: Isbn,
    pub title: String,
    pub rating: Score,
}

/// Top-rated query with configurable limits.
///
/// ## Usage
/// ```ignore
/// let recommender = Recommender::new()
///     .with_cap(20)
///     .with_tie_break(TieBreak::Isbn);
///
/// let titles = recommender.recommend(500, &dataset.ratings, &dataset.books, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommender {
    cap: usize,
    default_count: usize,
    tie_break: TieBreak,
}

impl Recommender {
    pub fn new() -> Self {
        Self {
            cap: TOP_RATED_CAP,
            default_count: DEFAULT_RECOMMENDATIONS,
            tie_break: TieBreak::SourceOrder,
        }
    }

    /// Maximum number of top-rated rows kept before truncating to the count
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Count used by `recommend_default`
    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn default_count(&self) -> usize {
        self.default_count
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Top-rated books of `user_id` with ISBN and rating attached.
    ///
    /// Returns `min(count, cap, ratings by user)` entries.
    pub fn recommend_detailed(
        &self,
        user_id: UserId,
        ratings: &RatingTable,
        books: &BookTable,
        count: usize,
    ) -> Vec<Recommendation> {
        let mut user_ratings: Vec<&Rating> = ratings.for_user(user_id).collect();
        if user_ratings.is_empty() {
            debug!("No ratings found for user {}", user_id);
            return Vec::new();
        }

        // sort_by is stable, so equal keys keep table order
        user_ratings.sort_by(|a, b| self.compare(a, b));

        let limit = count.min(self.cap);
        let recommendations: Vec<Recommendation> = user_ratings
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(idx, rating)| Recommendation {
                rank: idx + 1,
                isbn: rating.isbn.clone(),
                title: lookup_title(&rating.isbn, books).to_string(),
                rating: rating.rating,
            })
            .collect();

        debug!(
            "Recommended {} of {} rated books for user {}",
            recommendations.len(),
            ratings.count_for_user(user_id),
            user_id
        );
        recommendations
    }

    /// Titles of the top-rated books of `user_id`
    pub fn recommend(
        &self,
        user_id: UserId,
        ratings: &RatingTable,
        books: &BookTable,
        count: usize,
    ) -> Vec<String> {
        self.recommend_detailed(user_id, ratings, books, count)
            .into_iter()
            .map(|rec| rec.title)
            .collect()
    }

    /// `recommend` with the configured default count
    pub fn recommend_default(
        &self,
        user_id: UserId,
        ratings: &RatingTable,
        books: &BookTable,
    ) -> Vec<String> {
        self.recommend(user_id, ratings, books, self.default_count)
    }

    fn compare(&self, a: &Rating, b: &Rating) -> Ordering {
        let by_rating = b.rating.cmp(&a.rating);
        match self.tie_break {
            TieBreak::SourceOrder => by_rating,
            TieBreak::Isbn => by_rating.then_with(|| a.isbn.cmp(&b.isbn)),
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}
