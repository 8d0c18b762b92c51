//! Per-user rating statistics.

use data_loader::{RatingTable, UserId};
use serde::Serialize;

/// How many books a user rated and their mean score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UserSummary {
    pub user_id: UserId,
    pub rating_count: usize,
    pub mean_rating: f64,
}

/// Summary of `user_id`'s ratings, `None` when the user rated nothing
pub fn summarize_user(user_id: UserId, ratings: &RatingTable) -> Option<UserSummary> {
    let (total, count) = ratings
        .for_user(user_id)
        .fold((0i64, 0usize), |(total, count), rating| {
            (total + i64::from(rating.rating), count + 1)
        });

    if count == 0 {
        return None;
    }

    Some(UserSummary {
        user_id,
        rating_count: count,
        mean_rating: total as f64 / count as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Rating;

    #[test]
    fn test_summarize_user() {
        let ratings: RatingTable = vec![
            Rating::new(500, "A", 9),
            Rating::new(500, "B", 6),
            Rating::new(300, "C", 2),
        ]
        .into_iter()
        .collect();

        let summary = summarize_user(500, &ratings).unwrap();
        assert_eq!(summary.rating_count, 2);
        assert!((summary.mean_rating - 7.5).abs() < f64::EPSILON);

        assert!(summarize_user(999, &ratings).is_none());
    }
}
