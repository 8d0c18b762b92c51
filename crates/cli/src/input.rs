//! Validation of user-typed values before they reach the query.

use data_loader::UserId;
use thiserror::Error;

/// Rejected user input
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a valid User ID")]
    InvalidUserId(String),

    #[error("Please enter a positive number of recommendations")]
    InvalidCount(String),
}

/// Parse a user id typed by the user; surrounding whitespace is ignored
pub fn parse_user_id(input: &str) -> Result<UserId, InputError> {
    input
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidUserId(input.to_string()))
}

/// Parse a requested recommendation count, which must be at least 1
pub fn parse_count(input: &str) -> Result<usize, InputError> {
    match input.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(InputError::InvalidCount(input.to_string())),
    }
}
