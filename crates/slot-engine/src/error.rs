//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Event source error: {0}")]
    Source(String),

    #[error("Pagination error: {0}")]
    Pagination(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
