//! Error types for storefront domain validation and parsing.

use thiserror::Error;

/// Errors returned while validating storefront drafts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorefrontDomainError {
    /// A required text field is empty after trimming.
    #[error("{0} must not be empty")]
    BlankField(&'static str),

    /// An email address is not of the form `local@domain`.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// A payment amount could not be accepted.
    #[error(transparent)]
    InvalidAmount(#[from] ParseAmountError),
}

/// Error returned while parsing a payment amount.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    /// The text is not a non-negative decimal with at most two fraction digits.
    #[error("malformed amount: {0}")]
    Malformed(String),

    /// The amount is below zero.
    #[error("amount must not be negative: {0} cents")]
    Negative(i64),

    /// The amount is above `999.99`, the largest `numeric(5,2)` value.
    #[error("amount out of range: {0}")]
    OutOfRange(String),
}

/// Error returned while parsing an entity name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown storefront entity: {0}")]
pub struct ParseEntityKindError(pub String);
