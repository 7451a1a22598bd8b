//! # Error Types
//!
//! The entity model itself never fails: construction and identifier
//! extraction are infallible. Errors only arise when parsing enumerated wire
//! values from free text.

use thiserror::Error;

/// Top-level error type for the entity model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    /// A gender name outside the `Gender` enumeration.
    #[error("unknown gender: {0:?}")]
    UnknownGender(String),

    /// An authority name outside the `Authority` enumeration.
    #[error("unknown authority: {0:?}")]
    UnknownAuthority(String),
}
