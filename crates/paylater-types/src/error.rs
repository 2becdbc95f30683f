//! Client-side form validation errors.
//!
//! These are raised before any request is dispatched; the display strings
//! are the exact messages shown to the user.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingRequiredFields,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Credit limit must be at least 100")]
    CreditLimitTooLow,
    #[error("Transaction amount must be at least 1")]
    AmountTooSmall,
}
