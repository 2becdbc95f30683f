//! Crate-level error type composed from the per-concern errors.

use paylater_types::ValidationError;
use thiserror::Error;

use crate::session::StorageError;
use crate::transport::ApiError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Merchant login not implemented yet. Please contact support.")]
    MerchantLoginUnsupported,
}
