pub mod error;
pub mod models;
pub mod requests;

pub use error::ValidationError;
pub use models::{Customer, CustomerProfile, Merchant, Role, SessionUser, Transaction};
pub use requests::{
    CommissionUpdate, MerchantCreate, SignupRequest, TokenResponse, TransactionCreate,
    TransactionRepay,
};
