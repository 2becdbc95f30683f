//! Pay-later client library.
//!
//! This crate exposes:
//! - the API gateway (`BackendTransport` trait, `HttpTransport`, `MockTransport`),
//! - durable session state (`SessionStore` over a `SessionStorage` backend),
//! - screen controllers for login, signup, the dashboards, and the
//!   transaction ledger.

pub mod error;
pub mod screens;
pub mod session;
pub mod transport;

pub use error::ClientError;
pub use screens::{
    CustomerDashboard, CustomerDashboardData, LedgerData, LedgerScreen, LoginScreen,
    MerchantDashboard, MerchantDashboardData, ScreenState, SignupForm, SignupOutcome, SignupScreen,
    DEFAULT_MERCHANT_COMMISSION,
};
pub use session::{FileStorage, MemoryStorage, SessionStorage, SessionStore, StorageError};
pub use transport::{
    normalize_error_message, ApiError, BackendTransport, HttpTransport, MockTransport,
    TransportConfig,
};
