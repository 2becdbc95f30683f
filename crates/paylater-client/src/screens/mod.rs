//! Screen controllers: one per page, each a pure request/render cycle.
//!
//! Every screen owns a transport and its own copies of fetched data; no two
//! screens share mutable state except through the session store and the
//! backend itself. Mutating operations re-fetch the affected lists after
//! success, trusting the server's latest snapshot over any local cache.

pub mod customer_dashboard;
pub mod ledger;
pub mod login;
pub mod merchant_dashboard;
pub mod signup;

pub use customer_dashboard::{CustomerDashboard, CustomerDashboardData};
pub use ledger::{LedgerData, LedgerScreen};
pub use login::LoginScreen;
pub use merchant_dashboard::{MerchantDashboard, MerchantDashboardData};
pub use signup::{SignupForm, SignupOutcome, SignupScreen, DEFAULT_MERCHANT_COMMISSION};

/// Per-screen lifecycle: `Idle → Loading → {Loaded | Error}`, re-entering
/// `Loading` on every reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState<T> {
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> ScreenState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ScreenState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ScreenState::Error(message) => Some(message),
            _ => None,
        }
    }
}
