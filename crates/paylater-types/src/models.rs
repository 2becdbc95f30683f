//! Domain entities mirrored from the pay-later backend.
//!
//! All entities are authoritative on the server; the client only ever holds
//! transient copies, except `SessionUser`, which is persisted as the durable
//! `user` record for cross-reload continuity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role attached to an authenticated session. Immutable for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Merchant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => f.write_str("customer"),
            Role::Merchant => f.write_str("merchant"),
        }
    }
}

/// Identity record kept for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Customer list/signup shape (`GET /customer/`, `POST /customer/signup`).
/// The backend omits the email here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: i64,
    pub limit: i64,
}

/// Authenticated customer's own profile (`GET /customer/protected`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: i64,
    /// Remaining credit limit; the backend deducts purchases from it.
    pub limit: i64,
}

/// Merchant record. The wire name `commision` is the backend's spelling and
/// is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: i64,
    pub name: String,
    pub phone: i64,
    #[serde(rename = "commision")]
    pub commission: i64,
    pub total_earning: i64,
}

/// Pay-later transaction: created pending, repaid exactly once, never
/// deleted or amended client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub customer_id: i64,
    pub merchant_id: i64,
    pub amount: i64,
    pub timestamp: DateTime<Utc>,
    pub is_repaid: bool,
}
