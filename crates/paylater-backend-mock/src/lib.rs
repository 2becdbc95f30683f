//! In-memory pay-later backend used for tests and demos.
//!
//! `MockBackend` implements the server's visible contract, including its
//! rejection bodies, so the client's error normalization is exercised the
//! same way it would be against the real service.

pub mod mock_backend;
pub mod scenarios;

pub use mock_backend::{MockBackend, Rejection};
pub use scenarios::DemoScenario;
