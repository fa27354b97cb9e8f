//! Fake Qumulo appliance.
//!
//! Serves the session endpoints of the appliance REST API over plain HTTP
//! from an in-memory account table:
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | POST | `/v1/login` | none |
//! | POST | `/v1/setpassword` | bearer |
//! | GET | `/v1/who-am-i` | bearer |
//! | GET | `/v1/users/{id}` | bearer |
//! | GET | `/v1/version` | none |
//!
//! Use [`FakeAppliance::spawn`] from tests, or run the `mock-qumulo`
//! binary for manual testing.

mod config;
mod error;
mod routes;
mod server;

pub use config::{ApplianceConfig, UserAccount};
pub use error::ApplianceError;
pub use routes::router;
pub use server::FakeAppliance;
