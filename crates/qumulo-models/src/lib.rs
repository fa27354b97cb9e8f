#![deny(missing_docs)]

//! # Qumulo Models
//!
//! Wire types for the Qumulo appliance REST API.
//!
//! Every type here mirrors a JSON document exchanged with the appliance.
//! Nothing in this crate performs I/O; the HTTP plumbing lives in
//! `qumulo-sdk`.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ascii`] | Printable-ASCII validation for credential inputs |
//! | [`auth`] | Login and password-change request/response bodies |
//! | [`identity`] | User resource returned by `who-am-i` |
//! | [`version`] | Appliance version resource |
//! | [`error`] | [`ModelError`] |

pub mod ascii;
pub mod auth;
pub mod error;
pub mod identity;
pub mod version;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `qumulo_models::LoginRequest` directly.
pub use ascii::*;
pub use auth::*;
pub use error::*;
pub use identity::*;
pub use version::*;
