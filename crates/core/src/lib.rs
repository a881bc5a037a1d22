//! Domain types and pure rules shared by the SocialConnect store and API crates.
//!
//! Nothing in here performs I/O.

pub mod credentials;
pub mod error;
pub mod notifications;
pub mod roles;
pub mod types;
pub mod validation;
