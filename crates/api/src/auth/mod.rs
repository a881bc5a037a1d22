//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- Access/refresh token signing, verification and hashing.
//! - [`session`] -- Registration, login, refresh, logout and password change.

pub mod jwt;
pub mod password;
pub mod session;
