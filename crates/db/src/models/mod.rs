//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - Where the entity is mutable, an update DTO (all `Option` fields)

pub mod comment;
pub mod notification;
pub mod post;
pub mod session;
pub mod user;
