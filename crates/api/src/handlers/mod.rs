//! Request handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod feed;
pub mod notification;
pub mod posts;
pub mod users;
