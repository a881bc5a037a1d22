//! Social-graph operations and their notification side effects.
//!
//! - [`graph`] -- follow, like and comment edges with their guards.
//! - [`fanout`] -- the single place notifications are written.

pub mod fanout;
pub mod graph;
