//! HTTP handlers for the list endpoints.

pub mod list;
pub use list::*;
