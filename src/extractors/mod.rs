//! Request extractors.

pub mod authorized;
pub use authorized::Authorized;
