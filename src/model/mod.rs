//! List types and the row shapes they carry.

pub mod list_type;
pub mod row;

pub use list_type::*;
pub use row::*;
