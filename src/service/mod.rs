//! ListService: read, write and delete over any `RowProvider`.

mod list;
mod validation;
pub use list::ListService;
pub use validation::{validate_argument, validate_payload, WritePayload};
