//! SQLite statements and the `RowProvider` backed by them.

mod builder;
mod sqlite;
pub use builder::*;
pub use sqlite::SqliteStore;
