//! Gravity list API: REST endpoints over the group, adlist, client and domain lists of a gravity database.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use auth::{AllowAll, ApiKeyAuthorizer, Authorizer};
pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use model::{DomainKind, ListType, Row};
pub use provider::{RowProvider, StoreError};
pub use resolver::{resolve, Resolved};
pub use routes::{app, common_routes, list_routes};
pub use service::ListService;
pub use sql::SqliteStore;
pub use state::AppState;
pub use store::{connect, ensure_gravity_tables};
