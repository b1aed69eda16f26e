//! Gravity database bootstrap: connection options and table DDL.

use crate::config::Settings;
use crate::provider::StoreError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// List tables followed by their membership tables (which reference both sides).
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS "group" (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        enabled BOOLEAN NOT NULL DEFAULT 1,
        name TEXT UNIQUE NOT NULL,
        date_added INTEGER NOT NULL DEFAULT (cast(strftime('%s', 'now') as int)),
        date_modified INTEGER NOT NULL DEFAULT (cast(strftime('%s', 'now') as int)),
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS adlist (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        address TEXT UNIQUE NOT NULL,
        enabled BOOLEAN NOT NULL DEFAULT 1,
        date_added INTEGER NOT NULL DEFAULT (cast(strftime('%s', 'now') as int)),
        date_modified INTEGER NOT NULL DEFAULT (cast(strftime('%s', 'now') as int)),
        comment TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS client (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ip TEXT UNIQUE NOT NULL,
        enabled BOOLEAN NOT NULL DEFAULT 1,
        date_added INTEGER NOT NULL DEFAULT (cast(strftime('%s', 'now') as int)),
        date_modified INTEGER NOT NULL DEFAULT (cast(strftime('%s', 'now') as int)),
        comment TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS domainlist (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type INTEGER NOT NULL DEFAULT 0,
        domain TEXT NOT NULL,
        enabled BOOLEAN NOT NULL DEFAULT 1,
        date_added INTEGER NOT NULL DEFAULT (cast(strftime('%s', 'now') as int)),
        date_modified INTEGER NOT NULL DEFAULT (cast(strftime('%s', 'now') as int)),
        comment TEXT,
        UNIQUE (domain, type)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS adlist_by_group (
        adlist_id INTEGER NOT NULL REFERENCES adlist (id) ON DELETE CASCADE,
        group_id INTEGER NOT NULL REFERENCES "group" (id) ON DELETE CASCADE,
        PRIMARY KEY (adlist_id, group_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS client_by_group (
        client_id INTEGER NOT NULL REFERENCES client (id) ON DELETE CASCADE,
        group_id INTEGER NOT NULL REFERENCES "group" (id) ON DELETE CASCADE,
        PRIMARY KEY (client_id, group_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS domainlist_by_group (
        domainlist_id INTEGER NOT NULL REFERENCES domainlist (id) ON DELETE CASCADE,
        group_id INTEGER NOT NULL REFERENCES "group" (id) ON DELETE CASCADE,
        PRIMARY KEY (domainlist_id, group_id)
    )
    "#,
];

/// Open a pool on `settings.database_url`, creating the file if missing. Foreign keys are enforced.
pub async fn connect(settings: &Settings) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await?;
    tracing::info!(url = %settings.database_url, "connected to gravity database");
    Ok(pool)
}

/// Create the list and membership tables if they do not exist. Idempotent.
pub async fn ensure_gravity_tables(pool: &SqlitePool) -> Result<(), StoreError> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}
