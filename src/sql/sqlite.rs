//! `RowProvider` over a SQLite gravity database.

use crate::model::{
    parse_group_ids, AdlistRow, DomainKind, DomainRow, GroupRow, ListType, Row, RowBase, RowWrite, Table,
    WriteMode,
};
use crate::provider::{RowProvider, RowStream, StoreError};
use crate::sql::builder;
use async_trait::async_trait;
use futures::StreamExt;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row as _, SqlitePool};

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Domain type a write lands in. Only leaf domain lists have one.
fn write_kind(list: ListType) -> Result<Option<DomainKind>, StoreError> {
    match (list.table(), list.domain_kind()) {
        (Table::Domainlist, None) => Err(StoreError::Invalid(format!("{:?} is not a writable list", list))),
        (_, kind) => Ok(kind),
    }
}

fn decode_row(list: ListType, row: &SqliteRow) -> Result<Row, StoreError> {
    let base = RowBase {
        id: row.try_get("id")?,
        enabled: row.try_get("enabled")?,
        date_added: row.try_get("date_added")?,
        date_modified: row.try_get("date_modified")?,
    };
    let groups = || -> Result<Vec<i64>, StoreError> {
        let raw: Option<String> = row.try_get("group_ids")?;
        parse_group_ids(raw.as_deref()).map_err(|e| StoreError::Invalid(format!("invalid group id list: {}", e)))
    };
    Ok(match list.table() {
        Table::Group => Row::Group(GroupRow {
            base,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
        }),
        Table::Adlist => Row::Adlist(AdlistRow {
            base,
            address: row.try_get("address")?,
            comment: row.try_get("comment")?,
            groups: groups()?,
        }),
        Table::Client => Row::Domain(DomainRow {
            base,
            domain: row.try_get("ip")?,
            kind: None,
            comment: row.try_get("comment")?,
            groups: groups()?,
        }),
        Table::Domainlist => {
            let code: i64 = row.try_get("type")?;
            let kind = DomainKind::from_code(code)
                .ok_or_else(|| StoreError::Invalid(format!("unknown domain type {}", code)))?;
            Row::Domain(DomainRow {
                base,
                domain: row.try_get("domain")?,
                kind: Some(kind),
                comment: row.try_get("comment")?,
                groups: groups()?,
            })
        }
    })
}

#[async_trait]
impl RowProvider for SqliteStore {
    fn read_table<'a>(&'a self, list: ListType, argument: Option<&'a str>) -> RowStream<'a> {
        let table = list.table();
        let sql = builder::select_rows(table);
        tracing::debug!(sql = %sql, ?list, ?argument, "query");
        let mut query = sqlx::query(sql).bind(argument);
        if table == Table::Domainlist {
            query = query.bind(list.type_mask());
        }
        query
            .fetch(&self.pool)
            .map(move |res| res.map_err(StoreError::from).and_then(|r| decode_row(list, &r)))
            .boxed()
    }

    async fn add_to_table(&self, list: ListType, row: &RowWrite, mode: WriteMode) -> Result<(), StoreError> {
        let table = list.table();
        let kind = write_kind(list)?;
        let text = match table {
            Table::Group => row.description.as_deref(),
            _ => row.comment.as_deref(),
        };

        if let Some(oldtype) = row.oldtype.as_deref() {
            let new_kind = kind.ok_or_else(|| StoreError::Invalid("oldtype only applies to domain lists".into()))?;
            let old_kind = DomainKind::from_tag(oldtype)
                .ok_or_else(|| StoreError::Invalid(format!("unknown oldtype '{}'", oldtype)))?;
            let sql = builder::retype_domain();
            tracing::debug!(sql = %sql, argument = %row.argument, from = oldtype, to = new_kind.tag(), "retype");
            let done = sqlx::query(&sql)
                .bind(row.argument.as_str())
                .bind(row.enabled)
                .bind(text)
                .bind(new_kind.code())
                .bind(old_kind.code())
                .execute(&self.pool)
                .await?;
            if done.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!("no {} entry for {}", oldtype, row.argument)));
            }
            return Ok(());
        }

        let sql = builder::insert_row(table, mode);
        tracing::debug!(sql = %sql, argument = %row.argument, ?mode, "write");
        let mut query = sqlx::query(&sql).bind(row.argument.as_str()).bind(row.enabled).bind(text);
        if let Some(kind) = kind {
            query = query.bind(kind.code());
        }
        query.execute(&self.pool).await?;
        Ok(())
    }

    async fn edit_groups(&self, list: ListType, argument: &str, groups: &[i64]) -> Result<(), StoreError> {
        let table = list.table();
        let (membership, fk) = table
            .membership()
            .ok_or_else(|| StoreError::Invalid("groups cannot be assigned to a group".into()))?;
        let kind = write_kind(list)?;

        let mut tx = self.pool.begin().await?;
        let select = builder::select_id(table);
        let mut query = sqlx::query_scalar::<_, i64>(&select).bind(argument);
        if let Some(kind) = kind {
            query = query.bind(kind.code());
        }
        let id = query
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("no such item: {}", argument)))?;

        let (clear, insert) = builder::membership_statements(membership, fk);
        tracing::debug!(sql = %clear, id, ?groups, "membership");
        sqlx::query(&clear).bind(id).execute(&mut *tx).await?;
        for group_id in groups {
            sqlx::query(&insert).bind(id).bind(*group_id).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn remove_from_table(&self, list: ListType, argument: &str) -> Result<(), StoreError> {
        let table = list.table();
        let kind = write_kind(list)?;
        let sql = builder::delete_row(table);
        tracing::debug!(sql = %sql, argument, "delete");
        let mut query = sqlx::query(&sql).bind(argument);
        if let Some(kind) = kind {
            query = query.bind(kind.code());
        }
        let done = query.execute(&self.pool).await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("no such item: {}", argument)));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
