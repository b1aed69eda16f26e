//! The uniform CRUD contract over every list type.

use crate::error::AppError;
use crate::model::{ListType, RowWrite, WriteMode};
use crate::provider::RowProvider;
use crate::response::{collection, no_content};
use crate::service::validation::{validate_argument, validate_payload, WritePayload};
use axum::http::StatusCode;
use axum::response::Response;
use futures::TryStreamExt;
use serde_json::{Map, Value};

pub struct ListService;

impl ListService {
    /// Read the whole list, or the single item keyed by `argument`, and answer with `status`.
    /// A store error at any point discards the rows read so far.
    pub async fn read(
        provider: &dyn RowProvider,
        list: ListType,
        argument: Option<&str>,
        status: StatusCode,
    ) -> Result<Response, AppError> {
        let mut rows = provider.read_table(list, argument);
        let mut items = Vec::new();
        while let Some(row) = rows.try_next().await.map_err(|e| {
            tracing::warn!(?list, ?argument, error = %e, "read failed");
            AppError::database("Could not read from gravity database", argument, &e, Map::new())
        })? {
            items.push(row);
        }
        tracing::debug!(?list, ?argument, count = items.len(), "read");
        Ok(collection(status, list.collection_key(), items))
    }

    /// Create (POST) or replace (PUT) the item keyed by `argument`, then answer as a read of that item.
    ///
    /// The row write and the membership write are separate store calls. When the second fails the
    /// row stays written while the response reports a database error.
    pub async fn write(
        provider: &dyn RowProvider,
        list: ListType,
        argument: &str,
        payload: &WritePayload,
        mode: WriteMode,
    ) -> Result<Response, AppError> {
        validate_argument(list, argument)?;
        validate_payload(list, payload)?;
        let row = payload.to_row_write(argument);

        let written = match provider.add_to_table(list, &row, mode).await {
            Ok(()) => match &payload.groups {
                Some(groups) => provider.edit_groups(list, argument, groups).await,
                None => Ok(()),
            },
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            tracing::warn!(?list, argument, ?mode, error = %e, "write failed");
            return Err(AppError::database(
                "Could not add to gravity database",
                Some(argument),
                &e,
                write_details(&row),
            ));
        }
        tracing::info!(?list, argument, ?mode, "written");
        Self::read(provider, list, Some(argument), success_status(mode)).await
    }

    pub async fn remove(provider: &dyn RowProvider, list: ListType, argument: &str) -> Result<Response, AppError> {
        if let Err(e) = provider.remove_from_table(list, argument).await {
            tracing::warn!(?list, argument, error = %e, "delete failed");
            return Err(AppError::database(
                "Could not remove item from gravity database",
                Some(argument),
                &e,
                Map::new(),
            ));
        }
        tracing::info!(?list, argument, "removed");
        Ok(no_content())
    }
}

fn success_status(mode: WriteMode) -> StatusCode {
    match mode {
        WriteMode::Create => StatusCode::CREATED,
        WriteMode::Replace => StatusCode::OK,
    }
}

/// Echo of the values a failed write tried to store.
fn write_details(row: &RowWrite) -> Map<String, Value> {
    let mut details = Map::new();
    details.insert("enabled".into(), Value::Bool(row.enabled));
    let optional = [
        ("comment", &row.comment),
        ("description", &row.description),
        ("oldtype", &row.oldtype),
    ];
    for (key, value) in optional {
        if let Some(v) = value {
            details.insert(key.into(), Value::String(v.clone()));
        }
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GroupRow, Row, RowBase};
    use crate::provider::{RowStream, StoreError};
    use async_trait::async_trait;
    use futures::StreamExt;
    use std::sync::Mutex;

    fn group(id: i64) -> Row {
        Row::Group(GroupRow {
            base: RowBase { id, enabled: true, date_added: 0, date_modified: 0 },
            name: format!("g{}", id),
            description: None,
        })
    }

    /// Serves a fixed read script and records write calls.
    #[derive(Default)]
    struct ScriptedProvider {
        fail_read_after: Option<usize>,
        fail_groups: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl RowProvider for ScriptedProvider {
        fn read_table<'a>(&'a self, _list: ListType, _argument: Option<&'a str>) -> RowStream<'a> {
            let items: Vec<Result<Row, StoreError>> = match self.fail_read_after {
                Some(n) => (0..n as i64)
                    .map(|i| Ok(group(i)))
                    .chain(std::iter::once(Err(StoreError::Invalid("disk I/O error".into()))))
                    .collect(),
                None => vec![Ok(group(1))],
            };
            futures::stream::iter(items).boxed()
        }

        async fn add_to_table(&self, _list: ListType, _row: &RowWrite, _mode: WriteMode) -> Result<(), StoreError> {
            self.calls.lock().unwrap().push("add");
            Ok(())
        }

        async fn edit_groups(&self, _list: ListType, _argument: &str, _groups: &[i64]) -> Result<(), StoreError> {
            self.calls.lock().unwrap().push("groups");
            if self.fail_groups {
                Err(StoreError::Invalid("FOREIGN KEY constraint failed".into()))
            } else {
                Ok(())
            }
        }

        async fn remove_from_table(&self, _list: ListType, argument: &str) -> Result<(), StoreError> {
            Err(StoreError::NotFound(format!("no such item: {}", argument)))
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn expect_err(result: Result<Response, AppError>) -> AppError {
        match result {
            Ok(resp) => panic!("expected error, got {}", resp.status()),
            Err(e) => e,
        }
    }

    fn payload(groups: Option<Vec<i64>>) -> WritePayload {
        WritePayload {
            enabled: true,
            comment: Some("c".into()),
            description: None,
            oldtype: None,
            groups,
        }
    }

    #[tokio::test]
    async fn mid_stream_error_discards_partial_collection() {
        let provider = ScriptedProvider { fail_read_after: Some(2), ..Default::default() };
        let err = expect_err(ListService::read(&provider, ListType::Groups, None, StatusCode::OK).await);
        match err {
            AppError::Database { details, .. } => {
                assert_eq!(details["argument"], Value::Null);
                assert_eq!(details["sql_msg"], Value::String("disk I/O error".into()));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn groups_are_only_written_when_given() {
        let provider = ScriptedProvider::default();
        let resp = ListService::write(&provider, ListType::Adlists, "https://l.example", &payload(None), WriteMode::Create)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(*provider.calls.lock().unwrap(), vec!["add"]);

        let resp = ListService::write(
            &provider,
            ListType::Adlists,
            "https://l.example",
            &payload(Some(vec![])),
            WriteMode::Replace,
        )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(*provider.calls.lock().unwrap(), vec!["add", "add", "groups"]);
    }

    #[tokio::test]
    async fn group_membership_on_a_group_is_rejected_before_any_store_call() {
        let provider = ScriptedProvider::default();
        let err = expect_err(
            ListService::write(&provider, ListType::Groups, "kids", &payload(Some(vec![])), WriteMode::Create).await,
        );
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_membership_write_reports_database_error_after_row_write() {
        let provider = ScriptedProvider { fail_groups: true, ..Default::default() };
        let err = expect_err(
            ListService::write(&provider, ListType::DenyExact, "ads.example", &payload(Some(vec![9])), WriteMode::Create)
                .await,
        );
        assert_eq!(*provider.calls.lock().unwrap(), vec!["add", "groups"]);
        match err {
            AppError::Database { details, .. } => {
                assert_eq!(details["argument"], Value::String("ads.example".into()));
                assert_eq!(details["enabled"], Value::Bool(true));
                assert_eq!(details["comment"], Value::String("c".into()));
                assert!(details.get("description").is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn remove_failure_echoes_argument() {
        let provider = ScriptedProvider::default();
        let err = expect_err(ListService::remove(&provider, ListType::AllowExact, "nope.example").await);
        match err {
            AppError::Database { details, .. } => {
                assert_eq!(details["argument"], Value::String("nope.example".into()));
                assert_eq!(details["sql_msg"], Value::String("no such item: nope.example".into()));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
