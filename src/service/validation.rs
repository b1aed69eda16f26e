//! Request body validation for create-or-replace.

use crate::error::AppError;
use crate::model::{ListType, RowWrite};
use regex::Regex;
use serde_json::{Map, Value};

/// Validated create-or-replace body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WritePayload {
    pub enabled: bool,
    pub comment: Option<String>,
    pub description: Option<String>,
    pub oldtype: Option<String>,
    /// `None` leaves membership untouched.
    pub groups: Option<Vec<i64>>,
}

impl WritePayload {
    /// Parse the raw body. Empty, non-JSON and non-object bodies are rejected alike.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| AppError::bad_request("Invalid request body data"))?;
        match value {
            Value::Object(map) => Self::from_map(&map),
            _ => Err(AppError::bad_request("Invalid request body data")),
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> Result<Self, AppError> {
        let enabled = map
            .get("enabled")
            .and_then(Value::as_bool)
            .ok_or_else(|| AppError::bad_request("No \"enabled\" boolean in body data"))?;
        Ok(WritePayload {
            enabled,
            comment: non_empty_str(map, "comment"),
            description: non_empty_str(map, "description"),
            oldtype: non_empty_str(map, "oldtype"),
            groups: group_ids(map)?,
        })
    }

    pub fn to_row_write(&self, argument: &str) -> RowWrite {
        RowWrite {
            argument: argument.to_string(),
            enabled: self.enabled,
            comment: self.comment.clone(),
            description: self.description.clone(),
            oldtype: self.oldtype.clone(),
        }
    }
}

/// String field when present and non-empty; anything else counts as absent.
fn non_empty_str(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn group_ids(map: &Map<String, Value>) -> Result<Option<Vec<i64>>, AppError> {
    let Some(value) = map.get("groups") else {
        return Ok(None);
    };
    let invalid = || AppError::bad_request("\"groups\" must be an array of group ids");
    let items = value.as_array().ok_or_else(invalid)?;
    let mut ids = items
        .iter()
        .map(|v| v.as_i64().filter(|id| *id >= 0).ok_or_else(invalid))
        .collect::<Result<Vec<_>, _>>()?;
    ids.sort_unstable();
    ids.dedup();
    Ok(Some(ids))
}

/// Entries of regex lists must compile.
///
/// This is a syntax check against the `regex` crate only. The blocking engine that consumes the
/// lists matches with POSIX extended regular expressions, so a few patterns accepted here may
/// still be rejected there, and the reverse.
pub fn validate_argument(list: ListType, argument: &str) -> Result<(), AppError> {
    if list.is_regex() {
        Regex::new(argument).map_err(|e| AppError::bad_request(format!("Invalid regex: {}", e)))?;
    }
    Ok(())
}

/// Membership can only be given for lists that have a membership table.
pub fn validate_payload(list: ListType, payload: &WritePayload) -> Result<(), AppError> {
    if payload.groups.is_some() && list.table().membership().is_none() {
        return Err(AppError::bad_request("Invalid request: Groups cannot be assigned to a group"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: Value) -> Result<WritePayload, AppError> {
        WritePayload::from_body(v.to_string().as_bytes())
    }

    #[test]
    fn requires_boolean_enabled() {
        assert!(matches!(parse(json!({})), Err(AppError::BadRequest(_))));
        assert!(matches!(parse(json!({ "enabled": "yes" })), Err(AppError::BadRequest(_))));
        assert!(parse(json!({ "enabled": false })).is_ok());
    }

    #[test]
    fn rejects_missing_or_non_object_body() {
        assert!(matches!(WritePayload::from_body(b""), Err(AppError::BadRequest(_))));
        assert!(matches!(WritePayload::from_body(b"{not json"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse(json!([true])), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn empty_strings_are_absent() {
        let p = parse(json!({ "enabled": true, "comment": "", "description": "d", "oldtype": 3 })).unwrap();
        assert_eq!(p.comment, None);
        assert_eq!(p.description.as_deref(), Some("d"));
        assert_eq!(p.oldtype, None);
        assert_eq!(p.groups, None);
    }

    #[test]
    fn groups_must_be_ids() {
        let p = parse(json!({ "enabled": true, "groups": [3, 1, 3] })).unwrap();
        assert_eq!(p.groups, Some(vec![1, 3]));
        let p = parse(json!({ "enabled": true, "groups": [] })).unwrap();
        assert_eq!(p.groups, Some(vec![]));
        assert!(parse(json!({ "enabled": true, "groups": "1,2" })).is_err());
        assert!(parse(json!({ "enabled": true, "groups": [-1] })).is_err());
        assert!(parse(json!({ "enabled": true, "groups": null })).is_err());
    }

    #[test]
    fn groups_only_for_lists_with_membership() {
        let with_groups = parse(json!({ "enabled": true, "groups": [] })).unwrap();
        let without = parse(json!({ "enabled": true })).unwrap();
        assert!(matches!(validate_payload(ListType::Groups, &with_groups), Err(AppError::BadRequest(_))));
        assert!(validate_payload(ListType::Groups, &without).is_ok());
        assert!(validate_payload(ListType::Adlists, &with_groups).is_ok());
        assert!(validate_payload(ListType::Clients, &with_groups).is_ok());
        assert!(validate_payload(ListType::AllowRegex, &with_groups).is_ok());
    }

    #[test]
    fn regex_lists_check_pattern() {
        assert!(validate_argument(ListType::DenyRegex, "(^|\\.)ads\\.").is_ok());
        assert!(validate_argument(ListType::DenyRegex, "(unclosed").is_err());
        assert!(validate_argument(ListType::DenyExact, "(unclosed").is_ok());
    }
}
