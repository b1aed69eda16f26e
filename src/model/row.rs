//! Row shapes returned by the row provider, and the write payload handed to it.

use crate::model::DomainKind;
use serde::Serialize;
use std::num::ParseIntError;

/// Fields every list row carries. Ids and timestamps are maintained by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowBase {
    pub id: i64,
    pub enabled: bool,
    pub date_added: i64,
    pub date_modified: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupRow {
    #[serde(flatten)]
    pub base: RowBase,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdlistRow {
    #[serde(flatten)]
    pub base: RowBase,
    pub address: String,
    pub comment: Option<String>,
    pub groups: Vec<i64>,
}

/// Domain-list entries and clients share this shape. A client carries its address in `domain`
/// and has no type, which renders as `"type": null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DomainRow {
    #[serde(flatten)]
    pub base: RowBase,
    pub domain: String,
    #[serde(rename = "type")]
    pub kind: Option<DomainKind>,
    pub comment: Option<String>,
    pub groups: Vec<i64>,
}

/// One record of any list. Absent comments and descriptions serialize as `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Row {
    Group(GroupRow),
    Adlist(AdlistRow),
    Domain(DomainRow),
}

impl Row {
    pub fn base(&self) -> &RowBase {
        match self {
            Row::Group(r) => &r.base,
            Row::Adlist(r) => &r.base,
            Row::Domain(r) => &r.base,
        }
    }

    /// Lookup key of the row: group name, adlist address, or domain (client address for clients).
    pub fn key(&self) -> &str {
        match self {
            Row::Group(r) => &r.name,
            Row::Adlist(r) => &r.address,
            Row::Domain(r) => &r.domain,
        }
    }
}

/// Values for an insert or replace. Empty strings are normalized to `None` before they get here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowWrite {
    pub argument: String,
    pub enabled: bool,
    pub comment: Option<String>,
    pub description: Option<String>,
    pub oldtype: Option<String>,
}

/// POST creates and fails on an existing key; PUT replaces in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Replace,
}

/// Parse the store's comma-separated group id list (`group_concat` output).
/// NULL and empty input yield an empty set; ids come back sorted and unique.
pub fn parse_group_ids(raw: Option<&str>) -> Result<Vec<i64>, ParseIntError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Vec::new());
    };
    let mut ids = raw
        .split(',')
        .map(|s| s.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()?;
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}
