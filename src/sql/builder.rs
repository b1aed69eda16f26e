//! Builds the statements for each backing table. Identifiers come from `Table` only, values are parameters.

use crate::model::{Table, WriteMode};

const NOW: &str = "cast(strftime('%s', 'now') as int)";

/// Select for a read. `?1` is the optional key filter; domainlist also takes `?2`, a `ListType::type_mask`.
pub fn select_rows(table: Table) -> &'static str {
    match table {
        Table::Group => {
            "SELECT id, name, description, enabled, date_added, date_modified \
             FROM \"group\" WHERE (?1 IS NULL OR name = ?1) ORDER BY id"
        }
        Table::Adlist => {
            "SELECT a.id, a.address, a.comment, a.enabled, a.date_added, a.date_modified, \
             (SELECT group_concat(g.group_id) FROM adlist_by_group g WHERE g.adlist_id = a.id) AS group_ids \
             FROM adlist a WHERE (?1 IS NULL OR a.address = ?1) ORDER BY a.id"
        }
        Table::Client => {
            "SELECT c.id, c.ip, c.comment, c.enabled, c.date_added, c.date_modified, \
             (SELECT group_concat(g.group_id) FROM client_by_group g WHERE g.client_id = c.id) AS group_ids \
             FROM client c WHERE (?1 IS NULL OR c.ip = ?1) ORDER BY c.id"
        }
        Table::Domainlist => {
            "SELECT d.id, d.domain, d.type, d.comment, d.enabled, d.date_added, d.date_modified, \
             (SELECT group_concat(g.group_id) FROM domainlist_by_group g WHERE g.domainlist_id = d.id) AS group_ids \
             FROM domainlist d WHERE (?1 IS NULL OR d.domain = ?1) AND ((?2 >> d.type) & 1) = 1 ORDER BY d.id"
        }
    }
}

/// Free-text column written from the request: groups keep a description, everything else a comment.
fn text_column(table: Table) -> &'static str {
    match table {
        Table::Group => "description",
        _ => "comment",
    }
}

/// Insert or upsert. Binds `?1` key, `?2` enabled, `?3` comment/description, and for domainlist `?4` type.
/// Upserts keep the row id, so group membership survives a replace.
pub fn insert_row(table: Table, mode: WriteMode) -> String {
    let name = table.name();
    let key = table.key_column();
    let text = text_column(table);
    let (columns, values, conflict) = match table {
        Table::Domainlist => (
            format!("{key}, enabled, {text}, type"),
            "?1, ?2, ?3, ?4",
            format!("{key}, type"),
        ),
        _ => (format!("{key}, enabled, {text}"), "?1, ?2, ?3", key.to_string()),
    };
    let mut sql = format!("INSERT INTO {name} ({columns}) VALUES ({values})");
    if mode == WriteMode::Replace {
        sql.push_str(&format!(
            " ON CONFLICT({conflict}) DO UPDATE SET enabled = excluded.enabled, \
             {text} = excluded.{text}, date_modified = {NOW}"
        ));
    }
    sql
}

/// Move a domain entry between types. Binds `?1` domain, `?2` enabled, `?3` comment, `?4` new type, `?5` old type.
pub fn retype_domain() -> String {
    format!(
        "UPDATE domainlist SET type = ?4, enabled = ?2, comment = ?3, date_modified = {NOW} \
         WHERE domain = ?1 AND type = ?5"
    )
}

/// Row id by key. Domainlist also binds `?2` type.
pub fn select_id(table: Table) -> String {
    let name = table.name();
    let key = table.key_column();
    match table {
        Table::Domainlist => format!("SELECT id FROM {name} WHERE {key} = ?1 AND type = ?2"),
        _ => format!("SELECT id FROM {name} WHERE {key} = ?1"),
    }
}

/// Delete by key. Domainlist also binds `?2` type.
pub fn delete_row(table: Table) -> String {
    let name = table.name();
    let key = table.key_column();
    match table {
        Table::Domainlist => format!("DELETE FROM {name} WHERE {key} = ?1 AND type = ?2"),
        _ => format!("DELETE FROM {name} WHERE {key} = ?1"),
    }
}

/// Clear and refill statements for a membership table.
pub fn membership_statements(membership_table: &str, fk_column: &str) -> (String, String) {
    (
        format!("DELETE FROM {membership_table} WHERE {fk_column} = ?1"),
        format!("INSERT INTO {membership_table} ({fk_column}, group_id) VALUES (?1, ?2)"),
    )
}
