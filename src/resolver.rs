//! Maps a request path to the list it addresses and the item argument that follows it.

use crate::model::ListType;

/// One resolution rule: a path prefix and the list it selects.
#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub prefix: &'static str,
    pub list: ListType,
    pub modifiable: bool,
}

const fn rule(prefix: &'static str, list: ListType, modifiable: bool) -> Rule {
    Rule { prefix, list, modifiable }
}

/// Evaluated in order, first match wins. Children precede their parent prefix.
pub const RULES: &[Rule] = &[
    rule("/api/groups", ListType::Groups, true),
    rule("/api/adlists", ListType::Adlists, true),
    rule("/api/clients", ListType::Clients, true),
    rule("/api/domains/allow/exact", ListType::AllowExact, true),
    rule("/api/domains/allow/regex", ListType::AllowRegex, true),
    rule("/api/domains/allow", ListType::AllowAll, false),
    rule("/api/domains/deny/exact", ListType::DenyExact, true),
    rule("/api/domains/deny/regex", ListType::DenyRegex, true),
    rule("/api/domains/deny", ListType::DenyAll, false),
    rule("/api/domains/exact", ListType::AllExact, false),
    rule("/api/domains/regex", ListType::AllRegex, false),
    rule("/api/domains", ListType::AllAll, false),
];

/// Result of resolving a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub list: ListType,
    /// URL-decoded item key; `None` addresses the whole collection.
    pub argument: Option<String>,
    pub modifiable: bool,
}

/// Resolve `path` (without query string). `None` means no list matches.
pub fn resolve(path: &str) -> Option<Resolved> {
    RULES.iter().find_map(|r| {
        let rest = strip_segment_prefix(path, r.prefix)?;
        let argument = decode_argument(rest)?;
        Some(Resolved {
            list: r.list,
            argument,
            modifiable: r.modifiable,
        })
    })
}

/// Prefix match on a segment boundary: `/api/groups` matches `/api/groups/x` but not `/api/groupsx`.
fn strip_segment_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Outer `None` rejects the path, inner `None` means no argument.
fn decode_argument(rest: &str) -> Option<Option<String>> {
    let raw = rest.strip_prefix('/').unwrap_or(rest);
    if raw.is_empty() {
        return Some(None);
    }
    let decoded = urlencoding::decode(raw).ok()?;
    Some(Some(decoded.into_owned()))
}
