//! List types: which table backs a resource, which domain types it covers, and whether it can be written.

use serde::{Deserialize, Serialize};

/// Logical resource addressed under `/api`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListType {
    Groups,
    Adlists,
    Clients,
    AllowExact,
    AllowRegex,
    AllowAll,
    DenyExact,
    DenyRegex,
    DenyAll,
    AllExact,
    AllRegex,
    AllAll,
}

/// Backing table in the gravity database.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Table {
    Group,
    Adlist,
    Client,
    Domainlist,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Group => "\"group\"",
            Table::Adlist => "adlist",
            Table::Client => "client",
            Table::Domainlist => "domainlist",
        }
    }

    /// Column holding the lookup key (the path argument).
    pub fn key_column(self) -> &'static str {
        match self {
            Table::Group => "name",
            Table::Adlist => "address",
            Table::Client => "ip",
            Table::Domainlist => "domain",
        }
    }

    /// Membership table and its foreign key column. Groups have none.
    pub fn membership(self) -> Option<(&'static str, &'static str)> {
        match self {
            Table::Group => None,
            Table::Adlist => Some(("adlist_by_group", "adlist_id")),
            Table::Client => Some(("client_by_group", "client_id")),
            Table::Domainlist => Some(("domainlist_by_group", "domainlist_id")),
        }
    }
}

/// Stored type of a single domainlist row. Serialized as its tag, e.g. `allow-exact`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomainKind {
    AllowExact,
    DenyExact,
    AllowRegex,
    DenyRegex,
}

impl DomainKind {
    pub const ALL: [DomainKind; 4] = [
        DomainKind::AllowExact,
        DomainKind::DenyExact,
        DomainKind::AllowRegex,
        DomainKind::DenyRegex,
    ];

    /// Integer stored in `domainlist.type`.
    pub fn code(self) -> i64 {
        match self {
            DomainKind::AllowExact => 0,
            DomainKind::DenyExact => 1,
            DomainKind::AllowRegex => 2,
            DomainKind::DenyRegex => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }

    pub fn tag(self) -> &'static str {
        match self {
            DomainKind::AllowExact => "allow-exact",
            DomainKind::DenyExact => "deny-exact",
            DomainKind::AllowRegex => "allow-regex",
            DomainKind::DenyRegex => "deny-regex",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    pub fn is_regex(self) -> bool {
        matches!(self, DomainKind::AllowRegex | DomainKind::DenyRegex)
    }
}

impl ListType {
    pub fn table(self) -> Table {
        match self {
            ListType::Groups => Table::Group,
            ListType::Adlists => Table::Adlist,
            ListType::Clients => Table::Client,
            _ => Table::Domainlist,
        }
    }

    /// Domain types visible through this list. Empty for non-domain lists.
    pub fn domain_kinds(self) -> &'static [DomainKind] {
        use DomainKind::*;
        match self {
            ListType::Groups | ListType::Adlists | ListType::Clients => &[],
            ListType::AllowExact => &[AllowExact],
            ListType::AllowRegex => &[AllowRegex],
            ListType::AllowAll => &[AllowExact, AllowRegex],
            ListType::DenyExact => &[DenyExact],
            ListType::DenyRegex => &[DenyRegex],
            ListType::DenyAll => &[DenyExact, DenyRegex],
            ListType::AllExact => &[AllowExact, DenyExact],
            ListType::AllRegex => &[AllowRegex, DenyRegex],
            ListType::AllAll => &DomainKind::ALL,
        }
    }

    /// The single domain type a writable domain list stores rows as.
    pub fn domain_kind(self) -> Option<DomainKind> {
        match self.domain_kinds() {
            [kind] => Some(*kind),
            _ => None,
        }
    }

    /// Bit set over `DomainKind::code`, bound into the domainlist select.
    pub fn type_mask(self) -> i64 {
        self.domain_kinds().iter().fold(0, |mask, k| mask | (1 << k.code()))
    }

    /// Only leaf lists can be written; the aggregate domain views are read-only.
    pub fn is_modifiable(self) -> bool {
        matches!(
            self,
            ListType::Groups
                | ListType::Adlists
                | ListType::Clients
                | ListType::AllowExact
                | ListType::AllowRegex
                | ListType::DenyExact
                | ListType::DenyRegex
        )
    }

    pub fn is_regex(self) -> bool {
        self.domain_kind().is_some_and(DomainKind::is_regex)
    }

    /// Key of the array in a read response. Clients are listed under `domains`.
    pub fn collection_key(self) -> &'static str {
        match self.table() {
            Table::Group => "groups",
            Table::Adlist => "adlists",
            Table::Client | Table::Domainlist => "domains",
        }
    }
}
