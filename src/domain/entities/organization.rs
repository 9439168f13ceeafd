//! Theatre organization entity.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Organization identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(String);

impl OrganizationId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns identifier as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the identifier is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrganizationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A theatre organization record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Stable unique identifier.
    pub id: OrganizationId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Mission statement.
    #[serde(default)]
    pub mission: String,
}

impl Organization {
    /// Attribute name of the primary key.
    pub const KEY_ATTRIBUTE: &'static str = "id";

    /// Creates a record.
    #[must_use]
    pub fn new(
        id: impl Into<OrganizationId>,
        name: impl Into<String>,
        mission: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mission: mission.into(),
        }
    }

    /// Creates an empty record with a freshly generated id.
    #[must_use]
    pub fn draft() -> Self {
        Self {
            id: OrganizationId::generate(),
            ..Self::default()
        }
    }

    /// Returns the attributes to persist, leaving out empty strings.
    #[must_use]
    pub fn to_sparse(&self) -> SparseRecord {
        [
            (Self::KEY_ATTRIBUTE, self.id.as_str()),
            ("name", self.name.as_str()),
            ("mission", self.mission.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }

    /// Rebuilds a record from stored attributes; missing ones read as empty.
    #[must_use]
    pub fn from_sparse(record: &SparseRecord) -> Self {
        let field = |name: &str| record.get(name).unwrap_or_default().to_string();
        Self {
            id: OrganizationId::new(field(Self::KEY_ATTRIBUTE)),
            name: field("name"),
            mission: field("mission"),
        }
    }
}

impl From<String> for OrganizationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// String attributes of a stored item. Absent keys mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseRecord(BTreeMap<String, String>);

impl SparseRecord {
    /// Returns attribute value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns whether attribute is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Sets an attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Iterates over attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the record has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SparseRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Sorts records by name, ascending. Equal names keep their input order.
pub fn sort_by_name(organizations: &mut [Organization]) {
    organizations.sort_by(|a, b| a.name.cmp(&b.name));
}
