use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

use crate::error::{Result, ValidationError, ValidationErrorKind};
use crate::percentage::Percentage;
use crate::validate::validate_policy_key;

/// One raw `Key`/`Value` pair as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyEntry<V> {
    pub key: String,
    pub value: V,
}

impl<V> From<(String, V)> for PolicyEntry<V> {
    fn from((key, value): (String, V)) -> Self {
        Self { key, value }
    }
}

/// Key-unique mapping from an entity name to its health policy.
///
/// Insertion order is kept for the wire, but has no meaning. A key given
/// twice is rejected rather than merged.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyMap<V> {
    entries: Vec<(String, V)>,
}

/// Application type name to `MaxPercentUnhealthyApplications` override.
pub type HealthPolicyMap = PolicyMap<Percentage>;

impl<V> PolicyMap<V> {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from raw pairs, converting each value with `convert`.
    ///
    /// Entries are checked in order and the first failure wins. Errors are
    /// addressed as `[key]` relative to the map; the caller prefixes the
    /// map's own name with [`ValidationError::within`].
    pub fn build_with<R, I, F>(raw: I, mut convert: F) -> Result<Self>
    where
        I: IntoIterator<Item = (String, R)>,
        F: FnMut(R) -> Result<V>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for (key, value) in raw {
            validate_policy_key(&key).map_err(|kind| kind.at(""))?;
            if !seen.insert(key.clone()) {
                return Err(ValidationErrorKind::DuplicateHealthPolicyKey(key).at(""));
            }
            let value = convert(value).map_err(|e| e.within(&format!("[{}]", key)))?;
            entries.push((key, value));
        }
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PolicyMap<Percentage> {
    /// Build an application type health policy map from
    /// `(type name, percentage)` pairs.
    pub fn build<I>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        Self::build_with(raw, |value| {
            Percentage::new(value).map_err(|kind| ValidationError::new("", kind))
        })
    }
}

impl<V> Default for PolicyMap<V> {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct WireEntry<'a, V> {
    key: &'a str,
    value: &'a V,
}

/// Serialized as `[{"Key": .., "Value": ..}, ..]`.
impl<V: Serialize> Serialize for PolicyMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            seq.serialize_element(&WireEntry { key, value })?;
        }
        seq.end()
    }
}
