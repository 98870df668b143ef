//! # Attribute Sets
//!
//! Configuration payloads attached to backends and auth methods.
//!
//! An attribute set is an order-independent map. The `uri` entry names the
//! sub-path under the resource's mount the set is written to. The `oneshot`
//! entry, when present, marks the set as apply-once: it is written when the
//! resource is created and never again. The whole map, `uri` and `oneshot`
//! included, is sent as the write payload.

use crate::constants::{ATTRIBUTE_ONESHOT_KEY, ATTRIBUTE_URI_KEY};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A configuration payload written below a mount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Value>);

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The sub-path this set is written to, empty when missing or not a string
    #[must_use]
    pub fn uri(&self) -> &str {
        self.0
            .get(ATTRIBUTE_URI_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// True when the set must only be applied at creation time
    #[must_use]
    pub fn is_oneshot(&self) -> bool {
        self.0.contains_key(ATTRIBUTE_ONESHOT_KEY)
    }

    /// The payload to write
    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.0
    }

    /// Full path of the set below `mount`
    #[must_use]
    pub fn path_under(&self, mount: &str) -> String {
        format!("{}/{}", mount, self.uri())
    }

    /// An attribute set is only valid when it names a `uri`
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.uri().is_empty() {
            return Err(ValidationError::MissingUri);
        }
        Ok(())
    }
}

impl From<BTreeMap<String, Value>> for Attributes {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.0.iter().map(|(k, v)| format!("[{k}|{v}]")).collect();
        f.write_str(&items.join(","))
    }
}
