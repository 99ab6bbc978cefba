//! Static per-type metadata describing a record type to the framework.
//!
//! # Design
//! The descriptor is an explicit configuration value, not reflection: a type
//! declares it once (const-constructible, `Copy`) and every client for that
//! type reads it at `initialize` time. Defaults cascade — `table` falls back
//! to `reference`, the primary-key field to `"id"` — so the common case is a
//! single `EntityDescriptor::new("Hero")` call.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

/// Metadata attached to a record type: logical name, backing resource name
/// and primary-key field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Logical name used to namespace route keys; `None` leaves keys bare.
    pub reference: Option<&'static str>,
    /// Backing resource (table) name, appended to the api prefix.
    pub table: &'static str,
    /// Primary-key field name used in route placeholders.
    pub key: &'static str,
}

impl EntityDescriptor {
    /// Descriptor named after the type itself; table defaults to the
    /// reference and the key field to `"id"`.
    pub const fn new(reference: &'static str) -> Self {
        Self {
            reference: Some(reference),
            table: reference,
            key: "id",
        }
    }

    /// Descriptor without a reference: route keys stay un-namespaced.
    pub const fn for_table(table: &'static str) -> Self {
        Self {
            reference: None,
            table,
            key: "id",
        }
    }

    pub const fn table(mut self, table: &'static str) -> Self {
        self.table = table;
        self
    }

    pub const fn key(mut self, key: &'static str) -> Self {
        self.key = key;
        self
    }
}

/// A record type participating in the framework.
///
/// The key may be unset for records that have not been persisted yet; the
/// backend assigns one on creation.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Primary-key type.
    type Key: Display + Send + Sync + 'static;

    /// Static metadata for this type, readable without an instance.
    fn descriptor() -> EntityDescriptor;

    /// This record's key, when it has one.
    fn key(&self) -> Option<&Self::Key>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cascade_from_reference() {
        let descriptor = EntityDescriptor::new("Hero");
        assert_eq!(descriptor.reference, Some("Hero"));
        assert_eq!(descriptor.table, "Hero");
        assert_eq!(descriptor.key, "id");
    }

    #[test]
    fn overrides_replace_defaults() {
        let descriptor = EntityDescriptor::new("Hero").table("heroes").key("number");
        assert_eq!(descriptor.reference, Some("Hero"));
        assert_eq!(descriptor.table, "heroes");
        assert_eq!(descriptor.key, "number");
    }

    #[test]
    fn for_table_leaves_reference_unset() {
        let descriptor = EntityDescriptor::for_table("heroes");
        assert_eq!(descriptor.reference, None);
        assert_eq!(descriptor.table, "heroes");
        assert_eq!(descriptor.key, "id");
    }
}
