//! Capability contracts: narrow, independently useful client traits.
//!
//! # Design
//! Each trait covers exactly one operation so callers can depend on the
//! minimal surface they need — a detail view takes a `Gettable`, a list view
//! a `BatchGettable`. [`Crudable`] is the structural union of the four
//! point operations, provided by a blanket impl rather than a monolithic
//! base. Single-record results are `Option` so a facade can substitute
//! "unset" when it recovers a failure; concrete clients return `Some` on
//! success (or `None` when the backend answers with an empty body).

use async_trait::async_trait;

use crate::descriptor::Entity;
use crate::error::ApiResult;

/// Either a full record or a bare key, accepted by [`Deletable::delete`].
pub enum DeleteTarget<T: Entity> {
    Key(T::Key),
    Record(T),
}

impl<T: Entity> DeleteTarget<T> {
    /// The key value this target resolves to, rendered for route
    /// substitution. A record that was never persisted has none.
    pub fn key_value(&self) -> Option<String> {
        match self {
            DeleteTarget::Key(key) => Some(key.to_string()),
            DeleteTarget::Record(record) => record.key().map(|key| key.to_string()),
        }
    }
}

/// Read a single record by key.
#[async_trait]
pub trait Gettable<T: Entity>: Send + Sync {
    async fn get(&self, key: T::Key) -> ApiResult<Option<T>>;
}

/// Create a record.
#[async_trait]
pub trait Creatable<T: Entity>: Send + Sync {
    async fn post(&self, record: &T) -> ApiResult<Option<T>>;
}

/// Update a record.
#[async_trait]
pub trait Editable<T: Entity>: Send + Sync {
    async fn put(&self, record: &T) -> ApiResult<Option<T>>;
}

/// Delete a record or the record matching a key.
#[async_trait]
pub trait Deletable<T: Entity>: Send + Sync {
    async fn delete(&self, target: DeleteTarget<T>) -> ApiResult<Option<T>>;
}

/// Fetch the whole collection.
#[async_trait]
pub trait BatchGettable<T: Entity>: Send + Sync {
    async fn get_all(&self) -> ApiResult<Vec<T>>;
}

/// Fetch the records matching a search term.
#[async_trait]
pub trait Searchable<T: Entity>: Send + Sync {
    async fn search(&self, term: &str) -> ApiResult<Vec<T>>;
}

/// Full point-CRUD contract: the union of the four single-record
/// capabilities. Implemented automatically for anything providing all four.
pub trait Crudable<T: Entity>: Gettable<T> + Creatable<T> + Editable<T> + Deletable<T> {}

impl<T: Entity, C> Crudable<T> for C where
    C: Gettable<T> + Creatable<T> + Editable<T> + Deletable<T>
{
}
