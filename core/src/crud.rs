//! Point-CRUD client: read, create, update and delete by key.
//!
//! # Design
//! `initialize` registers one route per operation under namespaced keys, so
//! two entity types can both expose a `get` without colliding. `get` and
//! `delete` resolve `<base>/:<keyField>` with a single-entry argument bag;
//! `post` and `put` go to the bare base path with the record as JSON body.
//! The `*_with` variants accept [`Hooks`]; the capability-trait impls call
//! them with none attached.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::contracts::{Creatable, Deletable, DeleteTarget, Editable, Gettable};
use crate::descriptor::{Entity, EntityDescriptor};
use crate::error::{ApiError, ApiResult};
use crate::resolver::{Hooks, Resolver, ROUTE_PARAMETER};
use crate::routes::{RouteArgs, RouteRegistry};
use crate::transport::{ApiRequest, Transport};

const GET: &str = "get";
const POST: &str = "post";
const PUT: &str = "put";
const DELETE: &str = "delete";

/// Typed point-CRUD client for one entity type.
pub struct CrudClient<T: Entity> {
    base: Resolver,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> CrudClient<T> {
    pub fn new(transport: Transport, routes: Arc<RouteRegistry>) -> Self {
        Self {
            base: Resolver::new(transport, routes),
            _entity: PhantomData,
        }
    }

    /// Binds the descriptor and registers this client's route templates.
    pub fn initialize(&mut self, descriptor: EntityDescriptor) {
        self.base.initialize(descriptor);
        let binding = self.base.binding();
        let keyed = format!(
            "{}{ROUTE_PARAMETER}{}",
            binding.base_route, binding.descriptor.key
        );
        let bare = binding.base_route.clone();
        self.base.routes().add(&self.base.build_key(GET), &keyed);
        self.base.routes().add(&self.base.build_key(POST), &bare);
        self.base.routes().add(&self.base.build_key(DELETE), &keyed);
        self.base.routes().add(&self.base.build_key(PUT), &bare);
    }

    /// Fetches the record matching `key`; a missing record is an error.
    pub async fn get_with(&self, key: T::Key, hooks: Hooks<'_, T>) -> ApiResult<T> {
        let path = self.base.route(GET, &self.key_args(&key.to_string()));
        Resolver::resolve(self.base.dispatch(ApiRequest::get(path)), hooks).await
    }

    /// Non-default read variant that tolerates a missing record: a 404
    /// becomes `Ok(None)` instead of surfacing as a failure.
    pub async fn try_get(&self, key: T::Key) -> ApiResult<Option<T>> {
        match self.get_with(key, Hooks::none()).await {
            Ok(record) => Ok(Some(record)),
            Err(ApiError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Creates `record`; the response carries the persisted record with its
    /// assigned key.
    pub async fn post_with(&self, record: &T, hooks: Hooks<'_, T>) -> ApiResult<T> {
        let body = serialize(record)?;
        let path = self.base.route(POST, &RouteArgs::new());
        Resolver::resolve(self.base.dispatch(ApiRequest::post(path, body)), hooks).await
    }

    /// Updates `record`, keyed by the record's own key field in the body.
    pub async fn put_with(&self, record: &T, hooks: Hooks<'_, T>) -> ApiResult<T> {
        let body = serialize(record)?;
        let path = self.base.route(PUT, &RouteArgs::new());
        Resolver::resolve(self.base.dispatch(ApiRequest::put(path, body)), hooks).await
    }

    /// Deletes by record or bare key; both resolve to the same route path.
    /// `None` when the backend answers with an empty body (204).
    pub async fn delete_with(
        &self,
        target: DeleteTarget<T>,
        hooks: Hooks<'_, Option<T>>,
    ) -> ApiResult<Option<T>> {
        let path = self.delete_path(&target);
        Resolver::resolve(self.base.dispatch_optional(ApiRequest::delete(path)), hooks).await
    }

    fn delete_path(&self, target: &DeleteTarget<T>) -> String {
        let args = match target.key_value() {
            Some(value) => self.key_args(&value),
            None => RouteArgs::new(),
        };
        self.base.route(DELETE, &args)
    }

    /// Single-entry argument bag `{ <keyField>: value }` so generic
    /// placeholder substitution produces `<base>/<value>`.
    fn key_args(&self, value: &str) -> RouteArgs {
        let mut args = RouteArgs::new();
        args.insert(
            self.base.binding().descriptor.key.to_string(),
            value.to_string(),
        );
        args
    }
}

fn serialize<T: Entity>(record: &T) -> ApiResult<String> {
    serde_json::to_string(record).map_err(|e| ApiError::Serialization(e.to_string()))
}

#[async_trait]
impl<T: Entity> Gettable<T> for CrudClient<T> {
    async fn get(&self, key: T::Key) -> ApiResult<Option<T>> {
        self.get_with(key, Hooks::none()).await.map(Some)
    }
}

#[async_trait]
impl<T: Entity> Creatable<T> for CrudClient<T> {
    async fn post(&self, record: &T) -> ApiResult<Option<T>> {
        self.post_with(record, Hooks::none()).await.map(Some)
    }
}

#[async_trait]
impl<T: Entity> Editable<T> for CrudClient<T> {
    async fn put(&self, record: &T) -> ApiResult<Option<T>> {
        self.put_with(record, Hooks::none()).await.map(Some)
    }
}

#[async_trait]
impl<T: Entity> Deletable<T> for CrudClient<T> {
    async fn delete(&self, target: DeleteTarget<T>) -> ApiResult<Option<T>> {
        self.delete_with(target, Hooks::none()).await
    }
}
