//! Facade service: the composed, full-capability client the presentation
//! layer talks to.
//!
//! # Design
//! `EntityService` owns one point-CRUD, one list and one search client, all
//! initialized against the same descriptor at construction, and implements
//! every capability trait by delegation. Each forwarded call attaches a
//! success hook that appends a human-readable message to the message sink;
//! failures are logged and replaced with a safe default — an empty list for
//! collection operations, `None` for single-record operations — so a
//! caller's chain never ends in an unhandled failure.

use std::sync::Arc;

use async_trait::async_trait;

use crate::batch::BatchClient;
use crate::contracts::{
    BatchGettable, Creatable, Deletable, DeleteTarget, Editable, Gettable, Searchable,
};
use crate::crud::CrudClient;
use crate::descriptor::Entity;
use crate::error::{ApiError, ApiResult};
use crate::messages::MessageSink;
use crate::resolver::Hooks;
use crate::routes::RouteRegistry;
use crate::search::SearchClient;
use crate::transport::Transport;

/// Full-capability client for one entity type.
pub struct EntityService<T: Entity> {
    crud: CrudClient<T>,
    batch: BatchClient<T>,
    search: SearchClient<T>,
    messages: Arc<dyn MessageSink>,
    /// Lowercased logical name used in log messages: `fetched hero id=3`.
    label: String,
    /// Resource name used in collection messages: `fetched heroes`.
    table: &'static str,
}

impl<T: Entity> EntityService<T> {
    /// Composes the three concrete clients over a shared transport and
    /// registry, initializing each against `T::descriptor()`.
    pub fn new(
        transport: Transport,
        routes: Arc<RouteRegistry>,
        messages: Arc<dyn MessageSink>,
    ) -> Self {
        let descriptor = T::descriptor();
        let mut crud = CrudClient::new(transport.clone(), Arc::clone(&routes));
        crud.initialize(descriptor);
        let mut batch = BatchClient::new(transport.clone(), Arc::clone(&routes));
        batch.initialize(descriptor);
        let mut search = SearchClient::new(transport, routes);
        search.initialize(descriptor);
        Self {
            crud,
            batch,
            search,
            messages,
            label: descriptor
                .reference
                .unwrap_or(descriptor.table)
                .to_ascii_lowercase(),
            table: descriptor.table,
        }
    }

    /// Logs a failed operation and lets the caller substitute a default.
    fn recover(&self, operation: &str, err: &ApiError) {
        tracing::warn!(operation, error = %err, "operation recovered with default");
        self.messages.add(format!("{operation} failed: {err}"));
    }
}

#[async_trait]
impl<T: Entity> Gettable<T> for EntityService<T> {
    async fn get(&self, key: T::Key) -> ApiResult<Option<T>> {
        let operation = format!("get {} id={key}", self.label);
        let message = format!("fetched {} id={key}", self.label);
        let sink = Arc::clone(&self.messages);
        let hooks = Hooks::none().on_success(move |_: &T| sink.add(message.clone()));
        match self.crud.get_with(key, hooks).await {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                self.recover(&operation, &err);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<T: Entity> Creatable<T> for EntityService<T> {
    async fn post(&self, record: &T) -> ApiResult<Option<T>> {
        let label = self.label.clone();
        let sink = Arc::clone(&self.messages);
        // The id is only known once the backend assigns it, so the message
        // is built from the response record.
        let hooks = Hooks::none().on_success(move |created: &T| {
            let message = match created.key() {
                Some(key) => format!("added {label} id={key}"),
                None => format!("added {label}"),
            };
            sink.add(message);
        });
        match self.crud.post_with(record, hooks).await {
            Ok(created) => Ok(Some(created)),
            Err(err) => {
                self.recover(&format!("post {}", self.label), &err);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<T: Entity> Editable<T> for EntityService<T> {
    async fn put(&self, record: &T) -> ApiResult<Option<T>> {
        let message = match record.key() {
            Some(key) => format!("updated {} id={key}", self.label),
            None => format!("updated {}", self.label),
        };
        let operation = format!("put {}", self.label);
        let sink = Arc::clone(&self.messages);
        let hooks = Hooks::none().on_success(move |_: &T| sink.add(message.clone()));
        match self.crud.put_with(record, hooks).await {
            Ok(updated) => Ok(Some(updated)),
            Err(err) => {
                self.recover(&operation, &err);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<T: Entity> Deletable<T> for EntityService<T> {
    async fn delete(&self, target: DeleteTarget<T>) -> ApiResult<Option<T>> {
        let shown = target.key_value().unwrap_or_default();
        let operation = format!("delete {} id={shown}", self.label);
        let message = format!("deleted {} id={shown}", self.label);
        let sink = Arc::clone(&self.messages);
        let hooks = Hooks::none().on_success(move |_: &Option<T>| sink.add(message.clone()));
        match self.crud.delete_with(target, hooks).await {
            Ok(deleted) => Ok(deleted),
            Err(err) => {
                self.recover(&operation, &err);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<T: Entity> BatchGettable<T> for EntityService<T> {
    async fn get_all(&self) -> ApiResult<Vec<T>> {
        let message = format!("fetched {}", self.table);
        let success_sink = Arc::clone(&self.messages);
        let failure_sink = Arc::clone(&self.messages);
        let hooks = Hooks::none()
            .on_success(move |_: &Vec<T>| success_sink.add(message.clone()))
            .on_failure(move |err| {
                tracing::warn!(error = %err, "getAll recovered with empty list");
                failure_sink.add(format!("getAll failed: {err}"));
                Ok(Vec::new())
            });
        self.batch.get_all_with(hooks).await
    }
}

#[async_trait]
impl<T: Entity> Searchable<T> for EntityService<T> {
    async fn search(&self, term: &str) -> ApiResult<Vec<T>> {
        let message = format!("found {} matching \"{}\"", self.table, term.trim());
        let operation = format!("search \"{}\"", term.trim());
        let success_sink = Arc::clone(&self.messages);
        let failure_sink = Arc::clone(&self.messages);
        let hooks = Hooks::none()
            .on_success(move |_: &Vec<T>| success_sink.add(message.clone()))
            .on_failure(move |err| {
                tracing::warn!(error = %err, "search recovered with empty list");
                failure_sink.add(format!("{operation} failed: {err}"));
                Ok(Vec::new())
            });
        self.search.search_with(term, hooks).await
    }
}
