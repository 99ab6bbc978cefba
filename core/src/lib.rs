//! Typed CRUD/search/batch client framework for HTTP backends.
//!
//! # Overview
//! Instead of hand-writing a URL and a request per entity type, a type
//! declares an [`EntityDescriptor`] and the framework composes the rest:
//! route templates registered in a shared [`RouteRegistry`], resolved per
//! request with optional placeholder segments, and issued through a thin
//! reqwest [`Transport`]. Concrete clients ([`CrudClient`], [`BatchClient`],
//! [`SearchClient`]) implement narrow capability traits; [`EntityService`]
//! composes all three behind the full capability union and recovers every
//! failure into a logged, safe default.
//!
//! # Design
//! - Every operation is a plain `async fn`: the future is inert until
//!   awaited and dropping it cancels the operation along with any pending
//!   success/failure hooks.
//! - The registry is written during `initialize` (startup) and read per
//!   request; re-registering a key safely overwrites.
//! - Success/failure hooks attach at a single chokepoint
//!   ([`Resolver::resolve`]) so no client wires side effects twice.
//! - Domain notifications are plain strings pushed to a [`MessageSink`];
//!   ambient diagnostics use `tracing`.

pub mod batch;
pub mod contracts;
pub mod crud;
pub mod descriptor;
pub mod error;
pub mod facade;
pub mod messages;
pub mod resolver;
pub mod routes;
pub mod search;
pub mod transport;

pub use batch::BatchClient;
pub use contracts::{
    BatchGettable, Creatable, Crudable, Deletable, DeleteTarget, Editable, Gettable, Searchable,
};
pub use crud::CrudClient;
pub use descriptor::{Entity, EntityDescriptor};
pub use error::{ApiError, ApiResult};
pub use facade::EntityService;
pub use messages::{MessageLog, MessageSink};
pub use resolver::{Hooks, Resolver};
pub use routes::{RouteArgs, RouteRegistry};
pub use search::SearchClient;
pub use transport::{ApiRequest, ApiResponse, HttpMethod, Transport};
