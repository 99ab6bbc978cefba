//! Generic building block every concrete client embeds.
//!
//! # Design
//! `Resolver` owns the shared pieces — transport handle, route registry and
//! the descriptor binding — so concrete clients only contribute their route
//! registrations and operation methods. Hook attachment happens in exactly
//! one place, [`Resolver::resolve`], so success/failure side effects are
//! never wired twice.
//!
//! All operations are plain `async fn`s: the returned future is inert until
//! awaited and dropping it before completion suppresses any pending hook
//! invocation. The resolver itself performs no I/O beyond handing a shaped
//! request to the transport.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::descriptor::EntityDescriptor;
use crate::error::{ApiError, ApiResult};
use crate::routes::{RouteArgs, RouteRegistry};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Prefix every base resource path starts with.
const API_PREFIX: &str = "api/";

/// Path-style placeholder marker used when registering key routes.
pub(crate) const ROUTE_PARAMETER: &str = "/:";

/// Optional success/failure hooks wrapped around a pending operation.
///
/// The success hook observes the eventual value without mutating it; the
/// failure hook is a recovery transform that may substitute a replacement
/// result. With neither attached the operation result passes through as is.
pub struct Hooks<'a, U> {
    on_success: Option<Box<dyn Fn(&U) + Send + Sync + 'a>>,
    on_failure: Option<Box<dyn FnOnce(ApiError) -> ApiResult<U> + Send + 'a>>,
}

impl<'a, U> Hooks<'a, U> {
    /// No hooks: the operation result is returned unwrapped.
    pub fn none() -> Self {
        Self {
            on_success: None,
            on_failure: None,
        }
    }

    pub fn on_success(mut self, hook: impl Fn(&U) + Send + Sync + 'a) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    pub fn on_failure(mut self, hook: impl FnOnce(ApiError) -> ApiResult<U> + Send + 'a) -> Self {
        self.on_failure = Some(Box::new(hook));
        self
    }
}

impl<U> Default for Hooks<'_, U> {
    fn default() -> Self {
        Self::none()
    }
}

/// Descriptor binding established by `initialize`.
#[derive(Debug, Clone)]
pub(crate) struct Binding {
    pub(crate) descriptor: EntityDescriptor,
    pub(crate) base_route: String,
}

/// Base client: transport + registry + descriptor binding.
pub struct Resolver {
    transport: Transport,
    routes: Arc<RouteRegistry>,
    binding: Option<Binding>,
}

impl Resolver {
    pub fn new(transport: Transport, routes: Arc<RouteRegistry>) -> Self {
        Self {
            transport,
            routes,
            binding: None,
        }
    }

    /// Binds the descriptor and computes the entity's base resource path.
    ///
    /// Must be called before any operation; re-initialization rebinds and the
    /// subsequent route re-registrations overwrite the previous entries.
    pub fn initialize(&mut self, descriptor: EntityDescriptor) {
        self.binding = Some(Binding {
            base_route: format!("{API_PREFIX}{}", descriptor.table),
            descriptor,
        });
    }

    /// The bound descriptor and base route.
    ///
    /// # Panics
    /// Panics when called before `initialize` — using a client without
    /// initializing it is a programming defect, not a recoverable condition.
    pub(crate) fn binding(&self) -> &Binding {
        self.binding
            .as_ref()
            .expect("client operation invoked before initialize")
    }

    /// Shared route registry handle, used by clients to register routes.
    pub(crate) fn routes(&self) -> &RouteRegistry {
        &self.routes
    }

    /// Namespaced registry key for `method`: `<reference>.<method>` when the
    /// descriptor carries a reference, else `method` alone. Namespacing keeps
    /// entity types from colliding on shared method names like `get`.
    pub fn build_key(&self, method: &str) -> String {
        match self.binding().descriptor.reference {
            Some(reference) => format!("{reference}.{method}"),
            None => method.to_string(),
        }
    }

    /// Resolves the registered route for `method` into a concrete path.
    ///
    /// # Panics
    /// Panics when no route was registered under the key — equivalent to an
    /// uninitialized client.
    pub(crate) fn route(&self, method: &str, args: &RouteArgs) -> String {
        let key = self.build_key(method);
        self.routes
            .resolve(&key, args, None)
            .unwrap_or_else(|| panic!("no route registered under key `{key}`"))
    }

    /// Sends a request and deserializes the JSON response body into `U`.
    pub(crate) async fn dispatch<U: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<U> {
        let response = self.transport.send(request).await?;
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Like `dispatch`, but an empty response body yields `None` (backends
    /// commonly answer DELETE with 204 and no content).
    pub(crate) async fn dispatch_optional<U: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> ApiResult<Option<U>> {
        let response = self.transport.send(request).await?;
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Wraps a pending operation with the given hooks.
    ///
    /// The single chokepoint through which every concrete operation's side
    /// effects are attached: a success hook observes the value, a failure
    /// hook may recover with a replacement result.
    pub async fn resolve<U, F>(request: F, hooks: Hooks<'_, U>) -> ApiResult<U>
    where
        F: Future<Output = ApiResult<U>> + Send,
    {
        match request.await {
            Ok(value) => {
                if let Some(observe) = hooks.on_success {
                    observe(&value);
                }
                Ok(value)
            }
            Err(err) => match hooks.on_failure {
                Some(recover) => recover(err),
                None => Err(err),
            },
        }
    }
}

/// Maps non-success statuses to `ApiError`: 404 gets its own variant, any
/// other non-2xx keeps the raw status and body.
fn check_status(response: &ApiResponse) -> ApiResult<()> {
    match response.status {
        200..=299 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}
