//! Search client: fetch the records whose name matches a term.
//!
//! # Design
//! The search route reuses the generic placeholder machinery with the
//! query-style `=:term` marker: `api/heroes/?name=:term`. An empty or
//! whitespace-only term short-circuits to an empty result without consulting
//! the registry or issuing a request.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::contracts::Searchable;
use crate::descriptor::{Entity, EntityDescriptor};
use crate::error::ApiResult;
use crate::resolver::{Hooks, Resolver};
use crate::routes::{RouteArgs, RouteRegistry};
use crate::transport::{ApiRequest, Transport};

const SEARCH: &str = "search";

/// Query-style suffix appended to the base route.
const SEARCH_TERM_ATTRIBUTE: &str = "/?name=:term";

/// Typed search client for one entity type.
pub struct SearchClient<T: Entity> {
    base: Resolver,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> SearchClient<T> {
    pub fn new(transport: Transport, routes: Arc<RouteRegistry>) -> Self {
        Self {
            base: Resolver::new(transport, routes),
            _entity: PhantomData,
        }
    }

    /// Binds the descriptor and registers the search route template.
    pub fn initialize(&mut self, descriptor: EntityDescriptor) {
        self.base.initialize(descriptor);
        let route = format!("{}{SEARCH_TERM_ATTRIBUTE}", self.base.binding().base_route);
        self.base.routes().add(&self.base.build_key(SEARCH), &route);
    }

    /// Fetches the records matching `term`; a blank term resolves
    /// immediately to an empty list.
    pub async fn search_with(&self, term: &str, hooks: Hooks<'_, Vec<T>>) -> ApiResult<Vec<T>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let mut args = RouteArgs::new();
        args.insert("term".to_string(), term.to_string());
        let path = self.base.route(SEARCH, &args);
        Resolver::resolve(self.base.dispatch(ApiRequest::get(path)), hooks).await
    }
}

#[async_trait]
impl<T: Entity> Searchable<T> for SearchClient<T> {
    async fn search(&self, term: &str) -> ApiResult<Vec<T>> {
        self.search_with(term, Hooks::none()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Hero {
        id: Option<u64>,
        name: String,
    }

    impl Entity for Hero {
        type Key = u64;

        fn descriptor() -> EntityDescriptor {
            EntityDescriptor::new("Hero").table("heroes")
        }

        fn key(&self) -> Option<&u64> {
            self.id.as_ref()
        }
    }

    fn client() -> SearchClient<Hero> {
        // Unroutable address: any attempt to actually send would fail the test.
        let mut client = SearchClient::new(
            Transport::new("http://127.0.0.1:1"),
            Arc::new(RouteRegistry::new()),
        );
        client.initialize(Hero::descriptor());
        client
    }

    #[test]
    fn initialize_registers_search_template() {
        let routes = Arc::new(RouteRegistry::new());
        let mut search: SearchClient<Hero> =
            SearchClient::new(Transport::new("http://localhost:3000"), routes.clone());
        search.initialize(Hero::descriptor());
        let mut args = RouteArgs::new();
        args.insert("term".to_string(), "ro".to_string());
        assert_eq!(
            routes.resolve("Hero.search", &args, None).as_deref(),
            Some("api/heroes/?name=ro")
        );
    }

    #[tokio::test]
    async fn empty_term_short_circuits_without_a_request() {
        let heroes = client().search_with("", Hooks::none()).await.unwrap();
        assert!(heroes.is_empty());
    }

    #[tokio::test]
    async fn whitespace_term_short_circuits_without_a_request() {
        let heroes = client().search_with("   ", Hooks::none()).await.unwrap();
        assert!(heroes.is_empty());
    }
}
