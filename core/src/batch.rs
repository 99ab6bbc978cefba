//! List client: fetch the whole collection in one call.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::contracts::BatchGettable;
use crate::descriptor::{Entity, EntityDescriptor};
use crate::error::ApiResult;
use crate::resolver::{Hooks, Resolver};
use crate::routes::{RouteArgs, RouteRegistry};
use crate::transport::{ApiRequest, Transport};

const GET_ALL: &str = "getAll";

/// Typed fetch-all client for one entity type.
pub struct BatchClient<T: Entity> {
    base: Resolver,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> BatchClient<T> {
    pub fn new(transport: Transport, routes: Arc<RouteRegistry>) -> Self {
        Self {
            base: Resolver::new(transport, routes),
            _entity: PhantomData,
        }
    }

    /// Binds the descriptor and registers the `getAll` route at the base
    /// resource path.
    pub fn initialize(&mut self, descriptor: EntityDescriptor) {
        self.base.initialize(descriptor);
        let route = self.base.binding().base_route.clone();
        self.base.routes().add(&self.base.build_key(GET_ALL), &route);
    }

    /// Fetches every stored record.
    pub async fn get_all_with(&self, hooks: Hooks<'_, Vec<T>>) -> ApiResult<Vec<T>> {
        let path = self.base.route(GET_ALL, &RouteArgs::new());
        Resolver::resolve(self.base.dispatch(ApiRequest::get(path)), hooks).await
    }
}

#[async_trait]
impl<T: Entity> BatchGettable<T> for BatchClient<T> {
    async fn get_all(&self) -> ApiResult<Vec<T>> {
        self.get_all_with(Hooks::none()).await
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

    #[test]
    fn initialize_registers_get_all_under_its_own_key() {
        let routes = Arc::new(RouteRegistry::new());
        let mut client: BatchClient<Hero> =
            BatchClient::new(Transport::new("http://localhost:3000"), routes.clone());
        client.initialize(Hero::descriptor());
        assert_eq!(
            routes
                .resolve("Hero.getAll", &RouteArgs::new(), None)
                .as_deref(),
            Some("api/heroes")
        );
    }
}
