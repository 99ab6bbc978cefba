//! Full lifecycle test against the live mock server.
//!
//! # Design
//! Starts the heroes mock server on a random port, then exercises the facade
//! service and the concrete clients over real HTTP. Validates route
//! registration, placeholder resolution, hook-driven logging and the
//! facade's degrade-and-log failure policy end-to-end.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crud_core::{
    ApiError, BatchGettable, Creatable, CrudClient, Deletable, DeleteTarget, Editable, Entity,
    EntityDescriptor, EntityService, Gettable, Hooks, MessageLog, RouteRegistry, Searchable,
    Transport,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Hero {
    #[serde(skip_serializing_if = "Option::is_none")]
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

async fn start_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        mock_server::run(listener).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn facade_lifecycle() {
    let addr = start_server().await;
    let log = Arc::new(MessageLog::new());
    let service: EntityService<Hero> = EntityService::new(
        Transport::new(&format!("http://{addr}")),
        Arc::new(RouteRegistry::new()),
        log.clone(),
    );

    // Step 1: list — empty, still logged.
    let heroes = service.get_all().await.unwrap();
    assert!(heroes.is_empty(), "expected empty list");

    // Step 2: create a hero; the backend assigns the id.
    let created = service
        .post(&Hero {
            id: None,
            name: "Magneta".to_string(),
        })
        .await
        .unwrap()
        .expect("created hero");
    let id = *created.key().expect("assigned id");

    // Step 3: fetch it back by key.
    let fetched = service.get(id).await.unwrap().expect("hero exists");
    assert_eq!(fetched.name, "Magneta");

    // Step 4: update the name.
    let updated = service
        .put(&Hero {
            id: Some(id),
            name: "Magenta".to_string(),
        })
        .await
        .unwrap()
        .expect("updated hero");
    assert_eq!(updated.name, "Magenta");

    // Step 5: search matches the new name, not the old one.
    let found = service.search("gent").await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(service.search("Magneta").await.unwrap().is_empty());

    // Step 6: blank search short-circuits without logging.
    let before = log.messages().len();
    assert!(service.search("   ").await.unwrap().is_empty());
    assert_eq!(log.messages().len(), before);

    // Step 7: delete by key; the 204 carries no record.
    assert!(service.delete(DeleteTarget::Key(id)).await.unwrap().is_none());

    // Step 8: fetching the deleted hero degrades to None and logs a failure.
    assert!(service.get(id).await.unwrap().is_none());

    let messages = log.messages();
    assert_eq!(
        messages,
        vec![
            "fetched heroes".to_string(),
            format!("added hero id={id}"),
            format!("fetched hero id={id}"),
            format!("updated hero id={id}"),
            "found heroes matching \"gent\"".to_string(),
            "found heroes matching \"Magneta\"".to_string(),
            format!("deleted hero id={id}"),
            format!("get hero id={id} failed: resource not found"),
        ]
    );
}

#[tokio::test]
async fn concrete_client_surfaces_not_found() {
    let addr = start_server().await;
    let routes = Arc::new(RouteRegistry::new());
    let mut crud: CrudClient<Hero> =
        CrudClient::new(Transport::new(&format!("http://{addr}")), routes);
    crud.initialize(Hero::descriptor());

    let err = crud.get_with(99, Hooks::none()).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // The tolerant read variant maps the same miss to None.
    assert!(crud.try_get(99).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_by_record_hits_the_same_route_as_delete_by_key() {
    let addr = start_server().await;
    let routes = Arc::new(RouteRegistry::new());
    let mut crud: CrudClient<Hero> =
        CrudClient::new(Transport::new(&format!("http://{addr}")), routes);
    crud.initialize(Hero::descriptor());

    let first = crud
        .post_with(
            &Hero {
                id: None,
                name: "Bombasto".to_string(),
            },
            Hooks::none(),
        )
        .await
        .unwrap();
    let second = crud
        .post_with(
            &Hero {
                id: None,
                name: "Celeritas".to_string(),
            },
            Hooks::none(),
        )
        .await
        .unwrap();

    let by_key = crud
        .delete_with(DeleteTarget::Key(first.id.unwrap()), Hooks::none())
        .await;
    assert!(matches!(by_key, Ok(None)));

    let by_record = crud
        .delete_with(DeleteTarget::Record(second), Hooks::none())
        .await;
    assert!(matches!(by_record, Ok(None)));

    // Both are gone.
    assert!(matches!(
        crud.get_with(first.id.unwrap(), Hooks::none()).await,
        Err(ApiError::NotFound)
    ));
}

#[tokio::test]
async fn two_entity_types_share_one_registry_without_collisions() {
    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Villain {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
        name: String,
    }

    impl Entity for Villain {
        type Key = u64;

        fn descriptor() -> EntityDescriptor {
            EntityDescriptor::new("Villain").table("villains")
        }

        fn key(&self) -> Option<&u64> {
            self.id.as_ref()
        }
    }

    let routes = Arc::new(RouteRegistry::new());
    let transport = Transport::new("http://localhost:3000");

    let mut heroes: CrudClient<Hero> = CrudClient::new(transport.clone(), Arc::clone(&routes));
    heroes.initialize(Hero::descriptor());
    let mut villains: CrudClient<Villain> = CrudClient::new(transport, Arc::clone(&routes));
    villains.initialize(Villain::descriptor());

    let args = crud_core::RouteArgs::new();
    assert_eq!(
        routes.resolve("Hero.get", &args, None).as_deref(),
        Some("api/heroes")
    );
    assert_eq!(
        routes.resolve("Villain.get", &args, None).as_deref(),
        Some("api/villains")
    );
}
