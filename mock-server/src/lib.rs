use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hero {
    pub id: Option<u64>,
    pub name: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub name: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<u64, Hero>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(
            "/api/heroes",
            get(list_heroes).post(create_hero).put(update_hero),
        )
        // Search requests arrive as `/api/heroes/?name=term`; axum treats the
        // trailing slash as a distinct path.
        .route("/api/heroes/", get(list_heroes))
        .route("/api/heroes/{id}", get(get_hero).delete(delete_hero))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_heroes(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<Hero>> {
    let heroes = db.read().await;
    let matching = match params.name {
        Some(term) => {
            let term = term.to_lowercase();
            heroes
                .values()
                .filter(|hero| hero.name.to_lowercase().contains(&term))
                .cloned()
                .collect()
        }
        None => heroes.values().cloned().collect(),
    };
    Json(matching)
}

async fn create_hero(State(db): State<Db>, Json(input): Json<Hero>) -> (StatusCode, Json<Hero>) {
    let mut heroes = db.write().await;
    let id = input
        .id
        .unwrap_or_else(|| heroes.keys().max().map_or(1, |max| max + 1));
    let hero = Hero {
        id: Some(id),
        name: input.name,
    };
    heroes.insert(id, hero.clone());
    (StatusCode::CREATED, Json(hero))
}

async fn get_hero(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Hero>, StatusCode> {
    let heroes = db.read().await;
    heroes.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_hero(State(db): State<Db>, Json(input): Json<Hero>) -> Result<Json<Hero>, StatusCode> {
    let id = input.id.ok_or(StatusCode::NOT_FOUND)?;
    let mut heroes = db.write().await;
    let hero = heroes.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    hero.name = input.name;
    Ok(Json(hero.clone()))
}

async fn delete_hero(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut heroes = db.write().await;
    heroes.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_serializes_to_json() {
        let hero = Hero {
            id: Some(11),
            name: "Mr. Nice".to_string(),
        };
        let json = serde_json::to_value(&hero).unwrap();
        assert_eq!(json["id"], 11);
        assert_eq!(json["name"], "Mr. Nice");
    }

    #[test]
    fn hero_roundtrips_through_json() {
        let hero = Hero {
            id: Some(12),
            name: "Narco".to_string(),
        };
        let json = serde_json::to_string(&hero).unwrap();
        let back: Hero = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, hero.id);
        assert_eq!(back.name, hero.name);
    }

    #[test]
    fn hero_accepts_missing_id() {
        let hero: Hero = serde_json::from_str(r#"{"name":"Bombasto"}"#).unwrap();
        assert!(hero.id.is_none());
        assert_eq!(hero.name, "Bombasto");
    }

    #[test]
    fn hero_rejects_missing_name() {
        let result: Result<Hero, _> = serde_json::from_str(r#"{"id":13}"#);
        assert!(result.is_err());
    }
}
