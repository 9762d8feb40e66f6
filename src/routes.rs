//! Thin Axum layer over the store.
//!
//! The routes deserialize requests into the payload models, call the store
//! operation, and serialize the result back to JSON. No logic lives here
//! beyond the mapping of store outcomes onto status codes: created rows are
//! 201, absent keys are 404, duplicates 409, bad payloads 422, everything
//! else 500 (see [`crate::errors`]).

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use crate::errors::StoreError;
use crate::models::{Pet, PetCreate, PetFilter, PetUpdate};
use crate::store::RecordStore;

/// Build the router for the pet store, with the connection as shared state.
pub fn router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ping-db", get(ping_db))
        .route("/pets", get(list_pets).post(create_pet))
        .route("/pets/batch", axum::routing::post(insert_batch))
        .route("/pets/search", get(search_pets))
        .route("/pets/species/{species}", get(list_by_species))
        .route("/pets/species/{species}/count", get(count_by_species))
        .route(
            "/pets/{chip}",
            get(get_pet).put(update_pet).delete(delete_pet),
        )
        .with_state(db)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "up", "service": "petstore" }))
}

async fn ping_db(State(db): State<DatabaseConnection>) -> Result<Json<Value>, StoreError> {
    let report = Pet::ping(&db).await?;
    Ok(Json(json!({ "status": "up", "database": report })))
}

async fn create_pet(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<PetCreate>,
) -> Result<(StatusCode, Json<Pet>), StoreError> {
    let pet = Pet::create(&db, payload).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

async fn insert_batch(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<Vec<PetCreate>>,
) -> Result<(StatusCode, Json<Vec<Pet>>), StoreError> {
    let pets = Pet::insert_batch(&db, payload).await?;
    Ok((StatusCode::CREATED, Json(pets)))
}

async fn get_pet(
    State(db): State<DatabaseConnection>,
    Path(chip): Path<i32>,
) -> Result<Json<Pet>, StoreError> {
    match Pet::find_by_key(&db, chip).await? {
        Some(pet) => Ok(Json(pet)),
        None => Err(StoreError::not_found("pet", Some(chip.to_string()))),
    }
}

async fn update_pet(
    State(db): State<DatabaseConnection>,
    Path(chip): Path<i32>,
    Json(payload): Json<PetUpdate>,
) -> Result<Json<Pet>, StoreError> {
    let pet = Pet::update(&db, chip, payload).await?;
    Ok(Json(pet))
}

async fn delete_pet(
    State(db): State<DatabaseConnection>,
    Path(chip): Path<i32>,
) -> Result<StatusCode, StoreError> {
    if Pet::delete(&db, chip).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StoreError::not_found("pet", Some(chip.to_string())))
    }
}

async fn list_pets(State(db): State<DatabaseConnection>) -> Result<Json<Vec<Pet>>, StoreError> {
    Ok(Json(Pet::find_all(&db).await?))
}

async fn search_pets(
    State(db): State<DatabaseConnection>,
    Query(filter): Query<PetFilter>,
) -> Result<Json<Vec<Pet>>, StoreError> {
    Ok(Json(Pet::search(&db, &filter).await?))
}

async fn list_by_species(
    State(db): State<DatabaseConnection>,
    Path(species): Path<String>,
) -> Result<Json<Vec<Pet>>, StoreError> {
    Ok(Json(Pet::find_by_species(&db, &species).await?))
}

async fn count_by_species(
    State(db): State<DatabaseConnection>,
    Path(species): Path<String>,
) -> Result<Json<Value>, StoreError> {
    let count = Pet::count_by_species(&db, &species).await?;
    Ok(Json(json!({ "species": species, "count": count })))
}
