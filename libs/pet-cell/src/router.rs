use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn pet_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/pets", get(handlers::list_pets))
        .route("/pets", post(handlers::create_pet))
        .route("/pets/{id}", get(handlers::get_pet))
        .route("/pets/{id}", put(handlers::update_pet))
        .route("/pets/{id}", delete(handlers::delete_pet))
        .with_state(state)
}
