use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn hospital_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/hospitals", get(handlers::list_hospitals))
        .route("/hospitals", post(handlers::create_hospital))
        .route("/hospitals/{id}", get(handlers::get_hospital))
        .route("/hospitals/{id}", put(handlers::update_hospital))
        .route("/hospitals/{id}", delete(handlers::delete_hospital))
        .with_state(state)
}
