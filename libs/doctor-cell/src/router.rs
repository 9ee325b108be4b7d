use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/doctors", get(handlers::list_doctors))
        .route("/doctors", post(handlers::create_doctor))
        .route("/doctors/{id}", get(handlers::get_doctor))
        .route("/doctors/{id}", put(handlers::update_doctor))
        .route("/doctors/{id}", delete(handlers::delete_doctor))
        .route(
            "/hospitals/{hospital_id}/doctors",
            get(handlers::list_doctors_by_hospital),
        )
        .with_state(state)
}
