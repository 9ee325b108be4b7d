use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::error;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreatePetRequest, UpdatePetRequest};
use crate::services::pet::PetService;

#[axum::debug_handler]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

#[axum::debug_handler]
pub async fn list_pets(State(state): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let service = PetService::new(&state);

    let pets = service.list_pets().await.map_err(|e| {
        error!("Error fetching pets: {}", e);
        AppError::Database("Failed to fetch pets".to_string())
    })?;

    Ok(Json(json!(pets)))
}

#[axum::debug_handler]
pub async fn get_pet(
    State(state): State<Arc<AppConfig>>,
    Path(pet_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PetService::new(&state);

    let pet = service
        .get_pet(&pet_id)
        .await
        .map_err(|e| {
            error!("Error fetching pet {}: {}", pet_id, e);
            AppError::Database("Failed to fetch pet".to_string())
        })?
        .ok_or_else(|| AppError::NotFound("Pet not found".to_string()))?;

    Ok(Json(json!(pet)))
}

#[axum::debug_handler]
pub async fn create_pet(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreatePetRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if !request.has_required_fields() {
        return Err(AppError::Validation("Missing required fields".to_string()));
    }

    let service = PetService::new(&state);

    let pet = service.create_pet(request).await.map_err(|e| {
        error!("Error creating pet: {}", e);
        AppError::Database("Failed to create pet".to_string())
    })?;

    Ok((StatusCode::CREATED, Json(json!(pet))))
}

#[axum::debug_handler]
pub async fn update_pet(
    State(state): State<Arc<AppConfig>>,
    Path(pet_id): Path<String>,
    Json(request): Json<UpdatePetRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PetService::new(&state);

    let pet = service
        .update_pet(&pet_id, request)
        .await
        .map_err(|e| {
            if e.is_conditional_check_failed() {
                return AppError::Conflict("Concurrent update detected".to_string());
            }
            error!("Error updating pet {}: {}", pet_id, e);
            AppError::Database("Failed to update pet".to_string())
        })?
        .ok_or_else(|| AppError::NotFound("Pet not found".to_string()))?;

    Ok(Json(json!(pet)))
}

#[axum::debug_handler]
pub async fn delete_pet(
    State(state): State<Arc<AppConfig>>,
    Path(pet_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PetService::new(&state);

    service
        .delete_pet(&pet_id)
        .await
        .map_err(|e| {
            error!("Error deleting pet {}: {}", pet_id, e);
            AppError::Database("Failed to delete pet".to_string())
        })?
        .ok_or_else(|| AppError::NotFound("Pet not found".to_string()))?;

    Ok(Json(json!({ "message": "Pet deleted successfully" })))
}
