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

use crate::models::{CreateHospitalRequest, UpdateHospitalRequest};
use crate::services::hospital::HospitalService;

#[axum::debug_handler]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

#[axum::debug_handler]
pub async fn list_hospitals(State(state): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let service = HospitalService::new(&state);

    let hospitals = service.list_hospitals().await.map_err(|e| {
        error!("Error fetching hospitals: {}", e);
        AppError::Database("Failed to fetch hospitals".to_string())
    })?;

    Ok(Json(json!(hospitals)))
}

#[axum::debug_handler]
pub async fn get_hospital(
    State(state): State<Arc<AppConfig>>,
    Path(hospital_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = HospitalService::new(&state);

    let hospital = service
        .get_hospital(&hospital_id)
        .await
        .map_err(|e| {
            error!("Error fetching hospital {}: {}", hospital_id, e);
            AppError::Database("Failed to fetch hospital".to_string())
        })?
        .ok_or_else(|| AppError::NotFound("Hospital not found".to_string()))?;

    Ok(Json(json!(hospital)))
}

#[axum::debug_handler]
pub async fn create_hospital(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateHospitalRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if !request.has_required_fields() {
        return Err(AppError::Validation("Missing required fields".to_string()));
    }

    let service = HospitalService::new(&state);

    let hospital = service.create_hospital(request).await.map_err(|e| {
        error!("Error creating hospital: {}", e);
        AppError::Database("Failed to create hospital".to_string())
    })?;

    Ok((StatusCode::CREATED, Json(json!(hospital))))
}

#[axum::debug_handler]
pub async fn update_hospital(
    State(state): State<Arc<AppConfig>>,
    Path(hospital_id): Path<String>,
    Json(request): Json<UpdateHospitalRequest>,
) -> Result<Json<Value>, AppError> {
    let service = HospitalService::new(&state);

    let hospital = service
        .update_hospital(&hospital_id, request)
        .await
        .map_err(|e| {
            if e.is_conditional_check_failed() {
                return AppError::Conflict("Concurrent update detected".to_string());
            }
            error!("Error updating hospital {}: {}", hospital_id, e);
            AppError::Database("Failed to update hospital".to_string())
        })?
        .ok_or_else(|| AppError::NotFound("Hospital not found".to_string()))?;

    Ok(Json(json!(hospital)))
}

#[axum::debug_handler]
pub async fn delete_hospital(
    State(state): State<Arc<AppConfig>>,
    Path(hospital_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = HospitalService::new(&state);

    service
        .delete_hospital(&hospital_id)
        .await
        .map_err(|e| {
            error!("Error deleting hospital {}: {}", hospital_id, e);
            AppError::Database("Failed to delete hospital".to_string())
        })?
        .ok_or_else(|| AppError::NotFound("Hospital not found".to_string()))?;

    Ok(Json(json!({ "message": "Hospital deleted successfully" })))
}
