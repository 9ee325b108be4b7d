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

use crate::models::{CreateDoctorRequest, UpdateDoctorRequest};
use crate::services::doctor::DoctorService;

#[axum::debug_handler]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

#[axum::debug_handler]
pub async fn list_doctors(State(state): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(&state);

    let doctors = service.list_doctors().await.map_err(|e| {
        error!("Error fetching doctors: {}", e);
        AppError::Database("Failed to fetch doctors".to_string())
    })?;

    Ok(Json(json!(doctors)))
}

#[axum::debug_handler]
pub async fn list_doctors_by_hospital(
    State(state): State<Arc<AppConfig>>,
    Path(hospital_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(&state);

    let doctors = service
        .list_doctors_by_hospital(&hospital_id)
        .await
        .map_err(|e| {
            error!("Error fetching doctors for hospital {}: {}", hospital_id, e);
            AppError::Database("Failed to fetch doctors for hospital".to_string())
        })?;

    Ok(Json(json!(doctors)))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(&state);

    let doctor = service
        .get_doctor(&doctor_id)
        .await
        .map_err(|e| {
            error!("Error fetching doctor {}: {}", doctor_id, e);
            AppError::Database("Failed to fetch doctor".to_string())
        })?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if !request.has_required_fields() {
        return Err(AppError::Validation("Missing required fields".to_string()));
    }

    let service = DoctorService::new(&state);

    let doctor = service.create_doctor(request).await.map_err(|e| {
        error!("Error creating doctor: {}", e);
        AppError::Database("Failed to create doctor".to_string())
    })?;

    Ok((StatusCode::CREATED, Json(json!(doctor))))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    Json(request): Json<UpdateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(&state);

    let doctor = service
        .update_doctor(&doctor_id, request)
        .await
        .map_err(|e| {
            if e.is_conditional_check_failed() {
                return AppError::Conflict("Concurrent update detected".to_string());
            }
            error!("Error updating doctor {}: {}", doctor_id, e);
            AppError::Database("Failed to update doctor".to_string())
        })?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(&state);

    service
        .delete_doctor(&doctor_id)
        .await
        .map_err(|e| {
            error!("Error deleting doctor {}: {}", doctor_id, e);
            AppError::Database("Failed to delete doctor".to_string())
        })?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!({ "message": "Doctor deleted successfully" })))
}
