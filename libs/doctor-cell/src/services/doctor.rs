use chrono::Utc;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::{DynamoClient, DynamoError};

use crate::models::{CreateDoctorRequest, Doctor, UpdateDoctorRequest};

pub struct DoctorService {
    db: DynamoClient,
    table: String,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            db: DynamoClient::new(config),
            table: config.table_name.clone(),
        }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, DynamoError> {
        debug!("Scanning doctors table {}", self.table);

        let items = self.db.scan(&self.table).await?;
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(DynamoError::from))
            .collect()
    }

    /// All doctors whose hospitalId matches. Scan with a filter; the table
    /// has no secondary index (provisioning is out of scope).
    pub async fn list_doctors_by_hospital(
        &self,
        hospital_id: &str,
    ) -> Result<Vec<Doctor>, DynamoError> {
        debug!("Scanning doctors for hospital: {}", hospital_id);

        let items = self
            .db
            .scan_filter(
                &self.table,
                "hospitalId = :hospitalId",
                &json!({ ":hospitalId": hospital_id }),
            )
            .await?;

        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(DynamoError::from))
            .collect()
    }

    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>, DynamoError> {
        debug!("Fetching doctor: {}", doctor_id);

        match self.db.get_item(&self.table, doctor_id).await? {
            Some(item) => Ok(Some(serde_json::from_value(item)?)),
            None => Ok(None),
        }
    }

    /// Persist a new doctor profile. The caller has already validated the
    /// required fields; id and both timestamps are assigned here.
    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DynamoError> {
        let now = Utc::now();
        let doctor = Doctor {
            id: Uuid::new_v4().to_string(),
            first_name: request.first_name.unwrap_or_default(),
            last_name: request.last_name.unwrap_or_default(),
            specialization: request.specialization.unwrap_or_default(),
            hospital_id: request.hospital_id.unwrap_or_default(),
            email: request.email,
            phone: request.phone,
            license_number: request.license_number.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        debug!("Creating doctor: {}", doctor.id);
        self.db
            .put_item(&self.table, &serde_json::to_value(&doctor)?)
            .await?;

        Ok(doctor)
    }

    /// Read-merge-write update guarded by a condition on the updatedAt read;
    /// a concurrent writer surfaces as ConditionalCheckFailedException.
    pub async fn update_doctor(
        &self,
        doctor_id: &str,
        request: UpdateDoctorRequest,
    ) -> Result<Option<Doctor>, DynamoError> {
        let Some(existing) = self.get_doctor(doctor_id).await? else {
            return Ok(None);
        };

        let merged = existing.merged_with(request, Utc::now());

        let expression = "SET firstName = :firstName, lastName = :lastName, \
                          specialization = :specialization, hospitalId = :hospitalId, \
                          email = :email, phone = :phone, licenseNumber = :licenseNumber, \
                          updatedAt = :updatedAt";
        let values = json!({
            ":firstName": merged.first_name,
            ":lastName": merged.last_name,
            ":specialization": merged.specialization,
            ":hospitalId": merged.hospital_id,
            ":email": merged.email,
            ":phone": merged.phone,
            ":licenseNumber": merged.license_number,
            ":updatedAt": merged.updated_at,
            ":expectedUpdatedAt": existing.updated_at,
        });

        debug!("Updating doctor: {}", doctor_id);
        let result = self
            .db
            .update_item(
                &self.table,
                doctor_id,
                expression,
                None,
                &values,
                Some("updatedAt = :expectedUpdatedAt"),
            )
            .await;

        let attributes = match result {
            Ok(attributes) => attributes,
            // The guard also fires when the record was deleted between the
            // read and the write; re-read to tell the two apart.
            Err(e) if e.is_conditional_check_failed() => {
                return match self.get_doctor(doctor_id).await? {
                    Some(_) => Err(e),
                    None => Ok(None),
                };
            }
            Err(e) => return Err(e),
        };

        Ok(Some(serde_json::from_value(attributes)?))
    }

    pub async fn delete_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>, DynamoError> {
        debug!("Deleting doctor: {}", doctor_id);

        match self.db.delete_item(&self.table, doctor_id).await? {
            Some(item) => Ok(Some(serde_json::from_value(item)?)),
            None => Ok(None),
        }
    }
}
