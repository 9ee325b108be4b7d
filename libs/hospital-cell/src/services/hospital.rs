use chrono::Utc;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::{DynamoClient, DynamoError};

use crate::models::{CreateHospitalRequest, Hospital, UpdateHospitalRequest};

pub struct HospitalService {
    db: DynamoClient,
    table: String,
}

impl HospitalService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            db: DynamoClient::new(config),
            table: config.table_name.clone(),
        }
    }

    pub async fn list_hospitals(&self) -> Result<Vec<Hospital>, DynamoError> {
        debug!("Scanning hospitals table {}", self.table);

        let items = self.db.scan(&self.table).await?;
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(DynamoError::from))
            .collect()
    }

    pub async fn get_hospital(&self, hospital_id: &str) -> Result<Option<Hospital>, DynamoError> {
        debug!("Fetching hospital: {}", hospital_id);

        match self.db.get_item(&self.table, hospital_id).await? {
            Some(item) => Ok(Some(serde_json::from_value(item)?)),
            None => Ok(None),
        }
    }

    /// Persist a new hospital. The caller has already validated required
    /// fields; services defaults to empty, operatingHours to an empty map.
    pub async fn create_hospital(
        &self,
        request: CreateHospitalRequest,
    ) -> Result<Hospital, DynamoError> {
        let now = Utc::now();
        let hospital = Hospital {
            id: Uuid::new_v4().to_string(),
            name: request.name.unwrap_or_default(),
            address: request.address.unwrap_or_default(),
            phone: request.phone.unwrap_or_default(),
            email: request.email,
            capacity: request.capacity,
            services: request.services.unwrap_or_default(),
            operating_hours: request.operating_hours.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        debug!("Creating hospital: {}", hospital.id);
        self.db
            .put_item(&self.table, &serde_json::to_value(&hospital)?)
            .await?;

        Ok(hospital)
    }

    /// Read-merge-write update guarded by a condition on the updatedAt read.
    pub async fn update_hospital(
        &self,
        hospital_id: &str,
        request: UpdateHospitalRequest,
    ) -> Result<Option<Hospital>, DynamoError> {
        let Some(existing) = self.get_hospital(hospital_id).await? else {
            return Ok(None);
        };

        let merged = existing.merged_with(request, Utc::now());

        // 'name' and 'capacity' are reserved words in DynamoDB expressions.
        let expression = "SET #name = :name, address = :address, phone = :phone, \
                          email = :email, #capacity = :capacity, services = :services, \
                          operatingHours = :operatingHours, updatedAt = :updatedAt";
        let names = json!({ "#name": "name", "#capacity": "capacity" });
        let values = json!({
            ":name": merged.name,
            ":address": merged.address,
            ":phone": merged.phone,
            ":email": merged.email,
            ":capacity": merged.capacity,
            ":services": merged.services,
            ":operatingHours": merged.operating_hours,
            ":updatedAt": merged.updated_at,
            ":expectedUpdatedAt": existing.updated_at,
        });

        debug!("Updating hospital: {}", hospital_id);
        let result = self
            .db
            .update_item(
                &self.table,
                hospital_id,
                expression,
                Some(&names),
                &values,
                Some("updatedAt = :expectedUpdatedAt"),
            )
            .await;

        let attributes = match result {
            Ok(attributes) => attributes,
            // The guard also fires when the record was deleted between the
            // read and the write; re-read to tell the two apart.
            Err(e) if e.is_conditional_check_failed() => {
                return match self.get_hospital(hospital_id).await? {
                    Some(_) => Err(e),
                    None => Ok(None),
                };
            }
            Err(e) => return Err(e),
        };

        Ok(Some(serde_json::from_value(attributes)?))
    }

    pub async fn delete_hospital(&self, hospital_id: &str) -> Result<Option<Hospital>, DynamoError> {
        debug!("Deleting hospital: {}", hospital_id);

        match self.db.delete_item(&self.table, hospital_id).await? {
            Some(item) => Ok(Some(serde_json::from_value(item)?)),
            None => Ok(None),
        }
    }
}
