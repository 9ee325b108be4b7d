use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub capacity: Option<i32>,
    #[serde(default)]
    pub services: Vec<String>,
    /// Free-form schedule map, e.g. {"monday": "09:00-17:00"}. Stored as
    /// given, never interpreted server-side.
    #[serde(default)]
    pub operating_hours: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hospital {
    /// Merge a partial update over this record. Fields present in the request
    /// overwrite, including empty strings and zero capacity; absent fields
    /// are retained.
    pub fn merged_with(&self, update: UpdateHospitalRequest, updated_at: DateTime<Utc>) -> Hospital {
        Hospital {
            id: self.id.clone(),
            name: update.name.unwrap_or_else(|| self.name.clone()),
            address: update.address.unwrap_or_else(|| self.address.clone()),
            phone: update.phone.unwrap_or_else(|| self.phone.clone()),
            email: update.email.or_else(|| self.email.clone()),
            capacity: update.capacity.or(self.capacity),
            services: update.services.unwrap_or_else(|| self.services.clone()),
            operating_hours: update
                .operating_hours
                .unwrap_or_else(|| self.operating_hours.clone()),
            created_at: self.created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHospitalRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub capacity: Option<i32>,
    pub services: Option<Vec<String>>,
    pub operating_hours: Option<Map<String, Value>>,
}

impl CreateHospitalRequest {
    pub fn has_required_fields(&self) -> bool {
        present(&self.name) && present(&self.address) && present(&self.phone)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHospitalRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub capacity: Option<i32>,
    pub services: Option<Vec<String>>,
    pub operating_hours: Option<Map<String, Value>>,
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.trim().is_empty())
}
