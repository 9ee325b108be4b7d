use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    /// Opaque reference to a hospital record; never validated or joined here.
    pub hospital_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Merge a partial update over this record. Fields present in the request
    /// overwrite, including empty strings; absent fields are retained.
    pub fn merged_with(&self, update: UpdateDoctorRequest, updated_at: DateTime<Utc>) -> Doctor {
        Doctor {
            id: self.id.clone(),
            first_name: update.first_name.unwrap_or_else(|| self.first_name.clone()),
            last_name: update.last_name.unwrap_or_else(|| self.last_name.clone()),
            specialization: update
                .specialization
                .unwrap_or_else(|| self.specialization.clone()),
            hospital_id: update.hospital_id.unwrap_or_else(|| self.hospital_id.clone()),
            email: update.email.or_else(|| self.email.clone()),
            phone: update.phone.or_else(|| self.phone.clone()),
            license_number: update
                .license_number
                .unwrap_or_else(|| self.license_number.clone()),
            created_at: self.created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub specialization: Option<String>,
    pub hospital_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
}

impl CreateDoctorRequest {
    pub fn has_required_fields(&self) -> bool {
        present(&self.first_name)
            && present(&self.last_name)
            && present(&self.specialization)
            && present(&self.hospital_id)
            && present(&self.license_number)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub specialization: Option<String>,
    pub hospital_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.trim().is_empty())
}
