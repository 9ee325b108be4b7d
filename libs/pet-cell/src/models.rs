use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub owner_name: String,
    pub owner_contact: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Merge a partial update over this record. Fields present in the request
    /// overwrite, including empty strings and zeros; absent fields are
    /// retained. `id` and `createdAt` never change.
    pub fn merged_with(&self, update: UpdatePetRequest, updated_at: DateTime<Utc>) -> Pet {
        Pet {
            id: self.id.clone(),
            name: update.name.unwrap_or_else(|| self.name.clone()),
            species: update.species.unwrap_or_else(|| self.species.clone()),
            breed: update.breed.or_else(|| self.breed.clone()),
            age: update.age.or(self.age),
            owner_name: update.owner_name.unwrap_or_else(|| self.owner_name.clone()),
            owner_contact: update.owner_contact.unwrap_or_else(|| self.owner_contact.clone()),
            created_at: self.created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub owner_name: Option<String>,
    pub owner_contact: Option<String>,
}

impl CreatePetRequest {
    pub fn has_required_fields(&self) -> bool {
        present(&self.name)
            && present(&self.species)
            && present(&self.owner_name)
            && present(&self.owner_contact)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub owner_name: Option<String>,
    pub owner_contact: Option<String>,
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.trim().is_empty())
}
