use chrono::Utc;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::{DynamoClient, DynamoError};

use crate::models::{CreatePetRequest, Pet, UpdatePetRequest};

pub struct PetService {
    db: DynamoClient,
    table: String,
}

impl PetService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            db: DynamoClient::new(config),
            table: config.table_name.clone(),
        }
    }

    pub async fn list_pets(&self) -> Result<Vec<Pet>, DynamoError> {
        debug!("Scanning pets table {}", self.table);

        let items = self.db.scan(&self.table).await?;
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(DynamoError::from))
            .collect()
    }

    pub async fn get_pet(&self, pet_id: &str) -> Result<Option<Pet>, DynamoError> {
        debug!("Fetching pet: {}", pet_id);

        match self.db.get_item(&self.table, pet_id).await? {
            Some(item) => Ok(Some(serde_json::from_value(item)?)),
            None => Ok(None),
        }
    }

    /// Persist a new pet. The caller has already validated required fields;
    /// id and both timestamps are assigned here.
    pub async fn create_pet(&self, request: CreatePetRequest) -> Result<Pet, DynamoError> {
        let now = Utc::now();
        let pet = Pet {
            id: Uuid::new_v4().to_string(),
            name: request.name.unwrap_or_default(),
            species: request.species.unwrap_or_default(),
            breed: request.breed,
            age: request.age,
            owner_name: request.owner_name.unwrap_or_default(),
            owner_contact: request.owner_contact.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        debug!("Creating pet: {}", pet.id);
        self.db.put_item(&self.table, &serde_json::to_value(&pet)?).await?;

        Ok(pet)
    }

    /// Read-merge-write update. The write is guarded by a condition on the
    /// updatedAt read, so a concurrent writer surfaces as a
    /// ConditionalCheckFailedException instead of being silently overwritten.
    pub async fn update_pet(
        &self,
        pet_id: &str,
        request: UpdatePetRequest,
    ) -> Result<Option<Pet>, DynamoError> {
        let Some(existing) = self.get_pet(pet_id).await? else {
            return Ok(None);
        };

        let merged = existing.merged_with(request, Utc::now());

        // 'name' is a reserved word in DynamoDB expressions.
        let expression = "SET #name = :name, species = :species, breed = :breed, \
                          age = :age, ownerName = :ownerName, ownerContact = :ownerContact, \
                          updatedAt = :updatedAt";
        let names = json!({ "#name": "name" });
        let values = json!({
            ":name": merged.name,
            ":species": merged.species,
            ":breed": merged.breed,
            ":age": merged.age,
            ":ownerName": merged.owner_name,
            ":ownerContact": merged.owner_contact,
            ":updatedAt": merged.updated_at,
            ":expectedUpdatedAt": existing.updated_at,
        });

        debug!("Updating pet: {}", pet_id);
        let result = self
            .db
            .update_item(
                &self.table,
                pet_id,
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
                return match self.get_pet(pet_id).await? {
                    Some(_) => Err(e),
                    None => Ok(None),
                };
            }
            Err(e) => return Err(e),
        };

        Ok(Some(serde_json::from_value(attributes)?))
    }

    pub async fn delete_pet(&self, pet_id: &str) -> Result<Option<Pet>, DynamoError> {
        debug!("Deleting pet: {}", pet_id);

        match self.db.delete_item(&self.table, pet_id).await? {
            Some(item) => Ok(Some(serde_json::from_value(item)?)),
            None => Ok(None),
        }
    }
}
