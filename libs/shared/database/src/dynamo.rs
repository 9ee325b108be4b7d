use chrono::Utc;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::attr::{marshal_item, unmarshal_item};
use crate::error::DynamoError;
use crate::sign::{sign, SigningParams};

const TARGET_PREFIX: &str = "DynamoDB_20120810";

/// Client for one DynamoDB endpoint. Explicitly constructed from config and
/// injected into each service; holds no global state.
pub struct DynamoClient {
    http: Client,
    endpoint: String,
    region: String,
    access_key_id: String,
    secret_access_key: String,
}

impl DynamoClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: Client::new(),
            endpoint: config.dynamodb_endpoint.clone(),
            region: config.aws_region.clone(),
            access_key_id: config.aws_access_key_id.clone(),
            secret_access_key: config.aws_secret_access_key.clone(),
        }
    }

    fn host(&self) -> String {
        reqwest::Url::parse(&self.endpoint)
            .ok()
            .and_then(|url| {
                url.host_str().map(|host| match url.port() {
                    Some(port) => format!("{host}:{port}"),
                    None => host.to_string(),
                })
            })
            .unwrap_or_else(|| self.endpoint.clone())
    }

    /// Issue one signed DynamoDB operation and decode the response.
    pub async fn request<T>(&self, operation: &str, body: Value) -> Result<T, DynamoError>
    where
        T: DeserializeOwned,
    {
        let target = format!("{TARGET_PREFIX}.{operation}");
        let payload = body.to_string();

        debug!("DynamoDB {} against {}", operation, self.endpoint);

        let signed = sign(&SigningParams {
            access_key_id: &self.access_key_id,
            secret_access_key: &self.secret_access_key,
            region: &self.region,
            host: &self.host(),
            target: &target,
            payload: &payload,
            timestamp: Utc::now(),
        });

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/x-amz-json-1.0"));
        headers.insert("x-amz-target", HeaderValue::from_str(&target).unwrap());
        headers.insert("x-amz-date", HeaderValue::from_str(&signed.amz_date).unwrap());
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&signed.authorization).unwrap());

        let response = self
            .http
            .post(&self.endpoint)
            .headers(headers)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            let code = body["__type"]
                .as_str()
                .and_then(|kind| kind.rsplit('#').next())
                .unwrap_or("Unknown")
                .to_string();
            let message = body["message"]
                .as_str()
                .or_else(|| body["Message"].as_str())
                .unwrap_or("no message")
                .to_string();
            error!("DynamoDB error ({}): {} {}", status, code, message);

            return Err(DynamoError::Api { code, message });
        }

        Ok(response.json::<T>().await?)
    }

    /// Full-table scan; returns plain documents.
    pub async fn scan(&self, table: &str) -> Result<Vec<Value>, DynamoError> {
        let output: Value = self.request("Scan", json!({ "TableName": table })).await?;
        items(&output)
    }

    /// Scan with a filter expression. `values` is a plain JSON map keyed by
    /// the `:placeholder` names; it is marshalled before sending.
    pub async fn scan_filter(
        &self,
        table: &str,
        expression: &str,
        values: &Value,
    ) -> Result<Vec<Value>, DynamoError> {
        let output: Value = self
            .request(
                "Scan",
                json!({
                    "TableName": table,
                    "FilterExpression": expression,
                    "ExpressionAttributeValues": marshal_item(values)?,
                }),
            )
            .await?;
        items(&output)
    }

    pub async fn get_item(&self, table: &str, id: &str) -> Result<Option<Value>, DynamoError> {
        let output: Value = self
            .request(
                "GetItem",
                json!({
                    "TableName": table,
                    "Key": { "id": { "S": id } },
                }),
            )
            .await?;

        match output.get("Item") {
            Some(item) => Ok(Some(unmarshal_item(item)?)),
            None => Ok(None),
        }
    }

    pub async fn put_item(&self, table: &str, item: &Value) -> Result<(), DynamoError> {
        let _: Value = self
            .request(
                "PutItem",
                json!({
                    "TableName": table,
                    "Item": marshal_item(item)?,
                }),
            )
            .await?;
        Ok(())
    }

    /// Update one item and return the new attributes. An optional condition
    /// expression guards against concurrent writers.
    pub async fn update_item(
        &self,
        table: &str,
        id: &str,
        update_expression: &str,
        attribute_names: Option<&Value>,
        values: &Value,
        condition_expression: Option<&str>,
    ) -> Result<Value, DynamoError> {
        let mut body = json!({
            "TableName": table,
            "Key": { "id": { "S": id } },
            "UpdateExpression": update_expression,
            "ExpressionAttributeValues": marshal_item(values)?,
            "ReturnValues": "ALL_NEW",
        });
        if let Some(names) = attribute_names {
            body["ExpressionAttributeNames"] = names.clone();
        }
        if let Some(condition) = condition_expression {
            body["ConditionExpression"] = Value::String(condition.to_string());
        }

        let output: Value = self.request("UpdateItem", body).await?;
        let attributes = output
            .get("Attributes")
            .ok_or_else(|| DynamoError::Malformed("UpdateItem returned no attributes".to_string()))?;
        unmarshal_item(attributes)
    }

    /// Delete one item; returns the old attributes, or None if nothing was
    /// stored under the id.
    pub async fn delete_item(&self, table: &str, id: &str) -> Result<Option<Value>, DynamoError> {
        let output: Value = self
            .request(
                "DeleteItem",
                json!({
                    "TableName": table,
                    "Key": { "id": { "S": id } },
                    "ReturnValues": "ALL_OLD",
                }),
            )
            .await?;

        match output.get("Attributes") {
            Some(attributes) => Ok(Some(unmarshal_item(attributes)?)),
            None => Ok(None),
        }
    }
}

fn items(output: &Value) -> Result<Vec<Value>, DynamoError> {
    match output.get("Items").and_then(Value::as_array) {
        Some(items) => items.iter().map(unmarshal_item).collect(),
        None => Ok(Vec::new()),
    }
}
