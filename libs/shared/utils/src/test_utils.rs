//! Test helpers shared by the cell test suites: canned configuration pointing
//! at a mock DynamoDB endpoint and builders for wire-format responses.

use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_database::attr::marshal_item;

pub struct TestConfig {
    pub endpoint: String,
    pub table_name: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_string(),
            table_name: "pet-hospital-test".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            port: 0,
            aws_region: "us-west-2".to_string(),
            table_name: self.table_name.clone(),
            dynamodb_endpoint: self.endpoint.clone(),
            aws_access_key_id: "test-access-key".to_string(),
            aws_secret_access_key: "test-secret-key".to_string(),
        }
    }

    /// Config wired to a running wiremock server.
    pub fn for_mock_server(uri: &str, table: &str) -> AppConfig {
        Self {
            endpoint: uri.to_string(),
            table_name: table.to_string(),
        }
        .to_app_config()
    }
}

/// Builders for DynamoDB wire responses, so cell tests can state plain JSON
/// documents and get the marshalled bodies wiremock should serve.
pub struct MockDynamoResponses;

impl MockDynamoResponses {
    pub fn scan(items: &[Value]) -> Value {
        let marshalled: Vec<Value> = items
            .iter()
            .map(|item| marshal_item(item).expect("valid test item"))
            .collect();
        json!({ "Items": marshalled, "Count": marshalled.len() })
    }

    pub fn get(item: Option<&Value>) -> Value {
        match item {
            Some(item) => json!({ "Item": marshal_item(item).expect("valid test item") }),
            None => json!({}),
        }
    }

    pub fn put() -> Value {
        json!({})
    }

    pub fn update(item: &Value) -> Value {
        json!({ "Attributes": marshal_item(item).expect("valid test item") })
    }

    pub fn delete(item: Option<&Value>) -> Value {
        match item {
            Some(item) => json!({ "Attributes": marshal_item(item).expect("valid test item") }),
            None => json!({}),
        }
    }

    pub fn error(code: &str, message: &str) -> Value {
        json!({
            "__type": format!("com.amazonaws.dynamodb.v20120810#{code}"),
            "message": message
        })
    }
}
