use thiserror::Error;

#[derive(Error, Debug)]
pub enum DynamoError {
    #[error("DynamoDB error {code}: {message}")]
    Api { code: String, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed item: {0}")]
    Malformed(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl DynamoError {
    /// True when a conditional write was rejected, e.g. an optimistic
    /// concurrency check on updatedAt.
    pub fn is_conditional_check_failed(&self) -> bool {
        matches!(self, DynamoError::Api { code, .. } if code == "ConditionalCheckFailedException")
    }
}
