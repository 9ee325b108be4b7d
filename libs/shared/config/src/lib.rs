use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub aws_region: String,
    pub table_name: String,
    pub dynamodb_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
}

impl AppConfig {
    /// Read configuration from the environment. Each service passes its own
    /// default table name; everything else shares the same variables.
    pub fn from_env(default_table: &str) -> Self {
        let aws_region = env::var("AWS_REGION").unwrap_or_else(|_| "us-west-2".to_string());

        let config = Self {
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(3000),
            table_name: env::var("DYNAMODB_TABLE")
                .unwrap_or_else(|_| default_table.to_string()),
            dynamodb_endpoint: env::var("DYNAMODB_ENDPOINT")
                .unwrap_or_else(|_| format!("https://dynamodb.{}.amazonaws.com", aws_region)),
            aws_access_key_id: env::var("AWS_ACCESS_KEY_ID")
                .unwrap_or_else(|_| {
                    warn!("AWS_ACCESS_KEY_ID not set, using empty value");
                    String::new()
                }),
            aws_secret_access_key: env::var("AWS_SECRET_ACCESS_KEY")
                .unwrap_or_else(|_| {
                    warn!("AWS_SECRET_ACCESS_KEY not set, using empty value");
                    String::new()
                }),
            aws_region,
        };

        if !config.is_configured() {
            warn!("AWS credentials missing - requests will only work against a local endpoint");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.aws_access_key_id.is_empty() && !self.aws_secret_access_key.is_empty()
    }
}
