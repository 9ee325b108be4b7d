pub mod attr;
pub mod dynamo;
pub mod error;
pub mod sign;

pub use dynamo::DynamoClient;
pub use error::DynamoError;
