//! # Record storage
//!
//! The event table lives in DynamoDB in a fixed region. One client is created when the process starts and is
//! shared by every invocation.
use crate::record::StoredRecord;
use crate::Error;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use serde_dynamo::aws_sdk_dynamodb_1::to_item;
use std::collections::HashMap;

/// The table every record is written to
pub const TABLE_NAME: &str = "event_storage";

/// The region the table lives in
pub const REGION: &str = "eu-west-1";

/// # Somewhere records can be written
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// # Durably writes one record
    ///
    /// Errors from the underlying store are returned unchanged.
    async fn put_record(&self, record: &StoredRecord) -> Result<(), Error>;
}

/// # A record store backed by a DynamoDB table
pub struct DynamoDbStore {
    client: DynamoDbClient,
    table_name: String,
}

impl DynamoDbStore {
    pub fn new(client: DynamoDbClient, table_name: &str) -> DynamoDbStore {
        DynamoDbStore {
            client,
            table_name: table_name.to_string(),
        }
    }

    /// # Creates a store for the event table
    ///
    /// `potential_endpoint_url` is only set when talking to something other than DynamoDB itself,
    /// for example a local DynamoDB or a mock server.
    pub async fn create(potential_endpoint_url: Option<&str>) -> DynamoDbStore {
        let client = create_dynamodb_client(potential_endpoint_url).await;
        DynamoDbStore::new(client, TABLE_NAME)
    }
}

#[async_trait]
impl RecordStore for DynamoDbStore {
    async fn put_record(&self, record: &StoredRecord) -> Result<(), Error> {
        let item: HashMap<String, AttributeValue> = to_item(record)?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await?;
        Ok(())
    }
}

/// # Creates an AWS SDK config object
///
/// The region is always `REGION`; credentials come from the default provider chain.
pub async fn aws_config(potential_endpoint_url: Option<&str>) -> SdkConfig {
    let loader = aws_config::defaults(BehaviorVersion::latest()).region(REGION);
    let loader = match potential_endpoint_url {
        Some(endpoint_url) => loader.endpoint_url(endpoint_url),
        None => loader,
    };
    loader.load().await
}

/// # Creates a DynamoDB client
pub async fn create_dynamodb_client(potential_endpoint_url: Option<&str>) -> DynamoDbClient {
    let config = aws_config(potential_endpoint_url).await;
    DynamoDbClient::new(&config)
}
