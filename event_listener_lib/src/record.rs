//! # Stored records
//!
//! A stored record is the unit written to the event table: the message body exactly as it arrived,
//! keyed by a random identifier generated at write time.
use aws_lambda_events::sqs::SqsMessage;
use serde::Serialize;
use uuid::Uuid;

/// The partition key attribute of the event table
pub const PARTITION_KEY: &str = "PK";

/// The attribute holding the message body
pub const PAYLOAD_ATTRIBUTE: &str = "Message";

/// # A message body paired with the identifier it is stored under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredRecord {
    #[serde(rename = "PK")]
    pub identifier: String,
    #[serde(rename = "Message")]
    pub payload: String,
}

impl StoredRecord {
    /// # Creates a record with a fresh v4 UUID
    ///
    /// The payload is copied as is. Nothing is validated or re-encoded, so an empty payload is kept empty.
    pub fn new(payload: &str) -> StoredRecord {
        StoredRecord {
            identifier: Uuid::new_v4().to_string(),
            payload: payload.to_string(),
        }
    }
}

/// # Maps an SQS message to the record stored for it
///
/// A message without a body is stored with an empty payload.
pub fn record_from_message(message: &SqsMessage) -> StoredRecord {
    StoredRecord::new(message.body.as_deref().unwrap_or_default())
}
