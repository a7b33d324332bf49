//! ## Event listener library
//!
//! This library contains the intake pipeline shared between the lambda and the local replay script.
//!
//! Each SQS message in a batch is stored in the `event_storage` DynamoDB table as:
//! ```json
//! {
//!   "PK": { "S": "<random uuid>" },
//!   "Message": { "S": "<message body>" }
//! }
//! ```
//! Messages are written one at a time in the order they were delivered. The first failed write stops the batch
//! and the error is returned to the caller, so the whole batch is redelivered by SQS.
use aws_lambda_events::sqs::{SqsEvent, SqsMessage};
use clap::Parser;
use tracing::{error, info};

pub mod record;
pub mod store;

pub use record::{record_from_message, StoredRecord, PARTITION_KEY, PAYLOAD_ATTRIBUTE};
pub use store::{DynamoDbStore, RecordStore, REGION, TABLE_NAME};

/// The error type returned by the pipeline. This is the same type as `lambda_runtime::Error`.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// # A struct representing the replay script arguments
#[derive(Parser)]
#[clap(name = "event-replay")]
pub struct Opt {
    /// Path to a JSON file containing an SQS event
    #[clap(long, short, value_parser)]
    pub event: String,

    /// DynamoDB endpoint to use instead of the default one
    #[clap(long = "endpoint-url", short = 'u', value_parser)]
    pub endpoint_url: Option<String>,
}

/// # Stores a single SQS message
///
/// Returns the record that was written.
pub async fn process_record<S: RecordStore + ?Sized>(
    store: &S,
    message: &SqsMessage,
) -> Result<StoredRecord, Error> {
    let record = record_from_message(message);
    info!("Processing message {}", record.payload);
    store.put_record(&record).await?;
    info!(record_id = %record.identifier, "Message processed");
    Ok(record)
}

/// # Stores every message in order
///
/// Stops at the first failure. Records written before the failure are left in place.
pub async fn process_messages<S: RecordStore + ?Sized>(
    store: &S,
    messages: &[SqsMessage],
) -> Result<Vec<StoredRecord>, Error> {
    let mut records = Vec::with_capacity(messages.len());
    for message in messages {
        records.push(process_record(store, message).await?);
    }
    Ok(records)
}

/// # Processes an SQS batch
///
/// A failure is logged with its full details and then returned unchanged.
pub async fn process_batch<S: RecordStore + ?Sized>(
    store: &S,
    event: &SqsEvent,
) -> Result<Vec<StoredRecord>, Error> {
    info!(record_count = event.records.len(), "Received batch");
    process_messages(store, &event.records)
        .await
        .inspect_err(|err| error!("Error message: {err}. Details: {err:?}"))
}
