//! Event listener lambda
//!
//! This lambda is triggered by SQS and stores every message it receives in the `event_storage` DynamoDB table.
//!
//! Given the following input:
//! ```json
//! {
//!   "Records": [
//!     { "messageId": "...", "body": "any text at all" }
//!   ]
//! }
//! ```
//! The lambda will:
//! * Generate a random UUID for each message
//! * Write `{"PK": <uuid>, "Message": <body>}` to the table, one message at a time
//! * Fail the whole invocation on the first write that fails, so SQS redelivers the batch

use aws_lambda_events::sqs::SqsEvent;
use event_listener_lib::{process_batch, RecordStore};
use lambda_runtime::{Error, LambdaEvent};
use tracing::{info_span, Instrument};

/// # Handles one SQS invocation
///
/// The store is created once per process and borrowed by every invocation.
pub async fn function_handler<S: RecordStore + ?Sized>(
    store: &S,
    event: LambdaEvent<SqsEvent>,
) -> Result<(), Error> {
    let (sqs_event, context) = event.into_parts();
    let span = info_span!("invocation", request_id = %context.request_id);
    process_batch(store, &sqs_event).instrument(span).await?;
    Ok(())
}
