//!## Event replay script
//!
//! This is a script to store the messages of a captured SQS event, the same way the lambda does.
//! It is useful for replaying a batch that ended up on the dead letter queue, or for trying the lambda's
//! behaviour against a local DynamoDB.
//!
//! ## Running
//! ```bash
//! event-replay --event /path/to/event.json
//! ```
//!
//! ## Running against a local DynamoDB
//! ```bash
//! event-replay --event /path/to/event.json --endpoint-url http://localhost:4566
//! ```
//!
//! The event file must be an SQS event as delivered to the lambda, with a top level `Records` array.
//!
use aws_lambda_events::sqs::SqsEvent;
use clap::Parser;
use event_listener_lib::*;
use log::{self, LevelFilter};
use simple_logger::SimpleLogger;
use std::{fs, path::Path, path::PathBuf, process::exit};

/// # Process the input arguments
///
/// Returns the path to the event file with `~` and environment variables expanded.
fn event_path_from_input_arguments(opt: &Opt) -> Result<PathBuf, Error> {
    Ok(PathBuf::from(shellexpand::full(&opt.event)?.to_string()))
}

/// # Reads and parses the SQS event file
fn read_event(event_path: &Path) -> Result<SqsEvent, Error> {
    let event_json = fs::read_to_string(event_path)?;
    Ok(serde_json::from_str(&event_json)?)
}

/// # Reads the event named in the input arguments
fn event_from_input_arguments(opt: &Opt) -> Result<SqsEvent, Error> {
    read_event(&event_path_from_input_arguments(opt)?)
}

/// # The entrypoint for the replay script
///
/// A failed write has already been logged by `process_batch`, so only the exit status is set for it here.
#[tokio::main]
async fn main() {
    if let Err(err) = SimpleLogger::new().with_level(LevelFilter::Info).init() {
        eprintln!("Error: {:?}", err);
        exit(1);
    }
    let opt = Opt::parse();
    let event = match event_from_input_arguments(&opt) {
        Ok(event) => event,
        Err(err) => {
            log::error!("Error: {:?}", err);
            exit(1);
        }
    };
    let store = DynamoDbStore::create(opt.endpoint_url.as_deref()).await;
    match process_batch(&store, &event).await {
        Ok(records) => log::info!("Stored {} records", records.len()),
        Err(_) => exit(1),
    }
}
