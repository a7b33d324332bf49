//! # Test library functions
//!
//! These are common functions used in the tests for the library, the lambda and the replay script.
use assert_fs::TempDir;
use async_trait::async_trait;
use aws_lambda_events::sqs::{SqsEvent, SqsMessage};
use event_listener_lib::{Error, RecordStore, StoredRecord};
use serde_json::Value;
use std::env::set_var;
use std::fs::write;
use std::path::PathBuf;
use std::sync::Mutex;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PUT_ITEM_TARGET: &str = "DynamoDB_20120810.PutItem";
const DYNAMODB_CONTENT_TYPE: &str = "application/x-amz-json-1.0";

/// # An in memory store which records every write it is asked to do
///
/// When `failing_write` is set, that write (counting from 1) is rejected and nothing is stored for it.
#[derive(Default)]
pub struct RecordingStore {
    failing_write: Option<usize>,
    attempts: Mutex<usize>,
    records: Mutex<Vec<StoredRecord>>,
}

impl RecordingStore {
    pub fn failing_on(write_number: usize) -> RecordingStore {
        RecordingStore {
            failing_write: Some(write_number),
            ..Default::default()
        }
    }

    /// # The records which were written successfully, in write order
    pub fn records(&self) -> Vec<StoredRecord> {
        self.records.lock().unwrap().clone()
    }

    /// # The number of writes attempted, including a rejected one
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn put_record(&self, record: &StoredRecord) -> Result<(), Error> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };
        if self.failing_write == Some(attempt) {
            return Err(format!("Write {attempt} rejected").into());
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// # An SQS message with the given body
pub fn sqs_message(body: &str) -> SqsMessage {
    SqsMessage {
        body: Some(body.to_string()),
        ..Default::default()
    }
}

/// # An SQS event with one message per body
pub fn sqs_event(bodies: &[&str]) -> SqsEvent {
    SqsEvent {
        records: bodies.iter().map(|body| sqs_message(body)).collect(),
    }
}

/// # Writes an SQS event to a file in `dir`
pub fn write_event_file(dir: &TempDir, bodies: &[&str]) -> PathBuf {
    let event_path = dir.join(PathBuf::from("event.json"));
    write(&event_path, serde_json::to_string(&sqs_event(bodies)).unwrap()).unwrap();
    event_path
}

/// # Sets static credentials so the SDK can sign requests to the mock server
pub fn set_test_credentials() {
    set_var("AWS_ACCESS_KEY_ID", "test");
    set_var("AWS_SECRET_ACCESS_KEY", "test");
}

/// # A successful PutItem response
pub fn put_item_success() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw("{}", DYNAMODB_CONTENT_TYPE)
}

/// # A PutItem response rejecting the request. The SDK does not retry this.
pub fn put_item_rejected() -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_raw(
        r#"{"__type":"com.amazon.coral.validate#ValidationException","message":"One or more parameter values were invalid"}"#,
        DYNAMODB_CONTENT_TYPE,
    )
}

/// # Mounts a PutItem mock, optionally limited to a number of matches
pub async fn mount_put_item(server: &MockServer, response: ResponseTemplate, times: Option<u64>) {
    let mock = Mock::given(method("POST"))
        .and(path("/"))
        .and(header("x-amz-target", PUT_ITEM_TARGET))
        .respond_with(response);
    let mock = match times {
        Some(n) => mock.up_to_n_times(n),
        None => mock,
    };
    mock.mount(server).await;
}

/// # The JSON bodies of every PutItem request the mock server received, in order
pub async fn put_item_requests(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| {
            request
                .headers
                .get("x-amz-target")
                .is_some_and(|target| target == PUT_ITEM_TARGET)
        })
        .map(|request| serde_json::from_slice(&request.body).unwrap())
        .collect()
}

/// # The `PK` and `Message` string values from a PutItem request body
pub fn stored_attributes(request: &Value) -> (String, String) {
    let item = &request["Item"];
    (
        item["PK"]["S"].as_str().unwrap().to_string(),
        item["Message"]["S"].as_str().unwrap().to_string(),
    )
}
