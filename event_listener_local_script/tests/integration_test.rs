use assert_cmd::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;
use testlib::*;
use wiremock::MockServer;

fn replay_command(event_path: &PathBuf, endpoint_url: &str) -> Command {
    let mut cmd: Command = Command::cargo_bin("event-replay").unwrap();
    cmd.env("AWS_ACCESS_KEY_ID", "test")
        .env("AWS_SECRET_ACCESS_KEY", "test")
        .arg("--event")
        .arg(event_path.to_str().unwrap())
        .arg("--endpoint-url")
        .arg(endpoint_url);
    cmd
}

#[tokio::test]
async fn stores_every_message_in_the_event_file() {
    let input_dir: TempDir = TempDir::new().unwrap();
    let event_path = write_event_file(&input_dir, &["one", "two"]);
    let mock_dynamodb_server = MockServer::start().await;
    mount_put_item(&mock_dynamodb_server, put_item_success(), None).await;

    replay_command(&event_path, &mock_dynamodb_server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing message one"))
        .stdout(predicate::str::contains("Processing message two"))
        .stdout(predicate::str::contains("Message processed").count(2))
        .stdout(predicate::str::contains("Stored 2 records"));

    let payloads: Vec<String> = put_item_requests(&mock_dynamodb_server)
        .await
        .iter()
        .map(|request| stored_attributes(request).1)
        .collect();
    assert_eq!(payloads, vec!["one", "two"]);
}

#[tokio::test]
async fn error_if_a_write_is_rejected() {
    let input_dir: TempDir = TempDir::new().unwrap();
    let event_path = write_event_file(&input_dir, &["one", "two"]);
    let mock_dynamodb_server = MockServer::start().await;
    mount_put_item(&mock_dynamodb_server, put_item_rejected(), None).await;

    replay_command(&event_path, &mock_dynamodb_server.uri())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Processing message one"))
        .stdout(predicate::str::contains("Message processed").not())
        .stdout(predicate::str::contains("ERROR"))
        .stdout(predicate::str::contains("Error message: service error"))
        .stdout(predicate::str::contains("ValidationException"))
        .stdout(predicate::str::contains("Details:").count(1))
        .stdout(predicate::str::contains("Processing message two").not());

    assert_eq!(put_item_requests(&mock_dynamodb_server).await.len(), 1);
}

#[test]
fn error_if_event_file_is_missing() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir: TempDir = TempDir::new().unwrap();
    let event_path = input_dir.join(PathBuf::from("missing.json"));

    replay_command(&event_path, "http://localhost:1")
        .assert()
        .failure()
        .stdout(predicate::str::contains("No such file or directory"));
    Ok(())
}
