use aws_lambda_events::event::sqs::SqsEvent;
use event_listener_lib::DynamoDbStore;
use lambda::function_handler;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let store = &DynamoDbStore::create(None).await;

    run(service_fn(move |event: LambdaEvent<SqsEvent>| async move {
        function_handler(store, event).await
    }))
    .await
}
