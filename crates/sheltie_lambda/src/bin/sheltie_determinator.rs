use chrono::Utc;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use sheltie_lambda::adapters::label_detection::RekognitionLabelDetector;
use sheltie_lambda::adapters::object_store::S3ImageStore;
use sheltie_lambda::config::HandlerConfig;
use sheltie_lambda::handlers::classify::{
    handle_upload_event, ApiGatewayResponse, InvocationContext,
};
use sheltie_lambda::logging::init_tracing;

struct RuntimeDependencies {
    config: HandlerConfig,
    store: S3ImageStore,
    detector: RekognitionLabelDetector,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<ApiGatewayResponse, Error> {
    let invocation = InvocationContext {
        request_id: event.context.request_id.clone(),
        run_date: Utc::now().format("%Y-%m-%d").to_string(),
    };

    handle_upload_event(
        &event.payload,
        &invocation,
        &deps.config,
        &deps.store,
        &deps.detector,
    )
    .map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = HandlerConfig::from_env()?;
    tracing::info!(
        bucket = %config.bucket,
        object_key = %config.object_key,
        key_strategy = %config.key_strategy,
        max_labels = config.max_labels,
        "handler_configured"
    );

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        config,
        store: S3ImageStore::new(aws_sdk_s3::Client::new(&aws_config)),
        detector: RekognitionLabelDetector::new(aws_sdk_rekognition::Client::new(&aws_config)),
    };
    let deps = &deps;

    lambda_runtime::run(service_fn(move |event| async move {
        handle_request(event, deps).await
    }))
    .await
}
