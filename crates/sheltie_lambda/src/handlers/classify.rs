use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sheltie_core::contract::{ClassificationError, Verdict};
use sheltie_core::matching::{resolve_verdict, verdict_from_labels};
use sheltie_core::storage_keys::upload_object_key;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::adapters::label_detection::LabelDetector;
use crate::adapters::object_store::{ImageStore, StoreError};
use crate::config::HandlerConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl ApiGatewayResponse {
    /// Always 200: callers only learn the outcome from the body text.
    pub fn from_verdict(verdict: Verdict) -> Self {
        Self {
            status_code: 200,
            body: verdict.response_body().to_string(),
        }
    }
}

/// Per-invocation identity used when the key strategy is `per_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub request_id: String,
    pub run_date: String,
}

/// Failures that abort the invocation. Classification failures never show up
/// here; they degrade to a negative verdict instead.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("request event has no body")]
    MissingBody,
    #[error("invalid request event: {0}")]
    InvalidBody(&'static str),
    #[error("request body is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub fn handle_upload_event(
    event: &Value,
    invocation: &InvocationContext,
    config: &HandlerConfig,
    store: &impl ImageStore,
    detector: &impl LabelDetector,
) -> Result<ApiGatewayResponse, HandlerError> {
    let image = extract_image_bytes(event).inspect_err(|error| {
        error!(request_id = %invocation.request_id, %error, "request_rejected");
    })?;

    let key = upload_object_key(
        config.key_strategy,
        &config.object_key,
        &invocation.run_date,
        &invocation.request_id,
    );

    store
        .write_object(&config.bucket, &key, &image)
        .inspect_err(|error| {
            error!(bucket = %config.bucket, key = %key, %error, "image_store_failed");
        })?;
    info!(bucket = %config.bucket, key = %key, bytes = image.len(), "image_stored");

    let outcome = classify_stored_image(detector, &config.bucket, &key, config.max_labels);
    if let Err(error) = &outcome {
        warn!(key = %key, %error, "classification_failed");
    }

    let verdict = resolve_verdict(outcome);
    info!(key = %key, is_sheltie = verdict.is_sheltie(), "verdict_resolved");

    Ok(ApiGatewayResponse::from_verdict(verdict))
}

pub fn classify_stored_image(
    detector: &impl LabelDetector,
    bucket: &str,
    key: &str,
    max_labels: i32,
) -> Result<Verdict, ClassificationError> {
    let labels = detector.detect_labels(bucket, key, max_labels)?;
    debug!(label_count = labels.len(), "labels_detected");
    Ok(verdict_from_labels(&labels))
}

/// Pulls the image out of an API Gateway proxy event. Base64 bodies are
/// decoded when the gateway flags them; text bodies are stored as their UTF-8
/// bytes.
pub fn extract_image_bytes(event: &Value) -> Result<Vec<u8>, HandlerError> {
    let Some(object) = event.as_object() else {
        return Err(HandlerError::InvalidBody("expected a JSON object"));
    };

    let body = match object.get("body") {
        None | Some(Value::Null) => return Err(HandlerError::MissingBody),
        Some(Value::String(text)) => text,
        Some(_) => return Err(HandlerError::InvalidBody("body must be a string")),
    };

    let is_base64 = object
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if is_base64 {
        Ok(STANDARD.decode(body.trim())?)
    } else {
        Ok(body.as_bytes().to_vec())
    }
}
