use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_IMAGE_BUCKET: &str = "sheltie_image_comparison_bucket";
pub const DEFAULT_OBJECT_KEY: &str = "uploaded_sheltie_image.jpg";
pub const DEFAULT_MAX_LABELS: i32 = 10;

/// Lowercased label names that count as a Sheltie.
pub const TARGET_LABEL_NAMES: [&str; 2] = ["sheltie", "shetland sheepdog"];

pub const POSITIVE_RESPONSE_BODY: &str = "You're dang right that is a Sheltie!";
pub const NEGATIVE_RESPONSE_BODY: &str = "Sorry, that is not a Sheltie.";

/// A detected concept returned by the label-detection service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Label {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Confidence", default)]
    pub confidence: f32,
}

impl Label {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Sheltie,
    NotSheltie,
}

impl Verdict {
    pub fn is_sheltie(self) -> bool {
        matches!(self, Self::Sheltie)
    }

    pub fn response_body(self) -> &'static str {
        match self {
            Self::Sheltie => POSITIVE_RESPONSE_BODY,
            Self::NotSheltie => NEGATIVE_RESPONSE_BODY,
        }
    }
}

impl From<bool> for Verdict {
    fn from(is_sheltie: bool) -> Self {
        if is_sheltie {
            Self::Sheltie
        } else {
            Self::NotSheltie
        }
    }
}

/// Failure of the label-detection step.
///
/// Callers only ever see a negative verdict for these; the variants exist so
/// the handler can log and test the failure separately from a true negative.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("label detection failed: {0}")]
    DetectionFailed(String),
    #[error("malformed label detection response: {0}")]
    MalformedResponse(String),
}
