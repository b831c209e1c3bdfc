use aws_sdk_rekognition::error::DisplayErrorContext;
use aws_sdk_rekognition::types::{self as rekognition, Image, S3Object};
use sheltie_core::contract::{ClassificationError, Label};
use sheltie_core::matching::is_target_label;

pub trait LabelDetector {
    /// Detects labels for an object that already exists in `bucket` under `key`.
    fn detect_labels(
        &self,
        bucket: &str,
        key: &str,
        max_labels: i32,
    ) -> Result<Vec<Label>, ClassificationError>;
}

pub struct RekognitionLabelDetector {
    rekognition_client: aws_sdk_rekognition::Client,
}

impl RekognitionLabelDetector {
    pub fn new(rekognition_client: aws_sdk_rekognition::Client) -> Self {
        Self { rekognition_client }
    }
}

impl LabelDetector for RekognitionLabelDetector {
    fn detect_labels(
        &self,
        bucket: &str,
        key: &str,
        max_labels: i32,
    ) -> Result<Vec<Label>, ClassificationError> {
        let image = Image::builder()
            .s3_object(S3Object::builder().bucket(bucket).name(key).build())
            .build();
        let client = self.rekognition_client.clone();

        let output = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .detect_labels()
                    .image(image)
                    .max_labels(max_labels)
                    .send()
                    .await
                    .map_err(|error| {
                        ClassificationError::DetectionFailed(
                            DisplayErrorContext(&error).to_string(),
                        )
                    })
            })
        })?;

        labels_from_response(output.labels())
    }
}

/// Converts labels in response order and stops at the first Sheltie match, so
/// a nameless label only spoils the response when no match precedes it.
pub fn labels_from_response(
    labels: &[rekognition::Label],
) -> Result<Vec<Label>, ClassificationError> {
    let mut converted = Vec::with_capacity(labels.len());
    for (index, label) in labels.iter().enumerate() {
        let name = label.name().ok_or_else(|| {
            ClassificationError::MalformedResponse(format!("label {index} has no name"))
        })?;
        converted.push(Label::new(name, label.confidence().unwrap_or_default()));
        if is_target_label(name) {
            break;
        }
    }
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use sheltie_core::contract::Verdict;
    use sheltie_core::matching::{resolve_verdict, verdict_from_labels};

    use super::*;

    #[test]
    fn converts_sdk_labels_in_order() {
        let labels = labels_from_response(&[
            rekognition::Label::builder()
                .name("Dog")
                .confidence(99.9)
                .build(),
            rekognition::Label::builder()
                .name("Shetland Sheepdog")
                .confidence(91.0)
                .build(),
        ])
        .expect("labels should convert");

        assert_eq!(
            labels,
            vec![Label::new("Dog", 99.9), Label::new("Shetland Sheepdog", 91.0)]
        );
    }

    #[test]
    fn missing_confidence_defaults_to_zero() {
        let labels =
            labels_from_response(&[rekognition::Label::builder().name("Sheltie").build()])
                .expect("labels should convert");
        assert_eq!(labels, vec![Label::new("Sheltie", 0.0)]);
    }

    #[test]
    fn unnamed_label_is_malformed() {
        let error = labels_from_response(&[
            rekognition::Label::builder().name("Dog").build(),
            rekognition::Label::builder().confidence(50.0).build(),
        ])
        .expect_err("unnamed label should fail");

        assert_eq!(
            error,
            ClassificationError::MalformedResponse("label 1 has no name".to_string())
        );
    }

    #[test]
    fn nameless_label_after_a_sheltie_keeps_the_positive_verdict() {
        let labels = labels_from_response(&[
            rekognition::Label::builder()
                .name("Sheltie")
                .confidence(98.2)
                .build(),
            rekognition::Label::builder().confidence(50.0).build(),
        ]);

        assert_eq!(labels, Ok(vec![Label::new("Sheltie", 98.2)]));
        assert_eq!(
            resolve_verdict(labels.map(|labels| verdict_from_labels(&labels))),
            Verdict::Sheltie
        );
    }

    #[test]
    fn nameless_label_before_a_sheltie_is_malformed() {
        let labels = labels_from_response(&[
            rekognition::Label::builder().confidence(50.0).build(),
            rekognition::Label::builder()
                .name("Sheltie")
                .confidence(98.2)
                .build(),
        ]);

        assert_eq!(
            labels,
            Err(ClassificationError::MalformedResponse(
                "label 0 has no name".to_string()
            ))
        );
        assert_eq!(
            resolve_verdict(labels.map(|labels| verdict_from_labels(&labels))),
            Verdict::NotSheltie
        );
    }

    #[test]
    fn empty_response_converts_to_empty_labels() {
        let labels = labels_from_response(&[]).expect("empty response should convert");
        assert!(labels.is_empty());
    }
}
