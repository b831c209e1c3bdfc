use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to write object to s3: {0}")]
pub struct StoreError(pub String);

pub trait ImageStore {
    fn write_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), StoreError>;
}

pub struct S3ImageStore {
    s3_client: aws_sdk_s3::Client,
}

impl S3ImageStore {
    pub fn new(s3_client: aws_sdk_s3::Client) -> Self {
        Self { s3_client }
    }
}

impl ImageStore for S3ImageStore {
    fn write_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), StoreError> {
        let bucket = bucket.to_string();
        let object_key = key.to_string();
        let body_bytes = body.to_vec();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(object_key)
                    .body(ByteStream::from(body_bytes))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| StoreError(DisplayErrorContext(&error).to_string()))
            })
        })
    }
}
