//! AWS-oriented adapters and handlers for the Sheltie determinator Lambda.
//!
//! This crate owns runtime integration details (configuration, the Lambda
//! handler, and the S3 and Rekognition adapters). Classification rules live
//! in `sheltie_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
