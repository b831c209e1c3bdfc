//! Shared Sheltie classification domain primitives.
//!
//! This crate owns label matching, verdict resolution, the response-body
//! contract, and upload key construction. It intentionally excludes AWS SDK
//! and Lambda runtime concerns.

pub mod contract;
pub mod matching;
pub mod storage_keys;
