pub mod label_detection;
pub mod object_store;
