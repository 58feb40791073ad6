// Storage layer (S3 via presigned URLs)

pub mod keys;
pub mod s3_client;

pub use keys::{base_name, derive_output_key, input_key};
pub use s3_client::*;
