//! fallguard-storage
//!
//! Persistence for lead submissions. A local JSON-file store for single-host
//! deployments and an S3 store (thin wrapper around the AWS S3 SDK) for
//! hosted ones, both behind [`store::SubmissionStore`].

pub mod client;
pub mod error;
pub mod local;
pub mod objects;
pub mod s3;
pub mod state;
pub mod store;
