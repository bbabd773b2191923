use std::future::Future;

use fallguard_core::models::lead::LeadSubmission;
use uuid::Uuid;

use crate::error::StorageError;
use crate::local::LocalStore;
use crate::s3::S3Store;

/// Where lead submissions are kept.
pub trait SubmissionStore: Send + Sync {
    fn save(
        &self,
        submission: &LeadSubmission,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn load(&self, id: Uuid) -> impl Future<Output = Result<LeadSubmission, StorageError>> + Send;

    /// All submissions, oldest first.
    fn list(&self) -> impl Future<Output = Result<Vec<LeadSubmission>, StorageError>> + Send;
}

/// The configured backend.
#[derive(Debug, Clone)]
pub enum Store {
    Local(LocalStore),
    S3(S3Store),
}

impl Store {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Store::Local(_) => "local",
            Store::S3(_) => "s3",
        }
    }
}

impl SubmissionStore for Store {
    async fn save(&self, submission: &LeadSubmission) -> Result<(), StorageError> {
        match self {
            Store::Local(store) => store.save(submission).await,
            Store::S3(store) => store.save(submission).await,
        }
    }

    async fn load(&self, id: Uuid) -> Result<LeadSubmission, StorageError> {
        match self {
            Store::Local(store) => store.load(id).await,
            Store::S3(store) => store.load(id).await,
        }
    }

    async fn list(&self) -> Result<Vec<LeadSubmission>, StorageError> {
        match self {
            Store::Local(store) => store.list().await,
            Store::S3(store) => store.list().await,
        }
    }
}

pub(crate) fn sort_oldest_first(submissions: &mut [LeadSubmission]) {
    submissions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}
