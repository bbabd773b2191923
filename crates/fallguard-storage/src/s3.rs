use aws_sdk_s3::Client;
use fallguard_core::models::lead::LeadSubmission;
use fallguard_core::storage_keys;
use uuid::Uuid;

use crate::error::StorageError;
use crate::objects;
use crate::state::{load_state, save_state};
use crate::store::{SubmissionStore, sort_oldest_first};

/// Submissions as JSON objects under `submissions/` in one bucket.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl SubmissionStore for S3Store {
    async fn save(&self, submission: &LeadSubmission) -> Result<(), StorageError> {
        let key = storage_keys::submission(submission.id);
        save_state(&self.client, &self.bucket, &key, submission).await?;
        tracing::info!(bucket = %self.bucket, key = %key, "submission saved");
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<LeadSubmission, StorageError> {
        let key = storage_keys::submission(id);
        load_state(&self.client, &self.bucket, &key).await
    }

    async fn list(&self) -> Result<Vec<LeadSubmission>, StorageError> {
        let prefix = storage_keys::SUBMISSIONS_PREFIX;
        let keys = objects::list_objects(&self.client, &self.bucket, prefix).await?;

        let mut submissions = Vec::with_capacity(keys.len());
        for key in keys {
            if storage_keys::submission_id(&key).is_none() {
                tracing::warn!(key = %key, "skipping unexpected object under submissions/");
                continue;
            }
            submissions.push(load_state(&self.client, &self.bucket, &key).await?);
        }
        sort_oldest_first(&mut submissions);
        Ok(submissions)
    }
}
