use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fallguard_core::models::lead::LeadSubmission;
use fallguard_core::storage_keys;
use uuid::Uuid;

use crate::error::StorageError;
use crate::store::{SubmissionStore, sort_oldest_first};

/// Submissions as JSON files under a data directory, using the same key
/// layout as the S3 store (`<root>/submissions/<id>.json`).
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl SubmissionStore for LocalStore {
    async fn save(&self, submission: &LeadSubmission) -> Result<(), StorageError> {
        let key = storage_keys::submission(submission.id);
        let path = self.path_for(&key);
        let dir = self.root.join(storage_keys::SUBMISSIONS_PREFIX);
        tokio::fs::create_dir_all(&dir).await?;

        let json = serde_json::to_vec_pretty(submission)?;

        // Write to a temp file then rename for atomicity
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &json).await?;

        // Contact details: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        tokio::fs::rename(&tmp_path, &path).await?;

        tracing::info!(path = %path.display(), "submission saved");
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<LeadSubmission, StorageError> {
        let key = storage_keys::submission(id);
        let contents = match tokio::fs::read(self.path_for(&key)).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound { key });
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&contents)?)
    }

    async fn list(&self) -> Result<Vec<LeadSubmission>, StorageError> {
        let dir = self.root.join(storage_keys::SUBMISSIONS_PREFIX);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut submissions = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let key = format!(
                "{}{}",
                storage_keys::SUBMISSIONS_PREFIX,
                file_name.to_string_lossy()
            );
            // Skips temp files left by an interrupted save.
            let Some(id) = storage_keys::submission_id(&key) else {
                continue;
            };
            submissions.push(self.load(id).await?);
        }

        sort_oldest_first(&mut submissions);
        Ok(submissions)
    }
}
