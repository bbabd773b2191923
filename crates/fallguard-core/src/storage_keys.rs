//! Storage key/path conventions.
//!
//! Pure string functions. These define the canonical layout of objects in the
//! Fallguard bucket and, mirrored onto the filesystem, in the local data directory.

use uuid::Uuid;

pub const SUBMISSIONS_PREFIX: &str = "submissions/";

pub fn submission(id: Uuid) -> String {
    format!("{SUBMISSIONS_PREFIX}{id}.json")
}

/// Extract the submission id from a key produced by [`submission`].
pub fn submission_id(key: &str) -> Option<Uuid> {
    key.strip_prefix(SUBMISSIONS_PREFIX)?
        .strip_suffix(".json")?
        .parse()
        .ok()
}
