use aws_sdk_s3::Client;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::objects;

/// Load a JSON document from S3.
pub async fn load_state<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<T, StorageError> {
    let body = objects::get_object(client, bucket, key).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Save a JSON document to S3.
pub async fn save_state<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_json_object(client, bucket, key, body).await
}
