use async_trait::async_trait;

use crate::{config::Config, service::error::ServiceError};

/// Object storage for room photos.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `path` and return the public URL of the object.
    async fn upload(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ServiceError>;
}

/// Supabase storage bucket, accessed with the caller's own access token so the
/// bucket policies apply to the upload.
pub struct SupabaseStorage {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    bucket: String,
    access_token: String,
}

impl SupabaseStorage {
    pub fn new(http: reqwest::Client, config: &Config, access_token: &str) -> Self {
        Self {
            http,
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
            bucket: config.room_images_bucket.clone(),
            access_token: access_token.to_string(),
        }
    }

    fn encoded_path(path: &str) -> String {
        path.split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            Self::encoded_path(path)
        )
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ServiceError> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            Self::encoded_path(path)
        );

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Upload of {} failed with {}: {}", path, status, body);
            return Err(ServiceError::Storage(format!(
                "upload rejected with status {}",
                status
            )));
        }

        Ok(self.public_url(path))
    }
}
