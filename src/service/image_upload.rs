//! Validation and upload of a batch of room photos.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::service::{error::ServiceError, storage::ObjectStorage};

pub const MAX_IMAGES_PER_ROOM: usize = 5;
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRejection {
    NotAnImage,
    TooLarge,
}

impl ImageRejection {
    pub fn message(&self) -> &'static str {
        match self {
            ImageRejection::NotAnImage => "Please upload only image files",
            ImageRejection::TooLarge => "Image must be less than 5MB",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedImage {
    pub file_name: String,
    pub reason: ImageRejection,
    pub message: &'static str,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadOutcome {
    pub urls: Vec<String>,
    pub skipped: Vec<SkippedImage>,
}

pub fn check_image(file: &ImageFile) -> Result<(), ImageRejection> {
    let is_image = file
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("image/"));
    if !is_image {
        return Err(ImageRejection::NotAnImage);
    }
    if file.bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageRejection::TooLarge);
    }
    Ok(())
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..6)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// `{owner}/{unix millis}-{random}.{ext}`; the extension is whatever follows the
/// last dot of the client file name.
pub fn object_path(owner_id: Uuid, file_name: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let ext = file_name.rsplit('.').next().unwrap_or(file_name);
    format!("{}/{}-{}.{}", owner_id, millis, random_suffix(), ext)
}

/// Uploads the valid files of a batch in order. Invalid files are skipped and
/// reported; a storage failure aborts the remainder of the batch.
pub async fn upload_room_images(
    storage: &dyn ObjectStorage,
    owner_id: Uuid,
    existing: usize,
    files: Vec<ImageFile>,
) -> Result<UploadOutcome, ServiceError> {
    if files.len() > MAX_IMAGES_PER_ROOM.saturating_sub(existing) {
        return Err(ServiceError::Validation(format!(
            "You can upload a maximum of {} images",
            MAX_IMAGES_PER_ROOM
        )));
    }

    let mut outcome = UploadOutcome::default();

    for file in files {
        if let Err(reason) = check_image(&file) {
            tracing::warn!("Skipping {}: {}", file.file_name, reason.message());
            outcome.skipped.push(SkippedImage {
                file_name: file.file_name,
                reason,
                message: reason.message(),
            });
            continue;
        }

        let path = object_path(owner_id, &file.file_name);
        let content_type = file.content_type.unwrap_or_default();
        let url = storage.upload(&path, &content_type, file.bytes).await?;
        outcome.urls.push(url);
    }

    tracing::info!(
        "{} image(s) uploaded, {} skipped for owner {}",
        outcome.urls.len(),
        outcome.skipped.len(),
        owner_id
    );

    Ok(outcome)
}
