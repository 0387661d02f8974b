use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::photo::{Photo, PhotoDraft},
};

use super::{api::ApiClient, object_store::ObjectStore};

/// Two-phase photo upload: binary to object storage, then metadata to the
/// backend. There is no transaction across the two systems; a phase-two
/// failure leaves the stored object orphaned.
#[derive(Clone)]
pub struct PhotoUploader {
    store: Arc<dyn ObjectStore>,
}

impl PhotoUploader {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    pub async fn upload_photo(
        &self,
        api: &ApiClient,
        trip_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
        caption: Option<String>,
        destination_id: Option<String>,
    ) -> Result<Photo, AppError> {
        let key = format!("trip-photos/{}-{}", Uuid::new_v4(), file_name);
        let image_url = self
            .store
            .put(&key, bytes, content_type_for(file_name))
            .await?;

        let draft = PhotoDraft {
            image_url,
            caption,
            destination_id,
        };
        match api.add_photo(trip_id, &draft).await {
            Ok(photo) => Ok(photo),
            Err(err) => {
                // No compensating delete; the key is logged so orphans can
                // be reaped out of band.
                warn!(%key, "photo registration failed, stored object is orphaned");
                Err(AppError::Upload(format!(
                    "photo registration failed: {err}"
                )))
            }
        }
    }

    /// Trip cover images skip phase two; the URL rides on the trip payload.
    pub async fn upload_trip_cover(
        &self,
        owner_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AppError> {
        let key = format!("trips/{}/{}-{}", owner_id, Uuid::new_v4(), file_name);
        self.store
            .put(&key, bytes, content_type_for(file_name))
            .await
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
