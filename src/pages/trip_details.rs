use tracing::warn;

use crate::{
    error::AppError,
    models::{destination::Destination, photo::Photo, trip::Trip},
    state::AppState,
};

use super::ViewState;

#[derive(Debug, Clone, PartialEq)]
pub struct TripDetailsView {
    pub trip: Trip,
    pub photos: Vec<Photo>,
    /// Choices for the upload form's destination picker.
    pub destinations: Vec<Destination>,
}

/// One trip with its photo list and an inline photo uploader.
#[derive(Debug)]
pub struct TripDetails {
    trip_id: String,
    view: ViewState<TripDetailsView>,
    upload_error: Option<String>,
}

impl TripDetails {
    pub fn new(trip_id: impl Into<String>) -> Self {
        Self {
            trip_id: trip_id.into(),
            view: ViewState::Loading,
            upload_error: None,
        }
    }

    pub async fn load(&mut self, app: &AppState) {
        self.view = ViewState::from_result(self.fetch(app).await);
    }

    async fn fetch(&self, app: &AppState) -> Result<TripDetailsView, AppError> {
        let trip = app.api.get_trip(&self.trip_id).await?;
        let photos = app.api.list_photos(&self.trip_id).await?;
        let destinations = app.api.list_destinations(&self.trip_id).await?;
        Ok(TripDetailsView {
            trip,
            photos,
            destinations,
        })
    }

    /// Upload a photo and, on success, re-fetch the photo list. A failure
    /// is recorded for display and leaves the rendered list untouched.
    pub async fn upload_photo(
        &mut self,
        app: &AppState,
        file_name: &str,
        bytes: Vec<u8>,
        caption: Option<String>,
        destination_id: Option<String>,
    ) {
        match app
            .uploader
            .upload_photo(
                &app.api,
                &self.trip_id,
                file_name,
                bytes,
                caption,
                destination_id,
            )
            .await
        {
            Ok(_) => {
                self.upload_error = None;
                self.refresh_photos(app).await;
            }
            Err(err) => self.upload_error = Some(err.to_string()),
        }
    }

    async fn refresh_photos(&mut self, app: &AppState) {
        match app.api.list_photos(&self.trip_id).await {
            Ok(photos) => {
                if let ViewState::Ready(view) = &mut self.view {
                    view.photos = photos;
                }
            }
            // The upload itself succeeded; the stale list stays up until
            // the next successful fetch.
            Err(err) => warn!("photo list refresh failed: {err}"),
        }
    }

    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    pub fn view(&self) -> &ViewState<TripDetailsView> {
        &self.view
    }

    pub fn upload_error(&self) -> Option<&str> {
        self.upload_error.as_deref()
    }
}
