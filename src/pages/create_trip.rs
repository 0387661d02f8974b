use tracing::warn;

use crate::{
    error::AppError,
    models::{
        destination::DestinationDraft,
        trip::{Trip, TripDraft},
    },
    state::AppState,
};

/// A cover image picked in the create form, uploaded before the trip is
/// created.
#[derive(Debug, Clone)]
pub struct CoverImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Create-trip form: upload the cover image (if any), create the trip,
/// then add each destination scoped to the new trip id, in input order.
#[derive(Debug, Default)]
pub struct CreateTrip {
    error: Option<String>,
}

impl CreateTrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(
        &mut self,
        app: &AppState,
        draft: TripDraft,
        image: Option<CoverImage>,
        destinations: Vec<DestinationDraft>,
    ) -> Option<Trip> {
        self.error = None;
        match self.create(app, draft, image, destinations).await {
            Ok(trip) => Some(trip),
            Err(err) => {
                warn!("trip creation failed: {err}");
                self.error = Some("Failed to create trip. Please try again.".to_string());
                None
            }
        }
    }

    async fn create(
        &self,
        app: &AppState,
        mut draft: TripDraft,
        image: Option<CoverImage>,
        destinations: Vec<DestinationDraft>,
    ) -> Result<Trip, AppError> {
        let state = app.session.state();
        let principal = state
            .principal()
            .ok_or_else(|| AppError::Auth("sign in before creating a trip".to_string()))?;
        draft.owner_id = principal.uid.clone();

        if let Some(image) = image {
            let url = app
                .uploader
                .upload_trip_cover(&principal.uid, &image.file_name, image.bytes)
                .await?;
            draft.image_url = Some(url);
        }

        let trip = app.api.create_trip(&draft).await?;

        // Destinations only exist once the trip does; a failure here leaves
        // the trip created with the destinations added so far.
        for destination in &destinations {
            app.api.add_destination(&trip.id, destination).await?;
        }

        Ok(trip)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
