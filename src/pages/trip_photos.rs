use std::collections::HashMap;

use crate::{
    error::AppError,
    models::{destination::Destination, photo::Photo},
    state::AppState,
};

use super::ViewState;

#[derive(Debug, Clone, PartialEq)]
pub struct DestinationPhotos {
    pub destination: Destination,
    pub photos: Vec<Photo>,
}

/// Photo gallery grouped by destination: destinations fetched once, photos
/// fetched once, grouped client-side.
#[derive(Debug)]
pub struct TripPhotos {
    trip_id: String,
    groups: ViewState<Vec<DestinationPhotos>>,
}

impl TripPhotos {
    pub fn new(trip_id: impl Into<String>) -> Self {
        Self {
            trip_id: trip_id.into(),
            groups: ViewState::Loading,
        }
    }

    pub async fn load(&mut self, app: &AppState) {
        self.groups = ViewState::from_result(self.fetch(app).await);
    }

    async fn fetch(&self, app: &AppState) -> Result<Vec<DestinationPhotos>, AppError> {
        let destinations = app.api.list_destinations(&self.trip_id).await?;
        let photos = app.api.list_photos(&self.trip_id).await?;
        Ok(group_by_destination(destinations, photos))
    }

    pub fn groups(&self) -> &ViewState<Vec<DestinationPhotos>> {
        &self.groups
    }
}

/// Group photos under their destinations via an index keyed by destination
/// id. Trip-level photos and photos pointing at a destination that is not
/// in the fetched set appear in no group.
pub fn group_by_destination(
    destinations: Vec<Destination>,
    photos: Vec<Photo>,
) -> Vec<DestinationPhotos> {
    let mut by_destination: HashMap<String, Vec<Photo>> = HashMap::new();
    for photo in photos {
        let Some(destination_id) = photo.destination_id.clone() else {
            continue;
        };
        by_destination.entry(destination_id).or_default().push(photo);
    }

    destinations
        .into_iter()
        .map(|destination| {
            let photos = by_destination.remove(&destination.id).unwrap_or_default();
            DestinationPhotos {
                destination,
                photos,
            }
        })
        .collect()
}
