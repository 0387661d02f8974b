use tracing::warn;

use crate::{
    error::AppError,
    models::{
        destination::{Destination, DestinationDraft},
        trip::TripDraft,
    },
    state::AppState,
};

use super::ViewState;

#[derive(Debug, Clone, PartialEq)]
pub struct EditTripView {
    pub draft: TripDraft,
    pub destinations: Vec<Destination>,
}

/// Edit form for one trip and its destinations. Every destination mutation
/// re-fetches the list instead of patching local state.
#[derive(Debug)]
pub struct EditTrip {
    trip_id: String,
    view: ViewState<EditTripView>,
    operation_error: Option<String>,
}

impl EditTrip {
    pub fn new(trip_id: impl Into<String>) -> Self {
        Self {
            trip_id: trip_id.into(),
            view: ViewState::Loading,
            operation_error: None,
        }
    }

    pub async fn load(&mut self, app: &AppState) {
        self.view = ViewState::from_result(self.fetch(app).await);
    }

    async fn fetch(&self, app: &AppState) -> Result<EditTripView, AppError> {
        let trip = app.api.get_trip(&self.trip_id).await?;
        let destinations = app.api.list_destinations(&self.trip_id).await?;
        Ok(EditTripView {
            draft: trip.draft(),
            destinations,
        })
    }

    pub async fn save_trip(&mut self, app: &AppState) {
        let Some(view) = self.view.ready() else {
            return;
        };
        match app.api.update_trip(&self.trip_id, &view.draft).await {
            Ok(_) => self.operation_error = None,
            Err(err) => self.operation_error = Some(err.to_string()),
        }
    }

    pub async fn add_destination(&mut self, app: &AppState, draft: DestinationDraft) {
        match app.api.add_destination(&self.trip_id, &draft).await {
            Ok(_) => {
                self.operation_error = None;
                self.refresh_destinations(app).await;
            }
            Err(err) => self.operation_error = Some(err.to_string()),
        }
    }

    pub async fn update_destination(
        &mut self,
        app: &AppState,
        destination_id: &str,
        draft: DestinationDraft,
    ) {
        match app
            .api
            .update_destination(&self.trip_id, destination_id, &draft)
            .await
        {
            Ok(_) => {
                self.operation_error = None;
                self.refresh_destinations(app).await;
            }
            Err(err) => self.operation_error = Some(err.to_string()),
        }
    }

    pub async fn delete_destination(&mut self, app: &AppState, destination_id: &str) {
        match app
            .api
            .delete_destination(&self.trip_id, destination_id)
            .await
        {
            Ok(()) => {
                self.operation_error = None;
                self.refresh_destinations(app).await;
            }
            Err(err) => self.operation_error = Some(err.to_string()),
        }
    }

    async fn refresh_destinations(&mut self, app: &AppState) {
        match app.api.list_destinations(&self.trip_id).await {
            Ok(destinations) => {
                if let ViewState::Ready(view) = &mut self.view {
                    view.destinations = destinations;
                }
            }
            // The mutation is already persisted server-side; the list
            // catches up on the next successful fetch.
            Err(err) => warn!("destination list refresh failed: {err}"),
        }
    }

    pub fn view(&self) -> &ViewState<EditTripView> {
        &self.view
    }

    pub fn draft_mut(&mut self) -> Option<&mut TripDraft> {
        match &mut self.view {
            ViewState::Ready(view) => Some(&mut view.draft),
            _ => None,
        }
    }

    pub fn operation_error(&self) -> Option<&str> {
        self.operation_error.as_deref()
    }
}
