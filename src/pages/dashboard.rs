use crate::{models::trip::Trip, state::AppState};

use super::ViewState;

/// The signed-in user's trip list. One fetch, no per-trip detail calls.
#[derive(Debug, Default)]
pub struct Dashboard {
    trips: ViewState<Vec<Trip>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, app: &AppState) {
        if !app.session.state().is_authenticated() {
            // Stay in the loading state until the session resolves.
            return;
        }
        self.trips = ViewState::from_result(app.api.list_trips_for_owner().await);
    }

    pub fn trips(&self) -> &ViewState<Vec<Trip>> {
        &self.trips
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.trips.ready(), Some(trips) if trips.is_empty())
    }
}
