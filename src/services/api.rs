use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    error::AppError,
    models::{
        destination::{Destination, DestinationDraft},
        photo::{Photo, PhotoDraft},
        trip::{Trip, TripDraft},
    },
};

use super::credentials::TokenStore;

/// Typed CRUD over the backend REST API. Each call is one request and one
/// response: no retry, no caching, no deduplication. The bearer token is
/// read from the store at request time and attached only when present.
#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    http: Client,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(base: Url, tokens: TokenStore) -> Self {
        Self {
            base,
            http: Client::new(),
            tokens,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        let raw = format!("{}/{}", self.base.as_str().trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|err| AppError::Config(format!("invalid api url: {err}")))
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, AppError> {
        // No token means the request goes out without an Authorization
        // header at all; the server decides whether to reject it.
        match self.tokens.load().await? {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Ok(request),
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = self
            .authorize(request)
            .await?
            .send()
            .await
            .map_err(|err| AppError::api(None, err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::api(
                status.as_u16(),
                if message.is_empty() {
                    status.to_string()
                } else {
                    message
                },
            ));
        }
        response
            .json()
            .await
            .map_err(|err| AppError::api(status.as_u16(), format!("malformed response: {err}")))
    }

    async fn execute_unit(&self, request: RequestBuilder) -> Result<(), AppError> {
        let response = self
            .authorize(request)
            .await?
            .send()
            .await
            .map_err(|err| AppError::api(None, err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::api(
                status.as_u16(),
                if message.is_empty() {
                    status.to_string()
                } else {
                    message
                },
            ));
        }
        Ok(())
    }

    // Trips

    /// The caller's own trips; the server filters by the attached credential.
    pub async fn list_trips_for_owner(&self) -> Result<Vec<Trip>, AppError> {
        self.execute(self.http.get(self.endpoint("trips")?)).await
    }

    /// Privileged listing across all owners; authorization is enforced
    /// server-side.
    pub async fn list_all_trips(&self) -> Result<Vec<Trip>, AppError> {
        self.execute(self.http.get(self.endpoint("trips/all")?))
            .await
    }

    pub async fn get_trip(&self, trip_id: &str) -> Result<Trip, AppError> {
        self.execute(self.http.get(self.endpoint(&format!("trips/{trip_id}"))?))
            .await
    }

    pub async fn create_trip(&self, draft: &TripDraft) -> Result<Trip, AppError> {
        self.execute(self.http.post(self.endpoint("trips")?).json(draft))
            .await
    }

    pub async fn update_trip(&self, trip_id: &str, draft: &TripDraft) -> Result<Trip, AppError> {
        self.execute(
            self.http
                .put(self.endpoint(&format!("trips/{trip_id}"))?)
                .json(draft),
        )
        .await
    }

    pub async fn delete_trip(&self, trip_id: &str) -> Result<(), AppError> {
        self.execute_unit(self.http.delete(self.endpoint(&format!("trips/{trip_id}"))?))
            .await
    }

    // Destinations

    pub async fn list_destinations(&self, trip_id: &str) -> Result<Vec<Destination>, AppError> {
        self.execute(
            self.http
                .get(self.endpoint(&format!("trips/{trip_id}/destinations"))?),
        )
        .await
    }

    pub async fn add_destination(
        &self,
        trip_id: &str,
        draft: &DestinationDraft,
    ) -> Result<Destination, AppError> {
        self.execute(
            self.http
                .post(self.endpoint(&format!("trips/{trip_id}/destinations"))?)
                .json(draft),
        )
        .await
    }

    pub async fn update_destination(
        &self,
        trip_id: &str,
        destination_id: &str,
        draft: &DestinationDraft,
    ) -> Result<Destination, AppError> {
        self.execute(
            self.http
                .put(self.endpoint(&format!(
                    "trips/{trip_id}/destinations/{destination_id}"
                ))?)
                .json(draft),
        )
        .await
    }

    pub async fn delete_destination(
        &self,
        trip_id: &str,
        destination_id: &str,
    ) -> Result<(), AppError> {
        self.execute_unit(self.http.delete(self.endpoint(&format!(
            "trips/{trip_id}/destinations/{destination_id}"
        ))?))
        .await
    }

    // Photos

    pub async fn list_photos(&self, trip_id: &str) -> Result<Vec<Photo>, AppError> {
        self.execute(
            self.http
                .get(self.endpoint(&format!("trips/{trip_id}/photos"))?),
        )
        .await
    }

    pub async fn add_photo(&self, trip_id: &str, draft: &PhotoDraft) -> Result<Photo, AppError> {
        self.execute(
            self.http
                .post(self.endpoint(&format!("trips/{trip_id}/photos"))?)
                .json(draft),
        )
        .await
    }

    pub async fn delete_photo(&self, photo_id: &str) -> Result<(), AppError> {
        self.execute_unit(
            self.http
                .delete(self.endpoint(&format!("photos/{photo_id}"))?),
        )
        .await
    }
}
