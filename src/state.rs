use std::sync::Arc;

use crate::{
    config::AppConfig,
    services::{
        api::ApiClient, credentials::TokenStore, identity::IdentityProvider,
        object_store::ObjectStore, session::SessionService, upload::PhotoUploader,
    },
};

/// Everything a view controller needs, passed explicitly; there is no
/// ambient global session.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub api: ApiClient,
    pub session: SessionService,
    pub uploader: PhotoUploader,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        let tokens = TokenStore::new(config.data_root.clone());
        let api = ApiClient::new(config.api_base_url.clone(), tokens.clone());
        let session = SessionService::new(provider, tokens);
        let uploader = PhotoUploader::new(store);
        Self {
            config,
            api,
            session,
            uploader,
        }
    }
}
