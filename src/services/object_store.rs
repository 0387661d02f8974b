use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use url::Url;

use crate::error::AppError;

/// External binary storage: put bytes under a key, get back a publicly
/// resolvable URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError>;
}

/// Stores objects with `PUT {base}/{key}`; the object is then readable at
/// that same URL.
pub struct HttpObjectStore {
    base: Url,
    http: Client,
}

impl HttpObjectStore {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            http: Client::new(),
        }
    }

    fn object_url(&self, key: &str) -> Result<Url, AppError> {
        let raw = format!("{}/{}", self.base.as_str().trim_end_matches('/'), key);
        Url::parse(&raw).map_err(|err| AppError::Config(format!("invalid object url: {err}")))
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let target = self.object_url(key)?;
        let response = self
            .http
            .put(target.clone())
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|err| AppError::Upload(format!("object upload failed: {err}")))?;
        if !response.status().is_success() {
            return Err(AppError::Upload(format!(
                "object storage returned {}",
                response.status()
            )));
        }
        Ok(target.to_string())
    }
}
