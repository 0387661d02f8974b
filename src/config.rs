use std::{env, path::PathBuf};

use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub identity_base_url: Url,
    pub storage_base_url: Url,
    pub data_root: PathBuf,
    pub login_email: Option<String>,
    pub login_password: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let api_base_url = url_from_env("API_BASE_URL", "http://localhost:3000/")?;
        let identity_base_url = url_from_env("IDENTITY_BASE_URL", "http://localhost:9099/")?;
        let storage_base_url = url_from_env("STORAGE_BASE_URL", "http://localhost:9199/")?;

        let data_root = env::var("DATA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".wander"));

        let login_email = env::var("LOGIN_EMAIL").ok();
        let login_password = env::var("LOGIN_PASSWORD").ok();

        Ok(Self {
            api_base_url,
            identity_base_url,
            storage_base_url,
            data_root,
            login_email,
            login_password,
        })
    }
}

fn url_from_env(key: &str, default: &str) -> Result<Url, AppError> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|err| AppError::Config(format!("invalid {key}: {err}")))
}
