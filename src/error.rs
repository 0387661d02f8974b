use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error("auth error: {0}")]
    Auth(String),
    #[error("api error: {message}")]
    Api {
        /// HTTP status of the response, absent on transport failure.
        status: Option<u16>,
        message: String,
    },
    #[error("upload error: {0}")]
    Upload(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn api(status: impl Into<Option<u16>>, message: impl Into<String>) -> Self {
        AppError::Api {
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => *status,
            _ => None,
        }
    }
}
