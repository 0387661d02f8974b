use std::sync::Arc;

use tracing::{error, info, warn};
use wander::config::AppConfig;
use wander::error::AppError;
use wander::pages::{dashboard::Dashboard, ViewState};
use wander::services::identity::HttpIdentityProvider;
use wander::services::object_store::HttpObjectStore;
use wander::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;
    let provider = Arc::new(HttpIdentityProvider::new(
        config.identity_base_url.clone(),
        config.data_root.clone(),
    ));
    let store = Arc::new(HttpObjectStore::new(config.storage_base_url.clone()));
    let app = AppState::new(config, provider, store);

    let session = app.session.restore().await?;
    if let Some(principal) = session.principal() {
        info!(email = %principal.email, "session restored");
    } else {
        let (Some(email), Some(password)) = (
            app.config.login_email.clone(),
            app.config.login_password.clone(),
        ) else {
            warn!("no session and no LOGIN_EMAIL/LOGIN_PASSWORD configured");
            return Ok(());
        };
        let principal = app.session.login(&email, &password).await?;
        info!(email = %principal.email, "signed in");
    }

    let mut dashboard = Dashboard::new();
    dashboard.load(&app).await;
    match dashboard.trips() {
        ViewState::Ready(trips) if trips.is_empty() => {
            info!("no trips yet, create one to get started");
        }
        ViewState::Ready(trips) => {
            for trip in trips {
                info!(id = %trip.id, "{} ({})", trip.title, trip.location_text());
            }
        }
        ViewState::Error(message) => error!("could not load trips: {message}"),
        ViewState::Loading => {}
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,wander=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
