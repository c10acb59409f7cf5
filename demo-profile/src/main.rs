use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oauth2_profile_axum::{
    AppState,
    oauth2_profile::{OAuth2Config, SessionStore},
    profile_router,
};

mod server;

use crate::server::{port_from_env, serve_http};

/// `DEBUG_APP=True` turns on debug logging when `RUST_LOG` is not set.
fn default_filter() -> String {
    let level = match std::env::var("DEBUG_APP").as_deref() {
        Ok("True" | "true" | "1") => "debug",
        _ => "info",
    };
    format!(
        "{}={level},oauth2_profile={level},oauth2_profile_axum={level},tower_http={level}",
        env!("CARGO_CRATE_NAME")
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = OAuth2Config::from_env()?;
    tracing::info!("Redirect URI: {}", config.redirect_uri);
    let sessions = SessionStore::from_env().await?;

    let app = profile_router(AppState::new(config, sessions));

    serve_http(port_from_env()?, app).await?;
    Ok(())
}
