//! Service entry point: configuration, logging, wiring, serve.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use twinterest::adapters::http::{router, AppState};
use twinterest::adapters::storage::{InMemorySessionStore, PgSessionStore};
use twinterest::adapters::twitter::TwitterGateway;
use twinterest::config::AppConfig;
use twinterest::ports::{SessionStore, SocialGateway};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let store: Arc<dyn SessionStore> = match &config.database {
        Some(database) => {
            let store = PgSessionStore::connect(database).await?;
            tracing::info!("session store: PostgreSQL");
            Arc::new(store)
        }
        None => {
            tracing::warn!("no database configured, sessions will not survive a restart");
            Arc::new(InMemorySessionStore::new())
        }
    };

    let gateway: Arc<dyn SocialGateway> = Arc::new(TwitterGateway::new(config.twitter.clone()));
    let state = AppState::new(store, gateway);
    let app = router(state, &config.server);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "twinterest listening");

    axum::serve(listener, app).await?;

    Ok(())
}
