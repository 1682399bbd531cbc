//! League fixtures backend entrypoint wiring configuration, storage supervision and the REST API.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use league_fixtures_back::{
    config::{AppConfig, StorageBackend},
    dao::{
        league_store::{LeagueStore, memory::MemoryLeagueStore},
        storage::StorageError,
    },
    routes,
    services::storage_supervisor,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let backend = config.storage();
    let app_state = AppState::new(config);

    spawn_storage_supervisor(app_state.clone(), backend);
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, ?backend, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Start the background task that installs the configured league store and
/// toggles degraded mode when it becomes unreachable.
fn spawn_storage_supervisor(state: SharedState, backend: StorageBackend) {
    match backend {
        StorageBackend::Memory => spawn_memory_supervisor(state),
        #[cfg(feature = "mongo-store")]
        StorageBackend::Mongo => {
            use league_fixtures_back::dao::league_store::mongodb::{MongoConfig, MongoLeagueStore};

            tokio::spawn(storage_supervisor::run(state, || async {
                let config = MongoConfig::from_env().await?;
                let store = MongoLeagueStore::connect(config).await?;
                Ok::<_, StorageError>(Arc::new(store) as Arc<dyn LeagueStore>)
            }));
        }
        #[cfg(not(feature = "mongo-store"))]
        StorageBackend::Mongo => {
            tracing::warn!("built without the `mongo-store` feature; using in-memory storage");
            spawn_memory_supervisor(state);
        }
    }
}

fn spawn_memory_supervisor(state: SharedState) {
    let store = MemoryLeagueStore::new();
    tokio::spawn(storage_supervisor::run(state, move || {
        let store = store.clone();
        async move { Ok::<_, StorageError>(Arc::new(store) as Arc<dyn LeagueStore>) }
    }));
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
