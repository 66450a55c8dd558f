//! StarCast backend
//!
//! Main application entry point

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use starcast::{
    config::Settings,
    database::{create_pool, run_migrations, DatabaseService},
    middleware::{spawn_cleanup, CLEANUP_INTERVAL},
    router,
    services::{ServiceFactory, SyntheticEventSource},
    utils::logging,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal outside development
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file sink on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", starcast::info());

    // Initialize database connection
    info!("Connecting to database...");
    let pool = create_pool(&settings.database).await?;

    // Run database migrations
    info!("Running database migrations...");
    run_migrations(&pool).await?;

    let database_service = DatabaseService::new(pool);
    if settings.features.seed_learning_content {
        info!("Seeding learning content...");
        database_service.seed().await?;
    }

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(
        &settings,
        database_service,
        Arc::new(SyntheticEventSource::new()),
    )?;

    let health = services.health_check().await;
    for issue in health.get_issues() {
        warn!(issue = %issue, "Service degraded at startup");
    }

    let address = settings.bind_address();
    let state = AppState::new(settings, services)?;
    let limiter_cleanup = spawn_cleanup(state.rate_limiter.clone(), CLEANUP_INTERVAL);
    let app = router(state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("StarCast listening on {}", address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    limiter_cleanup.abort();
    info!("StarCast has been shut down.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
