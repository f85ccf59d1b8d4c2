use chat_server::{ServerError, build_jwt_validator, build_router, logger, start_services};

use chat_config::Config;
use chat_ws::ShutdownCoordinator;

use std::error::Error;
use std::time::Duration;

use log::{error, info, warn};
use tokio::net::TcpListener;

// Time the hub gets to close every connection after the listener stops
const HUB_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let (config, config_dir) = Config::load()?;
    config.validate(&config_dir)?;

    let log_file_path = config.logging.file_path(&config_dir);
    if let Some(log_dir) = log_file_path.as_deref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(log_dir).map_err(ServerError::from)?;
    }

    // Before anything else logs
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting chat-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary(&config_dir);

    let database_path = config.database.resolve(&config_dir);
    info!("Opening database: {}", database_path.display());
    let pool = chat_db::open_pool(&database_path).await?;
    info!("Database ready");

    let jwt_validator = build_jwt_validator(&config, &config_dir)?;

    let shutdown = ShutdownCoordinator::new();
    let services = start_services(&config, pool.clone(), jwt_validator, shutdown.clone());
    let app = build_router(services.state);

    let listener = TcpListener::bind(config.server.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => error!("Failed to listen for SIGINT: {e}"),
        }
    });

    let mut shutdown_guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown_guard.wait().await })
        .await?;

    // The listener can also stop on its own; make sure the hub follows.
    shutdown.shutdown();
    match tokio::time::timeout(HUB_DRAIN_TIMEOUT, services.hub_task).await {
        Ok(Ok(())) => info!("Hub drained"),
        Ok(Err(e)) => error!("Hub task failed: {e}"),
        Err(_) => warn!("Hub did not drain within {HUB_DRAIN_TIMEOUT:?}"),
    }
    if let Err(e) = services.sweeper_task.await {
        warn!("Sweeper task failed: {e}");
    }

    pool.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}
