use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

use club_core::ConversationTimings;
use club_persistence::{connection::connect_and_migrate, repositories::SaveRepository};
use club_server::{auth::AuthService, chat::ConnectionManager, config::Config, create_routes};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Boardroom FC server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            tracing::error!(
                "SUPABASE_URL and SUPABASE_ANON_KEY are required unless AUTH_DEV_MODE=true."
            );
            std::process::exit(1);
        }
    };

    let connection_manager = Arc::new(ConnectionManager::new());

    let auth_service = match &config.supabase {
        Some(supabase) => Arc::new(AuthService::new(
            supabase.url.clone(),
            supabase.anon_key.clone(),
        )),
        None => {
            info!("Starting in development authentication mode - token validation is local only");
            Arc::new(AuthService::new_dev_mode())
        }
    };

    // Initialize database connection and run migrations
    let db = match connect_and_migrate().await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };
    let save_repository = Arc::new(SaveRepository::new(db));

    let routes = create_routes(
        connection_manager.clone(),
        auth_service,
        save_repository,
        ConversationTimings::default(),
    );

    // Start cleanup task
    let cleanup_connection_manager = connection_manager.clone();
    let connection_timeout = Duration::from_secs(config.connection_timeout_seconds);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30));
        loop {
            interval.tick().await;
            cleanup_connection_manager
                .cleanup_inactive_connections(connection_timeout)
                .await;
        }
    });

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = match config.host.parse::<std::net::IpAddr>() {
        Ok(ip) => (ip, config.port),
        Err(_) => {
            tracing::error!("Invalid HOST value: {}", config.host);
            std::process::exit(1);
        }
    };

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).unwrap();
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).unwrap();

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
