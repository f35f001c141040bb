//! Paste API server entrypoint.

use sharebin::{config::Config, resolve_bind_address, serve_router, sweep, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sharebin=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.contains(&"--help".to_string()) {
        print_help();
        return Ok(());
    }

    let config = Config::from_env();
    let state = AppState::new(config);

    let bind_addr = resolve_bind_address(&state.config);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("sharebin running at http://{}", bind_addr);
    tracing::info!(
        "Share links are issued under {}",
        state.config.public_base_url
    );

    sweep::spawn_sweeper(state.service.clone(), state.config.sweep_interval_secs);

    serve_router(listener, state, shutdown_signal()).await?;

    Ok(())
}

fn print_help() {
    println!("sharebin server\n");
    println!("Usage: sharebin [OPTIONS]\n");
    println!("Options:");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables:");
    println!("  PORT                 Server port (default: 8080)");
    println!("  BIND                 Override bind address (e.g. 127.0.0.1:8080)");
    println!("  PUBLIC_BASE_URL      Base URL used in share links");
    println!("  CORS_ORIGIN          Restrict CORS to one origin (default: any)");
    println!("  MAX_CONTENT_CHARS    Maximum paste length (default: 10000)");
    println!("  TTL_MIN_SECS         Lower ttl_seconds bound (default: 60)");
    println!("  TTL_MAX_SECS         Upper ttl_seconds bound (default: 604800)");
    println!("  MAX_VIEWS_LIMIT      Upper max_views bound (default: 1000)");
    println!("  ID_LENGTH            Paste id length (default: 8)");
    println!("  SWEEP_INTERVAL_SECS  Expiry sweep period, 0 disables (default: 300)");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down gracefully...");
}
