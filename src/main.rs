use axum::{ServiceExt, extract::Request};
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::{signal, sync::oneshot};
use tracing::info;
use tron_address_api::{
    cli::Args,
    errors::AppError,
    server::{build, logging::setup_tracing},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();
    let config = Args::init().unwrap_or_else(|e| {
        eprintln!("\n{e}");
        std::process::exit(1);
    });

    // Logging
    setup_tracing(config.log_level);

    info!(
        "Starting {} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("GIT_REVISION")
    );

    let config = Arc::new(config);
    let (app, _) = build(config.clone()).await?;
    let address = std::net::SocketAddr::new(config.server_address, config.server_port);
    let listener = tokio::net::TcpListener::bind(address).await?;
    let (ready_tx, ready_rx) = oneshot::channel();
    let shutdown_signal = async {
        let _ = signal::ctrl_c().await;
        info!("Received shutdown signal");
    };

    // Spawn the server in its own task
    let spawn_task = tokio::spawn(async move {
        let server_future = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(shutdown_signal);

        // Notify that the server has reached the listening stage
        let _ = ready_tx.send(());

        server_future.await
    });

    if let Ok(()) = ready_rx.await {
        info!("Server is listening on http://{address}/");
    }

    spawn_task
        .await
        .map_err(|err| AppError::Server(err.to_string()))??;

    Ok(())
}
