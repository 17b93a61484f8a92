//! Library exports for the short-link and clipboard services
//!
//! Both binaries and the integration tests build their routers from
//! these modules.

pub mod clipboard;
pub mod error;
pub mod shortener;
pub mod store;

use tokio::signal;

/// Waits for a shutdown signal
///
/// Returns when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received, which
/// lets `axum::serve` finish in-flight requests before exiting.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("\n🛑 Shutdown signal received, stopping server.");
}
