//! Short-link service entry point
//!
//! Loads environment configuration, opens the service's key-value
//! store, and serves the short-link routes with graceful shutdown.

use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use shortclip::shortener::{create_app, AppState};
use shortclip::store::KvStore;
use shortclip::shutdown_signal;

/// # Environment Variables
///
/// - `PORT` - Server port number (default: 8080)
/// - `DATABASE_URL` - Path to the store's database file (default: "shortener.db")
/// - `HOST_URL` - Base URL used to build absolute short links
///   (default: "http://localhost:{PORT}")
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("shortclip=debug,shortener=debug,tower_http=debug")
        .init();

    let port_str = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let port: u16 = port_str.parse().unwrap_or(8080);

    let db_path = env::var("DATABASE_URL").unwrap_or_else(|_| "shortener.db".to_string());
    let base_url =
        env::var("HOST_URL").unwrap_or_else(|_| format!("http://localhost:{}", port));

    let store = KvStore::open(&db_path).expect("Failed to open key-value store");

    let state = AppState {
        store: Arc::new(store),
        base_url,
    };

    let app = create_app(state).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    println!("🚀 Short-link service running at http://localhost:{}", port);
    println!("📂 Using database: {}", db_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}
