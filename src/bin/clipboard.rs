//! Clipboard service entry point
//!
//! Same shape as the short-link binary, minus the base URL: the
//! clipboard never builds absolute links.

use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use shortclip::clipboard::{create_app, AppState};
use shortclip::store::KvStore;
use shortclip::shutdown_signal;

/// # Environment Variables
///
/// - `PORT` - Server port number (default: 8081)
/// - `DATABASE_URL` - Path to the store's database file (default: "clipboard.db")
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("shortclip=debug,clipboard=debug,tower_http=debug")
        .init();

    let port_str = env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let port: u16 = port_str.parse().unwrap_or(8081);

    let db_path = env::var("DATABASE_URL").unwrap_or_else(|_| "clipboard.db".to_string());

    let store = KvStore::open(&db_path).expect("Failed to open key-value store");

    let state = AppState {
        store: Arc::new(store),
    };

    let app = create_app(state).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    println!("🚀 Clipboard service running at http://localhost:{}", port);
    println!("📂 Using database: {}", db_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}
