mod backend;
mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::backend::Backend;
use crate::backend::memory::MemoryBackend;
use crate::backend::rest::RestBackend;
use crate::config::{BackendConfig, ServerConfig};

fn build_backend(config: &BackendConfig) -> Arc<dyn Backend> {
    match config {
        BackendConfig::Rest(rest) => {
            let backend = RestBackend::new(rest).expect("backend HTTP client init failed");
            tracing::info!(url = %rest.url, "using hosted backend");
            Arc::new(backend)
        }
        BackendConfig::Memory { users } => {
            let backend = users
                .iter()
                .fold(MemoryBackend::new(), |b, u| b.with_user(&u.email, &u.password, u.full_name.as_deref()));
            tracing::warn!(seed_users = users.len(), "BACKEND_URL not set, using in-memory backend");
            Arc::new(backend)
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().expect("invalid configuration");
    let state = state::AppState::new(build_backend(&config.backend));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "trip planner listening");
    axum::serve(listener, app).await.expect("server failed");
}
