//! API Server - HTTP server for the REST API and pages

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::access::AccessController;
use crate::api::handlers::{self, AppState};
use crate::api::web;
use crate::api::Metrics;
use crate::config::Config;
use crate::session::SessionTokens;
use crate::store::AccountStore;

/// API server over an account store
pub struct ApiServer {
    state: Arc<AppState>,
    addr: String,
    public_dir: String,
}

impl ApiServer {
    /// Create a new API server from configuration
    pub fn new(config: &Config, store: Arc<AccountStore>) -> Self {
        let tokens = SessionTokens::new(
            config.auth.token_secret.clone(),
            config.auth.token_expiry_hours,
        );

        let access = AccessController::new(
            Arc::clone(&store),
            tokens.clone(),
            config.quota.free_products,
        );

        let state = Arc::new(AppState {
            store,
            access,
            tokens,
            metrics: Metrics::new(),
            billing: config.billing.clone(),
        });

        Self {
            state,
            addr: config.server.listen_addr.clone(),
            public_dir: config.server.public_dir.clone(),
        }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let api_routes = Router::new()
            .route("/register", post(handlers::register))
            .route("/login", post(handlers::login))
            .route("/generate", post(handlers::generate));

        Router::new()
            .nest("/api", api_routes)
            .route("/pay", get(web::pay_page))
            .route("/health", get(handlers::health))
            .route("/metrics", get(handlers::metrics))
            .fallback_service(ServeDir::new(&self.public_dir))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the API server
    pub async fn run(&self) -> std::io::Result<()> {
        let router = self.router();

        info!("Starting API server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
