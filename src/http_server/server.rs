//! # HTTP Server
//!
//! Combines the resource routers into one axum application.
//!
//! Route table (fixed at construction):
//!
//! | Verb | Path | Operation |
//! |---|---|---|
//! | GET | `/beers` | list beers (`?name=`, `?style=`) |
//! | POST | `/beers` | create beer |
//! | GET, PUT, PATCH, DELETE | `/beers/:id` | get, replace, patch, delete beer |
//! | GET | `/customers` | list customers (`?name=`) |
//! | POST | `/customers` | create customer |
//! | GET, PUT, PATCH, DELETE | `/customers/:id` | get, replace, patch, delete customer |
//! | GET | `/health` | health check |

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::service::{BeerService, CustomerService};

use super::beer_routes::beer_routes;
use super::config::HttpServerConfig;
use super::customer_routes::customer_routes;
use super::health_routes::health_routes;

/// HTTP server for the beer and customer API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given services
    pub fn new(config: HttpServerConfig, beers: BeerService, customers: CustomerService) -> Self {
        let router = Self::build_router(&config, beers, customers);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(
        config: &HttpServerConfig,
        beers: BeerService,
        customers: CustomerService,
    ) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(beer_routes(beers))
            .merge(customer_routes(customers))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until the process receives Ctrl-C.
    ///
    /// Dropping a connection drops its in-flight request future, abandoning
    /// any pending store call for that request.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        tracing::info!(addr = %listener.local_addr()?, "HTTP server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
