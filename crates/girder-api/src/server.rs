//! API server implementation.
//!
//! Hosts the HTTP and gRPC gateways over one shared catalogue. The two
//! listeners run as independent tasks on the same runtime: HTTP drains
//! in-flight requests on shutdown, the gRPC task is dropped without drain.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use girder_core::catalog::Catalog;
use girder_core::{Error, Result};

use crate::config::{Config, CorsConfig};
use crate::error::ApiError;
use crate::stock_client::{StockClient, StockLookup};

// ============================================================================
// Health and Root Responses
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Number of beams currently in the catalogue.
    pub beam_count: usize,
    /// Configured HTTP port.
    pub http_port: u16,
    /// Configured gRPC port.
    pub grpc_port: u16,
}

/// Service descriptor served at the root path.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ServiceInfo {
    /// Service name.
    pub name: String,
    /// Crate version.
    pub version: String,
    /// Available HTTP endpoints.
    pub endpoints: Vec<String>,
    /// Configured HTTP port.
    pub http_port: u16,
    /// Configured gRPC port.
    pub grpc_port: u16,
}

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    /// The shared beam catalogue.
    pub catalog: Arc<Catalog>,
    /// Outbound stock-lookup collaborator.
    pub stock: Arc<dyn StockLookup>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .field("stock", &"<StockLookup>")
            .finish()
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Health check endpoint handler.
///
/// Shallow liveness check; the beam count doubles as a smoke signal that the
/// store is readable.
async fn health(State(state): State<Arc<AppState>>) -> std::result::Result<Json<HealthResponse>, ApiError> {
    let beam_count = state.catalog.len()?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        beam_count,
        http_port: state.config.http_port,
        grpc_port: state.config.grpc_port,
    }))
}

/// Root endpoint handler. Returns a service descriptor.
async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ServiceInfo {
        name: "girder".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec![
            "GET /beams".to_string(),
            "GET /beams/:designation".to_string(),
            "POST /beams".to_string(),
            "PUT /beams/:designation".to_string(),
            "DELETE /beams/:designation".to_string(),
            "GET /stock".to_string(),
            "GET /health".to_string(),
            "GET /openapi.json".to_string(),
        ],
        http_port: state.config.http_port,
        grpc_port: state.config.grpc_port,
    })
}

/// Serves the generated `OpenAPI` spec.
async fn openapi_json() -> impl IntoResponse {
    Json(crate::openapi::openapi())
}

// ============================================================================
// Server
// ============================================================================

/// The Girder API server.
///
/// Serves both the HTTP and gRPC gateways over one shared catalogue.
pub struct Server {
    config: Config,
    catalog: Arc<Catalog>,
    stock: Arc<dyn StockLookup>,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .field("stock", &"<StockLookup>")
            .finish()
    }
}

impl Server {
    /// Creates a new server with the given configuration.
    ///
    /// Seeds the catalogue with the standard sections and wires the
    /// production stock client at the configured endpoint.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let stock: Arc<dyn StockLookup> = Arc::new(StockClient::new(config.stock_url.clone()));
        Self {
            config,
            catalog: Arc::new(Catalog::with_standard_sections()),
            stock,
        }
    }

    /// Creates a new `ServerBuilder`.
    #[must_use]
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Returns the server configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Creates the router with all routes and middleware.
    fn create_router(&self) -> Router {
        let state = Arc::new(AppState {
            config: self.config.clone(),
            catalog: Arc::clone(&self.catalog),
            stock: Arc::clone(&self.stock),
        });

        let cors = self.build_cors_layer();

        Router::new()
            .route("/", get(root))
            .route("/health", get(health))
            .route("/openapi.json", get(openapi_json))
            .merge(crate::routes::api_routes())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Builds the CORS layer from configuration.
    fn build_cors_layer(&self) -> CorsLayer {
        let cors_config = &self.config.cors;
        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::HEAD,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(Duration::from_secs(cors_config.max_age_seconds));

        Self::apply_cors_allowed_origins(cors, cors_config)
    }

    fn apply_cors_allowed_origins(cors: CorsLayer, cors_config: &CorsConfig) -> CorsLayer {
        if cors_config.allowed_origins.is_empty() {
            return cors;
        }

        if cors_config.allowed_origins.len() == 1
            && cors_config
                .allowed_origins
                .first()
                .is_some_and(|origin| origin == "*")
        {
            return cors.allow_origin(Any);
        }

        if cors_config
            .allowed_origins
            .iter()
            .any(|origin| origin == "*")
        {
            tracing::error!(
                origins = ?cors_config.allowed_origins,
                "invalid CORS config: '*' must be the only allowed origin"
            );
            return cors;
        }

        let allowed: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::error!(origin = %origin, "invalid CORS origin; skipping");
                    None
                }
            })
            .collect();

        if allowed.is_empty() {
            tracing::warn!("all configured CORS origins were invalid; CORS disabled");
            cors
        } else {
            tracing::info!(origins = ?cors_config.allowed_origins, "CORS configured");
            cors.allow_origin(AllowOrigin::list(allowed))
        }
    }

    /// Starts both gateways and blocks until shutdown.
    ///
    /// The HTTP listener is bound first; a bind failure on either port is
    /// fatal. On SIGINT/SIGTERM the HTTP gateway drains in-flight requests
    /// while the gRPC task is simply dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if either listener cannot bind or a transport fails.
    pub async fn serve(&self) -> Result<()> {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.config.http_port));
        let router = self.create_router();

        tracing::info!(
            http_port = self.config.http_port,
            grpc_port = self.config.grpc_port,
            "starting Girder API server"
        );

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::internal(format!("failed to bind to {addr}: {e}")))?;

        let grpc_task = tokio::spawn(crate::grpc::serve(
            self.config.grpc_port,
            Arc::clone(&self.catalog),
            Arc::clone(&self.stock),
        ));

        let http = axum::serve(listener, router).with_graceful_shutdown(shutdown_signal());

        tokio::select! {
            result = http => {
                result.map_err(|e| Error::internal(format!("http server error: {e}")))?;
                tracing::info!("http server stopped; dropping gRPC listener");
            }
            result = grpc_task => {
                match result {
                    Ok(Ok(())) => {
                        return Err(Error::internal("gRPC server stopped unexpectedly"));
                    }
                    Ok(Err(e)) => {
                        return Err(Error::internal(format!("gRPC server error: {e}")));
                    }
                    Err(e) => {
                        return Err(Error::internal(format!("gRPC task panicked: {e}")));
                    }
                }
            }
        }

        Ok(())
    }

    /// Creates a test router for the server.
    ///
    /// Useful for integration tests that drive routes without binding a port.
    #[doc(hidden)]
    #[must_use]
    pub fn test_router(&self) -> Router {
        self.create_router()
    }
}

/// Resolves when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received; draining http connections");
}

/// Builder for constructing a server.
pub struct ServerBuilder {
    config: Config,
    catalog: Option<Arc<Catalog>>,
    stock: Option<Arc<dyn StockLookup>>,
}

impl std::fmt::Debug for ServerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerBuilder")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .field("stock", &self.stock.is_some())
            .finish()
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
            catalog: None,
            stock: None,
        }
    }
}

impl ServerBuilder {
    /// Creates a new server builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the full configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the HTTP port.
    #[must_use]
    pub fn http_port(mut self, port: u16) -> Self {
        self.config.http_port = port;
        self
    }

    /// Sets the gRPC port.
    #[must_use]
    pub fn grpc_port(mut self, port: u16) -> Self {
        self.config.grpc_port = port;
        self
    }

    /// Enables debug mode (pretty logs).
    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    /// Sets the catalogue instance.
    ///
    /// Defaults to the standard seeded catalogue.
    #[must_use]
    pub fn catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Sets the stock-lookup collaborator.
    ///
    /// Defaults to the production client at the configured endpoint; tests
    /// inject a stub here.
    #[must_use]
    pub fn stock_lookup(mut self, stock: Arc<dyn StockLookup>) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Builds the server.
    #[must_use]
    pub fn build(self) -> Server {
        let stock = self
            .stock
            .unwrap_or_else(|| Arc::new(StockClient::new(self.config.stock_url.clone())));
        Server {
            catalog: self
                .catalog
                .unwrap_or_else(|| Arc::new(Catalog::with_standard_sections())),
            config: self.config,
            stock,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_endpoint_reports_seed_count() -> Result<()> {
        let server = ServerBuilder::new().build();
        let router = server.test_router();

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .context("build request")?;

        let response = router.oneshot(request).await.map_err(|err| -> anyhow::Error { match err {} })?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .context("read response body")?;
        let health: HealthResponse = serde_json::from_slice(&body).context("parse JSON body")?;
        assert_eq!(health.status, "ok");
        assert_eq!(health.beam_count, 2);
        Ok(())
    }

    #[tokio::test]
    async fn root_endpoint_lists_routes() -> Result<()> {
        let server = ServerBuilder::new().build();
        let router = server.test_router();

        let request = Request::builder()
            .uri("/")
            .body(Body::empty())
            .context("build request")?;

        let response = router.oneshot(request).await.map_err(|err| -> anyhow::Error { match err {} })?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .context("read response body")?;
        let info: ServiceInfo = serde_json::from_slice(&body).context("parse JSON body")?;
        assert_eq!(info.name, "girder");
        assert!(info.endpoints.iter().any(|e| e == "GET /beams"));
        Ok(())
    }

    #[tokio::test]
    async fn openapi_endpoint_serves_spec() -> Result<()> {
        let server = ServerBuilder::new().build();
        let router = server.test_router();

        let request = Request::builder()
            .uri("/openapi.json")
            .body(Body::empty())
            .context("build request")?;

        let response = router.oneshot(request).await.map_err(|err| -> anyhow::Error { match err {} })?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .context("read response body")?;
        let spec: serde_json::Value = serde_json::from_slice(&body).context("parse JSON body")?;
        assert!(spec.get("paths").is_some());
        Ok(())
    }
}
