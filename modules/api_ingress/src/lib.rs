//! HTTP host: wraps module routers with the shared middleware stack, adds the
//! health and documentation endpoints and serves the result until cancelled.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::header;
use axum::response::IntoResponse;
use axum::{middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

/// Handler timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Maximum accepted request body size.
pub const BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Wrap `api` (the module routes) into the served router.
    ///
    /// Middleware, outermost first:
    /// SetRequestId -> PropagateRequestId -> BodyLimit -> CORS -> Timeout -> Trace -> push_req_id_to_extensions
    pub fn build_router(&self, api: Router, openapi: Option<utoipa::openapi::OpenApi>) -> Result<Router> {
        let mut router = api
            .route("/health", get(web::health_check))
            .fallback(web::route_not_found);

        if self.config.enable_docs {
            if let Some(doc) = openapi {
                let doc = Arc::new(serde_json::to_value(doc).context("Failed to serialize OpenAPI")?);
                router = router
                    .route(
                        "/openapi.json",
                        get(move || {
                            let doc = doc.clone();
                            async move {
                                ([(header::CACHE_CONTROL, "no-store")], axum::Json((*doc).clone()))
                                    .into_response()
                            }
                        }),
                    )
                    .route("/docs", get(web::serve_docs));
            }
        }

        let x_request_id = request_id::header();

        // Router::layer wraps what was added before, so the list below runs
        // from innermost to outermost.
        router = router
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        router = router
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        tracing::debug!(
            docs = self.config.enable_docs,
            cors = self.config.cors_enabled,
            "HTTP router built"
        );
        Ok(router)
    }

    /// Bind `addr` and serve `router` until `cancel` fires.
    pub async fn serve(&self, addr: &str, router: Router, cancel: CancellationToken) -> Result<()> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", addr, e))?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        tracing::info!("HTTP server bound on {}", addr);
        serve_listener(listener, router, cancel).await
    }
}

/// Serve on an already bound listener; graceful shutdown on cancel.
pub async fn serve_listener(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> Result<()> {
    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
