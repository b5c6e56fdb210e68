//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the subscription handler
//! - Wire up middleware (tracing, request ID, CORS headers)
//! - Bind server to listener and serve until shutdown
//! - Dispatch pre-flight vs. aggregation requests
//! - Map any pipeline failure to the fixed error envelope

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, Method},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::config::AggregatorConfig;
use crate::fetch::{FetchError, Fetcher, HttpFetcher};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::{self, CORS_HEADERS};
use crate::observability::metrics;
use crate::pipeline::Aggregator;

/// Application state injected into handlers.
pub struct AppState<F> {
    pub aggregator: Arc<Aggregator<F>>,
    pub request_timeout: Duration,
    pub cache_max_age_secs: u64,
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            aggregator: self.aggregator.clone(),
            request_timeout: self.request_timeout,
            cache_max_age_secs: self.cache_max_age_secs,
        }
    }
}

/// HTTP server for the subscription endpoint.
pub struct HttpServer {
    router: Router,
    config: Arc<AggregatorConfig>,
}

impl HttpServer {
    /// Create a server that fetches sources over HTTP.
    pub fn new(config: AggregatorConfig) -> Result<Self, FetchError> {
        Ok(Self::with_fetcher(config, HttpFetcher::new()?))
    }

    /// Create a server around any fetch capability.
    pub fn with_fetcher<F: Fetcher + 'static>(config: AggregatorConfig, fetcher: F) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            aggregator: Arc::new(Aggregator::new(fetcher, config.clone())),
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
            cache_max_age_secs: config.subscription.cache_max_age_secs,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router<F: Fetcher + 'static>(state: AppState<F>) -> Router {
        let [origin, methods, headers] = CORS_HEADERS
            .map(|(name, value)| SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value)));

        Router::new()
            .route("/", any(subscription_handler::<F>))
            .route("/{*path}", any(subscription_handler::<F>))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(origin)
                    .layer(methods)
                    .layer(headers),
            )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Pre-flight for `OPTIONS`, aggregation for every other method.
async fn subscription_handler<F: Fetcher + 'static>(
    State(state): State<AppState<F>>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers).to_string();

    if method == Method::OPTIONS {
        tracing::debug!(request_id = %request_id, "Pre-flight request");
        metrics::record_request("preflight", 204, start);
        return response::preflight_response();
    }

    tracing::debug!(request_id = %request_id, method = %method, "Building subscription");

    match tokio::time::timeout(state.request_timeout, state.aggregator.build_document()).await {
        Ok(Ok(document)) => {
            metrics::record_request("ok", 200, start);
            response::subscription_response(document, state.cache_max_age_secs)
        }
        Ok(Err(e)) => {
            tracing::error!(request_id = %request_id, error = %e, "Subscription generation failed");
            metrics::record_request("error", 500, start);
            response::error_response()
        }
        Err(_) => {
            tracing::error!(
                request_id = %request_id,
                timeout_secs = state.request_timeout.as_secs(),
                "Subscription generation timed out"
            );
            metrics::record_request("timeout", 500, start);
            response::error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::fetch::testing::StaticFetcher;
    use crate::http::response::ERROR_BODY;

    const SOURCE: &str = "https://raw.githubusercontent.com/u/r/main/vless.txt";

    fn server(fetcher: StaticFetcher) -> HttpServer {
        HttpServer::with_fetcher(AggregatorConfig::default(), fetcher)
    }

    fn healthy() -> StaticFetcher {
        StaticFetcher::new()
            .with(AggregatorConfig::default().index.url, SOURCE)
            .with(SOURCE, "vless://abc@host:443?x=1#old")
    }

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    async fn call(router: Router, method: Method, uri: &str) -> Response {
        router
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_document() {
        let response = call(server(healthy()).router(), Method::GET, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=3600");
        assert!(response.headers().contains_key(crate::http::X_REQUEST_ID));

        let body = body_text(response).await;
        assert!(body.contains("\nvless://abc@host:443?x=1#SHΞN™ 🏳️\n<script>"));
    }

    #[tokio::test]
    async fn test_any_method_and_path_aggregates() {
        let response = call(server(healthy()).router(), Method::POST, "/sub/anything").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_options_is_preflight() {
        let fetcher = healthy();
        let router = server(fetcher).router();
        let response = call(router, Method::OPTIONS, "/").await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_cors(&response);
        assert!(body_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_index_failure_is_error_envelope() {
        let fetcher = StaticFetcher::new().failing(AggregatorConfig::default().index.url, 503);
        let response = call(server(fetcher).router(), Method::GET, "/").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        assert_eq!(body_text(response).await, ERROR_BODY);
    }

    #[tokio::test]
    async fn test_incoming_request_id_is_echoed() {
        let response = server(healthy())
            .router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(crate::http::X_REQUEST_ID, "req-7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[crate::http::X_REQUEST_ID], "req-7");
    }
}
