//! Router builder for the catalog HTTP server

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    routing::MethodRouter,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::Uuid;

use crate::error::AppError;

/// Scripts may only come from the site itself and the two CDNs its pages use.
const CONTENT_SECURITY_POLICY: &str =
    "default-src 'self'; script-src 'self' code.jquery.com cdn.jsdelivr.net; style-src 'self' 'unsafe-inline' cdn.jsdelivr.net";

/// Request ID generator producing time-ordered UUIDs
#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let request_id = Uuid::now_v7().to_string().parse::<HeaderValue>().ok()?;
        Some(RequestId::new(request_id))
    }
}

/// Builder for constructing the main HTTP router
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Merge a module's router. Module routes carry absolute paths.
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        tracing::debug!(module = module_name, "merging module router");
        self.router = self.router.merge(module_router);
        self
    }

    /// Render unmatched paths as the 404 error page
    pub fn with_not_found_fallback(mut self) -> Self {
        self.router = self
            .router
            .fallback(|| async { AppError::not_found("Not Found") });
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add request ID middleware; the id is echoed back on the response
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Compress response bodies when the client accepts gzip
    pub fn with_compression(mut self) -> Self {
        self.router = self.router.layer(CompressionLayer::new());
        self
    }

    /// Add the Content-Security-Policy header to every response
    pub fn with_security_headers(mut self) -> Self {
        self.router = self
            .router
            .layer(SetResponseHeaderLayer::if_not_present(
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static(CONTENT_SECURITY_POLICY),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ));
        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
