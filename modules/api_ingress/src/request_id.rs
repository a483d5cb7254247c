use std::time::Duration;

use axum::http::{HeaderName, Request, Response};
use axum::{body::Body, middleware::Next};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::request_id::{MakeRequestId, RequestId};
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

/// Request id of the current request, stored in request extensions.
#[derive(Clone, Debug)]
pub struct XRequestId(pub String);

pub fn header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

fn header_value<B>(req: &Request<B>) -> Option<&str> {
    req.headers().get(header()).and_then(|v| v.to_str().ok())
}

#[derive(Clone, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _req: &Request<B>) -> Option<RequestId> {
        let id = nanoid::nanoid!();
        Some(RequestId::new(id.parse().ok()?))
    }
}

/// Stores the request id in extensions and records it on the current span.
pub async fn push_req_id_to_extensions(mut req: Request<Body>, next: Next) -> Response<Body> {
    let rid = header_value(&req).unwrap_or("n/a").to_owned();

    tracing::Span::current().record("request_id", tracing::field::display(&rid));
    req.extensions_mut().insert(XRequestId(rid));

    next.run(req).await
}

fn make_span(req: &Request<Body>) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        uri = %req.uri().path(),
        version = ?req.version(),
        module = "api_ingress",
        request_id = %header_value(req).unwrap_or("n/a"),
        status = Empty,
        latency_ms = Empty
    )
}

fn on_response(resp: &Response<Body>, latency: Duration, span: &tracing::Span) {
    span.record("status", resp.status().as_u16());
    span.record("latency_ms", latency.as_millis() as u64);
    tracing::debug!(parent: span, status = resp.status().as_u16(), "request finished");
}

/// Trace layer producing one `http_request` span per request.
#[allow(clippy::type_complexity)]
pub fn create_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    fn(&Request<Body>) -> tracing::Span,
    tower_http::trace::DefaultOnRequest,
    fn(&Response<Body>, Duration, &tracing::Span),
> {
    TraceLayer::new_for_http()
        .make_span_with(make_span as fn(&Request<Body>) -> tracing::Span)
        .on_response(on_response as fn(&Response<Body>, Duration, &tracing::Span))
}
