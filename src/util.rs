use std::time::Duration;

use opentelemetry_semantic_conventions::attribute as otel;
use tower_http::trace;
use tracing::field;

#[derive(Debug, Clone, Copy)]
pub struct OtelTrace;

impl<B> trace::MakeSpan<B> for OtelTrace {
    fn make_span(&mut self, request: &http::Request<B>) -> tracing::Span {
        use axum::extract::MatchedPath;

        let path = if let Some(matched_path) = request.extensions().get::<MatchedPath>() {
            matched_path.as_str()
        } else {
            request.uri().path()
        };

        tracing::debug_span!(
            "request",
            otel.name = format!("{} {path}", request.method()),
            otel.kind = "server",
            { otel::HTTP_REQUEST_METHOD } = %request.method(),
            { otel::HTTP_ROUTE } = request.uri().path(),
            { otel::URL_FULL } = %request.uri(),
            { otel::NETWORK_PROTOCOL_NAME } = "http",
            { otel::NETWORK_PROTOCOL_VERSION } = ?request.version(),
            { otel::OTEL_STATUS_CODE } = field::Empty,
            { otel::HTTP_RESPONSE_STATUS_CODE } = field::Empty,
        )
    }
}

impl<B> trace::OnResponse<B> for OtelTrace {
    fn on_response(self, response: &http::Response<B>, _latency: Duration, span: &tracing::Span) {
        let code = if response.status().is_success() {
            "OK"
        } else {
            "ERROR"
        };

        span.record(otel::OTEL_STATUS_CODE, code);
        span.record(otel::HTTP_RESPONSE_STATUS_CODE, response.status().as_u16());
    }
}

impl<B> trace::OnFailure<B> for OtelTrace {
    fn on_failure(&mut self, _failure_classification: B, _latency: Duration, span: &tracing::Span) {
        span.record(otel::OTEL_STATUS_CODE, "ERROR");
    }
}
