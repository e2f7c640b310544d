//! Request logging middleware: request ids, spans, parent trace context and
//! HTTP metrics.

mod request_ids;
mod spans;

use std::time::Instant;

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::{
    Request, handler,
    http::{HeaderMap, HeaderName, StatusCode},
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Level, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use crate::extensions::REQUEST_ID_KEY;

use super::{metrics, settings};

/// Paths served without request spans or metrics.
const UNTRACED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNTRACED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let _in_flight = metrics::InFlightRequestGuard::track();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_KEY, request_id.clone());
    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let names = spans::request_span_name(&method, &path);

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        route = %names.otel_path,
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::current().parent_propagation
        && let Some(parent) = parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);

    metrics::observe_request(
        &method,
        &names.otel_path,
        status.as_u16(),
        elapsed.as_secs_f64(),
    );

    record_completion(&span, status, elapsed.as_millis());
}

fn completion_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

fn record_completion(span: &Span, status: StatusCode, duration_ms: u128) {
    let status_code = status.as_u16();

    span.record("status", status_code);
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        let level = completion_level(status);

        if level == Level::ERROR {
            error!(status = status_code, duration_ms, "request.failed");
        } else if level == Level::WARN {
            warn!(status = status_code, duration_ms, "request.rejected");
        } else {
            info!(status = status_code, duration_ms, "request.completed");
        }

        let threshold_ms = settings::current().slow_request_threshold_ms;

        if duration_ms > u128::from(threshold_ms) {
            warn!(duration_ms, threshold_ms, "request.slow");
        }
    });
}

/// W3C trace context from incoming headers, when it names a valid remote span.
fn parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| {
        let context = propagator.extract_with_context(&Context::new(), &Headers(headers));

        context
            .span()
            .span_context()
            .is_valid()
            .then_some(context)
    })
}

struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
