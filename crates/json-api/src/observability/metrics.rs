//! Prometheus metrics: HTTP traffic plus storefront order and cart counters.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const PREFIX: &str = "dazzle_json";

const LATENCY_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Order totals in paise, from 100 rupees to 1 lakh.
const ORDER_TOTAL_BUCKETS: [f64; 8] = [
    10_000.0,
    50_000.0,
    100_000.0,
    199_900.0,
    500_000.0,
    1_000_000.0,
    2_500_000.0,
    10_000_000.0,
];

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    orders_placed_total: IntCounterVec,
    order_total_paise: HistogramVec,
    cart_version_conflicts_total: IntCounter,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

fn metrics() -> Option<&'static Metrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

fn register<M>(registry: &Registry, metric: Result<M, prometheus::Error>, name: &str) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = metric
        .inspect_err(|source| error!("failed to create {name} metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(metric.clone()))
        .inspect_err(|source| error!("failed to register {name} metric: {source}"))
        .ok()?;

    Some(metric)
}

fn build_metrics() -> Option<Metrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                format!("{PREFIX}_http_requests_total"),
                "HTTP requests by method, route, status class and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
        "requests_total",
    )?;

    let request_duration_seconds = register(
        &registry,
        HistogramVec::new(
            HistogramOpts::new(
                format!("{PREFIX}_http_request_duration_seconds"),
                "HTTP request duration in seconds by method and route.",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "route"],
        ),
        "request_duration_seconds",
    )?;

    let requests_in_flight = register(
        &registry,
        IntGauge::with_opts(Opts::new(
            format!("{PREFIX}_http_requests_in_flight"),
            "HTTP requests currently being served.",
        )),
        "requests_in_flight",
    )?;

    let orders_placed_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                format!("{PREFIX}_orders_placed_total"),
                "Orders placed, by payment method. Idempotent replays are not counted.",
            ),
            &["payment_method"],
        ),
        "orders_placed_total",
    )?;

    let order_total_paise = register(
        &registry,
        HistogramVec::new(
            HistogramOpts::new(
                format!("{PREFIX}_order_total_paise"),
                "Server-computed order totals in paise, by payment method.",
            )
            .buckets(ORDER_TOTAL_BUCKETS.to_vec()),
            &["payment_method"],
        ),
        "order_total_paise",
    )?;

    let cart_version_conflicts_total = register(
        &registry,
        IntCounter::new(
            format!("{PREFIX}_cart_version_conflicts_total"),
            "Cart writes rejected because the expected version was stale.",
        ),
        "cart_version_conflicts_total",
    )?;

    Some(Metrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        orders_placed_total,
        order_total_paise,
        cart_version_conflicts_total,
    })
}

/// Holds the in-flight gauge up for the life of a request.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    gauge: Option<&'static IntGauge>,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = metrics().map(|metrics| &metrics.requests_in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self { gauge }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = self.gauge {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[
            method,
            route,
            status_class(status_code),
            status_code_label.as_str(),
        ])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count an accepted order and its total.
#[expect(
    clippy::cast_precision_loss,
    reason = "histogram buckets tolerate totals above 2^52 paise losing precision"
)]
pub(crate) fn record_order_placed(payment_method: &str, total_amount: u64) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .orders_placed_total
        .with_label_values(&[payment_method])
        .inc();

    metrics
        .order_total_paise
        .with_label_values(&[payment_method])
        .observe(total_amount as f64);
}

/// Orders counted for `payment_method` so far.
#[cfg(test)]
pub(crate) fn orders_placed_count(payment_method: &str) -> u64 {
    metrics().map_or(0, |metrics| {
        metrics
            .orders_placed_total
            .with_label_values(&[payment_method])
            .get()
    })
}

pub(crate) fn record_cart_version_conflict() {
    if let Some(metrics) = metrics() {
        metrics.cart_version_conflicts_total.inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(String::from_utf8_lossy(&encoded).into_owned());
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[test]
    fn status_codes_are_grouped_by_class() {
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(409), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }

    #[tokio::test]
    async fn metrics_endpoint_exposes_http_and_order_metrics() -> TestResult {
        observe_request("GET", "/api/products", 200, 0.042);
        observe_request("PUT", "/api/cart/{id}", 409, 0.123);
        record_order_placed("upi", 179_900);
        record_cart_version_conflict();

        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let body = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await?;

        for name in [
            "dazzle_json_http_requests_total",
            "dazzle_json_http_request_duration_seconds",
            "dazzle_json_http_requests_in_flight",
            "dazzle_json_orders_placed_total{payment_method=\"upi\"}",
            "dazzle_json_order_total_paise_bucket",
            "dazzle_json_cart_version_conflicts_total",
        ] {
            assert!(body.contains(name), "expected {name} in metrics output");
        }

        Ok(())
    }
}
