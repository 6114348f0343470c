// Path: crates/global-state-gateway/src/metrics.rs

use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram_vec, register_int_counter, register_int_counter_vec,
    HistogramVec, IntCounter, IntCounterVec,
};
use std::time::Instant;

struct GatewayMetrics {
    requests: IntCounterVec,
    latency: HistogramVec,
    feed_items: IntCounter,
}

// `None` when registration failed (e.g. a name clash in the default registry);
// the gateway then serves without metrics.
static METRICS: OnceCell<Option<GatewayMetrics>> = OnceCell::new();

fn register() -> prometheus::Result<GatewayMetrics> {
    Ok(GatewayMetrics {
        requests: register_int_counter_vec!(
            "agora_gateway_requests_total",
            "Total global-state gateway requests",
            &["route", "result"]
        )?,
        latency: register_histogram_vec!(
            "agora_gateway_request_duration_seconds",
            "Latency of global-state gateway requests (seconds)",
            &["route", "result"],
            exponential_buckets(0.0005, 2.0, 15)?
        )?,
        feed_items: register_int_counter!(
            "agora_gateway_feed_items_returned_total",
            "Total feed items returned by the global feed"
        )?,
    })
}

fn metrics() -> Option<&'static GatewayMetrics> {
    METRICS
        .get_or_init(|| {
            register()
                .inspect_err(|e| {
                    tracing::warn!(target: "gateway", error = %e, "gateway metrics unavailable");
                })
                .ok()
        })
        .as_ref()
}

/// Registers the gateway collectors with the default registry.
pub fn install() {
    let _ = metrics();
}

/// Records one finished request.
pub fn observe(route: &str, ok: bool, started: Instant) {
    if let Some(m) = metrics() {
        let result = if ok { "ok" } else { "error" };
        m.requests.with_label_values(&[route, result]).inc();
        m.latency
            .with_label_values(&[route, result])
            .observe(started.elapsed().as_secs_f64());
    }
}

/// Counts items returned in a feed page.
pub fn feed_items_returned(n: usize) {
    if let Some(m) = metrics() {
        m.feed_items.inc_by(n as u64);
    }
}
