use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    itineraries_total: AtomicU64,
    external_fallback_total: AtomicU64,
    chat_replies_total: AtomicU64,
    reloads_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub itineraries_total: u64,
    pub external_fallback_total: u64,
    pub chat_replies_total: u64,
    pub reloads_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_itinerary(&self, path: &'static str) {
        self.itineraries_total.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("yatra_itineraries_total", "path" => path).increment(1);
    }

    pub fn inc_external_fallback(&self) {
        self.external_fallback_total.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("yatra_external_fallback_total").increment(1);
    }

    pub fn inc_chat_reply(&self) {
        self.chat_replies_total.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("yatra_chat_replies_total").increment(1);
    }

    pub fn inc_reload(&self) {
        self.reloads_total.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("yatra_catalog_reloads_total").increment(1);
    }

    /// Latency of one itinerary generation.
    pub fn observe_latency(&self, duration: Duration) {
        let millis = duration.as_millis() as u64;
        self.total_latency_millis.fetch_add(millis, Ordering::Relaxed);
        metrics::counter!("yatra_itinerary_latency_millis_total").increment(millis);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let itineraries = self.itineraries_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            itineraries_total: itineraries,
            external_fallback_total: self.external_fallback_total.load(Ordering::Relaxed),
            chat_replies_total: self.chat_replies_total.load(Ordering::Relaxed),
            reloads_total: self.reloads_total.load(Ordering::Relaxed),
            avg_latency_millis: if itineraries == 0 {
                0.0
            } else {
                latency as f64 / itineraries as f64
            },
        }
    }
}

pub fn default_filter(service_name: &str) -> String {
    format!("{service_name}=info,yatra_agents=info,yatra_storage=info")
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(service_name)));

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_latency_over_itineraries() {
        let metrics = AppMetrics::default();
        assert_eq!(metrics.snapshot().avg_latency_millis, 0.0);

        metrics.inc_itinerary("deterministic");
        metrics.inc_itinerary("external");
        metrics.observe_latency(Duration::from_millis(30));
        metrics.observe_latency(Duration::from_millis(10));
        metrics.inc_external_fallback();
        metrics.inc_chat_reply();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.itineraries_total, 2);
        assert_eq!(snapshot.external_fallback_total, 1);
        assert_eq!(snapshot.chat_replies_total, 1);
        assert_eq!(snapshot.reloads_total, 0);
        assert_eq!(snapshot.avg_latency_millis, 20.0);
    }

    #[test]
    fn snapshot_serialises_with_field_names() {
        let metrics = AppMetrics::default();
        metrics.inc_reload();
        let value = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(value["reloads_total"], 1);
    }

    #[test]
    fn filter_names_service_and_crates() {
        assert_eq!(
            default_filter("yatra_api"),
            "yatra_api=info,yatra_agents=info,yatra_storage=info"
        );
    }

    #[test]
    fn repeated_init_is_a_no_op() {
        init_tracing("yatra_test");
        init_tracing("yatra_test");
    }
}
