use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Store operation throughput (create / replace / list)
// - Store operation failures by error kind
// - Store operation latency
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the service
pub struct Metrics {
    registry: Registry,

    pub store_ops_total: IntCounterVec,
    pub store_op_failures: IntCounterVec,
    pub store_op_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let store_ops_total = IntCounterVec::new(
            Opts::new("store_ops_total", "Completed store operations"),
            &["operation"],
        )?;
        registry.register(Box::new(store_ops_total.clone()))?;

        let store_op_failures = IntCounterVec::new(
            Opts::new("store_op_failures_total", "Failed store operations"),
            &["operation", "kind"],
        )?;
        registry.register(Box::new(store_op_failures.clone()))?;

        let store_op_duration = HistogramVec::new(
            HistogramOpts::new("store_op_duration_seconds", "Store operation duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["operation"],
        )?;
        registry.register(Box::new(store_op_duration.clone()))?;

        Ok(Self {
            registry,
            store_ops_total,
            store_op_failures,
            store_op_duration,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record one store operation outcome with its duration.
    pub fn record_store_op(&self, operation: &str, duration_secs: f64, error_kind: Option<&str>) {
        match error_kind {
            None => self.store_ops_total.with_label_values(&[operation]).inc(),
            Some(kind) => self
                .store_op_failures
                .with_label_values(&[operation, kind])
                .inc(),
        }
        self.store_op_duration
            .with_label_values(&[operation])
            .observe(duration_secs);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}
