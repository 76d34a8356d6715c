use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    requests: IntCounterVec,
    upstream_seconds: HistogramVec,
}

/// Label values for `agent_proxy_requests_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Fallback,
    ValidationError,
    PayloadTooLarge,
    ConfigurationError,
    UpstreamError,
    Preflight,
    MethodNotAllowed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Fallback => "fallback",
            Outcome::ValidationError => "validation_error",
            Outcome::PayloadTooLarge => "payload_too_large",
            Outcome::ConfigurationError => "configuration_error",
            Outcome::UpstreamError => "upstream_error",
            Outcome::Preflight => "preflight",
            Outcome::MethodNotAllowed => "method_not_allowed",
        }
    }
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("agent_proxy_requests_total", "Proxy requests by outcome"),
            &["outcome"],
        )?;
        let upstream_seconds = HistogramVec::new(
            HistogramOpts::new(
                "agent_proxy_upstream_seconds",
                "Latency of Agent Engine calls",
            ),
            &["status"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(upstream_seconds.clone()))?;

        Ok(Self { registry, requests, upstream_seconds })
    }

    pub fn record(&self, outcome: Outcome) {
        self.requests.with_label_values(&[outcome.as_str()]).inc();
    }

    pub fn observe_upstream(&self, succeeded: bool, seconds: f64) {
        let status = if succeeded { "ok" } else { "error" };
        self.upstream_seconds.with_label_values(&[status]).observe(seconds);
    }

    pub fn request_count(&self, outcome: Outcome) -> u64 {
        self.requests.with_label_values(&[outcome.as_str()]).get()
    }

    /// Prometheus text exposition.
    pub fn render(&self) -> prometheus::Result<(Vec<u8>, String)> {
        let encoder = TextEncoder::new();
        let mut buffer = vec![];
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok((buffer, encoder.format_type().to_string()))
    }
}
