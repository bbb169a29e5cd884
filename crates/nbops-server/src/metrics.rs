//! Prometheus metrics, kept as atomics and rendered in text exposition format.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;

/// Upper bounds (seconds) of the prediction latency histogram buckets.
pub const LATENCY_BUCKETS: [f64; 8] = [0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0];

/// Upper bounds (seconds) of the per-route HTTP duration histogram buckets.
pub const HTTP_DURATION_BUCKETS: [f64; 3] = [0.1, 0.5, 1.0];

/// Label used for requests that matched no route.
pub const UNMATCHED_HANDLER: &str = "none";

#[derive(Debug, Default, Clone)]
struct HttpHistogram {
    /// Cumulative counts per bucket, `HTTP_DURATION_BUCKETS` order.
    buckets: [u64; HTTP_DURATION_BUCKETS.len()],
    count: u64,
    sum: f64,
}

/// Service-level metrics shared by every handler.
#[derive(Debug)]
pub struct ServiceMetrics {
    predictions_total: DashMap<String, u64>,
    prediction_errors_total: AtomicU64,
    /// Cumulative counts per bucket, `LATENCY_BUCKETS` order.
    latency_buckets: [AtomicU64; LATENCY_BUCKETS.len()],
    latency_count: AtomicU64,
    latency_sum_micros: AtomicU64,
    /// `f64` bits.
    drift_score: AtomicU64,
    /// `f64` bits.
    model_accuracy: AtomicU64,
    /// `(handler, method, status class)`.
    http_requests_total: DashMap<(String, String, String), u64>,
    /// `(handler, method)`.
    http_request_duration: DashMap<(String, String), HttpHistogram>,
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self {
            predictions_total: DashMap::new(),
            prediction_errors_total: AtomicU64::new(0),
            latency_buckets: Default::default(),
            latency_count: AtomicU64::new(0),
            latency_sum_micros: AtomicU64::new(0),
            drift_score: AtomicU64::new(0f64.to_bits()),
            model_accuracy: AtomicU64::new(0f64.to_bits()),
            http_requests_total: DashMap::new(),
            http_request_duration: DashMap::new(),
        }
    }
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `count` predictions served by `model_version`.
    pub fn record_predictions(&self, model_version: &str, count: usize) {
        *self
            .predictions_total
            .entry(model_version.to_string())
            .or_insert(0) += count as u64;
    }

    pub fn record_prediction_error(&self) {
        self.prediction_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Observe one prediction request's latency, successful or not.
    pub fn observe_latency(&self, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        for (bound, bucket) in LATENCY_BUCKETS.iter().zip(&self.latency_buckets) {
            if secs <= *bound {
                bucket.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.latency_count.fetch_add(1, Ordering::Relaxed);
        self.latency_sum_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn set_drift_score(&self, score: f64) {
        self.drift_score.store(score.to_bits(), Ordering::Relaxed);
    }

    pub fn drift_score(&self) -> f64 {
        f64::from_bits(self.drift_score.load(Ordering::Relaxed))
    }

    pub fn set_model_accuracy(&self, accuracy: f64) {
        self.model_accuracy.store(accuracy.to_bits(), Ordering::Relaxed);
    }

    pub fn predictions_total(&self, model_version: &str) -> u64 {
        self.predictions_total
            .get(model_version)
            .map(|v| *v)
            .unwrap_or(0)
    }

    pub fn prediction_errors_total(&self) -> u64 {
        self.prediction_errors_total.load(Ordering::Relaxed)
    }

    /// Record one served HTTP request. `handler` is the matched route
    /// template, statuses are grouped by class (`2xx`, `4xx`, ...).
    pub fn observe_http_request(&self, handler: &str, method: &str, status: u16, elapsed: Duration) {
        *self
            .http_requests_total
            .entry((handler.to_string(), method.to_string(), status_class(status)))
            .or_insert(0) += 1;

        let secs = elapsed.as_secs_f64();
        let mut histogram = self
            .http_request_duration
            .entry((handler.to_string(), method.to_string()))
            .or_default();
        for (bound, bucket) in HTTP_DURATION_BUCKETS.iter().zip(histogram.buckets.iter_mut()) {
            if secs <= *bound {
                *bucket += 1;
            }
        }
        histogram.count += 1;
        histogram.sum += secs;
    }

    pub fn http_requests_total(&self, handler: &str, method: &str, status_class: &str) -> u64 {
        self.http_requests_total
            .get(&(handler.to_string(), method.to_string(), status_class.to_string()))
            .map(|v| *v)
            .unwrap_or(0)
    }

    /// Text exposition format 0.0.4.
    pub fn prometheus_output(&self) -> String {
        let mut out = String::with_capacity(2048);

        out.push_str("# HELP model_predictions_total Total number of predictions made\n");
        out.push_str("# TYPE model_predictions_total counter\n");
        let mut versions: Vec<(String, u64)> = self
            .predictions_total
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect();
        versions.sort();
        for (version, total) in versions {
            let _ = writeln!(
                out,
                "model_predictions_total{{model_version=\"{}\"}} {total}",
                escape_label(&version)
            );
        }

        let _ = write!(
            out,
            "\n# HELP model_prediction_errors_total Total number of prediction errors\n\
             # TYPE model_prediction_errors_total counter\n\
             model_prediction_errors_total {}\n",
            self.prediction_errors_total()
        );

        out.push_str("\n# HELP model_prediction_latency_seconds Prediction latency in seconds\n");
        out.push_str("# TYPE model_prediction_latency_seconds histogram\n");
        for (bound, bucket) in LATENCY_BUCKETS.iter().zip(&self.latency_buckets) {
            let _ = writeln!(
                out,
                "model_prediction_latency_seconds_bucket{{le=\"{bound}\"}} {}",
                bucket.load(Ordering::Relaxed)
            );
        }
        let count = self.latency_count.load(Ordering::Relaxed);
        let sum = self.latency_sum_micros.load(Ordering::Relaxed) as f64 / 1e6;
        let _ = writeln!(out, "model_prediction_latency_seconds_bucket{{le=\"+Inf\"}} {count}");
        let _ = writeln!(out, "model_prediction_latency_seconds_sum {sum}");
        let _ = writeln!(out, "model_prediction_latency_seconds_count {count}");

        let _ = write!(
            out,
            "\n# HELP model_data_drift_score Current data drift score\n\
             # TYPE model_data_drift_score gauge\n\
             model_data_drift_score {}\n",
            self.drift_score()
        );
        let _ = write!(
            out,
            "\n# HELP model_accuracy Current model accuracy\n\
             # TYPE model_accuracy gauge\n\
             model_accuracy {}\n",
            f64::from_bits(self.model_accuracy.load(Ordering::Relaxed))
        );

        self.render_http(&mut out);
        out
    }

    fn render_http(&self, out: &mut String) {
        out.push_str("\n# HELP http_requests_total Total number of requests by method, status and handler.\n");
        out.push_str("# TYPE http_requests_total counter\n");
        let mut requests: Vec<((String, String, String), u64)> = self
            .http_requests_total
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect();
        requests.sort();
        for ((handler, method, status), total) in requests {
            let _ = writeln!(
                out,
                "http_requests_total{{handler=\"{}\",method=\"{method}\",status=\"{status}\"}} {total}",
                escape_label(&handler)
            );
        }

        out.push_str("\n# HELP http_request_duration_seconds Duration of HTTP requests in seconds\n");
        out.push_str("# TYPE http_request_duration_seconds histogram\n");
        let mut durations: Vec<((String, String), HttpHistogram)> = self
            .http_request_duration
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        durations.sort_by(|a, b| a.0.cmp(&b.0));
        for ((handler, method), histogram) in durations {
            let labels = format!("handler=\"{}\",method=\"{method}\"", escape_label(&handler));
            for (bound, count) in HTTP_DURATION_BUCKETS.iter().zip(histogram.buckets) {
                let _ = writeln!(
                    out,
                    "http_request_duration_seconds_bucket{{{labels},le=\"{bound}\"}} {count}"
                );
            }
            let _ = writeln!(
                out,
                "http_request_duration_seconds_bucket{{{labels},le=\"+Inf\"}} {}",
                histogram.count
            );
            let _ = writeln!(out, "http_request_duration_seconds_sum{{{labels}}} {}", histogram.sum);
            let _ = writeln!(out, "http_request_duration_seconds_count{{{labels}}} {}", histogram.count);
        }
    }
}

fn status_class(status: u16) -> String {
    format!("{}xx", status / 100)
}

fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
