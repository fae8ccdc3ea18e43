//! Request metrics and periodic summary reporting

use crate::types::mode::PriceMode;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector for the prediction service
pub struct ServiceMetrics {
    /// Successful predictions served
    pub predictions_served: AtomicU64,
    /// Requests rejected by validation
    pub validation_rejections: AtomicU64,
    /// Predictions by market mode
    predictions_by_mode: RwLock<HashMap<String, u64>>,
    /// Predicted price distribution buckets, per mode
    estimate_buckets: RwLock<HashMap<String, [u64; 10]>>,
    /// End-to-end handling times (in microseconds)
    processing_times: RwLock<Vec<u64>>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl ServiceMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            predictions_served: AtomicU64::new(0),
            validation_rejections: AtomicU64::new(0),
            predictions_by_mode: RwLock::new(HashMap::new()),
            estimate_buckets: RwLock::new(HashMap::new()),
            processing_times: RwLock::new(Vec::with_capacity(1000)),
            start_time: Instant::now(),
        }
    }

    /// Record a served prediction
    pub fn record_prediction(&self, mode: PriceMode, price: f64, processing_time: Duration) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut by_mode) = self.predictions_by_mode.write() {
            *by_mode.entry(mode.to_string()).or_insert(0) += 1;
        }

        if let Ok(mut buckets) = self.estimate_buckets.write() {
            let distribution = buckets.entry(mode.to_string()).or_insert([0; 10]);
            distribution[estimate_bucket(mode, price)] += 1;
        }

        if let Ok(mut times) = self.processing_times.write() {
            times.push(processing_time.as_micros() as u64);
            // Keep only recent samples
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }
    }

    /// Record a request rejected by validation
    pub fn record_rejection(&self) {
        self.validation_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Get handling time statistics
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let times = match self.processing_times.read() {
            Ok(times) => times,
            Err(_) => return ProcessingStats::default(),
        };
        if times.is_empty() {
            return ProcessingStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
        }
    }

    /// Get current throughput (predictions per second)
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.predictions_served.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Get the predicted price distribution per mode
    pub fn get_estimate_distribution(&self) -> HashMap<String, [u64; 10]> {
        self.estimate_buckets
            .read()
            .map(|b| b.clone())
            .unwrap_or_default()
    }

    /// Snapshot of everything, as served on /stats
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            predictions_served: self.predictions_served.load(Ordering::Relaxed),
            validation_rejections: self.validation_rejections.load(Ordering::Relaxed),
            predictions_by_mode: self
                .predictions_by_mode
                .read()
                .map(|m| m.clone())
                .unwrap_or_default(),
            estimate_distribution: self.get_estimate_distribution(),
            throughput_per_sec: self.get_throughput(),
            processing: self.get_processing_stats(),
        }
    }

    /// Log a summary of the collected metrics
    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        info!(
            served = snapshot.predictions_served,
            rejected = snapshot.validation_rejections,
            throughput = format!("{:.2} req/s", snapshot.throughput_per_sec),
            mean_us = snapshot.processing.mean_us,
            p95_us = snapshot.processing.p95_us,
            by_mode = ?snapshot.predictions_by_mode,
            "Prediction service metrics"
        );
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Handling time statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
}

/// Serializable snapshot of the collected metrics
#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub predictions_served: u64,
    pub validation_rejections: u64,
    pub predictions_by_mode: HashMap<String, u64>,
    pub estimate_distribution: HashMap<String, [u64; 10]>,
    pub throughput_per_sec: f64,
    pub processing: ProcessingStats,
}

/// Width of one price distribution bucket, per mode. Sale prices span a
/// far wider range than monthly rents, so each mode gets its own scale.
fn bucket_width(mode: PriceMode) -> f64 {
    match mode {
        PriceMode::Sale => 200_000.0,
        PriceMode::Rent => 1_000.0,
    }
}

/// Bucket index for a predicted price; the last bucket absorbs everything
/// beyond ten widths.
fn estimate_bucket(mode: PriceMode, price: f64) -> usize {
    (price.max(0.0) / bucket_width(mode)).min(9.0) as usize
}

/// Periodic reporter that logs metric summaries
pub struct MetricsReporter {
    metrics: std::sync::Arc<ServiceMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: std::sync::Arc<ServiceMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Start the periodic reporting task
    pub async fn start(self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        loop {
            interval.tick().await;
            self.metrics.log_summary();
        }
    }
}
