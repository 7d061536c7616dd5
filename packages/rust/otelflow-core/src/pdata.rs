//! In-memory telemetry batches.
//!
//! Stages hand each other the resource-level OTLP messages from
//! [`opentelemetry-proto`], wrapped per signal so the item-count helpers the
//! rest of the toolkit relies on (span counts in export instrumentation,
//! batch summaries in the debug exporter) live in one place. Nothing here
//! owns an encoding: how batches cross a wire is a transport concern.
//!
//! [`opentelemetry-proto`]: https://docs.rs/opentelemetry-proto

use bytes::Bytes;
use opentelemetry_proto::tonic::logs::v1::ResourceLogs;
use opentelemetry_proto::tonic::metrics::v1::{metric, ResourceMetrics};
use opentelemetry_proto::tonic::trace::v1::ResourceSpans;

/// A batch of spans, grouped by resource and scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Traces {
    pub resource_spans: Vec<ResourceSpans>,
}

impl Traces {
    /// Number of spans across every resource and scope in the batch.
    pub fn span_count(&self) -> usize {
        self.resource_spans
            .iter()
            .flat_map(|rs| rs.scope_spans.iter())
            .map(|ss| ss.spans.len())
            .sum()
    }
}

/// A batch of metrics, grouped by resource and scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    pub resource_metrics: Vec<ResourceMetrics>,
}

impl Metrics {
    /// Number of data points across every metric in the batch, regardless
    /// of the metric's data case.
    pub fn metric_point_count(&self) -> usize {
        self.resource_metrics
            .iter()
            .flat_map(|rm| rm.scope_metrics.iter())
            .flat_map(|sm| sm.metrics.iter())
            .map(|m| match &m.data {
                Some(metric::Data::Gauge(gauge)) => gauge.data_points.len(),
                Some(metric::Data::Sum(sum)) => sum.data_points.len(),
                Some(metric::Data::Histogram(histogram)) => histogram.data_points.len(),
                Some(metric::Data::ExponentialHistogram(histogram)) => histogram.data_points.len(),
                Some(metric::Data::Summary(summary)) => summary.data_points.len(),
                None => 0,
            })
            .sum()
    }
}

/// A batch of log records, grouped by resource and scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Logs {
    pub resource_logs: Vec<ResourceLogs>,
}

impl Logs {
    /// Number of log records across every resource and scope in the batch.
    pub fn log_record_count(&self) -> usize {
        self.resource_logs
            .iter()
            .flat_map(|rl| rl.scope_logs.iter())
            .map(|sl| sl.log_records.len())
            .sum()
    }
}

/// A batch of profiling samples.
///
/// The pinned protocol crate ships no stable profiles message, so the
/// payload travels as pre-encoded bytes next to its sample count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profiles {
    pub payload: Bytes,
    pub sample_count: usize,
}
