//! Export operation instrumentation.
//!
//! An exporter wraps each send attempt in an operation: a span named
//! `exporter/{identity}/{signal}` opened before the attempt and closed
//! after it, with the item count recorded on exactly one side of a
//! sent/failed split. The same split feeds otel counters and cumulative
//! totals owned by the recorder itself, so a harness can verify counts
//! with [`ExporterObsReport::check_exporter_traces`] and its siblings
//! without reading metrics back out of an SDK.
//!
//! One recorder lives per exporter instance, for the exporter's lifetime.
//! Start and end calls are safe under concurrency; every operation context
//! must see exactly one end call.

use std::sync::atomic::{AtomicU64, Ordering};

use bon::Builder;
use opentelemetry::metrics::Counter;
use opentelemetry::trace::{Status, TraceContextExt, Tracer as _};
use opentelemetry::{Context, InstrumentationScope, KeyValue};
use opentelemetry_sdk::trace::Tracer;
use otelflow_core::component::ComponentId;
use otelflow_core::telemetry::TelemetrySettings;
use thiserror::Error;

/// What the recorder needs to know about its exporter.
#[derive(Debug, Clone, Builder)]
pub struct ObsReportSettings {
    /// Identity of the instrumented exporter, rendered into span names and
    /// counter attributes.
    pub exporter_id: ComponentId,
    /// Telemetry wiring the spans and counters are created from.
    #[builder(default)]
    pub telemetry: TelemetrySettings,
}

/// A cumulative total diverged from its expected value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CounterCheckError {
    #[error("{items} sent total mismatch: expected {expected}, recorded {actual}")]
    Sent {
        items: &'static str,
        expected: u64,
        actual: u64,
    },
    #[error("{items} send-failed total mismatch: expected {expected}, recorded {actual}")]
    Failed {
        items: &'static str,
        expected: u64,
        actual: u64,
    },
}

struct SignalInstruments {
    span_name: String,
    items: &'static str,
    sent_key: &'static str,
    failed_key: &'static str,
    sent: Counter<u64>,
    failed: Counter<u64>,
    sent_total: AtomicU64,
    failed_total: AtomicU64,
}

impl SignalInstruments {
    fn check(&self, sent: u64, failed: u64) -> Result<(), CounterCheckError> {
        let actual = self.sent_total.load(Ordering::Relaxed);
        if actual != sent {
            return Err(CounterCheckError::Sent {
                items: self.items,
                expected: sent,
                actual,
            });
        }
        let actual = self.failed_total.load(Ordering::Relaxed);
        if actual != failed {
            return Err(CounterCheckError::Failed {
                items: self.items,
                expected: failed,
                actual,
            });
        }
        Ok(())
    }
}

/// Records export operations for one exporter instance.
pub struct ExporterObsReport {
    identity: String,
    tracer: Tracer,
    traces: SignalInstruments,
    metrics: SignalInstruments,
    logs: SignalInstruments,
}

impl ExporterObsReport {
    pub fn new(settings: &ObsReportSettings) -> Self {
        let identity = settings.exporter_id.to_string();
        let scope = InstrumentationScope::builder(env!("CARGO_PKG_NAME"))
            .with_version(env!("CARGO_PKG_VERSION"))
            .build();
        let tracer = settings.telemetry.tracer_with_scope(scope);
        let meter = settings.telemetry.meter(env!("CARGO_PKG_NAME"));

        let traces = SignalInstruments {
            span_name: format!("exporter/{identity}/traces"),
            items: "spans",
            sent_key: "sent_spans",
            failed_key: "failed_to_send_spans",
            sent: meter
                .u64_counter("otelflow_exporter_sent_spans")
                .with_description("Number of spans successfully sent to destination.")
                .with_unit("{spans}")
                .build(),
            failed: meter
                .u64_counter("otelflow_exporter_send_failed_spans")
                .with_description("Number of spans in failed attempts to send to destination.")
                .with_unit("{spans}")
                .build(),
            sent_total: AtomicU64::new(0),
            failed_total: AtomicU64::new(0),
        };
        let metrics = SignalInstruments {
            span_name: format!("exporter/{identity}/metrics"),
            items: "metric points",
            sent_key: "sent_metric_points",
            failed_key: "failed_to_send_metric_points",
            sent: meter
                .u64_counter("otelflow_exporter_sent_metric_points")
                .with_description("Number of metric points successfully sent to destination.")
                .with_unit("{datapoints}")
                .build(),
            failed: meter
                .u64_counter("otelflow_exporter_send_failed_metric_points")
                .with_description(
                    "Number of metric points in failed attempts to send to destination.",
                )
                .with_unit("{datapoints}")
                .build(),
            sent_total: AtomicU64::new(0),
            failed_total: AtomicU64::new(0),
        };
        let logs = SignalInstruments {
            span_name: format!("exporter/{identity}/logs"),
            items: "log records",
            sent_key: "sent_log_records",
            failed_key: "failed_to_send_log_records",
            sent: meter
                .u64_counter("otelflow_exporter_sent_log_records")
                .with_description("Number of log records successfully sent to destination.")
                .with_unit("{records}")
                .build(),
            failed: meter
                .u64_counter("otelflow_exporter_send_failed_log_records")
                .with_description(
                    "Number of log records in failed attempts to send to destination.",
                )
                .with_unit("{records}")
                .build(),
            sent_total: AtomicU64::new(0),
            failed_total: AtomicU64::new(0),
        };

        Self {
            identity,
            tracer,
            traces,
            metrics,
            logs,
        }
    }

    /// Opens the span bracketing one traces send attempt, as a child of
    /// `parent`. The returned context must see exactly one matching end
    /// call.
    pub fn start_traces_op(&self, parent: &Context) -> Context {
        self.start_op(parent, &self.traces)
    }

    /// Closes a traces operation, attributing `count` items to the sent
    /// side, or entirely to the failed side when `err` is present.
    pub fn end_traces_op(
        &self,
        op_cx: &Context,
        count: usize,
        err: Option<&dyn std::error::Error>,
    ) {
        self.end_op(op_cx, &self.traces, count, err);
    }

    pub fn start_metrics_op(&self, parent: &Context) -> Context {
        self.start_op(parent, &self.metrics)
    }

    pub fn end_metrics_op(
        &self,
        op_cx: &Context,
        count: usize,
        err: Option<&dyn std::error::Error>,
    ) {
        self.end_op(op_cx, &self.metrics, count, err);
    }

    pub fn start_logs_op(&self, parent: &Context) -> Context {
        self.start_op(parent, &self.logs)
    }

    pub fn end_logs_op(&self, op_cx: &Context, count: usize, err: Option<&dyn std::error::Error>) {
        self.end_op(op_cx, &self.logs, count, err);
    }

    /// Verifies the cumulative traces totals match `sent` and `failed`
    /// exactly. Read-only.
    pub fn check_exporter_traces(&self, sent: u64, failed: u64) -> Result<(), CounterCheckError> {
        self.traces.check(sent, failed)
    }

    pub fn check_exporter_metrics(&self, sent: u64, failed: u64) -> Result<(), CounterCheckError> {
        self.metrics.check(sent, failed)
    }

    pub fn check_exporter_logs(&self, sent: u64, failed: u64) -> Result<(), CounterCheckError> {
        self.logs.check(sent, failed)
    }

    fn start_op(&self, parent: &Context, signal: &SignalInstruments) -> Context {
        let span = self
            .tracer
            .span_builder(signal.span_name.clone())
            .start_with_context(&self.tracer, parent);
        parent.with_span(span)
    }

    fn end_op(
        &self,
        op_cx: &Context,
        signal: &SignalInstruments,
        count: usize,
        err: Option<&dyn std::error::Error>,
    ) {
        let count = count as u64;
        let (sent, failed) = if err.is_some() { (0, count) } else { (count, 0) };

        signal.sent_total.fetch_add(sent, Ordering::Relaxed);
        signal.failed_total.fetch_add(failed, Ordering::Relaxed);
        let exporter = [KeyValue::new("exporter", self.identity.clone())];
        signal.sent.add(sent, &exporter);
        signal.failed.add(failed, &exporter);

        let span = op_cx.span();
        span.set_attribute(KeyValue::new(signal.sent_key, sent as i64));
        span.set_attribute(KeyValue::new(signal.failed_key, failed as i64));
        if let Some(err) = err {
            span.set_status(Status::error(err.to_string()));
        }
        span.end();
    }
}
