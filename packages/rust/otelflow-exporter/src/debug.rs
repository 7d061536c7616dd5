//! Exporter that renders consumed batches into operator logs.
//!
//! Useful while wiring a pipeline: attach it where a real exporter will
//! eventually sit and watch batches arrive. Every consume call is
//! bracketed by the export operation recorder, so counts stay verifiable;
//! the log output itself runs through a zap-style sampler (per signal and
//! per one-second window, the first `sampling_initial` lines pass, then
//! every `sampling_thereafter`-th) to keep hot pipelines from flooding the
//! log. At `detailed` verbosity the whole batch is serialized as JSON.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use opentelemetry::Context;
use otelflow_core::component::Component;
use otelflow_core::consumer::{ConsumeError, LogsConsumer, MetricsConsumer, TracesConsumer};
use otelflow_core::pdata::{Logs, Metrics, Traces};
use serde::Deserialize;
use thiserror::Error;

use crate::obsreport::{ExporterObsReport, ObsReportSettings};
use crate::settings::ExporterSettings;

/// How much of each consumed batch is written to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Accepted by the parser for compatibility, rejected by validation.
    None,
    Basic,
    Normal,
    Detailed,
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verbosity::None => "None",
            Verbosity::Basic => "Basic",
            Verbosity::Normal => "Normal",
            Verbosity::Detailed => "Detailed",
        };
        f.write_str(name)
    }
}

/// Debug exporter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub verbosity: Verbosity,
    /// Log lines admitted per signal at the start of each sampling window.
    pub sampling_initial: u32,
    /// After the initial lines, admit every n-th; 0 drops the rest of the
    /// window.
    pub sampling_thereafter: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            sampling_initial: 2,
            sampling_thereafter: 500,
        }
    }
}

/// Rejected debug exporter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("verbosity level \"{0}\" is not supported")]
    UnsupportedVerbosity(Verbosity),
}

impl Config {
    /// Checks the constraints deserialization cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verbosity == Verbosity::None {
            return Err(ConfigError::UnsupportedVerbosity(self.verbosity));
        }
        Ok(())
    }
}

/// Window-based sampler: per tick, the first `initial` records pass, then
/// every `thereafter`-th.
struct LogSampler {
    initial: u64,
    thereafter: u64,
    tick: Duration,
    epoch: Instant,
    window: AtomicU64,
    seen: AtomicU64,
}

impl LogSampler {
    fn new(initial: u32, thereafter: u32) -> Self {
        Self::with_tick(initial, thereafter, Duration::from_secs(1))
    }

    fn with_tick(initial: u32, thereafter: u32, tick: Duration) -> Self {
        Self {
            initial: initial.into(),
            thereafter: thereafter.into(),
            tick,
            epoch: Instant::now(),
            window: AtomicU64::new(0),
            seen: AtomicU64::new(0),
        }
    }

    fn admit(&self) -> bool {
        let now = (self.epoch.elapsed().as_nanos() / self.tick.as_nanos().max(1)) as u64;
        let current = self.window.load(Ordering::Relaxed);
        if now != current
            && self
                .window
                .compare_exchange(current, now, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
        {
            self.seen.store(0, Ordering::Relaxed);
        }
        let n = self.seen.fetch_add(1, Ordering::Relaxed) + 1;
        if n <= self.initial {
            return true;
        }
        if self.thereafter == 0 {
            return false;
        }
        (n - self.initial) % self.thereafter == 0
    }
}

/// Logs every consumed batch, instrumented through the export operation
/// recorder.
pub struct DebugExporter {
    verbosity: Verbosity,
    obs_report: ExporterObsReport,
    traces_sampler: LogSampler,
    metrics_sampler: LogSampler,
    logs_sampler: LogSampler,
}

impl DebugExporter {
    /// Validates `config` and builds the exporter.
    pub fn new(config: Config, settings: &ExporterSettings) -> Result<Self, ConfigError> {
        config.validate()?;
        let obs_settings = ObsReportSettings::builder()
            .exporter_id(settings.id.clone())
            .telemetry(settings.telemetry.clone())
            .build();
        Ok(Self {
            verbosity: config.verbosity,
            obs_report: ExporterObsReport::new(&obs_settings),
            traces_sampler: LogSampler::new(config.sampling_initial, config.sampling_thereafter),
            metrics_sampler: LogSampler::new(config.sampling_initial, config.sampling_thereafter),
            logs_sampler: LogSampler::new(config.sampling_initial, config.sampling_thereafter),
        })
    }

    /// The recorder carrying this exporter's cumulative totals.
    pub fn obs_report(&self) -> &ExporterObsReport {
        &self.obs_report
    }
}

impl Component for DebugExporter {}

#[async_trait]
impl TracesConsumer for DebugExporter {
    async fn consume_traces(&self, batch: Traces) -> Result<(), ConsumeError> {
        let op = self.obs_report.start_traces_op(&Context::current());
        let count = batch.span_count();

        if self.traces_sampler.admit() {
            tracing::info!(
                resource_spans = batch.resource_spans.len(),
                spans = count,
                "TracesExporter"
            );
            if self.verbosity == Verbosity::Detailed {
                match serde_json::to_string(&batch.resource_spans) {
                    Ok(rendered) => tracing::info!(batch = %rendered, "ResourceSpans"),
                    Err(err) => {
                        self.obs_report.end_traces_op(&op, count, Some(&err));
                        return Err(ConsumeError::permanent(err));
                    }
                }
            }
        }

        self.obs_report.end_traces_op(&op, count, None);
        Ok(())
    }
}

#[async_trait]
impl MetricsConsumer for DebugExporter {
    async fn consume_metrics(&self, batch: Metrics) -> Result<(), ConsumeError> {
        let op = self.obs_report.start_metrics_op(&Context::current());
        let count = batch.metric_point_count();

        if self.metrics_sampler.admit() {
            tracing::info!(
                resource_metrics = batch.resource_metrics.len(),
                data_points = count,
                "MetricsExporter"
            );
            if self.verbosity == Verbosity::Detailed {
                match serde_json::to_string(&batch.resource_metrics) {
                    Ok(rendered) => tracing::info!(batch = %rendered, "ResourceMetrics"),
                    Err(err) => {
                        self.obs_report.end_metrics_op(&op, count, Some(&err));
                        return Err(ConsumeError::permanent(err));
                    }
                }
            }
        }

        self.obs_report.end_metrics_op(&op, count, None);
        Ok(())
    }
}

#[async_trait]
impl LogsConsumer for DebugExporter {
    async fn consume_logs(&self, batch: Logs) -> Result<(), ConsumeError> {
        let op = self.obs_report.start_logs_op(&Context::current());
        let count = batch.log_record_count();

        if self.logs_sampler.admit() {
            tracing::info!(
                resource_logs = batch.resource_logs.len(),
                log_records = count,
                "LogsExporter"
            );
            if self.verbosity == Verbosity::Detailed {
                match serde_json::to_string(&batch.resource_logs) {
                    Ok(rendered) => tracing::info!(batch = %rendered, "ResourceLogs"),
                    Err(err) => {
                        self.obs_report.end_logs_op(&op, count, Some(&err));
                        return Err(ConsumeError::permanent(err));
                    }
                }
            }
        }

        self.obs_report.end_logs_op(&op, count, None);
        Ok(())
    }
}
