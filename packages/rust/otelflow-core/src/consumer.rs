//! The consumer seam between pipeline stages.
//!
//! A stage never knows what sits downstream of it, only that the next stage
//! accepts batches of one signal kind. The four per-signal traits here are
//! that seam; connectors, processors, and exporters all implement or accept
//! them.
//!
//! [`NopConsumer`] and [`Sink`] ship with the library rather than behind
//! `cfg(test)`: wiring code uses the former as a default destination and
//! every crate in the workspace asserts against the latter.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use thiserror::Error;

use crate::component::BoxError;
use crate::pdata::{Logs, Metrics, Profiles, Traces};

/// Failure of a consumer to accept a batch.
///
/// `permanent` marks failures that cannot succeed on retry, so retrying
/// stages drop the batch instead of re-queueing it.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct ConsumeError {
    permanent: bool,
    #[source]
    source: BoxError,
}

impl ConsumeError {
    /// A retryable failure.
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            permanent: false,
            source: source.into(),
        }
    }

    /// A failure that will not succeed however often it is retried.
    pub fn permanent(source: impl Into<BoxError>) -> Self {
        Self {
            permanent: true,
            source: source.into(),
        }
    }

    pub fn is_permanent(&self) -> bool {
        self.permanent
    }
}

/// Accepts trace batches from the previous stage.
#[async_trait]
pub trait TracesConsumer: Send + Sync {
    async fn consume_traces(&self, batch: Traces) -> Result<(), ConsumeError>;
}

/// Accepts metric batches from the previous stage.
#[async_trait]
pub trait MetricsConsumer: Send + Sync {
    async fn consume_metrics(&self, batch: Metrics) -> Result<(), ConsumeError>;
}

/// Accepts log batches from the previous stage.
#[async_trait]
pub trait LogsConsumer: Send + Sync {
    async fn consume_logs(&self, batch: Logs) -> Result<(), ConsumeError>;
}

/// Accepts profile batches from the previous stage.
#[async_trait]
pub trait ProfilesConsumer: Send + Sync {
    async fn consume_profiles(&self, batch: Profiles) -> Result<(), ConsumeError>;
}

/// Accepts and discards every batch of every signal kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopConsumer;

#[async_trait]
impl TracesConsumer for NopConsumer {
    async fn consume_traces(&self, _batch: Traces) -> Result<(), ConsumeError> {
        Ok(())
    }
}

#[async_trait]
impl MetricsConsumer for NopConsumer {
    async fn consume_metrics(&self, _batch: Metrics) -> Result<(), ConsumeError> {
        Ok(())
    }
}

#[async_trait]
impl LogsConsumer for NopConsumer {
    async fn consume_logs(&self, _batch: Logs) -> Result<(), ConsumeError> {
        Ok(())
    }
}

#[async_trait]
impl ProfilesConsumer for NopConsumer {
    async fn consume_profiles(&self, _batch: Profiles) -> Result<(), ConsumeError> {
        Ok(())
    }
}

/// Records every batch it receives, for assertions at the end of a wired
/// pipeline. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct Sink {
    state: Arc<SinkState>,
}

#[derive(Debug, Default)]
struct SinkState {
    traces: Mutex<Vec<Traces>>,
    metrics: Mutex<Vec<Metrics>>,
    logs: Mutex<Vec<Logs>>,
    profiles: Mutex<Vec<Profiles>>,
}

impl Sink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace batches received so far.
    pub fn traces(&self) -> Vec<Traces> {
        self.state
            .traces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn metrics(&self) -> Vec<Metrics> {
        self.state
            .metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn logs(&self) -> Vec<Logs> {
        self.state
            .logs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn profiles(&self) -> Vec<Profiles> {
        self.state
            .profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Total spans across every received trace batch.
    pub fn span_count(&self) -> usize {
        self.traces().iter().map(Traces::span_count).sum()
    }

    pub fn metric_point_count(&self) -> usize {
        self.metrics().iter().map(Metrics::metric_point_count).sum()
    }

    pub fn log_record_count(&self) -> usize {
        self.logs().iter().map(Logs::log_record_count).sum()
    }
}

#[async_trait]
impl TracesConsumer for Sink {
    async fn consume_traces(&self, batch: Traces) -> Result<(), ConsumeError> {
        self.state
            .traces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(batch);
        Ok(())
    }
}

#[async_trait]
impl MetricsConsumer for Sink {
    async fn consume_metrics(&self, batch: Metrics) -> Result<(), ConsumeError> {
        self.state
            .metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(batch);
        Ok(())
    }
}

#[async_trait]
impl LogsConsumer for Sink {
    async fn consume_logs(&self, batch: Logs) -> Result<(), ConsumeError> {
        self.state
            .logs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(batch);
        Ok(())
    }
}

#[async_trait]
impl ProfilesConsumer for Sink {
    async fn consume_profiles(&self, batch: Profiles) -> Result<(), ConsumeError> {
        self.state
            .profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(batch);
        Ok(())
    }
}
