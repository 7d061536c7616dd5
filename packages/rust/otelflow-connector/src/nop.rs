//! A connector that forwards same-signal batches and discards the rest.
//!
//! [`NopConnector`] is the simplest possible bridge: each of its four
//! consumption edges either hands the batch to a destination of the same
//! signal kind or drops it. One instance backs every cell of
//! [`nop_factory`], which is how wiring tests exercise a builder without
//! dragging in a real component.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use otelflow_core::component::{Component, ComponentId, ComponentType};
use otelflow_core::consumer::{
    ConsumeError, LogsConsumer, MetricsConsumer, ProfilesConsumer, TracesConsumer,
};
use otelflow_core::pdata::{Logs, Metrics, Profiles, Traces};

use crate::builder::BuildError;
use crate::factory::{
    ConnectorFactory, ConnectorSettings, LogsConnector, MetricsConnector, ProfilesConnector,
    Stability, TracesConnector,
};

/// Forwards batches to a same-signal destination when one is attached,
/// otherwise accepts and drops them.
#[derive(Default)]
pub struct NopConnector {
    traces_next: Option<Arc<dyn TracesConsumer>>,
    metrics_next: Option<Arc<dyn MetricsConsumer>>,
    logs_next: Option<Arc<dyn LogsConsumer>>,
    profiles_next: Option<Arc<dyn ProfilesConsumer>>,
}

impl NopConnector {
    pub fn with_traces_next(next: Arc<dyn TracesConsumer>) -> Self {
        Self {
            traces_next: Some(next),
            ..Self::default()
        }
    }

    pub fn with_metrics_next(next: Arc<dyn MetricsConsumer>) -> Self {
        Self {
            metrics_next: Some(next),
            ..Self::default()
        }
    }

    pub fn with_logs_next(next: Arc<dyn LogsConsumer>) -> Self {
        Self {
            logs_next: Some(next),
            ..Self::default()
        }
    }

    pub fn with_profiles_next(next: Arc<dyn ProfilesConsumer>) -> Self {
        Self {
            profiles_next: Some(next),
            ..Self::default()
        }
    }
}

impl Component for NopConnector {}

#[async_trait]
impl TracesConsumer for NopConnector {
    async fn consume_traces(&self, batch: Traces) -> Result<(), ConsumeError> {
        match &self.traces_next {
            Some(next) => next.consume_traces(batch).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MetricsConsumer for NopConnector {
    async fn consume_metrics(&self, batch: Metrics) -> Result<(), ConsumeError> {
        match &self.metrics_next {
            Some(next) => next.consume_metrics(batch).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LogsConsumer for NopConnector {
    async fn consume_logs(&self, batch: Logs) -> Result<(), ConsumeError> {
        match &self.logs_next {
            Some(next) => next.consume_logs(batch).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProfilesConsumer for NopConnector {
    async fn consume_profiles(&self, batch: Profiles) -> Result<(), ConsumeError> {
        match &self.profiles_next {
            Some(next) => next.consume_profiles(batch).await,
            None => Ok(()),
        }
    }
}

fn require<T>(next: Option<T>) -> Result<T, BuildError> {
    next.ok_or(BuildError::NilConsumer)
}

fn empty_config() -> serde_json::Value {
    serde_json::json!({})
}

fn create_traces_to_traces(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn TracesConsumer>>,
) -> Result<Arc<dyn TracesConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_traces_next(require(next)?)))
}

fn create_traces_to_metrics(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn MetricsConsumer>>,
) -> Result<Arc<dyn TracesConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_metrics_next(require(next)?)))
}

fn create_traces_to_logs(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn LogsConsumer>>,
) -> Result<Arc<dyn TracesConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_logs_next(require(next)?)))
}

fn create_traces_to_profiles(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn ProfilesConsumer>>,
) -> Result<Arc<dyn TracesConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_profiles_next(require(next)?)))
}

fn create_metrics_to_traces(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn TracesConsumer>>,
) -> Result<Arc<dyn MetricsConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_traces_next(require(next)?)))
}

fn create_metrics_to_metrics(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn MetricsConsumer>>,
) -> Result<Arc<dyn MetricsConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_metrics_next(require(next)?)))
}

fn create_metrics_to_logs(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn LogsConsumer>>,
) -> Result<Arc<dyn MetricsConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_logs_next(require(next)?)))
}

fn create_metrics_to_profiles(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn ProfilesConsumer>>,
) -> Result<Arc<dyn MetricsConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_profiles_next(require(next)?)))
}

fn create_logs_to_traces(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn TracesConsumer>>,
) -> Result<Arc<dyn LogsConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_traces_next(require(next)?)))
}

fn create_logs_to_metrics(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn MetricsConsumer>>,
) -> Result<Arc<dyn LogsConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_metrics_next(require(next)?)))
}

fn create_logs_to_logs(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn LogsConsumer>>,
) -> Result<Arc<dyn LogsConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_logs_next(require(next)?)))
}

fn create_logs_to_profiles(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn ProfilesConsumer>>,
) -> Result<Arc<dyn LogsConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_profiles_next(require(next)?)))
}

fn create_profiles_to_traces(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn TracesConsumer>>,
) -> Result<Arc<dyn ProfilesConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_traces_next(require(next)?)))
}

fn create_profiles_to_metrics(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn MetricsConsumer>>,
) -> Result<Arc<dyn ProfilesConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_metrics_next(require(next)?)))
}

fn create_profiles_to_logs(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn LogsConsumer>>,
) -> Result<Arc<dyn ProfilesConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_logs_next(require(next)?)))
}

fn create_profiles_to_profiles(
    _settings: ConnectorSettings,
    _config: &serde_json::Value,
    next: Option<Arc<dyn ProfilesConsumer>>,
) -> Result<Arc<dyn ProfilesConnector>, BuildError> {
    Ok(Arc::new(NopConnector::with_profiles_next(require(next)?)))
}

/// A fully populated factory for `ty`, with every cell backed by
/// [`NopConnector`] at the given stability.
pub(crate) fn full_factory(ty: ComponentType, stability: Stability) -> ConnectorFactory {
    ConnectorFactory::new(ty, Some(empty_config))
        .with_traces_to_traces(create_traces_to_traces, stability)
        .with_traces_to_metrics(create_traces_to_metrics, stability)
        .with_traces_to_logs(create_traces_to_logs, stability)
        .with_traces_to_profiles(create_traces_to_profiles, stability)
        .with_metrics_to_traces(create_metrics_to_traces, stability)
        .with_metrics_to_metrics(create_metrics_to_metrics, stability)
        .with_metrics_to_logs(create_metrics_to_logs, stability)
        .with_metrics_to_profiles(create_metrics_to_profiles, stability)
        .with_logs_to_traces(create_logs_to_traces, stability)
        .with_logs_to_metrics(create_logs_to_metrics, stability)
        .with_logs_to_logs(create_logs_to_logs, stability)
        .with_logs_to_profiles(create_logs_to_profiles, stability)
        .with_profiles_to_traces(create_profiles_to_traces, stability)
        .with_profiles_to_metrics(create_profiles_to_metrics, stability)
        .with_profiles_to_logs(create_profiles_to_logs, stability)
        .with_profiles_to_profiles(create_profiles_to_profiles, stability)
}

/// Component type of the no-op connector.
pub fn nop_type() -> ComponentType {
    ComponentType::new("nop").expect("static component type")
}

/// A factory supporting every signal pair with [`NopConnector`] instances.
pub fn nop_factory() -> ConnectorFactory {
    full_factory(nop_type(), Stability::Development)
}

/// Configuration and factory tables holding one `nop/conn` instance, ready
/// to hand to a builder.
pub fn nop_connector_configs_and_factories() -> (
    HashMap<ComponentId, serde_json::Value>,
    HashMap<ComponentType, ConnectorFactory>,
) {
    let id = ComponentId::with_name(nop_type(), "conn");
    let configs = HashMap::from([(id, empty_config())]);
    let mut factories = HashMap::new();
    factories.insert(nop_type(), nop_factory());
    (configs, factories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use otelflow_core::consumer::{NopConsumer, Sink};
    use otelflow_core::signal::SignalType;

    use bytes::Bytes;
    use opentelemetry_proto::tonic::logs::v1::{LogRecord, ResourceLogs, ScopeLogs};
    use opentelemetry_proto::tonic::metrics::v1::{
        metric, Gauge, Metric, NumberDataPoint, ResourceMetrics, ScopeMetrics,
    };
    use opentelemetry_proto::tonic::trace::v1::{ResourceSpans, ScopeSpans, Span};

    fn sample_traces() -> Traces {
        Traces {
            resource_spans: vec![ResourceSpans {
                scope_spans: vec![ScopeSpans {
                    spans: vec![Span::default(), Span::default()],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        }
    }

    fn sample_metrics() -> Metrics {
        Metrics {
            resource_metrics: vec![ResourceMetrics {
                scope_metrics: vec![ScopeMetrics {
                    metrics: vec![Metric {
                        data: Some(metric::Data::Gauge(Gauge {
                            data_points: vec![NumberDataPoint::default(); 3],
                        })),
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        }
    }

    fn sample_logs() -> Logs {
        Logs {
            resource_logs: vec![ResourceLogs {
                scope_logs: vec![ScopeLogs {
                    log_records: vec![LogRecord::default()],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        }
    }

    fn sample_profiles() -> Profiles {
        Profiles {
            payload: Bytes::from_static(b"pprof"),
            sample_count: 4,
        }
    }

    #[test]
    fn nop_factory_covers_every_pair() {
        let factory = nop_factory();
        assert_eq!(factory.component_type().as_str(), "nop");
        for from in SignalType::ALL {
            for to in SignalType::ALL {
                assert_eq!(
                    factory.stability(from, to),
                    Some(Stability::Development),
                    "{from}->{to}"
                );
            }
        }
    }

    #[test]
    fn nop_factory_builds_every_pair() {
        let factory = nop_factory();
        let settings = || {
            ConnectorSettings::builder()
                .id(ComponentId::new(nop_type()))
                .build()
        };
        macro_rules! check {
            ($method:ident) => {
                let built = factory.$method(
                    settings(),
                    &serde_json::json!({}),
                    Some(Arc::new(NopConsumer)),
                );
                assert!(built.is_ok(), "{}", stringify!($method));
            };
        }
        check!(create_traces_to_traces);
        check!(create_traces_to_metrics);
        check!(create_traces_to_logs);
        check!(create_traces_to_profiles);
        check!(create_metrics_to_traces);
        check!(create_metrics_to_metrics);
        check!(create_metrics_to_logs);
        check!(create_metrics_to_profiles);
        check!(create_logs_to_traces);
        check!(create_logs_to_metrics);
        check!(create_logs_to_logs);
        check!(create_logs_to_profiles);
        check!(create_profiles_to_traces);
        check!(create_profiles_to_metrics);
        check!(create_profiles_to_logs);
        check!(create_profiles_to_profiles);
    }

    #[tokio::test]
    async fn same_signal_batches_are_forwarded_unchanged() {
        let sink = Sink::new();

        let connector = NopConnector::with_traces_next(Arc::new(sink.clone()));
        connector.consume_traces(sample_traces()).await.unwrap();
        assert_eq!(sink.traces(), vec![sample_traces()]);
        assert_eq!(sink.span_count(), 2);

        let connector = NopConnector::with_metrics_next(Arc::new(sink.clone()));
        connector.consume_metrics(sample_metrics()).await.unwrap();
        assert_eq!(sink.metrics(), vec![sample_metrics()]);
        assert_eq!(sink.metric_point_count(), 3);

        let connector = NopConnector::with_logs_next(Arc::new(sink.clone()));
        connector.consume_logs(sample_logs()).await.unwrap();
        assert_eq!(sink.logs(), vec![sample_logs()]);
        assert_eq!(sink.log_record_count(), 1);

        let connector = NopConnector::with_profiles_next(Arc::new(sink.clone()));
        connector.consume_profiles(sample_profiles()).await.unwrap();
        assert_eq!(sink.profiles(), vec![sample_profiles()]);
    }

    #[tokio::test]
    async fn cross_signal_batches_are_discarded() {
        let sink = Sink::new();

        // Only the metrics edge has a destination attached.
        let connector = NopConnector::with_metrics_next(Arc::new(sink.clone()));
        connector.consume_traces(sample_traces()).await.unwrap();
        connector.consume_logs(sample_logs()).await.unwrap();
        connector.consume_profiles(sample_profiles()).await.unwrap();

        assert!(sink.traces().is_empty());
        assert!(sink.logs().is_empty());
        assert!(sink.profiles().is_empty());
        assert!(sink.metrics().is_empty());
    }

    #[tokio::test]
    async fn lifecycle_hooks_are_noops() {
        let connector = NopConnector::default();
        assert!(connector.start().await.is_ok());
        assert!(connector.shutdown().await.is_ok());
    }

    #[test]
    fn prewired_tables_target_the_named_instance() {
        let (configs, factories) = nop_connector_configs_and_factories();
        let id: ComponentId = "nop/conn".parse().unwrap();
        assert!(configs.contains_key(&id));
        assert!(factories.contains_key(id.component_type()));
    }
}
