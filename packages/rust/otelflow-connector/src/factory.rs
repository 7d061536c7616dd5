//! Connector capability traits and factories.
//!
//! A connector is addressed by the pair of signal kinds it bridges: it
//! consumes one kind and feeds a consumer of another, possibly the same,
//! kind. Viewed from the pipeline, a connector is simply a component that
//! consumes its source signal, so the capability traits here are thin
//! compositions of [`Component`] with one consumer trait each.
//!
//! A [`ConnectorFactory`] describes one component type: an optional default
//! configuration and a sparse 4×4 matrix of creation functions keyed by
//! (source, destination). Cells are registered through the consuming
//! `with_*` methods and are fixed once the factory is handed to a builder;
//! each carries a [`Stability`] tag that is informational only and never
//! decides whether creation succeeds.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bon::Builder;
use otelflow_core::component::{BuildInfo, Component, ComponentId, ComponentType};
use otelflow_core::consumer::{LogsConsumer, MetricsConsumer, ProfilesConsumer, TracesConsumer};
use otelflow_core::signal::SignalType;
use otelflow_core::telemetry::TelemetrySettings;
use thiserror::Error;

use crate::builder::BuildError;

/// A connector viewed from its traces source edge.
pub trait TracesConnector: Component + TracesConsumer {}
impl<T: Component + TracesConsumer> TracesConnector for T {}

/// A connector viewed from its metrics source edge.
pub trait MetricsConnector: Component + MetricsConsumer {}
impl<T: Component + MetricsConsumer> MetricsConnector for T {}

/// A connector viewed from its logs source edge.
pub trait LogsConnector: Component + LogsConsumer {}
impl<T: Component + LogsConsumer> LogsConnector for T {}

/// A connector viewed from its profiles source edge.
pub trait ProfilesConnector: Component + ProfilesConsumer {}
impl<T: Component + ProfilesConsumer> ProfilesConnector for T {}

/// Maturity of one supported connector edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Undefined,
    Unmaintained,
    Deprecated,
    Development,
    Alpha,
    Beta,
    Stable,
}

impl Stability {
    /// One-line qualifier for build-time diagnostics.
    pub fn log_message(&self) -> &'static str {
        match self {
            Stability::Undefined => "Stability level of component is undefined",
            Stability::Unmaintained => "Unmaintained component. Actively looking for contributors",
            Stability::Deprecated => "Deprecated component. Will be removed in future releases",
            Stability::Development => "Development component. May change in the future",
            Stability::Alpha => "Alpha component. May change in the future",
            Stability::Beta => "Beta component. May change in the future",
            Stability::Stable => "Stable component",
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stability::Undefined => "Undefined",
            Stability::Unmaintained => "Unmaintained",
            Stability::Deprecated => "Deprecated",
            Stability::Development => "Development",
            Stability::Alpha => "Alpha",
            Stability::Beta => "Beta",
            Stability::Stable => "Stable",
        };
        f.write_str(name)
    }
}

/// Everything a creation function receives besides its configuration and
/// destination consumer.
#[derive(Debug, Clone, Builder)]
pub struct ConnectorSettings {
    /// Identity of the instance being created.
    pub id: ComponentId,
    /// Telemetry wiring for the connector's own instrumentation.
    #[builder(default)]
    pub telemetry: TelemetrySettings,
    /// Build metadata of the hosting binary.
    #[builder(default)]
    pub build_info: BuildInfo,
}

/// Creation function for a traces→traces connector. The other fifteen
/// aliases differ only in the destination consumer and source capability.
pub type CreateTracesToTraces = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn TracesConsumer>>,
) -> Result<Arc<dyn TracesConnector>, BuildError>;

pub type CreateTracesToMetrics = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn MetricsConsumer>>,
) -> Result<Arc<dyn TracesConnector>, BuildError>;

pub type CreateTracesToLogs = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn LogsConsumer>>,
) -> Result<Arc<dyn TracesConnector>, BuildError>;

pub type CreateTracesToProfiles = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn ProfilesConsumer>>,
) -> Result<Arc<dyn TracesConnector>, BuildError>;

pub type CreateMetricsToTraces = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn TracesConsumer>>,
) -> Result<Arc<dyn MetricsConnector>, BuildError>;

pub type CreateMetricsToMetrics = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn MetricsConsumer>>,
) -> Result<Arc<dyn MetricsConnector>, BuildError>;

pub type CreateMetricsToLogs = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn LogsConsumer>>,
) -> Result<Arc<dyn MetricsConnector>, BuildError>;

pub type CreateMetricsToProfiles = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn ProfilesConsumer>>,
) -> Result<Arc<dyn MetricsConnector>, BuildError>;

pub type CreateLogsToTraces = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn TracesConsumer>>,
) -> Result<Arc<dyn LogsConnector>, BuildError>;

pub type CreateLogsToMetrics = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn MetricsConsumer>>,
) -> Result<Arc<dyn LogsConnector>, BuildError>;

pub type CreateLogsToLogs = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn LogsConsumer>>,
) -> Result<Arc<dyn LogsConnector>, BuildError>;

pub type CreateLogsToProfiles = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn ProfilesConsumer>>,
) -> Result<Arc<dyn LogsConnector>, BuildError>;

pub type CreateProfilesToTraces = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn TracesConsumer>>,
) -> Result<Arc<dyn ProfilesConnector>, BuildError>;

pub type CreateProfilesToMetrics = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn MetricsConsumer>>,
) -> Result<Arc<dyn ProfilesConnector>, BuildError>;

pub type CreateProfilesToLogs = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn LogsConsumer>>,
) -> Result<Arc<dyn ProfilesConnector>, BuildError>;

pub type CreateProfilesToProfiles = fn(
    ConnectorSettings,
    &serde_json::Value,
    Option<Arc<dyn ProfilesConsumer>>,
) -> Result<Arc<dyn ProfilesConnector>, BuildError>;

/// Describes one connector type: its default configuration and the sparse
/// matrix of supported (source, destination) edges.
#[derive(Debug, Clone)]
pub struct ConnectorFactory {
    ty: ComponentType,
    default_config: Option<fn() -> serde_json::Value>,
    traces_to_traces: Option<(CreateTracesToTraces, Stability)>,
    traces_to_metrics: Option<(CreateTracesToMetrics, Stability)>,
    traces_to_logs: Option<(CreateTracesToLogs, Stability)>,
    traces_to_profiles: Option<(CreateTracesToProfiles, Stability)>,
    metrics_to_traces: Option<(CreateMetricsToTraces, Stability)>,
    metrics_to_metrics: Option<(CreateMetricsToMetrics, Stability)>,
    metrics_to_logs: Option<(CreateMetricsToLogs, Stability)>,
    metrics_to_profiles: Option<(CreateMetricsToProfiles, Stability)>,
    logs_to_traces: Option<(CreateLogsToTraces, Stability)>,
    logs_to_metrics: Option<(CreateLogsToMetrics, Stability)>,
    logs_to_logs: Option<(CreateLogsToLogs, Stability)>,
    logs_to_profiles: Option<(CreateLogsToProfiles, Stability)>,
    profiles_to_traces: Option<(CreateProfilesToTraces, Stability)>,
    profiles_to_metrics: Option<(CreateProfilesToMetrics, Stability)>,
    profiles_to_logs: Option<(CreateProfilesToLogs, Stability)>,
    profiles_to_profiles: Option<(CreateProfilesToProfiles, Stability)>,
}

impl ConnectorFactory {
    /// A factory for `ty` with no supported edges yet.
    ///
    /// `default_config` is absent for types that take no configuration
    /// override.
    pub fn new(ty: ComponentType, default_config: Option<fn() -> serde_json::Value>) -> Self {
        Self {
            ty,
            default_config,
            traces_to_traces: None,
            traces_to_metrics: None,
            traces_to_logs: None,
            traces_to_profiles: None,
            metrics_to_traces: None,
            metrics_to_metrics: None,
            metrics_to_logs: None,
            metrics_to_profiles: None,
            logs_to_traces: None,
            logs_to_metrics: None,
            logs_to_logs: None,
            logs_to_profiles: None,
            profiles_to_traces: None,
            profiles_to_metrics: None,
            profiles_to_logs: None,
            profiles_to_profiles: None,
        }
    }

    pub fn component_type(&self) -> &ComponentType {
        &self.ty
    }

    /// A fresh copy of the type's default configuration, if it takes one.
    pub fn default_config(&self) -> Option<serde_json::Value> {
        self.default_config.map(|create| create())
    }

    /// Registers the traces→traces edge.
    pub fn with_traces_to_traces(
        mut self,
        create: CreateTracesToTraces,
        stability: Stability,
    ) -> Self {
        self.traces_to_traces = Some((create, stability));
        self
    }

    pub fn with_traces_to_metrics(
        mut self,
        create: CreateTracesToMetrics,
        stability: Stability,
    ) -> Self {
        self.traces_to_metrics = Some((create, stability));
        self
    }

    pub fn with_traces_to_logs(mut self, create: CreateTracesToLogs, stability: Stability) -> Self {
        self.traces_to_logs = Some((create, stability));
        self
    }

    pub fn with_traces_to_profiles(
        mut self,
        create: CreateTracesToProfiles,
        stability: Stability,
    ) -> Self {
        self.traces_to_profiles = Some((create, stability));
        self
    }

    /// Registers the metrics→traces edge.
    pub fn with_metrics_to_traces(
        mut self,
        create: CreateMetricsToTraces,
        stability: Stability,
    ) -> Self {
        self.metrics_to_traces = Some((create, stability));
        self
    }

    pub fn with_metrics_to_metrics(
        mut self,
        create: CreateMetricsToMetrics,
        stability: Stability,
    ) -> Self {
        self.metrics_to_metrics = Some((create, stability));
        self
    }

    pub fn with_metrics_to_logs(
        mut self,
        create: CreateMetricsToLogs,
        stability: Stability,
    ) -> Self {
        self.metrics_to_logs = Some((create, stability));
        self
    }

    pub fn with_metrics_to_profiles(
        mut self,
        create: CreateMetricsToProfiles,
        stability: Stability,
    ) -> Self {
        self.metrics_to_profiles = Some((create, stability));
        self
    }

    /// Registers the logs→traces edge.
    pub fn with_logs_to_traces(mut self, create: CreateLogsToTraces, stability: Stability) -> Self {
        self.logs_to_traces = Some((create, stability));
        self
    }

    pub fn with_logs_to_metrics(
        mut self,
        create: CreateLogsToMetrics,
        stability: Stability,
    ) -> Self {
        self.logs_to_metrics = Some((create, stability));
        self
    }

    pub fn with_logs_to_logs(mut self, create: CreateLogsToLogs, stability: Stability) -> Self {
        self.logs_to_logs = Some((create, stability));
        self
    }

    pub fn with_logs_to_profiles(
        mut self,
        create: CreateLogsToProfiles,
        stability: Stability,
    ) -> Self {
        self.logs_to_profiles = Some((create, stability));
        self
    }

    /// Registers the profiles→traces edge.
    pub fn with_profiles_to_traces(
        mut self,
        create: CreateProfilesToTraces,
        stability: Stability,
    ) -> Self {
        self.profiles_to_traces = Some((create, stability));
        self
    }

    pub fn with_profiles_to_metrics(
        mut self,
        create: CreateProfilesToMetrics,
        stability: Stability,
    ) -> Self {
        self.profiles_to_metrics = Some((create, stability));
        self
    }

    pub fn with_profiles_to_logs(
        mut self,
        create: CreateProfilesToLogs,
        stability: Stability,
    ) -> Self {
        self.profiles_to_logs = Some((create, stability));
        self
    }

    pub fn with_profiles_to_profiles(
        mut self,
        create: CreateProfilesToProfiles,
        stability: Stability,
    ) -> Self {
        self.profiles_to_profiles = Some((create, stability));
        self
    }

    /// Whether the (source, destination) edge exists.
    pub fn supports(&self, from: SignalType, to: SignalType) -> bool {
        self.stability(from, to).is_some()
    }

    /// Stability of the (source, destination) edge, when supported.
    pub fn stability(&self, from: SignalType, to: SignalType) -> Option<Stability> {
        match (from, to) {
            (SignalType::Traces, SignalType::Traces) => self.traces_to_traces.map(|(_, s)| s),
            (SignalType::Traces, SignalType::Metrics) => self.traces_to_metrics.map(|(_, s)| s),
            (SignalType::Traces, SignalType::Logs) => self.traces_to_logs.map(|(_, s)| s),
            (SignalType::Traces, SignalType::Profiles) => self.traces_to_profiles.map(|(_, s)| s),
            (SignalType::Metrics, SignalType::Traces) => self.metrics_to_traces.map(|(_, s)| s),
            (SignalType::Metrics, SignalType::Metrics) => self.metrics_to_metrics.map(|(_, s)| s),
            (SignalType::Metrics, SignalType::Logs) => self.metrics_to_logs.map(|(_, s)| s),
            (SignalType::Metrics, SignalType::Profiles) => self.metrics_to_profiles.map(|(_, s)| s),
            (SignalType::Logs, SignalType::Traces) => self.logs_to_traces.map(|(_, s)| s),
            (SignalType::Logs, SignalType::Metrics) => self.logs_to_metrics.map(|(_, s)| s),
            (SignalType::Logs, SignalType::Logs) => self.logs_to_logs.map(|(_, s)| s),
            (SignalType::Logs, SignalType::Profiles) => self.logs_to_profiles.map(|(_, s)| s),
            (SignalType::Profiles, SignalType::Traces) => self.profiles_to_traces.map(|(_, s)| s),
            (SignalType::Profiles, SignalType::Metrics) => self.profiles_to_metrics.map(|(_, s)| s),
            (SignalType::Profiles, SignalType::Logs) => self.profiles_to_logs.map(|(_, s)| s),
            (SignalType::Profiles, SignalType::Profiles) => {
                self.profiles_to_profiles.map(|(_, s)| s)
            }
        }
    }

    /// Invokes the traces→traces creation function, or reports the edge as
    /// unsupported.
    pub fn create_traces_to_traces(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn TracesConsumer>>,
    ) -> Result<Arc<dyn TracesConnector>, BuildError> {
        match self.traces_to_traces {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Traces, SignalType::Traces)),
        }
    }

    pub fn create_traces_to_metrics(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn MetricsConsumer>>,
    ) -> Result<Arc<dyn TracesConnector>, BuildError> {
        match self.traces_to_metrics {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Traces, SignalType::Metrics)),
        }
    }

    pub fn create_traces_to_logs(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn LogsConsumer>>,
    ) -> Result<Arc<dyn TracesConnector>, BuildError> {
        match self.traces_to_logs {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Traces, SignalType::Logs)),
        }
    }

    pub fn create_traces_to_profiles(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn ProfilesConsumer>>,
    ) -> Result<Arc<dyn TracesConnector>, BuildError> {
        match self.traces_to_profiles {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Traces, SignalType::Profiles)),
        }
    }

    pub fn create_metrics_to_traces(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn TracesConsumer>>,
    ) -> Result<Arc<dyn MetricsConnector>, BuildError> {
        match self.metrics_to_traces {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Metrics, SignalType::Traces)),
        }
    }

    pub fn create_metrics_to_metrics(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn MetricsConsumer>>,
    ) -> Result<Arc<dyn MetricsConnector>, BuildError> {
        match self.metrics_to_metrics {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Metrics, SignalType::Metrics)),
        }
    }

    pub fn create_metrics_to_logs(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn LogsConsumer>>,
    ) -> Result<Arc<dyn MetricsConnector>, BuildError> {
        match self.metrics_to_logs {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Metrics, SignalType::Logs)),
        }
    }

    pub fn create_metrics_to_profiles(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn ProfilesConsumer>>,
    ) -> Result<Arc<dyn MetricsConnector>, BuildError> {
        match self.metrics_to_profiles {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Metrics, SignalType::Profiles)),
        }
    }

    pub fn create_logs_to_traces(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn TracesConsumer>>,
    ) -> Result<Arc<dyn LogsConnector>, BuildError> {
        match self.logs_to_traces {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Logs, SignalType::Traces)),
        }
    }

    pub fn create_logs_to_metrics(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn MetricsConsumer>>,
    ) -> Result<Arc<dyn LogsConnector>, BuildError> {
        match self.logs_to_metrics {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Logs, SignalType::Metrics)),
        }
    }

    pub fn create_logs_to_logs(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn LogsConsumer>>,
    ) -> Result<Arc<dyn LogsConnector>, BuildError> {
        match self.logs_to_logs {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Logs, SignalType::Logs)),
        }
    }

    pub fn create_logs_to_profiles(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn ProfilesConsumer>>,
    ) -> Result<Arc<dyn LogsConnector>, BuildError> {
        match self.logs_to_profiles {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Logs, SignalType::Profiles)),
        }
    }

    pub fn create_profiles_to_traces(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn TracesConsumer>>,
    ) -> Result<Arc<dyn ProfilesConnector>, BuildError> {
        match self.profiles_to_traces {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Profiles, SignalType::Traces)),
        }
    }

    pub fn create_profiles_to_metrics(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn MetricsConsumer>>,
    ) -> Result<Arc<dyn ProfilesConnector>, BuildError> {
        match self.profiles_to_metrics {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Profiles, SignalType::Metrics)),
        }
    }

    pub fn create_profiles_to_logs(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn LogsConsumer>>,
    ) -> Result<Arc<dyn ProfilesConnector>, BuildError> {
        match self.profiles_to_logs {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Profiles, SignalType::Logs)),
        }
    }

    pub fn create_profiles_to_profiles(
        &self,
        settings: ConnectorSettings,
        config: &serde_json::Value,
        next: Option<Arc<dyn ProfilesConsumer>>,
    ) -> Result<Arc<dyn ProfilesConnector>, BuildError> {
        match self.profiles_to_profiles {
            Some((create, _)) => create(settings, config, next),
            None => Err(self.unsupported(SignalType::Profiles, SignalType::Profiles)),
        }
    }

    fn unsupported(&self, from: SignalType, to: SignalType) -> BuildError {
        BuildError::UnsupportedSignalPair {
            ty: self.ty.clone(),
            from,
            to,
        }
    }
}

/// Two factories claimed the same component type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate connector factory \"{0}\"")]
pub struct DuplicateFactoryError(pub ComponentType);

/// Keys factories by their component type, rejecting duplicates.
pub fn make_factory_map(
    factories: impl IntoIterator<Item = ConnectorFactory>,
) -> Result<HashMap<ComponentType, ConnectorFactory>, DuplicateFactoryError> {
    let mut map = HashMap::new();
    for factory in factories {
        let ty = factory.component_type().clone();
        if map.insert(ty.clone(), factory).is_some() {
            return Err(DuplicateFactoryError(ty));
        }
    }
    Ok(map)
}
