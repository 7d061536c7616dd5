//! Configuration-driven construction of connector instances.
//!
//! The builder owns two lookup tables: raw configuration values keyed by
//! [`ComponentId`] and factories keyed by [`ComponentType`]. Every
//! `create_*` method walks the same checks in order. The identifier must be
//! configured, its type must have a factory registered, and the factory
//! must support the requested signal pair. Only then is the creation
//! function invoked; validating the destination consumer happens inside
//! that function, so a missing consumer never masks a wiring mistake the
//! earlier checks would have caught.

use std::collections::HashMap;
use std::sync::Arc;

use otelflow_core::component::{BoxError, BuildInfo, ComponentId, ComponentType};
use otelflow_core::consumer::{LogsConsumer, MetricsConsumer, ProfilesConsumer, TracesConsumer};
use otelflow_core::signal::SignalType;
use otelflow_core::telemetry::TelemetrySettings;
use thiserror::Error;

use crate::factory::{
    ConnectorFactory, ConnectorSettings, LogsConnector, MetricsConnector, ProfilesConnector,
    Stability, TracesConnector,
};

/// Why a connector could not be built.
#[derive(Debug, Error)]
pub enum BuildError {
    /// No configuration entry exists for the identifier.
    #[error("connector \"{0}\" is not configured")]
    NotConfigured(ComponentId),
    /// No factory is registered for the identifier's type.
    #[error("connector factory not available for: \"{0}\"")]
    FactoryNotAvailable(ComponentType),
    /// The factory exists but has no creation function for the pair.
    #[error(
        "connector \"{ty}\" cannot connect from {from} to {to}: telemetry type is not supported"
    )]
    UnsupportedSignalPair {
        ty: ComponentType,
        from: SignalType,
        to: SignalType,
    },
    /// The creation function requires a destination consumer and got none.
    #[error("nil next Consumer")]
    NilConsumer,
    /// The creation function itself refused, e.g. on a bad configuration.
    #[error("{0}")]
    Create(#[from] BoxError),
}

/// Builds connectors out of stored configurations and registered factories.
///
/// Cheap to clone; intended to be constructed once per pipeline assembly
/// and consulted for every connector instance the topology needs.
#[derive(Debug, Clone)]
pub struct ConnectorBuilder {
    configs: HashMap<ComponentId, serde_json::Value>,
    factories: HashMap<ComponentType, ConnectorFactory>,
    telemetry: TelemetrySettings,
    build_info: BuildInfo,
}

impl ConnectorBuilder {
    pub fn new(
        configs: HashMap<ComponentId, serde_json::Value>,
        factories: HashMap<ComponentType, ConnectorFactory>,
    ) -> Self {
        Self {
            configs,
            factories,
            telemetry: TelemetrySettings::default(),
            build_info: BuildInfo::default(),
        }
    }

    /// Replaces the telemetry wiring handed to created connectors.
    pub fn with_telemetry(mut self, telemetry: TelemetrySettings) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Replaces the build metadata handed to created connectors.
    pub fn with_build_info(mut self, build_info: BuildInfo) -> Self {
        self.build_info = build_info;
        self
    }

    /// Whether a configuration entry exists for `id`.
    pub fn is_configured(&self, id: &ComponentId) -> bool {
        self.configs.contains_key(id)
    }

    /// The factory registered for `ty`, if any.
    pub fn factory(&self, ty: &ComponentType) -> Option<&ConnectorFactory> {
        self.factories.get(ty)
    }

    fn settings(&self, id: &ComponentId) -> ConnectorSettings {
        ConnectorSettings::builder()
            .id(id.clone())
            .telemetry(self.telemetry.clone())
            .build_info(self.build_info.clone())
            .build()
    }

    fn resolve(
        &self,
        id: &ComponentId,
        from: SignalType,
        to: SignalType,
    ) -> Result<(&ConnectorFactory, &serde_json::Value), BuildError> {
        let config = self
            .configs
            .get(id)
            .ok_or_else(|| BuildError::NotConfigured(id.clone()))?;
        let factory = self
            .factories
            .get(id.component_type())
            .ok_or_else(|| BuildError::FactoryNotAvailable(id.component_type().clone()))?;
        let stability =
            factory
                .stability(from, to)
                .ok_or_else(|| BuildError::UnsupportedSignalPair {
                    ty: id.component_type().clone(),
                    from,
                    to,
                })?;
        match stability {
            Stability::Deprecated | Stability::Unmaintained => {
                tracing::warn!(connector = %id, %from, %to, "{}", stability.log_message());
            }
            _ => {
                tracing::debug!(connector = %id, %from, %to, "{}", stability.log_message());
            }
        }
        Ok((factory, config))
    }

    /// Builds the traces→traces connector for `id`, delivering into `next`.
    /// The fifteen sibling methods cover the remaining signal pairs.
    pub fn create_traces_to_traces(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn TracesConsumer>>,
    ) -> Result<Arc<dyn TracesConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Traces, SignalType::Traces)?;
        factory.create_traces_to_traces(self.settings(id), config, next)
    }

    pub fn create_traces_to_metrics(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn MetricsConsumer>>,
    ) -> Result<Arc<dyn TracesConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Traces, SignalType::Metrics)?;
        factory.create_traces_to_metrics(self.settings(id), config, next)
    }

    pub fn create_traces_to_logs(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn LogsConsumer>>,
    ) -> Result<Arc<dyn TracesConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Traces, SignalType::Logs)?;
        factory.create_traces_to_logs(self.settings(id), config, next)
    }

    pub fn create_traces_to_profiles(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn ProfilesConsumer>>,
    ) -> Result<Arc<dyn TracesConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Traces, SignalType::Profiles)?;
        factory.create_traces_to_profiles(self.settings(id), config, next)
    }

    pub fn create_metrics_to_traces(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn TracesConsumer>>,
    ) -> Result<Arc<dyn MetricsConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Metrics, SignalType::Traces)?;
        factory.create_metrics_to_traces(self.settings(id), config, next)
    }

    pub fn create_metrics_to_metrics(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn MetricsConsumer>>,
    ) -> Result<Arc<dyn MetricsConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Metrics, SignalType::Metrics)?;
        factory.create_metrics_to_metrics(self.settings(id), config, next)
    }

    pub fn create_metrics_to_logs(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn LogsConsumer>>,
    ) -> Result<Arc<dyn MetricsConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Metrics, SignalType::Logs)?;
        factory.create_metrics_to_logs(self.settings(id), config, next)
    }

    pub fn create_metrics_to_profiles(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn ProfilesConsumer>>,
    ) -> Result<Arc<dyn MetricsConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Metrics, SignalType::Profiles)?;
        factory.create_metrics_to_profiles(self.settings(id), config, next)
    }

    pub fn create_logs_to_traces(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn TracesConsumer>>,
    ) -> Result<Arc<dyn LogsConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Logs, SignalType::Traces)?;
        factory.create_logs_to_traces(self.settings(id), config, next)
    }

    pub fn create_logs_to_metrics(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn MetricsConsumer>>,
    ) -> Result<Arc<dyn LogsConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Logs, SignalType::Metrics)?;
        factory.create_logs_to_metrics(self.settings(id), config, next)
    }

    pub fn create_logs_to_logs(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn LogsConsumer>>,
    ) -> Result<Arc<dyn LogsConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Logs, SignalType::Logs)?;
        factory.create_logs_to_logs(self.settings(id), config, next)
    }

    pub fn create_logs_to_profiles(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn ProfilesConsumer>>,
    ) -> Result<Arc<dyn LogsConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Logs, SignalType::Profiles)?;
        factory.create_logs_to_profiles(self.settings(id), config, next)
    }

    pub fn create_profiles_to_traces(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn TracesConsumer>>,
    ) -> Result<Arc<dyn ProfilesConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Profiles, SignalType::Traces)?;
        factory.create_profiles_to_traces(self.settings(id), config, next)
    }

    pub fn create_profiles_to_metrics(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn MetricsConsumer>>,
    ) -> Result<Arc<dyn ProfilesConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Profiles, SignalType::Metrics)?;
        factory.create_profiles_to_metrics(self.settings(id), config, next)
    }

    pub fn create_profiles_to_logs(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn LogsConsumer>>,
    ) -> Result<Arc<dyn ProfilesConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Profiles, SignalType::Logs)?;
        factory.create_profiles_to_logs(self.settings(id), config, next)
    }

    pub fn create_profiles_to_profiles(
        &self,
        id: &ComponentId,
        next: Option<Arc<dyn ProfilesConsumer>>,
    ) -> Result<Arc<dyn ProfilesConnector>, BuildError> {
        let (factory, config) = self.resolve(id, SignalType::Profiles, SignalType::Profiles)?;
        factory.create_profiles_to_profiles(self.settings(id), config, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::make_factory_map;
    use crate::nop::{full_factory, NopConnector};
    use otelflow_core::consumer::NopConsumer;

    fn ty(s: &str) -> ComponentType {
        ComponentType::new(s).unwrap()
    }

    fn id(s: &str) -> ComponentId {
        s.parse().unwrap()
    }

    fn builder() -> ConnectorBuilder {
        let configs = HashMap::from([
            (id("all"), serde_json::json!({})),
            (id("all/named"), serde_json::json!({})),
            (id("err"), serde_json::json!({})),
            (id("unknown"), serde_json::json!({})),
        ]);
        let factories = make_factory_map([
            full_factory(ty("all"), Stability::Development),
            ConnectorFactory::new(ty("err"), None),
        ])
        .unwrap();
        ConnectorBuilder::new(configs, factories)
    }

    /// Stamps `$check!(method, from, to)` once per signal pair.
    macro_rules! for_each_pair {
        ($check:ident) => {
            $check!(create_traces_to_traces, "traces", "traces");
            $check!(create_traces_to_metrics, "traces", "metrics");
            $check!(create_traces_to_logs, "traces", "logs");
            $check!(create_traces_to_profiles, "traces", "profiles");
            $check!(create_metrics_to_traces, "metrics", "traces");
            $check!(create_metrics_to_metrics, "metrics", "metrics");
            $check!(create_metrics_to_logs, "metrics", "logs");
            $check!(create_metrics_to_profiles, "metrics", "profiles");
            $check!(create_logs_to_traces, "logs", "traces");
            $check!(create_logs_to_metrics, "logs", "metrics");
            $check!(create_logs_to_logs, "logs", "logs");
            $check!(create_logs_to_profiles, "logs", "profiles");
            $check!(create_profiles_to_traces, "profiles", "traces");
            $check!(create_profiles_to_metrics, "profiles", "metrics");
            $check!(create_profiles_to_logs, "profiles", "logs");
            $check!(create_profiles_to_profiles, "profiles", "profiles");
        };
    }

    #[test]
    fn configured_pairs_build_for_plain_and_named_ids() {
        let builder = builder();
        for name in ["all", "all/named"] {
            let target = id(name);
            macro_rules! check {
                ($method:ident, $from:expr, $to:expr) => {
                    let built = builder.$method(&target, Some(Arc::new(NopConsumer)));
                    assert!(built.is_ok(), "{} for {}", stringify!($method), name);
                };
            }
            for_each_pair!(check);
        }
    }

    #[test]
    fn missing_configuration_is_reported_first() {
        let builder = builder();
        let target = id("all/missing");
        macro_rules! check {
            ($method:ident, $from:expr, $to:expr) => {
                let err = builder
                    .$method(&target, Some(Arc::new(NopConsumer)))
                    .err()
                    .unwrap();
                assert_eq!(
                    err.to_string(),
                    "connector \"all/missing\" is not configured",
                    "{}",
                    stringify!($method)
                );
            };
        }
        for_each_pair!(check);
    }

    #[test]
    fn configured_id_without_factory_reports_the_type() {
        let builder = builder();
        let err = builder
            .create_traces_to_traces(&id("unknown"), Some(Arc::new(NopConsumer)))
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "connector factory not available for: \"unknown\""
        );
        let err = builder
            .create_logs_to_metrics(&id("unknown/sub"), Some(Arc::new(NopConsumer)))
            .err()
            .unwrap();
        assert!(matches!(err, BuildError::NotConfigured(_)));
    }

    #[test]
    fn unsupported_pairs_name_source_and_destination() {
        let builder = builder();
        let target = id("err");
        macro_rules! check {
            ($method:ident, $from:expr, $to:expr) => {
                let err = builder
                    .$method(&target, Some(Arc::new(NopConsumer)))
                    .err()
                    .unwrap();
                assert_eq!(
                    err.to_string(),
                    format!(
                        "connector \"err\" cannot connect from {} to {}: \
                         telemetry type is not supported",
                        $from, $to
                    ),
                    "{}",
                    stringify!($method)
                );
            };
        }
        for_each_pair!(check);
    }

    #[test]
    fn absent_consumer_is_rejected_by_the_creation_function() {
        let builder = builder();
        let target = id("all");
        macro_rules! check {
            ($method:ident, $from:expr, $to:expr) => {
                let err = builder.$method(&target, None).err().unwrap();
                assert_eq!(
                    err.to_string(),
                    "nil next Consumer",
                    "{}",
                    stringify!($method)
                );
            };
        }
        for_each_pair!(check);
    }

    #[test]
    fn unconfigured_id_wins_over_missing_factory() {
        let builder = builder();
        let err = builder
            .create_logs_to_logs(&id("ghost"), Some(Arc::new(NopConsumer)))
            .err()
            .unwrap();
        assert!(matches!(err, BuildError::NotConfigured(_)));
    }

    #[test]
    fn exposes_configuration_and_factory_lookups() {
        let builder = builder();
        assert!(builder.is_configured(&id("all/named")));
        assert!(!builder.is_configured(&id("all/missing")));
        assert!(builder.factory(&ty("all")).is_some());
        assert!(builder.factory(&ty("ghost")).is_none());
    }

    fn checking_traces_to_traces(
        settings: ConnectorSettings,
        config: &serde_json::Value,
        _next: Option<Arc<dyn TracesConsumer>>,
    ) -> Result<Arc<dyn TracesConnector>, BuildError> {
        if settings.id.to_string() != "cfg/one" {
            return Err(BuildError::Create("unexpected identity".into()));
        }
        match config.get("mode").and_then(serde_json::Value::as_str) {
            Some("strict") => Ok(Arc::new(NopConnector::default())),
            _ => Err(BuildError::Create("missing mode".into())),
        }
    }

    #[test]
    fn stored_config_and_identity_reach_the_creation_function() {
        let configs = HashMap::from([(id("cfg/one"), serde_json::json!({"mode": "strict"}))]);
        let factories = make_factory_map([ConnectorFactory::new(ty("cfg"), None)
            .with_traces_to_traces(checking_traces_to_traces, Stability::Alpha)])
        .unwrap();
        let builder = ConnectorBuilder::new(configs, factories);

        let built = builder.create_traces_to_traces(&id("cfg/one"), Some(Arc::new(NopConsumer)));
        assert!(built.is_ok());
    }

    fn rejecting_traces_to_traces(
        _settings: ConnectorSettings,
        _config: &serde_json::Value,
        _next: Option<Arc<dyn TracesConsumer>>,
    ) -> Result<Arc<dyn TracesConnector>, BuildError> {
        Err(BuildError::Create("connector rejected".into()))
    }

    #[test]
    fn creation_failures_pass_through_unchanged() {
        let configs = HashMap::from([(id("deny"), serde_json::json!({}))]);
        let factories = make_factory_map([ConnectorFactory::new(ty("deny"), None)
            .with_traces_to_traces(rejecting_traces_to_traces, Stability::Alpha)])
        .unwrap();
        let builder = ConnectorBuilder::new(configs, factories);

        let err = builder
            .create_traces_to_traces(&id("deny"), Some(Arc::new(NopConsumer)))
            .err()
            .unwrap();
        assert!(matches!(err, BuildError::Create(_)));
        assert_eq!(err.to_string(), "connector rejected");
    }

    #[test]
    fn prewired_nop_tables_resolve_every_pair() {
        let (configs, factories) = crate::nop::nop_connector_configs_and_factories();
        let builder = ConnectorBuilder::new(configs, factories);
        let target = id("nop/conn");
        macro_rules! check {
            ($method:ident, $from:expr, $to:expr) => {
                let built = builder.$method(&target, Some(Arc::new(NopConsumer)));
                assert!(built.is_ok(), "{}", stringify!($method));
            };
        }
        for_each_pair!(check);
    }

    #[test]
    fn custom_telemetry_and_build_info_are_forwarded() {
        let (configs, factories) = crate::nop::nop_connector_configs_and_factories();
        let info = BuildInfo {
            command: "flowtest".to_string(),
            description: "test harness".to_string(),
            version: "0.0.1".to_string(),
        };
        let builder = ConnectorBuilder::new(configs, factories)
            .with_telemetry(TelemetrySettings::default())
            .with_build_info(info);

        let built = builder.create_metrics_to_metrics(&id("nop/conn"), Some(Arc::new(NopConsumer)));
        assert!(built.is_ok());
    }
}
