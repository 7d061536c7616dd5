//! Settings handed to exporters at construction time.

use bon::Builder;
use otelflow_core::component::{BuildInfo, ComponentId};
use otelflow_core::telemetry::TelemetrySettings;

/// Everything an exporter receives besides its own configuration.
#[derive(Debug, Clone, Builder)]
pub struct ExporterSettings {
    /// Identity of the instance being created.
    pub id: ComponentId,
    /// Telemetry wiring for the exporter's own instrumentation.
    #[builder(default)]
    pub telemetry: TelemetrySettings,
    /// Build metadata of the hosting binary.
    #[builder(default)]
    pub build_info: BuildInfo,
}
