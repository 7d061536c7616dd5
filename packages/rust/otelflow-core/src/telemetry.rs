//! Telemetry wiring handed to components at construction time.
//!
//! Components never reach for global telemetry state. Whoever assembles a
//! pipeline owns the SDK providers and passes clones of
//! [`TelemetrySettings`] down through builders and settings structs; each
//! component derives its own scoped tracer and meter from them. The default
//! value carries providers with no processors or readers attached, so
//! library code and tests work without any SDK setup; spans and metric
//! writes simply go nowhere.

use std::sync::Arc;

use bon::Builder;
use opentelemetry::metrics::{Meter, MeterProvider as _};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::InstrumentationScope;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::{SdkTracerProvider, Tracer};

/// Tracer and meter providers shared by every component of one pipeline.
#[derive(Debug, Clone, Builder)]
pub struct TelemetrySettings {
    /// Provider component spans are created from.
    #[builder(default = Arc::new(SdkTracerProvider::builder().build()))]
    pub tracer_provider: Arc<SdkTracerProvider>,
    /// Provider component metric instruments are created from.
    #[builder(default = Arc::new(SdkMeterProvider::builder().build()))]
    pub meter_provider: Arc<SdkMeterProvider>,
}

impl TelemetrySettings {
    /// A tracer for the given instrumentation scope name.
    pub fn tracer(&self, scope: &'static str) -> Tracer {
        self.tracer_provider.tracer(scope)
    }

    /// A tracer for a fully described instrumentation scope.
    pub fn tracer_with_scope(&self, scope: InstrumentationScope) -> Tracer {
        self.tracer_provider.tracer_with_scope(scope)
    }

    /// A meter for the given instrumentation scope name.
    pub fn meter(&self, scope: &'static str) -> Meter {
        self.meter_provider.meter(scope)
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Span as _, Tracer as _};
    use opentelemetry::KeyValue;

    #[test]
    fn default_settings_are_usable_without_wiring() {
        let settings = TelemetrySettings::default();

        let tracer = settings.tracer("test");
        let mut span = tracer.start("noop");
        span.set_attribute(KeyValue::new("checked", true));
        span.end();

        let counter = settings.meter("test").u64_counter("noop_total").build();
        counter.add(1, &[]);
    }

    #[test]
    fn clones_share_the_providers() {
        let settings = TelemetrySettings::default();
        let clone = settings.clone();
        assert!(Arc::ptr_eq(
            &settings.tracer_provider,
            &clone.tracer_provider
        ));
        assert!(Arc::ptr_eq(&settings.meter_provider, &clone.meter_provider));
    }

    #[test]
    fn builder_accepts_explicit_providers() {
        let provider = Arc::new(SdkTracerProvider::builder().build());
        let settings = TelemetrySettings::builder()
            .tracer_provider(provider.clone())
            .build();
        assert!(Arc::ptr_eq(&settings.tracer_provider, &provider));

        let scope = InstrumentationScope::builder("scoped")
            .with_version("0.0.1")
            .build();
        let _tracer = settings.tracer_with_scope(scope);
    }
}
