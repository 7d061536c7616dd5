//! Shared model for the otelflow pipeline toolkit.
//!
//! This crate defines the vocabulary the rest of the workspace speaks:
//!
//! - [`signal::SignalType`]: the four telemetry signal kinds tagging every
//!   pipeline edge.
//! - [`component`]: validated component identities, build metadata, and
//!   the start/shutdown lifecycle every runtime unit shares.
//! - [`pdata`]: in-memory batches wrapping the OTLP resource-level
//!   messages, with the item-count helpers instrumentation relies on.
//! - [`consumer`]: the async seam between stages, as four per-signal
//!   traits, an error type carrying retry permanence, and the
//!   `NopConsumer`/`Sink` doubles used for wiring and assertions.
//! - [`telemetry::TelemetrySettings`]: the tracer and meter providers
//!   handed to components at construction time, defaulting to inert
//!   providers so nothing here requires SDK setup.
//!
//! # Example
//!
//! ```
//! use otelflow_core::component::ComponentId;
//! use otelflow_core::signal::SignalType;
//!
//! let id: ComponentId = "otlp/primary".parse()?;
//! assert_eq!(id.component_type().as_str(), "otlp");
//! assert_eq!(id.to_string(), "otlp/primary");
//! assert_eq!(SignalType::Traces.to_string(), "traces");
//! # Ok::<(), otelflow_core::component::IdentityError>(())
//! ```

pub mod component;
pub mod consumer;
pub mod pdata;
pub mod signal;
pub mod telemetry;

pub use component::{BoxError, BuildInfo, Component, ComponentId, ComponentType, IdentityError};
pub use consumer::{
    ConsumeError, LogsConsumer, MetricsConsumer, NopConsumer, ProfilesConsumer, Sink,
    TracesConsumer,
};
pub use pdata::{Logs, Metrics, Profiles, Traces};
pub use signal::SignalType;
pub use telemetry::TelemetrySettings;
