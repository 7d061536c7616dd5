//! Exporter-side instrumentation for the otelflow pipeline toolkit.
//!
//! - [`obsreport`]: [`obsreport::ExporterObsReport`] brackets each send
//!   attempt in a span named `exporter/{identity}/{signal}`, splits the
//!   item count into sent/failed span attributes and otel counters, and
//!   keeps cumulative totals verifiable through `check_exporter_*`.
//! - [`settings`]: [`settings::ExporterSettings`], the identity, telemetry
//!   wiring, and build metadata handed to an exporter at construction.
//! - [`debug`]: an exporter that renders consumed batches into operator
//!   logs through a sampler, instrumented with the recorder.
//!
//! # Example
//!
//! ```
//! use opentelemetry::Context;
//! use otelflow_exporter::obsreport::{ExporterObsReport, ObsReportSettings};
//!
//! let settings = ObsReportSettings::builder()
//!     .exporter_id("otlp/primary".parse()?)
//!     .build();
//! let obsrep = ExporterObsReport::new(&settings);
//!
//! let op = obsrep.start_traces_op(&Context::new());
//! obsrep.end_traces_op(&op, 12, None);
//! obsrep.check_exporter_traces(12, 0)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod debug;
pub mod obsreport;
pub mod settings;

pub use debug::{DebugExporter, Verbosity};
pub use obsreport::{CounterCheckError, ExporterObsReport, ObsReportSettings};
pub use settings::ExporterSettings;
