//! Connector factories and the builder that turns configuration into
//! running connector instances.
//!
//! A connector bridges two pipelines, consuming one signal kind and feeding
//! a consumer of another. This crate provides the pieces a host assembles:
//!
//! - [`factory`]: per-signal-pair capability traits, the
//!   [`factory::ConnectorFactory`] describing one component type's
//!   supported (source, destination) matrix, and
//!   [`factory::make_factory_map`] for keying factories by type.
//! - [`builder`]: [`builder::ConnectorBuilder`], which resolves a
//!   [`ComponentId`](otelflow_core::component::ComponentId) against stored
//!   configurations and registered factories before delegating to the
//!   factory's creation function, with one `create_*` method per pair.
//! - [`nop`]: a forward-or-discard connector plus prewired factory and
//!   configuration tables for exercising builders in tests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use otelflow_connector::builder::ConnectorBuilder;
//! use otelflow_connector::nop::nop_connector_configs_and_factories;
//! use otelflow_core::consumer::NopConsumer;
//!
//! let (configs, factories) = nop_connector_configs_and_factories();
//! let builder = ConnectorBuilder::new(configs, factories);
//!
//! let id = "nop/conn".parse()?;
//! let connector = builder.create_traces_to_traces(&id, Some(Arc::new(NopConsumer)))?;
//! # drop(connector);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod factory;
pub mod nop;

pub use builder::{BuildError, ConnectorBuilder};
pub use factory::{
    ConnectorFactory, ConnectorSettings, DuplicateFactoryError, LogsConnector, MetricsConnector,
    ProfilesConnector, Stability, TracesConnector,
};
pub use nop::{nop_connector_configs_and_factories, nop_factory, NopConnector};
