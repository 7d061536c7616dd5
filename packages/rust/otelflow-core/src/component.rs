//! Component identity and lifecycle.
//!
//! Every configured pipeline unit is addressed by a [`ComponentId`]: a
//! validated type name plus an optional instance name, with the canonical
//! string form `type` or `type/name`. Identities are the keys of every
//! configuration and registry map, and their rendering appears verbatim in
//! error messages, so the canonical form is part of the public contract.
//!
//! The [`Component`] trait carries the lifecycle shared by every runtime
//! unit; both hooks default to idempotent no-ops so trivial components only
//! implement their consumption side.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Opaque failure from a component's own internals.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Rejected identity input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The type part must match `[A-Za-z][0-9A-Za-z_]*`.
    #[error("invalid component type {0:?}: must match [A-Za-z][0-9A-Za-z_]*")]
    InvalidType(String),
    /// The name part must be 1 to 1024 bytes of printable text.
    #[error("invalid component name {0:?}: must be 1 to 1024 printable characters")]
    InvalidName(String),
}

/// A validated component type name, the first half of a [`ComponentId`].
///
/// Type names key the factory registry, so two components of the same kind
/// always share one `ComponentType` value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentType(String);

impl ComponentType {
    /// Validates and wraps a type name.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityError> {
        let value = value.into();
        let mut chars = value.chars();
        let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_alpha || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(IdentityError::InvalidType(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ComponentType {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ComponentType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifies one configured component instance.
///
/// Unnamed instances render as `type`, named instances as `type/name`.
/// Identities are immutable, hashable, and ordered by (type, name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    ty: ComponentType,
    name: String,
}

impl ComponentId {
    /// The unnamed instance of `ty`.
    pub fn new(ty: ComponentType) -> Self {
        Self {
            ty,
            name: String::new(),
        }
    }

    /// A named instance of `ty`.
    ///
    /// The name is taken as given; the [`FromStr`] path validates names
    /// because that is where untrusted input arrives.
    pub fn with_name(ty: ComponentType, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }

    pub fn component_type(&self) -> &ComponentType {
        &self.ty
    }

    /// The instance name; empty for unnamed instances.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "{}/{}", self.ty, self.name)
        }
    }
}

impl FromStr for ComponentId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((ty, name)) => {
                let name = name.trim();
                validate_name(name)?;
                Ok(Self::with_name(ty.trim().parse()?, name))
            }
            None => Ok(Self::new(s.trim().parse()?)),
        }
    }
}

impl From<ComponentType> for ComponentId {
    fn from(ty: ComponentType) -> Self {
        Self::new(ty)
    }
}

fn validate_name(name: &str) -> Result<(), IdentityError> {
    let printable = name.chars().all(|c| !c.is_control());
    if name.is_empty() || name.len() > 1024 || !printable {
        return Err(IdentityError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl Serialize for ComponentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ComponentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Build metadata of the hosting binary, threaded into component settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Executable name.
    pub command: String,
    /// Human-readable description.
    pub description: String,
    /// Version string.
    pub version: String,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            command: "otelflow".to_string(),
            description: "OTelFlow Pipeline".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Lifecycle shared by every pipeline component.
#[async_trait]
pub trait Component: Send + Sync {
    /// Called once before any data is delivered.
    async fn start(&self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Called once after the last delivery. Must be safe on a component
    /// that never started.
    async fn shutdown(&self) -> Result<(), BoxError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ty(s: &str) -> ComponentType {
        ComponentType::new(s).unwrap()
    }

    #[test]
    fn type_names_are_validated() {
        for valid in ["otlp", "fakeExporter", "a", "kafka_2", "A1_b"] {
            assert!(ComponentType::new(valid).is_ok(), "{valid} should parse");
        }
        for invalid in ["", "2otlp", "_otlp", "otlp-grpc", "with space", "otlp/2"] {
            assert_eq!(
                ComponentType::new(invalid),
                Err(IdentityError::InvalidType(invalid.to_string())),
            );
        }
    }

    #[test]
    fn canonical_form_roundtrips() {
        let cases = [
            ("all", "all", ""),
            ("all/named", "all", "named"),
            (" otlp / primary ", "otlp", "primary"),
            ("otlp/café", "otlp", "café"),
        ];
        for (input, want_type, want_name) in cases {
            let id: ComponentId = input.parse().unwrap();
            assert_eq!(id.component_type().as_str(), want_type);
            assert_eq!(id.name(), want_name);
            let rendered = id.to_string();
            let reparsed: ComponentId = rendered.parse().unwrap();
            assert_eq!(reparsed, id);
        }
    }

    #[test]
    fn parse_rejects_bad_parts() {
        assert!(matches!(
            "2bad/x".parse::<ComponentId>(),
            Err(IdentityError::InvalidType(_))
        ));
        assert!(matches!(
            "good/".parse::<ComponentId>(),
            Err(IdentityError::InvalidName(_))
        ));
        assert!(matches!(
            "good/\u{7f}".parse::<ComponentId>(),
            Err(IdentityError::InvalidName(_))
        ));
    }

    #[test]
    fn identities_key_maps_by_pair() {
        let mut configs = HashMap::new();
        configs.insert(ComponentId::new(ty("all")), 1);
        configs.insert(ComponentId::with_name(ty("all"), "named"), 2);

        assert_eq!(configs.get(&"all".parse().unwrap()), Some(&1));
        assert_eq!(configs.get(&"all/named".parse().unwrap()), Some(&2));
        assert_eq!(configs.get(&"all/missing".parse().unwrap()), None);
    }

    #[test]
    fn serde_uses_the_canonical_string() {
        let id: ComponentId = "otlp/primary".parse().unwrap();
        let encoded = serde_json::to_string(&id).unwrap();
        assert_eq!(encoded, "\"otlp/primary\"");
        let decoded: ComponentId = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, id);

        assert!(serde_json::from_str::<ComponentId>("\"9bad\"").is_err());
    }

    #[test]
    fn default_build_info_names_the_project() {
        let info = BuildInfo::default();
        assert_eq!(info.command, "otelflow");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn lifecycle_defaults_are_noops() {
        struct Bare;
        impl Component for Bare {}

        let component = Bare;
        assert!(component.start().await.is_ok());
        assert!(component.shutdown().await.is_ok());
        assert!(component.shutdown().await.is_ok());
    }
}
