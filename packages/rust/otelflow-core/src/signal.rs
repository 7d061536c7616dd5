//! Telemetry signal kinds.
//!
//! Every pipeline edge and every export operation is tagged with one of the
//! four signal kinds. The `Display` form is the lowercase name that appears
//! in diagnostics, error messages, and span names, so it is part of the
//! public contract and must not change.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of telemetry data flowing through a pipeline edge.
///
/// Signal kinds are plain tags: they compare by equality and hash, and carry
/// no ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    /// Spans and trace fragments.
    Traces,
    /// Metric data points.
    Metrics,
    /// Log records.
    Logs,
    /// Profiling samples.
    Profiles,
}

impl SignalType {
    /// Every signal kind, in declaration order.
    pub const ALL: [SignalType; 4] = [
        SignalType::Traces,
        SignalType::Metrics,
        SignalType::Logs,
        SignalType::Profiles,
    ];

    /// The lowercase name used in span names and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Traces => "traces",
            SignalType::Metrics => "metrics",
            SignalType::Logs => "logs",
            SignalType::Profiles => "profiles",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn display_uses_lowercase_names() {
        let cases = [
            (SignalType::Traces, "traces"),
            (SignalType::Metrics, "metrics"),
            (SignalType::Logs, "logs"),
            (SignalType::Profiles, "profiles"),
        ];
        for (signal, expected) in cases {
            assert_eq!(signal.to_string(), expected);
            assert_eq!(signal.as_str(), expected);
        }
    }

    #[test]
    fn serde_roundtrips_through_lowercase_strings() {
        for signal in SignalType::ALL {
            let encoded = serde_json::to_string(&signal).unwrap();
            assert_eq!(encoded, format!("\"{signal}\""));
            let decoded: SignalType = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, signal);
        }
    }

    #[test]
    fn all_lists_each_kind_once() {
        let unique: HashSet<_> = SignalType::ALL.into_iter().collect();
        assert_eq!(unique.len(), 4);
    }
}
