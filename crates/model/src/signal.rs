//! Telemetry signal kinds
//!
//! A `Signal` names one of the three telemetry streams the engine carries.
//! The lowercase wire name doubles as the pipeline-name prefix, which is
//! load-bearing: the compiler and the runtime router both dispatch on it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three telemetry streams: traces, metrics, or logs.
///
/// Pipeline names are always `"<signal>/<discriminator>"`, so the wire name
/// of a signal is also the routing prefix of every pipeline that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Traces,
    Metrics,
    Logs,
}

impl Signal {
    /// All signals, in the order they are compiled and reported.
    pub const ALL: [Signal; 3] = [Signal::Traces, Signal::Metrics, Signal::Logs];

    /// The lowercase wire name (`"traces"`, `"metrics"`, `"logs"`).
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Signal::Traces => "traces",
            Signal::Metrics => "metrics",
            Signal::Logs => "logs",
        }
    }

    /// Build a pipeline name for this signal: `"<signal>/<discriminator>"`.
    #[inline]
    pub fn pipeline_name(self, discriminator: &str) -> String {
        format!("{}/{}", self.as_str(), discriminator)
    }

    /// Determine which signal a pipeline carries from its name prefix.
    ///
    /// Returns `None` for names that do not follow the
    /// `"<signal>/<discriminator>"` convention.
    pub fn of_pipeline(pipeline_name: &str) -> Option<Signal> {
        Signal::ALL
            .into_iter()
            .find(|signal| {
                pipeline_name
                    .strip_prefix(signal.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
            })
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized signal name.
#[derive(Debug, Error)]
#[error("unknown signal '{0}'")]
pub struct ParseSignalError(pub String);

impl FromStr for Signal {
    type Err = ParseSignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "traces" => Ok(Signal::Traces),
            "metrics" => Ok(Signal::Metrics),
            "logs" => Ok(Signal::Logs),
            other => Err(ParseSignalError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(Signal::Traces.as_str(), "traces");
        assert_eq!(Signal::Metrics.as_str(), "metrics");
        assert_eq!(Signal::Logs.as_str(), "logs");
    }

    #[test]
    fn test_pipeline_name() {
        assert_eq!(Signal::Traces.pipeline_name("in"), "traces/in");
        assert_eq!(Signal::Logs.pipeline_name("my-group"), "logs/my-group");
    }

    #[test]
    fn test_of_pipeline() {
        assert_eq!(Signal::of_pipeline("traces/in"), Some(Signal::Traces));
        assert_eq!(Signal::of_pipeline("metrics/generic-d1"), Some(Signal::Metrics));
        assert_eq!(Signal::of_pipeline("logs/a"), Some(Signal::Logs));
        assert_eq!(Signal::of_pipeline("tracesin"), None);
        assert_eq!(Signal::of_pipeline("profiles/in"), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("traces".parse::<Signal>().unwrap(), Signal::Traces);
        assert!("Traces".parse::<Signal>().is_err());
        assert!("".parse::<Signal>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Signal::Metrics).unwrap();
        assert_eq!(json, "\"metrics\"");
        let back: Signal = serde_json::from_str("\"logs\"").unwrap();
        assert_eq!(back, Signal::Logs);
    }
}
