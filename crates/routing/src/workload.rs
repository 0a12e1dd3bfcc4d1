//! Workload identity
//!
//! `WorkloadKind` normalizes the accepted spellings of a Kubernetes
//! workload kind to one canonical lowercase token; `WorkloadKey` is the
//! canonical `namespace/kind/name` identity used as the routing-table key.

use std::fmt;
use std::str::FromStr;

use crate::RoutingError;

/// The workload kinds the router can identify from resource attributes.
///
/// Kinds are limited to those with a workload-identity resource attribute;
/// accepting others would create routing-table entries no batch can match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
    DaemonSet,
}

impl WorkloadKind {
    /// All kinds, in identity-attribute precedence order.
    pub const ALL: [WorkloadKind; 3] = [
        WorkloadKind::Deployment,
        WorkloadKind::StatefulSet,
        WorkloadKind::DaemonSet,
    ];

    /// The canonical lowercase token used in workload keys.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "deployment",
            WorkloadKind::StatefulSet => "statefulset",
            WorkloadKind::DaemonSet => "daemonset",
        }
    }

    /// Parse any accepted spelling (case-insensitive) to the canonical kind.
    pub fn parse(kind: &str) -> Result<Self, RoutingError> {
        WorkloadKind::ALL
            .into_iter()
            .find(|candidate| kind.eq_ignore_ascii_case(candidate.as_str()))
            .ok_or_else(|| RoutingError::unknown_workload_kind(kind))
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkloadKind {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkloadKind::parse(s)
    }
}

/// Canonical identity of one workload: `"<namespace>/<kind>/<name>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkloadKey {
    pub namespace: String,
    pub kind: WorkloadKind,
    pub name: String,
}

impl WorkloadKey {
    pub fn new(
        namespace: impl Into<String>,
        kind: WorkloadKind,
        name: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            kind,
            name: name.into(),
        }
    }

    /// Parse a canonical `namespace/kind/name` string.
    pub fn parse(key: &str) -> Result<Self, RoutingError> {
        let mut parts = key.splitn(3, '/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(namespace), Some(kind), Some(name))
                if !namespace.is_empty() && !name.is_empty() =>
            {
                Ok(Self {
                    namespace: namespace.to_string(),
                    kind: WorkloadKind::parse(kind)
                        .map_err(|_| RoutingError::malformed_key(key))?,
                    name: name.to_string(),
                })
            }
            _ => Err(RoutingError::malformed_key(key)),
        }
    }
}

impl fmt::Display for WorkloadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.namespace, self.kind, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_accepts_all_cases() {
        assert_eq!(WorkloadKind::parse("Deployment").unwrap(), WorkloadKind::Deployment);
        assert_eq!(WorkloadKind::parse("deployment").unwrap(), WorkloadKind::Deployment);
        assert_eq!(WorkloadKind::parse("STATEFULSET").unwrap(), WorkloadKind::StatefulSet);
        assert_eq!(WorkloadKind::parse("DaemonSet").unwrap(), WorkloadKind::DaemonSet);
    }

    #[test]
    fn test_kind_parse_rejects_unknown() {
        assert!(WorkloadKind::parse("ReplicaSet").is_err());
        assert!(WorkloadKind::parse("").is_err());
    }

    #[test]
    fn test_key_display_is_canonical() {
        let key = WorkloadKey::new("default", WorkloadKind::DaemonSet, "log-agent");
        assert_eq!(key.to_string(), "default/daemonset/log-agent");
    }

    #[test]
    fn test_key_parse_roundtrip() {
        let key = WorkloadKey::parse("prod/statefulset/db").unwrap();
        assert_eq!(key.namespace, "prod");
        assert_eq!(key.kind, WorkloadKind::StatefulSet);
        assert_eq!(key.name, "db");
        assert_eq!(key.to_string(), "prod/statefulset/db");
    }

    #[test]
    fn test_key_parse_rejects_malformed() {
        assert!(WorkloadKey::parse("default/my-app").is_err());
        assert!(WorkloadKey::parse("/deployment/x").is_err());
        assert!(WorkloadKey::parse("default/deployment/").is_err());
        assert!(WorkloadKey::parse("default/cronjob/x").is_err());
    }

    #[test]
    fn test_keys_differing_only_by_kind_are_distinct() {
        let a = WorkloadKey::new("ns", WorkloadKind::Deployment, "x");
        let b = WorkloadKey::new("ns", WorkloadKind::StatefulSet, "x");
        assert_ne!(a, b);
    }
}
