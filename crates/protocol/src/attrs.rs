//! Resource-attribute contract
//!
//! The router identifies the producing workload from resource attributes
//! alone: the namespace key plus exactly one of the workload-identity keys.

/// Namespace the producing workload runs in.
pub const NAMESPACE_NAME: &str = "k8s.namespace.name";

/// Set when the producing workload is a Deployment.
pub const DEPLOYMENT_NAME: &str = "k8s.deployment.name";

/// Set when the producing workload is a StatefulSet.
pub const STATEFULSET_NAME: &str = "k8s.statefulset.name";

/// Set when the producing workload is a DaemonSet.
pub const DAEMONSET_NAME: &str = "k8s.daemonset.name";
