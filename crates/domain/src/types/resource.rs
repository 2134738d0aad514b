//! Kubernetes resource kinds served through the client cache

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ClavisError;

/// Resource kind a cached list request targets.
///
/// Serialized in lowercase (`"pod"`, `"statefulset"`), which is also the form
/// folded into cache key digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    ConfigMap,
    DaemonSet,
    Deployment,
    Event,
    HorizontalPodAutoscaler,
    Ingress,
    IngressClass,
    ServiceAccount,
    Job,
    CronJob,
    LimitRange,
    Namespace,
    Node,
    PersistentVolumeClaim,
    PersistentVolume,
    CustomResourceDefinition,
    Pod,
    ReplicaSet,
    ReplicationController,
    ResourceQuota,
    Secret,
    Service,
    StatefulSet,
    StorageClass,
    ClusterRole,
    ClusterRoleBinding,
    Role,
    RoleBinding,
    Endpoint,
    NetworkPolicy,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 30] = [
        Self::ConfigMap,
        Self::DaemonSet,
        Self::Deployment,
        Self::Event,
        Self::HorizontalPodAutoscaler,
        Self::Ingress,
        Self::IngressClass,
        Self::ServiceAccount,
        Self::Job,
        Self::CronJob,
        Self::LimitRange,
        Self::Namespace,
        Self::Node,
        Self::PersistentVolumeClaim,
        Self::PersistentVolume,
        Self::CustomResourceDefinition,
        Self::Pod,
        Self::ReplicaSet,
        Self::ReplicationController,
        Self::ResourceQuota,
        Self::Secret,
        Self::Service,
        Self::StatefulSet,
        Self::StorageClass,
        Self::ClusterRole,
        Self::ClusterRoleBinding,
        Self::Role,
        Self::RoleBinding,
        Self::Endpoint,
        Self::NetworkPolicy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigMap => "configmap",
            Self::DaemonSet => "daemonset",
            Self::Deployment => "deployment",
            Self::Event => "event",
            Self::HorizontalPodAutoscaler => "horizontalpodautoscaler",
            Self::Ingress => "ingress",
            Self::IngressClass => "ingressclass",
            Self::ServiceAccount => "serviceaccount",
            Self::Job => "job",
            Self::CronJob => "cronjob",
            Self::LimitRange => "limitrange",
            Self::Namespace => "namespace",
            Self::Node => "node",
            Self::PersistentVolumeClaim => "persistentvolumeclaim",
            Self::PersistentVolume => "persistentvolume",
            Self::CustomResourceDefinition => "customresourcedefinition",
            Self::Pod => "pod",
            Self::ReplicaSet => "replicaset",
            Self::ReplicationController => "replicationcontroller",
            Self::ResourceQuota => "resourcequota",
            Self::Secret => "secret",
            Self::Service => "service",
            Self::StatefulSet => "statefulset",
            Self::StorageClass => "storageclass",
            Self::ClusterRole => "clusterrole",
            Self::ClusterRoleBinding => "clusterrolebinding",
            Self::Role => "role",
            Self::RoleBinding => "rolebinding",
            Self::Endpoint => "endpoint",
            Self::NetworkPolicy => "networkpolicy",
        }
    }

    /// Whether resources of this kind live inside a namespace.
    ///
    /// Cluster-scoped kinds are addressed with an empty namespace.
    pub fn is_namespaced(&self) -> bool {
        !matches!(
            self,
            Self::Namespace
                | Self::Node
                | Self::PersistentVolume
                | Self::StorageClass
                | Self::ClusterRole
                | Self::ClusterRoleBinding
                | Self::CustomResourceDefinition
                | Self::IngressClass
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ClavisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == needle)
            .ok_or_else(|| ClavisError::Config(format!("Unknown resource kind: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_as_str() {
        for kind in ResourceKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Pod".parse::<ResourceKind>().unwrap(), ResourceKind::Pod);
        assert_eq!(
            "PersistentVolumeClaim".parse::<ResourceKind>().unwrap(),
            ResourceKind::PersistentVolumeClaim
        );
        assert!("gadget".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_scope() {
        assert!(ResourceKind::Pod.is_namespaced());
        assert!(ResourceKind::Secret.is_namespaced());
        assert!(!ResourceKind::Node.is_namespaced());
        assert!(!ResourceKind::Namespace.is_namespaced());
    }
}
