/// Resource kinds and identity resolution for manifest documents
use std::fmt;
use std::str::FromStr;

use super::Document;
use crate::error::{Result, SyncError};
use crate::utils::value::str_at;

/// Kubernetes kinds that can be synchronized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Service,
    Deployment,
    DaemonSet,
    StatefulSet,
    ConfigMap,
    Secret,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Service => "Service",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::DaemonSet => "DaemonSet",
            ResourceKind::StatefulSet => "StatefulSet",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
        }
    }

    /// Kinds that carry a pod template
    pub fn is_workload(&self) -> bool {
        matches!(
            self,
            ResourceKind::Deployment | ResourceKind::DaemonSet | ResourceKind::StatefulSet
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Service" => Ok(ResourceKind::Service),
            "Deployment" => Ok(ResourceKind::Deployment),
            "DaemonSet" => Ok(ResourceKind::DaemonSet),
            "StatefulSet" => Ok(ResourceKind::StatefulSet),
            "ConfigMap" => Ok(ResourceKind::ConfigMap),
            "Secret" => Ok(ResourceKind::Secret),
            other => Err(SyncError::UnsupportedKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Where a manifest document lives in the cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentity {
    pub namespace: String,
    pub name: String,
    pub kind: ResourceKind,
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.kind, self.namespace, self.name)
    }
}

/// Resolve namespace, name and kind of a manifest document
///
/// Missing or empty fields yield [`SyncError::InvalidResource`]; a kind outside
/// the supported set yields [`SyncError::UnsupportedKind`].
pub fn resolve_identity(doc: &Document) -> Result<ResourceIdentity> {
    let namespace = str_at(doc, &["metadata", "namespace"]);
    let name = str_at(doc, &["metadata", "name"]);
    let kind = str_at(doc, &["kind"]);

    let (Some(namespace), Some(name), Some(kind)) = (namespace, name, kind) else {
        let missing: Vec<&str> = [
            ("metadata.namespace", namespace.is_none()),
            ("metadata.name", name.is_none()),
            ("kind", kind.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
        return Err(SyncError::InvalidResource {
            missing: missing.join(", "),
        });
    };

    Ok(ResourceIdentity {
        namespace: namespace.to_string(),
        name: name.to_string(),
        kind: kind.parse()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Document {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_resolve_identity() {
        let identity = resolve_identity(&doc(
            "kind: StatefulSet\nmetadata:\n  name: db\n  namespace: data\n",
        ))
        .unwrap();
        assert_eq!(identity.kind, ResourceKind::StatefulSet);
        assert_eq!(identity.namespace, "data");
        assert_eq!(identity.name, "db");
        assert_eq!(identity.to_string(), "StatefulSet data/db");
    }

    #[test]
    fn test_missing_name_is_invalid() {
        let err = resolve_identity(&doc("kind: Service\nmetadata:\n  namespace: default\n"))
            .unwrap_err();
        match err {
            SyncError::InvalidResource { missing } => assert_eq!(missing, "metadata.name"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_everything_missing() {
        let err = resolve_identity(&doc("apiVersion: v1\n")).unwrap_err();
        match err {
            SyncError::InvalidResource { missing } => {
                assert_eq!(missing, "metadata.namespace, metadata.name, kind")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_namespace_is_invalid() {
        let err = resolve_identity(&doc(
            "kind: Secret\nmetadata:\n  name: creds\n  namespace: \"\"\n",
        ))
        .unwrap_err();
        assert!(matches!(err, SyncError::InvalidResource { .. }));
    }

    #[test]
    fn test_unknown_kind() {
        let err = resolve_identity(&doc(
            "kind: Ingress\nmetadata:\n  name: web\n  namespace: default\n",
        ))
        .unwrap_err();
        match err {
            SyncError::UnsupportedKind { kind } => assert_eq!(kind, "Ingress"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_workload_kinds() {
        let workloads: Vec<_> = ["Service", "Deployment", "DaemonSet", "StatefulSet", "ConfigMap", "Secret"]
            .iter()
            .map(|k| k.parse::<ResourceKind>().unwrap())
            .filter(ResourceKind::is_workload)
            .collect();
        assert_eq!(
            workloads,
            vec![
                ResourceKind::Deployment,
                ResourceKind::DaemonSet,
                ResourceKind::StatefulSet
            ]
        );
    }
}
