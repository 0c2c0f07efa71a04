/// Strip server-managed and noisy fields from a resource
use serde_yaml::Value;

use crate::utils::value::{mapping_at_mut, remove_keys};

/// Fields the API server writes into `metadata`
const SERVER_METADATA_FIELDS: &[&str] = &[
    "annotations",
    "creationTimestamp",
    "generation",
    "managedFields",
    "resourceVersion",
    "selfLink",
    "uid",
];

const POD_TEMPLATE_METADATA_FIELDS: &[&str] = &["annotations", "creationTimestamp"];

/// Sentinel `clusterIP` value of headless Services
const HEADLESS_CLUSTER_IP: &str = "none";

/// Remove server-generated fields from `doc` in place and return it.
///
/// Missing parents are skipped. A `spec.clusterIP` is dropped unless it is the
/// headless marker `None`.
pub fn clean(doc: &mut Value) -> &mut Value {
    if let Some(metadata) = mapping_at_mut(doc, &["metadata"]) {
        remove_keys(metadata, SERVER_METADATA_FIELDS);
    }

    if let Some(spec) = mapping_at_mut(doc, &["spec"]) {
        let assigned_ip = spec
            .get("clusterIP")
            .and_then(Value::as_str)
            .is_some_and(|ip| !ip.eq_ignore_ascii_case(HEADLESS_CLUSTER_IP));
        if assigned_ip {
            spec.shift_remove("clusterIP");
        }
    }

    if let Some(template_metadata) = mapping_at_mut(doc, &["spec", "template", "metadata"]) {
        remove_keys(template_metadata, POD_TEMPLATE_METADATA_FIELDS);
    }

    if let Some(root) = doc.as_mapping_mut() {
        root.shift_remove("status");
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn cleaned(yaml: &str) -> Value {
        let mut value = doc(yaml);
        clean(&mut value);
        value
    }

    const ONLINE_DEPLOYMENT: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: default
  labels:
    app: web
  annotations:
    deployment.kubernetes.io/revision: "3"
  creationTimestamp: "2024-01-01T00:00:00Z"
  generation: 7
  managedFields:
  - manager: kubectl
  resourceVersion: "12345"
  selfLink: /apis/apps/v1/namespaces/default/deployments/web
  uid: 4b7d9f5e-0000-0000-0000-000000000000
spec:
  replicas: 2
  template:
    metadata:
      annotations:
        kubectl.kubernetes.io/restartedAt: "2024-01-02T00:00:00Z"
      creationTimestamp: null
      labels:
        app: web
    spec:
      containers:
      - name: web
        image: nginx:1.25
status:
  availableReplicas: 2
"#;

    #[test]
    fn test_clean_workload() {
        assert_eq!(
            cleaned(ONLINE_DEPLOYMENT),
            doc(r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: default
  labels:
    app: web
spec:
  replicas: 2
  template:
    metadata:
      labels:
        app: web
    spec:
      containers:
      - name: web
        image: nginx:1.25
"#)
        );
    }

    #[test]
    fn test_clean_never_adds_keys() {
        let original = doc(ONLINE_DEPLOYMENT);
        let result = cleaned(ONLINE_DEPLOYMENT);
        let original_keys = original.as_mapping().unwrap();
        for key in result.as_mapping().unwrap().keys() {
            assert!(original_keys.contains_key(key));
        }
        assert!(result.get("status").is_none());
        assert!(result["metadata"].get("uid").is_none());
        assert!(result["metadata"].get("resourceVersion").is_none());
    }

    #[test]
    fn test_headless_cluster_ip_is_kept() {
        let result = cleaned("kind: Service\nspec:\n  clusterIP: None\n");
        assert_eq!(result["spec"]["clusterIP"], Value::from("None"));
        let result = cleaned("kind: Service\nspec:\n  clusterIP: none\n");
        assert_eq!(result["spec"]["clusterIP"], Value::from("none"));
    }

    #[test]
    fn test_assigned_cluster_ip_is_removed() {
        let result = cleaned("kind: Service\nspec:\n  clusterIP: 10.0.0.5\n  type: ClusterIP\n");
        assert_eq!(result, doc("kind: Service\nspec:\n  type: ClusterIP\n"));
    }

    #[test]
    fn test_missing_parents_are_noop() {
        assert_eq!(cleaned("kind: ConfigMap\ndata:\n  a: b\n"), doc("kind: ConfigMap\ndata:\n  a: b\n"));
        assert_eq!(cleaned("metadata: null\nspec: 5\n"), doc("metadata: null\nspec: 5\n"));
        assert_eq!(cleaned("just a string"), doc("just a string"));
    }

    #[test]
    fn test_status_removed_unconditionally() {
        assert_eq!(cleaned("kind: Secret\nstatus: null\n"), doc("kind: Secret\n"));
    }
}
