/// Container-level sync of workload pod templates
use serde_yaml::Value;

use crate::utils::value::{mapping_at, mapping_at_mut};

const POD_SPEC_PATH: &[&str] = &["spec", "template", "spec"];

/// Container fields copied from the cluster
const SYNCED_CONTAINER_FIELDS: &[&str] = &["image", "env", "command"];

/// Copy `image`, `env` and `command` from name-matched online containers into
/// the local workload. Returns the number of local containers updated.
///
/// Both workloads must carry `spec.template.spec.containers` as a sequence,
/// otherwise nothing changes. A field missing on the online container is
/// removed from the local one. Local containers without a match are left as is.
pub fn merge_container_spec(online: &Value, local: &mut Value) -> usize {
    let Some(online_containers) = mapping_at(online, POD_SPEC_PATH)
        .and_then(|pod_spec| pod_spec.get("containers"))
        .and_then(Value::as_sequence)
    else {
        return 0;
    };
    let Some(local_containers) = mapping_at_mut(local, POD_SPEC_PATH)
        .and_then(|pod_spec| pod_spec.get_mut("containers"))
        .and_then(Value::as_sequence_mut)
    else {
        return 0;
    };

    let mut updated = 0;
    for container in local_containers.iter_mut() {
        let Some(name) = container.get("name").filter(|name| !name.is_null()) else {
            continue;
        };
        let Some(matching) = online_containers
            .iter()
            .find(|candidate| candidate.get("name") == Some(name))
        else {
            continue;
        };
        let Some(fields) = container.as_mapping_mut() else {
            continue;
        };

        for field in SYNCED_CONTAINER_FIELDS {
            match matching.get(*field) {
                Some(value) if !value.is_null() => {
                    fields.insert(Value::from(*field), value.clone());
                }
                _ => {
                    fields.shift_remove(*field);
                }
            }
        }
        updated += 1;
    }
    updated
}
