use chrono::Duration;
use k8s_openapi::api::core::v1::LocalObjectReference;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::duck::{CloudEventOverrides, Destination, SourceCondition};

#[derive(CustomResource, Debug, Serialize, Deserialize, Default, Clone, JsonSchema, PartialEq)]
#[kube(
    group = "sources.tanzu.vmware.com",
    version = "v1alpha1",
    kind = "VSphereSource"
)]
#[kube(status = "VSphereSourceStatus")]
#[kube(namespaced)]
#[kube(
    printcolumn = r#"{"name":"ADDRESS", "type":"string", "description":"vSphere endpoint", "jsonPath":".spec.address"}"#,
    printcolumn = r#"{"name":"SINK", "type":"string", "description":"Resolved sink URI", "jsonPath":".status.sinkUri"}"#,
    printcolumn = r#"{"name":"AGE", "type":"date", "description":"Date from created", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct VSphereSourceSpec {
    pub sink: Destination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ce_overrides: Option<CloudEventOverrides>,
    pub address: String,
    #[serde(rename = "skipTLSVerify", default)]
    pub skip_tls_verify: bool,
    pub secret_ref: LocalObjectReference,
    #[serde(default)]
    pub checkpoint_config: CheckpointConfig,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VSphereSourceStatus {
    pub observed_generation: Option<i64>,
    pub conditions: Option<Vec<SourceCondition>>,
    pub sink_uri: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Copy, Default, Debug, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointConfig {
    pub max_age_seconds: i64,
    pub period_seconds: i64,
}

impl CheckpointConfig {
    /// Sub-second precision is dropped, both values are truncated toward zero.
    pub fn from_durations(max_age: Duration, period: Duration) -> Self {
        Self {
            max_age_seconds: max_age.num_seconds(),
            period_seconds: period.num_seconds(),
        }
    }
}
