use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::impl_payload;

/// Active health check definition (`api/healthmonitor`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthMonitor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_ref: Option<String>,
    /// e.g. `HEALTH_MONITOR_HTTP`, `HEALTH_MONITOR_TCP`, `HEALTH_MONITOR_PING`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub monitor_type: Option<String>,
    /// Seconds between checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive_timeout: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_checks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_checks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor_port: Option<u16>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_payload!(HealthMonitor);
