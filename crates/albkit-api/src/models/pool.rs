use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::impl_payload;

// ── Pool ─────────────────────────────────────────────────────────────

/// Back-end server pool (`api/pool`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Port used for servers that do not set their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_server_port: Option<u16>,
    /// e.g. `LB_ALGORITHM_LEAST_CONNECTIONS`, `LB_ALGORITHM_ROUND_ROBIN`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lb_algorithm: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub health_monitor_refs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Pool member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub ip: IpAddr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Server {
    pub fn new(ip: IpAddr) -> Self {
        Self {
            ip,
            port: None,
            hostname: None,
            enabled: None,
            ratio: None,
            extra: Map::new(),
        }
    }
}

/// Address with its family, as the controller encodes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAddr {
    pub addr: String,
    #[serde(rename = "type")]
    pub addr_type: IpAddrType,
}

impl IpAddr {
    /// Infer the family from the textual address.
    pub fn new(addr: impl Into<String>) -> Self {
        let addr = addr.into();
        let addr_type = match addr.parse::<std::net::IpAddr>() {
            Ok(std::net::IpAddr::V4(_)) => IpAddrType::V4,
            Ok(std::net::IpAddr::V6(_)) => IpAddrType::V6,
            Err(_) => IpAddrType::Dns,
        };
        Self { addr, addr_type }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpAddrType {
    V4,
    V6,
    #[serde(rename = "DNS")]
    Dns,
}

// ── Pool group ───────────────────────────────────────────────────────

/// Group of pools with ratios and priorities (`api/poolgroup`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<PoolGroupMember>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolGroupMember {
    pub pool_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_payload!(Pool, PoolGroup);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pool_keeps_unknown_fields() {
        let raw = json!({
            "uuid": "pool-1",
            "name": "web",
            "servers": [{"ip": {"addr": "10.0.0.1", "type": "V4"}, "port": 8080}],
            "graceful_disable_timeout": 1,
        });
        let pool: Pool = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(pool.servers[0].port, Some(8080));
        assert_eq!(pool.extra["graceful_disable_timeout"], 1);
        assert_eq!(serde_json::to_value(&pool).unwrap(), raw);
    }

    #[test]
    fn new_pool_omits_unset_fields() {
        let pool = Pool {
            name: Some("web".into()),
            ..Pool::default()
        };
        assert_eq!(serde_json::to_value(&pool).unwrap(), json!({"name": "web"}));
    }

    #[test]
    fn ip_family_is_inferred() {
        assert_eq!(IpAddr::new("10.1.1.1").addr_type, IpAddrType::V4);
        assert_eq!(IpAddr::new("2001:db8::1").addr_type, IpAddrType::V6);
        assert_eq!(IpAddr::new("app.example.com").addr_type, IpAddrType::Dns);
        assert_eq!(
            serde_json::to_value(IpAddr::new("app.example.com")).unwrap(),
            json!({"addr": "app.example.com", "type": "DNS"})
        );
    }
}
