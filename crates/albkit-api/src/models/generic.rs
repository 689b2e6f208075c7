// Generic payloads
//
// Kinds without a hand-written model. Each gets its own type so the
// registry can bind it to exactly one kind; the shape is shared.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::impl_payload;

macro_rules! generic_payloads {
    ($($name:ident,)*) => {
        $(
            #[doc = concat!("`", stringify!($name), "` object; fields beyond the identity set live in `extra`.")]
            #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
            pub struct $name {
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub uuid: Option<String>,
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub name: Option<String>,
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub url: Option<String>,
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub tenant_ref: Option<String>,
                #[serde(flatten)]
                pub extra: Map<String, Value>,
            }

            impl_payload!($name);
        )*
    };
}

generic_payloads! {
    ALBServicesConfig,
    ALBServicesFileDownload,
    ALBServicesFileUpload,
    ALBServicesJob,
    ActionGroupConfig,
    Alert,
    AlertConfig,
    AlertEmailConfig,
    AlertObjectList,
    AlertScriptConfig,
    AlertSyslogConfig,
    AnalyticsProfile,
    Application,
    ApplicationPersistenceProfile,
    ApplicationProfile,
    AuthMappingProfile,
    AuthProfile,
    AutoScaleLaunchConfig,
    AvailabilityZone,
    Backup,
    BackupConfiguration,
    BotConfigConsolidator,
    BotDetectionPolicy,
    BotIPReputationTypeMapping,
    BotMapping,
    CSRFPolicy,
    CertificateManagementProfile,
    Cloud,
    CloudConnectorUser,
    CloudInventory,
    CloudProperties,
    CloudRuntime,
    ClusterCloudDetails,
    ControllerPortalRegistration,
    ControllerProperties,
    ControllerSite,
    CustomIPAMDNSProfile,
    DNSPolicy,
    DebugController,
    DebugServiceEngine,
    DebugVirtualService,
    DynamicDNSRecord,
    ErrorPageBody,
    ErrorPageProfile,
    FederationCheckpoint,
    FederationCheckpointInventory,
    FileObject,
    Generic,
    GeoDB,
    Gslb,
    GslbGeoDbProfile,
    GslbInventory,
    GslbService,
    GslbServiceInventory,
    HTTPPolicySet,
    HardwareSecurityModuleGroup,
    IPAMDNSProviderProfile,
    IPAddrGroup,
    IPReputationDB,
    IcapProfile,
    Image,
    InventoryFaultConfig,
    JWTServerProfile,
    JobEntry,
    L4PolicySet,
    LabelGroup,
    LicenseLedgerDetails,
    LicenseStatus,
    LogControllerMapping,
    MemoryBalancerRequest,
    MicroService,
    MicroServiceGroup,
    NatPolicy,
    Network,
    NetworkInventory,
    NetworkProfile,
    NetworkRuntime,
    NetworkSecurityPolicy,
    NetworkService,
    NsxtSegmentRuntime,
    PKIprofile,
    PoolGroupDeploymentPolicy,
    PoolGroupInventory,
    PoolInventory,
    PriorityLabels,
    ProtocolParser,
    Role,
    SCPoolServerStateInfo,
    SCVsStateInfo,
    SSLKeyAndCertificate,
    SSLProfile,
    SSOPolicy,
    Scheduler,
    SeProperties,
    SecureChannelAvailableLocalIps,
    SecureChannelMapping,
    SecureChannelToken,
    SecurityManagerData,
    SecurityPolicy,
    ServerAutoScalePolicy,
    ServiceAuthProfile,
    ServiceEngine,
    ServiceEngineGroup,
    ServiceEngineGroupInventory,
    ServiceEngineInventory,
    SiteVersion,
    SnmpTrapProfile,
    StatediffOperation,
    StatediffSnapshot,
    StringGroup,
    SystemConfiguration,
    SystemLimits,
    SystemReport,
    TaskJournal,
    TenantSystemConfiguration,
    TestSeDatastoreLevel1,
    TestSeDatastoreLevel2,
    TestSeDatastoreLevel3,
    TrafficCloneProfile,
    UpgradeStatusInfo,
    UpgradeStatusSummary,
    User,
    UserAccountProfile,
    UserActivity,
    VCenterServer,
    VIDCInfo,
    VIMgrClusterRuntime,
    VIMgrHostRuntime,
    VIMgrNWRuntime,
    VIMgrSEVMRuntime,
    VIMgrVMRuntime,
    VIPGNameInfo,
    VSDataScriptSet,
    VrfContext,
    VsGs,
    VsInventory,
    VsvipInventory,
    WafApplicationSignatureProvider,
    WafCRS,
    WafPolicy,
    WafPolicyPSMGroup,
    WafPolicyPSMGroupInventory,
    WafProfile,
    WebappUT,
    Webhook,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resource::Payload;
    use serde_json::json;

    #[test]
    fn generic_payload_keeps_schema_fields_in_extra() {
        let raw = json!({
            "uuid": "poolgroupdeploymentpolicy-1",
            "name": "canary",
            "rules": [{"metric_id": "l4_server.avg_errored_connections"}],
            "scheme": "BLUE_GREEN",
        });
        let policy: PoolGroupDeploymentPolicy = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(policy.uuid(), Some("poolgroupdeploymentpolicy-1"));
        assert_eq!(policy.extra["scheme"], "BLUE_GREEN");
        assert_eq!(serde_json::to_value(&policy).unwrap(), raw);
    }
}
