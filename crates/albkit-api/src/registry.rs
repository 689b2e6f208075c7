// Resource kind registry
//
// Single source of truth for the controller's object kinds. The table below
// generates, per kind, the `Resource` binding of its payload type and the
// matching `AviClient` accessor, so the kind name, path token and payload
// type can never drift apart.

use std::fmt;

use crate::client::AviClient;
use crate::models;
use crate::resource::{Resource, ResourceClient};

/// A controller object kind: CamelCase name plus its lowercase path token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceKind {
    name: &'static str,
    token: &'static str,
}

impl ResourceKind {
    pub const fn new(name: &'static str, token: &'static str) -> Self {
        Self { name, token }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn token(&self) -> &'static str {
        self.token
    }

    /// `api/<token>` for `None`, `api/<token>/<uuid>` otherwise.
    ///
    /// Only `None` addresses the collection.
    pub fn path(&self, uuid: Option<&str>) -> String {
        match uuid {
            Some(uuid) => format!("api/{}/{uuid}", self.token),
            None => format!("api/{}", self.token),
        }
    }

    /// Look up a kind by CamelCase name or path token, ignoring case.
    pub fn find(name_or_token: &str) -> Option<Self> {
        RESOURCE_KINDS
            .iter()
            .find(|k| k.token.eq_ignore_ascii_case(name_or_token))
            .copied()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

macro_rules! resource_kinds {
    ($( $name:ident => $token:literal, $accessor:ident; )*) => {
        /// Every registered kind.
        pub static RESOURCE_KINDS: &[ResourceKind] = &[
            $( <models::$name as Resource>::KIND, )*
        ];

        $(
            impl Resource for models::$name {
                const KIND: ResourceKind = ResourceKind::new(stringify!($name), $token);
            }
        )*

        impl AviClient {
            $(
                #[doc = concat!("Client for `", stringify!($name), "` objects at `api/", $token, "`.")]
                pub fn $accessor(&self) -> ResourceClient<'_, models::$name> {
                    self.resource()
                }
            )*
        }
    };
}

resource_kinds! {
    ALBServicesConfig               => "albservicesconfig", alb_services_config;
    ALBServicesFileDownload         => "albservicesfiledownload", alb_services_file_download;
    ALBServicesFileUpload           => "albservicesfileupload", alb_services_file_upload;
    ALBServicesJob                  => "albservicesjob", alb_services_job;
    ActionGroupConfig               => "actiongroupconfig", action_group_config;
    Alert                           => "alert", alert;
    AlertConfig                     => "alertconfig", alert_config;
    AlertEmailConfig                => "alertemailconfig", alert_email_config;
    AlertObjectList                 => "alertobjectlist", alert_object_list;
    AlertScriptConfig               => "alertscriptconfig", alert_script_config;
    AlertSyslogConfig               => "alertsyslogconfig", alert_syslog_config;
    AnalyticsProfile                => "analyticsprofile", analytics_profile;
    Application                     => "application", application;
    ApplicationPersistenceProfile   => "applicationpersistenceprofile", application_persistence_profile;
    ApplicationProfile              => "applicationprofile", application_profile;
    AuthMappingProfile              => "authmappingprofile", auth_mapping_profile;
    AuthProfile                     => "authprofile", auth_profile;
    AutoScaleLaunchConfig           => "autoscalelaunchconfig", auto_scale_launch_config;
    AvailabilityZone                => "availabilityzone", availability_zone;
    Backup                          => "backup", backup;
    BackupConfiguration             => "backupconfiguration", backup_configuration;
    BotConfigConsolidator           => "botconfigconsolidator", bot_config_consolidator;
    BotDetectionPolicy              => "botdetectionpolicy", bot_detection_policy;
    BotIPReputationTypeMapping      => "botipreputationtypemapping", bot_ip_reputation_type_mapping;
    BotMapping                      => "botmapping", bot_mapping;
    CSRFPolicy                      => "csrfpolicy", csrf_policy;
    CertificateManagementProfile    => "certificatemanagementprofile", certificate_management_profile;
    Cloud                           => "cloud", cloud;
    CloudConnectorUser              => "cloudconnectoruser", cloud_connector_user;
    CloudInventory                  => "cloudinventory", cloud_inventory;
    CloudProperties                 => "cloudproperties", cloud_properties;
    CloudRuntime                    => "cloudruntime", cloud_runtime;
    ClusterCloudDetails             => "clusterclouddetails", cluster_cloud_details;
    ControllerPortalRegistration    => "controllerportalregistration", controller_portal_registration;
    ControllerProperties            => "controllerproperties", controller_properties;
    ControllerSite                  => "controllersite", controller_site;
    CustomIPAMDNSProfile            => "customipamdnsprofile", custom_ipam_dns_profile;
    DNSPolicy                       => "dnspolicy", dns_policy;
    DebugController                 => "debugcontroller", debug_controller;
    DebugServiceEngine              => "debugserviceengine", debug_service_engine;
    DebugVirtualService             => "debugvirtualservice", debug_virtual_service;
    DynamicDNSRecord                => "dynamicdnsrecord", dynamic_dns_record;
    ErrorPageBody                   => "errorpagebody", error_page_body;
    ErrorPageProfile                => "errorpageprofile", error_page_profile;
    FederationCheckpoint            => "federationcheckpoint", federation_checkpoint;
    FederationCheckpointInventory   => "federationcheckpointinventory", federation_checkpoint_inventory;
    FileObject                      => "fileobject", file_object;
    Generic                         => "generic", generic;
    GeoDB                           => "geodb", geo_db;
    Gslb                            => "gslb", gslb;
    GslbGeoDbProfile                => "gslbgeodbprofile", gslb_geo_db_profile;
    GslbInventory                   => "gslbinventory", gslb_inventory;
    GslbService                     => "gslbservice", gslb_service;
    GslbServiceInventory            => "gslbserviceinventory", gslb_service_inventory;
    HTTPPolicySet                   => "httppolicyset", http_policy_set;
    HardwareSecurityModuleGroup     => "hardwaresecuritymodulegroup", hardware_security_module_group;
    HealthMonitor                   => "healthmonitor", health_monitor;
    IPAMDNSProviderProfile          => "ipamdnsproviderprofile", ipam_dns_provider_profile;
    IPAddrGroup                     => "ipaddrgroup", ip_addr_group;
    IPReputationDB                  => "ipreputationdb", ip_reputation_db;
    IcapProfile                     => "icapprofile", icap_profile;
    Image                           => "image", image;
    InventoryFaultConfig            => "inventoryfaultconfig", inventory_fault_config;
    JWTServerProfile                => "jwtserverprofile", jwt_server_profile;
    JobEntry                        => "jobentry", job_entry;
    L4PolicySet                     => "l4policyset", l4_policy_set;
    LabelGroup                      => "labelgroup", label_group;
    LicenseLedgerDetails            => "licenseledgerdetails", license_ledger_details;
    LicenseStatus                   => "licensestatus", license_status;
    LogControllerMapping            => "logcontrollermapping", log_controller_mapping;
    MemoryBalancerRequest           => "memorybalancerrequest", memory_balancer_request;
    MicroService                    => "microservice", micro_service;
    MicroServiceGroup               => "microservicegroup", micro_service_group;
    NatPolicy                       => "natpolicy", nat_policy;
    Network                         => "network", network;
    NetworkInventory                => "networkinventory", network_inventory;
    NetworkProfile                  => "networkprofile", network_profile;
    NetworkRuntime                  => "networkruntime", network_runtime;
    NetworkSecurityPolicy           => "networksecuritypolicy", network_security_policy;
    NetworkService                  => "networkservice", network_service;
    NsxtSegmentRuntime              => "nsxtsegmentruntime", nsxt_segment_runtime;
    PKIprofile                      => "pkiprofile", pki_profile;
    Pool                            => "pool", pool;
    PoolGroup                       => "poolgroup", pool_group;
    PoolGroupDeploymentPolicy       => "poolgroupdeploymentpolicy", pool_group_deployment_policy;
    PoolGroupInventory              => "poolgroupinventory", pool_group_inventory;
    PoolInventory                   => "poolinventory", pool_inventory;
    PriorityLabels                  => "prioritylabels", priority_labels;
    ProtocolParser                  => "protocolparser", protocol_parser;
    Role                            => "role", role;
    SCPoolServerStateInfo           => "scpoolserverstateinfo", sc_pool_server_state_info;
    SCVsStateInfo                   => "scvsstateinfo", sc_vs_state_info;
    SSLKeyAndCertificate            => "sslkeyandcertificate", ssl_key_and_certificate;
    SSLProfile                      => "sslprofile", ssl_profile;
    SSOPolicy                       => "ssopolicy", sso_policy;
    Scheduler                       => "scheduler", scheduler;
    SeProperties                    => "seproperties", se_properties;
    SecureChannelAvailableLocalIps  => "securechannelavailablelocalips", secure_channel_available_local_ips;
    SecureChannelMapping            => "securechannelmapping", secure_channel_mapping;
    SecureChannelToken              => "securechanneltoken", secure_channel_token;
    SecurityManagerData             => "securitymanagerdata", security_manager_data;
    SecurityPolicy                  => "securitypolicy", security_policy;
    ServerAutoScalePolicy           => "serverautoscalepolicy", server_auto_scale_policy;
    ServiceAuthProfile              => "serviceauthprofile", service_auth_profile;
    ServiceEngine                   => "serviceengine", service_engine;
    ServiceEngineGroup              => "serviceenginegroup", service_engine_group;
    ServiceEngineGroupInventory     => "serviceenginegroupinventory", service_engine_group_inventory;
    ServiceEngineInventory          => "serviceengineinventory", service_engine_inventory;
    SiteVersion                     => "siteversion", site_version;
    SnmpTrapProfile                 => "snmptrapprofile", snmp_trap_profile;
    StatediffOperation              => "statediffoperation", statediff_operation;
    StatediffSnapshot               => "statediffsnapshot", statediff_snapshot;
    StringGroup                     => "stringgroup", string_group;
    SystemConfiguration             => "systemconfiguration", system_configuration;
    SystemLimits                    => "systemlimits", system_limits;
    SystemReport                    => "systemreport", system_report;
    TaskJournal                     => "taskjournal", task_journal;
    Tenant                          => "tenant", tenant;
    TenantSystemConfiguration       => "tenantsystemconfiguration", tenant_system_configuration;
    TestSeDatastoreLevel1           => "testsedatastorelevel1", test_se_datastore_level1;
    TestSeDatastoreLevel2           => "testsedatastorelevel2", test_se_datastore_level2;
    TestSeDatastoreLevel3           => "testsedatastorelevel3", test_se_datastore_level3;
    TrafficCloneProfile             => "trafficcloneprofile", traffic_clone_profile;
    UpgradeStatusInfo               => "upgradestatusinfo", upgrade_status_info;
    UpgradeStatusSummary            => "upgradestatussummary", upgrade_status_summary;
    User                            => "user", user;
    UserAccountProfile              => "useraccountprofile", user_account_profile;
    UserActivity                    => "useractivity", user_activity;
    VCenterServer                   => "vcenterserver", vcenter_server;
    VIDCInfo                        => "vidcinfo", vidc_info;
    VIMgrClusterRuntime             => "vimgrclusterruntime", vimgr_cluster_runtime;
    VIMgrHostRuntime                => "vimgrhostruntime", vimgr_host_runtime;
    VIMgrNWRuntime                  => "vimgrnwruntime", vimgr_nw_runtime;
    VIMgrSEVMRuntime                => "vimgrsevmruntime", vimgr_sevm_runtime;
    VIMgrVMRuntime                  => "vimgrvmruntime", vimgr_vm_runtime;
    VIPGNameInfo                    => "vipgnameinfo", vipg_name_info;
    VSDataScriptSet                 => "vsdatascriptset", vs_data_script_set;
    VirtualService                  => "virtualservice", virtual_service;
    VrfContext                      => "vrfcontext", vrf_context;
    VsGs                            => "vsgs", vs_gs;
    VsInventory                     => "vsinventory", vs_inventory;
    VsVip                           => "vsvip", vs_vip;
    VsvipInventory                  => "vsvipinventory", vsvip_inventory;
    WafApplicationSignatureProvider => "wafapplicationsignatureprovider", waf_application_signature_provider;
    WafCRS                          => "wafcrs", waf_crs;
    WafPolicy                       => "wafpolicy", waf_policy;
    WafPolicyPSMGroup               => "wafpolicypsmgroup", waf_policy_psm_group;
    WafPolicyPSMGroupInventory      => "wafpolicypsmgroupinventory", waf_policy_psm_group_inventory;
    WafProfile                      => "wafprofile", waf_profile;
    WebappUT                        => "webapput", webapp_ut;
    Webhook                         => "webhook", webhook;
}
