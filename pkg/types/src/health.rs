use pkg_constants::health::{
    DEFAULT_MAX_PERCENT_DELTA_UNHEALTHY_NODES, DEFAULT_MAX_PERCENT_UNHEALTHY_APPLICATIONS,
    DEFAULT_MAX_PERCENT_UNHEALTHY_DEPLOYED_APPLICATIONS, DEFAULT_MAX_PERCENT_UNHEALTHY_NODES,
    DEFAULT_MAX_PERCENT_UNHEALTHY_PARTITIONS_PER_SERVICE,
    DEFAULT_MAX_PERCENT_UNHEALTHY_REPLICAS_PER_PARTITION, DEFAULT_MAX_PERCENT_UNHEALTHY_SERVICES,
    DEFAULT_MAX_PERCENT_UPGRADE_DOMAIN_DELTA_UNHEALTHY_NODES,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationErrorKind};
use crate::percentage::Percentage;
use crate::policy_map::{HealthPolicyMap, PolicyEntry, PolicyMap};

fn percentage(raw: Option<i64>, default: u8, field: &str) -> Result<Percentage> {
    Percentage::resolve(raw, Percentage::of(default))
        .map_err(|kind: ValidationErrorKind| kind.at(field))
}

fn entries<V>(raw: Vec<PolicyEntry<V>>) -> impl Iterator<Item = (String, V)> {
    raw.into_iter().map(|e| (e.key, e.value))
}

// --- Cluster health policy ---

/// Raw cluster health policy inputs.
#[derive(Debug, Clone, Default)]
pub struct ClusterHealthPolicyInput {
    pub consider_warning_as_error: Option<bool>,
    pub max_percent_unhealthy_nodes: Option<i64>,
    pub max_percent_unhealthy_applications: Option<i64>,
    /// `(application type name, percentage)` in caller order.
    pub application_type_health_policy_map: Vec<(String, i64)>,
}

/// Health policy used to evaluate the cluster or a cluster node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterHealthPolicy {
    pub consider_warning_as_error: bool,
    pub max_percent_unhealthy_nodes: Percentage,
    pub max_percent_unhealthy_applications: Percentage,
    /// Application types listed here are evaluated against their own
    /// percentage instead of `max_percent_unhealthy_applications`.
    #[serde(skip_serializing_if = "PolicyMap::is_empty")]
    pub application_type_health_policy_map: HealthPolicyMap,
}

impl ClusterHealthPolicy {
    pub fn new(input: ClusterHealthPolicyInput) -> Result<Self> {
        let (nodes, applications) = Self::thresholds(&input)?;
        let map = Self::type_map(input.application_type_health_policy_map)?;
        Ok(Self::from_parts(
            input.consider_warning_as_error,
            nodes,
            applications,
            map,
        ))
    }

    pub(crate) fn thresholds(input: &ClusterHealthPolicyInput) -> Result<(Percentage, Percentage)> {
        Ok((
            percentage(
                input.max_percent_unhealthy_nodes,
                DEFAULT_MAX_PERCENT_UNHEALTHY_NODES,
                "MaxPercentUnhealthyNodes",
            )?,
            percentage(
                input.max_percent_unhealthy_applications,
                DEFAULT_MAX_PERCENT_UNHEALTHY_APPLICATIONS,
                "MaxPercentUnhealthyApplications",
            )?,
        ))
    }

    pub(crate) fn type_map(raw: Vec<(String, i64)>) -> Result<HealthPolicyMap> {
        HealthPolicyMap::build(raw).map_err(|e| e.within("ApplicationTypeHealthPolicyMap"))
    }

    pub(crate) fn from_parts(
        consider_warning_as_error: Option<bool>,
        max_percent_unhealthy_nodes: Percentage,
        max_percent_unhealthy_applications: Percentage,
        application_type_health_policy_map: HealthPolicyMap,
    ) -> Self {
        Self {
            consider_warning_as_error: consider_warning_as_error.unwrap_or(false),
            max_percent_unhealthy_nodes,
            max_percent_unhealthy_applications,
            application_type_health_policy_map,
        }
    }
}

impl Default for ClusterHealthPolicy {
    fn default() -> Self {
        Self::from_parts(
            None,
            Percentage::of(DEFAULT_MAX_PERCENT_UNHEALTHY_NODES),
            Percentage::of(DEFAULT_MAX_PERCENT_UNHEALTHY_APPLICATIONS),
            HealthPolicyMap::empty(),
        )
    }
}

// --- Cluster upgrade (delta) health policy ---

/// Degradation thresholds checked after every upgrade domain when delta
/// health evaluation is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterUpgradeHealthPolicy {
    pub max_percent_delta_unhealthy_nodes: Percentage,
    pub max_percent_upgrade_domain_delta_unhealthy_nodes: Percentage,
}

impl ClusterUpgradeHealthPolicy {
    pub fn new(
        max_percent_delta_unhealthy_nodes: Option<i64>,
        max_percent_upgrade_domain_delta_unhealthy_nodes: Option<i64>,
    ) -> Result<Self> {
        Ok(Self {
            max_percent_delta_unhealthy_nodes: percentage(
                max_percent_delta_unhealthy_nodes,
                DEFAULT_MAX_PERCENT_DELTA_UNHEALTHY_NODES,
                "MaxPercentDeltaUnhealthyNodes",
            )?,
            max_percent_upgrade_domain_delta_unhealthy_nodes: percentage(
                max_percent_upgrade_domain_delta_unhealthy_nodes,
                DEFAULT_MAX_PERCENT_UPGRADE_DOMAIN_DELTA_UNHEALTHY_NODES,
                "MaxPercentUpgradeDomainDeltaUnhealthyNodes",
            )?,
        })
    }
}

impl Default for ClusterUpgradeHealthPolicy {
    fn default() -> Self {
        Self {
            max_percent_delta_unhealthy_nodes: Percentage::of(
                DEFAULT_MAX_PERCENT_DELTA_UNHEALTHY_NODES,
            ),
            max_percent_upgrade_domain_delta_unhealthy_nodes: Percentage::of(
                DEFAULT_MAX_PERCENT_UPGRADE_DOMAIN_DELTA_UNHEALTHY_NODES,
            ),
        }
    }
}

// --- Service type health policy ---

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ServiceTypeHealthPolicyInput {
    #[serde(default)]
    pub max_percent_unhealthy_partitions_per_service: Option<i64>,
    #[serde(default)]
    pub max_percent_unhealthy_replicas_per_partition: Option<i64>,
    #[serde(default)]
    pub max_percent_unhealthy_services: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceTypeHealthPolicy {
    pub max_percent_unhealthy_partitions_per_service: Percentage,
    pub max_percent_unhealthy_replicas_per_partition: Percentage,
    pub max_percent_unhealthy_services: Percentage,
}

impl ServiceTypeHealthPolicy {
    pub fn new(input: &ServiceTypeHealthPolicyInput) -> Result<Self> {
        Ok(Self {
            max_percent_unhealthy_partitions_per_service: percentage(
                input.max_percent_unhealthy_partitions_per_service,
                DEFAULT_MAX_PERCENT_UNHEALTHY_PARTITIONS_PER_SERVICE,
                "MaxPercentUnhealthyPartitionsPerService",
            )?,
            max_percent_unhealthy_replicas_per_partition: percentage(
                input.max_percent_unhealthy_replicas_per_partition,
                DEFAULT_MAX_PERCENT_UNHEALTHY_REPLICAS_PER_PARTITION,
                "MaxPercentUnhealthyReplicasPerPartition",
            )?,
            max_percent_unhealthy_services: percentage(
                input.max_percent_unhealthy_services,
                DEFAULT_MAX_PERCENT_UNHEALTHY_SERVICES,
                "MaxPercentUnhealthyServices",
            )?,
        })
    }
}

// --- Application health policy ---

/// Raw per-application override, as read from JSON or YAML.
///
/// ```json
/// {
///   "ConsiderWarningAsError": true,
///   "MaxPercentUnhealthyDeployedApplications": 10,
///   "DefaultServiceTypeHealthPolicy": { "MaxPercentUnhealthyServices": 5 },
///   "ServiceTypeHealthPolicyMap": [
///     { "Key": "FrontendType", "Value": { "MaxPercentUnhealthyReplicasPerPartition": 20 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ApplicationHealthPolicyInput {
    #[serde(default)]
    pub consider_warning_as_error: Option<bool>,
    #[serde(default)]
    pub max_percent_unhealthy_deployed_applications: Option<i64>,
    #[serde(default)]
    pub default_service_type_health_policy: Option<ServiceTypeHealthPolicyInput>,
    #[serde(default)]
    pub service_type_health_policy_map: Vec<PolicyEntry<ServiceTypeHealthPolicyInput>>,
}

/// Health policy for one application instance, overriding the cluster
/// policy for that application and its children.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationHealthPolicy {
    pub consider_warning_as_error: bool,
    pub max_percent_unhealthy_deployed_applications: Percentage,
    pub default_service_type_health_policy: ServiceTypeHealthPolicy,
    #[serde(skip_serializing_if = "PolicyMap::is_empty")]
    pub service_type_health_policy_map: PolicyMap<ServiceTypeHealthPolicy>,
}

impl ApplicationHealthPolicy {
    pub fn new(input: ApplicationHealthPolicyInput) -> Result<Self> {
        let max_percent_unhealthy_deployed_applications = percentage(
            input.max_percent_unhealthy_deployed_applications,
            DEFAULT_MAX_PERCENT_UNHEALTHY_DEPLOYED_APPLICATIONS,
            "MaxPercentUnhealthyDeployedApplications",
        )?;
        let default_service_type_health_policy = ServiceTypeHealthPolicy::new(
            &input.default_service_type_health_policy.unwrap_or_default(),
        )
        .map_err(|e| e.within("DefaultServiceTypeHealthPolicy"))?;
        let service_type_health_policy_map = PolicyMap::build_with(
            entries(input.service_type_health_policy_map),
            |raw| ServiceTypeHealthPolicy::new(&raw),
        )
        .map_err(|e| e.within("ServiceTypeHealthPolicyMap"))?;

        Ok(Self {
            consider_warning_as_error: input.consider_warning_as_error.unwrap_or(false),
            max_percent_unhealthy_deployed_applications,
            default_service_type_health_policy,
            service_type_health_policy_map,
        })
    }
}

/// Application instance name to its health policy.
pub type ApplicationHealthPolicyMap = PolicyMap<ApplicationHealthPolicy>;

/// Wrapper the wire format places around the application policy map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationHealthPolicies {
    #[serde(rename = "ApplicationHealthPolicyMap")]
    pub application_health_policy_map: ApplicationHealthPolicyMap,
}

impl ApplicationHealthPolicies {
    pub fn new(raw: Vec<(String, ApplicationHealthPolicyInput)>) -> Result<Self> {
        let application_health_policy_map =
            PolicyMap::build_with(raw, ApplicationHealthPolicy::new)
                .map_err(|e| e.within("ApplicationHealthPolicyMap"))?;
        Ok(Self {
            application_health_policy_map,
        })
    }
}
