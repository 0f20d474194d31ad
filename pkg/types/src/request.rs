use serde::Serialize;

use crate::builder::UpgradeRequestBuilder;
use crate::health::{ApplicationHealthPolicies, ClusterHealthPolicy, ClusterUpgradeHealthPolicy};
use crate::monitoring::MonitoringPolicy;
use crate::upgrade::{UpgradeKind, UpgradeMode, UpgradeSortOrder};

/// A validated request to start a cluster code and/or configuration
/// upgrade.
///
/// Only [`UpgradeRequestBuilder::build`] produces one, so every value held
/// here has passed validation. Serializes to the REST body expected by the
/// upgrade endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterUpgradeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) code_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) config_version: Option<String>,
    pub(crate) upgrade_kind: UpgradeKind,
    pub(crate) rolling_upgrade_mode: UpgradeMode,
    #[serde(
        rename = "UpgradeReplicaSetCheckTimeoutInSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) upgrade_replica_set_check_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) force_restart: Option<bool>,
    pub(crate) sort_order: UpgradeSortOrder,
    pub(crate) monitoring_policy: MonitoringPolicy,
    pub(crate) cluster_health_policy: ClusterHealthPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) enable_delta_health_evaluation: Option<bool>,
    pub(crate) cluster_upgrade_health_policy: ClusterUpgradeHealthPolicy,
    pub(crate) application_health_policy_map: ApplicationHealthPolicies,
}

impl ClusterUpgradeRequest {
    pub fn builder() -> UpgradeRequestBuilder {
        UpgradeRequestBuilder::new()
    }

    pub fn code_version(&self) -> Option<&str> {
        self.code_version.as_deref()
    }

    pub fn config_version(&self) -> Option<&str> {
        self.config_version.as_deref()
    }

    pub fn upgrade_kind(&self) -> UpgradeKind {
        self.upgrade_kind
    }

    pub fn rolling_upgrade_mode(&self) -> UpgradeMode {
        self.rolling_upgrade_mode
    }

    /// Seconds; `None` leaves the cluster default in place.
    pub fn upgrade_replica_set_check_timeout(&self) -> Option<u64> {
        self.upgrade_replica_set_check_timeout
    }

    pub fn force_restart(&self) -> Option<bool> {
        self.force_restart
    }

    pub fn sort_order(&self) -> UpgradeSortOrder {
        self.sort_order
    }

    /// Only acted on by the cluster in `Monitored` mode.
    pub fn monitoring_policy(&self) -> &MonitoringPolicy {
        &self.monitoring_policy
    }

    pub fn cluster_health_policy(&self) -> &ClusterHealthPolicy {
        &self.cluster_health_policy
    }

    pub fn enable_delta_health_evaluation(&self) -> Option<bool> {
        self.enable_delta_health_evaluation
    }

    /// Only acted on by the cluster when delta health evaluation is enabled.
    pub fn cluster_upgrade_health_policy(&self) -> &ClusterUpgradeHealthPolicy {
        &self.cluster_upgrade_health_policy
    }

    pub fn application_health_policies(&self) -> &ApplicationHealthPolicies {
        &self.application_health_policy_map
    }
}
