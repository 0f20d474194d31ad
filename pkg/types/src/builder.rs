use pkg_constants::upgrade::DEFAULT_MAX_REPLICA_SET_CHECK_TIMEOUT_SECS;
use tracing::debug;

use crate::error::Result;
use crate::health::{
    ApplicationHealthPolicies, ApplicationHealthPolicyInput, ClusterHealthPolicy,
    ClusterHealthPolicyInput, ClusterUpgradeHealthPolicy,
};
use crate::monitoring::{MonitoringPolicy, MonitoringPolicyInput};
use crate::request::ClusterUpgradeRequest;
use crate::upgrade::{FailureAction, UpgradeKind, UpgradeMode, UpgradeSortOrder};
use crate::validate::validate_replica_set_check_timeout;

/// Every caller-supplied field of a cluster upgrade, unvalidated.
///
/// `None` always means "not supplied"; defaults are resolved by the
/// component that consumes the field.
#[derive(Debug, Clone, Default)]
pub struct ClusterUpgradeInput {
    pub code_version: Option<String>,
    pub config_version: Option<String>,
    pub upgrade_kind: Option<UpgradeKind>,
    pub rolling_upgrade_mode: Option<UpgradeMode>,
    pub upgrade_replica_set_check_timeout: Option<i64>,
    pub force_restart: Option<bool>,
    pub sort_order: Option<UpgradeSortOrder>,
    pub monitoring: MonitoringPolicyInput,
    pub cluster_health: ClusterHealthPolicyInput,
    pub enable_delta_health_evaluation: Option<bool>,
    pub max_percent_delta_unhealthy_nodes: Option<i64>,
    pub max_percent_upgrade_domain_delta_unhealthy_nodes: Option<i64>,
    /// `(application instance name, policy)` in caller order.
    pub application_health_policies: Vec<(String, ApplicationHealthPolicyInput)>,
}

/// Assembles a [`ClusterUpgradeRequest`] from raw input.
///
/// Validation runs in a fixed order and stops at the first failure:
/// durations, percentages, health policy maps, then cross-field checks.
/// Whether `Monitored` mode comes with a monitoring policy, or delta
/// evaluation with delta thresholds, is left to the cluster.
#[derive(Debug, Clone)]
pub struct UpgradeRequestBuilder {
    input: ClusterUpgradeInput,
    max_replica_set_check_timeout: u64,
}

impl UpgradeRequestBuilder {
    pub fn new() -> Self {
        Self::from_input(ClusterUpgradeInput::default())
    }

    pub fn from_input(input: ClusterUpgradeInput) -> Self {
        Self {
            input,
            max_replica_set_check_timeout: DEFAULT_MAX_REPLICA_SET_CHECK_TIMEOUT_SECS,
        }
    }

    /// Override the inclusive upper bound for the replica set check timeout.
    pub fn max_replica_set_check_timeout(mut self, secs: u64) -> Self {
        self.max_replica_set_check_timeout = secs;
        self
    }

    pub fn code_version(mut self, version: impl Into<String>) -> Self {
        self.input.code_version = Some(version.into());
        self
    }

    pub fn config_version(mut self, version: impl Into<String>) -> Self {
        self.input.config_version = Some(version.into());
        self
    }

    pub fn upgrade_kind(mut self, kind: UpgradeKind) -> Self {
        self.input.upgrade_kind = Some(kind);
        self
    }

    pub fn rolling_upgrade_mode(mut self, mode: UpgradeMode) -> Self {
        self.input.rolling_upgrade_mode = Some(mode);
        self
    }

    pub fn upgrade_replica_set_check_timeout(mut self, secs: i64) -> Self {
        self.input.upgrade_replica_set_check_timeout = Some(secs);
        self
    }

    pub fn force_restart(mut self, force: bool) -> Self {
        self.input.force_restart = Some(force);
        self
    }

    pub fn sort_order(mut self, order: UpgradeSortOrder) -> Self {
        self.input.sort_order = Some(order);
        self
    }

    pub fn failure_action(mut self, action: FailureAction) -> Self {
        self.input.monitoring.failure_action = Some(action);
        self
    }

    pub fn health_check_wait_duration(mut self, raw: impl Into<String>) -> Self {
        self.input.monitoring.health_check_wait_duration = Some(raw.into());
        self
    }

    pub fn health_check_stable_duration(mut self, raw: impl Into<String>) -> Self {
        self.input.monitoring.health_check_stable_duration = Some(raw.into());
        self
    }

    pub fn health_check_retry_timeout(mut self, raw: impl Into<String>) -> Self {
        self.input.monitoring.health_check_retry_timeout = Some(raw.into());
        self
    }

    pub fn upgrade_timeout(mut self, raw: impl Into<String>) -> Self {
        self.input.monitoring.upgrade_timeout = Some(raw.into());
        self
    }

    pub fn upgrade_domain_timeout(mut self, raw: impl Into<String>) -> Self {
        self.input.monitoring.upgrade_domain_timeout = Some(raw.into());
        self
    }

    pub fn consider_warning_as_error(mut self, enabled: bool) -> Self {
        self.input.cluster_health.consider_warning_as_error = Some(enabled);
        self
    }

    pub fn max_percent_unhealthy_nodes(mut self, percent: i64) -> Self {
        self.input.cluster_health.max_percent_unhealthy_nodes = Some(percent);
        self
    }

    pub fn max_percent_unhealthy_applications(mut self, percent: i64) -> Self {
        self.input.cluster_health.max_percent_unhealthy_applications = Some(percent);
        self
    }

    pub fn application_type_health_policy(mut self, type_name: impl Into<String>, percent: i64) -> Self {
        self.input
            .cluster_health
            .application_type_health_policy_map
            .push((type_name.into(), percent));
        self
    }

    pub fn enable_delta_health_evaluation(mut self, enabled: bool) -> Self {
        self.input.enable_delta_health_evaluation = Some(enabled);
        self
    }

    pub fn max_percent_delta_unhealthy_nodes(mut self, percent: i64) -> Self {
        self.input.max_percent_delta_unhealthy_nodes = Some(percent);
        self
    }

    pub fn max_percent_upgrade_domain_delta_unhealthy_nodes(mut self, percent: i64) -> Self {
        self.input.max_percent_upgrade_domain_delta_unhealthy_nodes = Some(percent);
        self
    }

    pub fn application_health_policy(
        mut self,
        application: impl Into<String>,
        policy: ApplicationHealthPolicyInput,
    ) -> Self {
        self.input
            .application_health_policies
            .push((application.into(), policy));
        self
    }

    pub fn build(self) -> Result<ClusterUpgradeRequest> {
        let max_timeout = self.max_replica_set_check_timeout;
        let input = self.input;

        // 1. Durations
        let monitoring_policy =
            MonitoringPolicy::new(&input.monitoring).map_err(|e| e.within("MonitoringPolicy"))?;

        // 2. Percentages
        let (max_percent_unhealthy_nodes, max_percent_unhealthy_applications) =
            ClusterHealthPolicy::thresholds(&input.cluster_health)
                .map_err(|e| e.within("ClusterHealthPolicy"))?;
        let cluster_upgrade_health_policy = ClusterUpgradeHealthPolicy::new(
            input.max_percent_delta_unhealthy_nodes,
            input.max_percent_upgrade_domain_delta_unhealthy_nodes,
        )
        .map_err(|e| e.within("ClusterUpgradeHealthPolicy"))?;

        // 3. Health policy maps
        let application_type_health_policy_map =
            ClusterHealthPolicy::type_map(input.cluster_health.application_type_health_policy_map)
                .map_err(|e| e.within("ClusterHealthPolicy"))?;
        let application_health_policy_map =
            ApplicationHealthPolicies::new(input.application_health_policies)?;

        // 4. Cross-field checks
        let upgrade_replica_set_check_timeout = input
            .upgrade_replica_set_check_timeout
            .map(|secs| {
                validate_replica_set_check_timeout(secs, max_timeout)
                    .map_err(|kind| kind.at("UpgradeReplicaSetCheckTimeoutInSeconds"))
            })
            .transpose()?;

        let request = ClusterUpgradeRequest {
            code_version: input.code_version,
            config_version: input.config_version,
            upgrade_kind: input.upgrade_kind.unwrap_or_default(),
            rolling_upgrade_mode: input.rolling_upgrade_mode.unwrap_or_default(),
            upgrade_replica_set_check_timeout,
            force_restart: input.force_restart,
            sort_order: input.sort_order.unwrap_or_default(),
            monitoring_policy,
            cluster_health_policy: ClusterHealthPolicy::from_parts(
                input.cluster_health.consider_warning_as_error,
                max_percent_unhealthy_nodes,
                max_percent_unhealthy_applications,
                application_type_health_policy_map,
            ),
            enable_delta_health_evaluation: input.enable_delta_health_evaluation,
            cluster_upgrade_health_policy,
            application_health_policy_map,
        };

        debug!(
            code_version = ?request.code_version,
            config_version = ?request.config_version,
            mode = %request.rolling_upgrade_mode,
            sort_order = %request.sort_order,
            application_policies = request.application_health_policy_map.application_health_policy_map.len(),
            "Assembled cluster upgrade request"
        );
        Ok(request)
    }
}

impl Default for UpgradeRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
