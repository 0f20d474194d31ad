use pkg_constants::upgrade::{
    DEFAULT_HEALTH_CHECK_RETRY_TIMEOUT_MS, DEFAULT_HEALTH_CHECK_STABLE_MS,
    DEFAULT_HEALTH_CHECK_WAIT_MS, DEFAULT_UPGRADE_DOMAIN_TIMEOUT_MS, DEFAULT_UPGRADE_TIMEOUT_MS,
};
use serde::Serialize;

use crate::duration::UpgradeDuration;
use crate::error::Result;
use crate::upgrade::FailureAction;

/// Raw monitoring inputs. Durations are unparsed strings, either ISO 8601
/// or a millisecond count.
#[derive(Debug, Clone, Default)]
pub struct MonitoringPolicyInput {
    pub failure_action: Option<FailureAction>,
    pub health_check_wait_duration: Option<String>,
    pub health_check_stable_duration: Option<String>,
    pub health_check_retry_timeout: Option<String>,
    pub upgrade_timeout: Option<String>,
    pub upgrade_domain_timeout: Option<String>,
}

/// Parameters for monitoring an upgrade in `Monitored` mode.
///
/// Every field may be left unset; the cluster then applies its own default
/// (see the `effective_*` accessors). No ordering between the durations is
/// checked here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MonitoringPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_action: Option<FailureAction>,
    #[serde(
        rename = "HealthCheckWaitDurationInMilliseconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub health_check_wait_duration: Option<UpgradeDuration>,
    #[serde(
        rename = "HealthCheckStableDurationInMilliseconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub health_check_stable_duration: Option<UpgradeDuration>,
    #[serde(
        rename = "HealthCheckRetryTimeoutInMilliseconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub health_check_retry_timeout: Option<UpgradeDuration>,
    #[serde(
        rename = "UpgradeTimeoutInMilliseconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub upgrade_timeout: Option<UpgradeDuration>,
    #[serde(
        rename = "UpgradeDomainTimeoutInMilliseconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub upgrade_domain_timeout: Option<UpgradeDuration>,
}

impl MonitoringPolicy {
    /// Parse each supplied duration in field order; the first failure is
    /// returned with the field's wire name.
    pub fn new(input: &MonitoringPolicyInput) -> Result<Self> {
        let parse = |raw: &Option<String>, field: &str| {
            UpgradeDuration::parse_opt(raw.as_deref()).map_err(|kind| kind.at(field))
        };

        Ok(Self {
            failure_action: input.failure_action,
            health_check_wait_duration: parse(
                &input.health_check_wait_duration,
                "HealthCheckWaitDurationInMilliseconds",
            )?,
            health_check_stable_duration: parse(
                &input.health_check_stable_duration,
                "HealthCheckStableDurationInMilliseconds",
            )?,
            health_check_retry_timeout: parse(
                &input.health_check_retry_timeout,
                "HealthCheckRetryTimeoutInMilliseconds",
            )?,
            upgrade_timeout: parse(&input.upgrade_timeout, "UpgradeTimeoutInMilliseconds")?,
            upgrade_domain_timeout: parse(
                &input.upgrade_domain_timeout,
                "UpgradeDomainTimeoutInMilliseconds",
            )?,
        })
    }

    /// True when nothing was supplied at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn effective_failure_action(&self) -> FailureAction {
        self.failure_action.unwrap_or_default()
    }

    pub fn effective_health_check_wait_duration(&self) -> UpgradeDuration {
        self.health_check_wait_duration
            .unwrap_or(UpgradeDuration::from_millis(DEFAULT_HEALTH_CHECK_WAIT_MS))
    }

    pub fn effective_health_check_stable_duration(&self) -> UpgradeDuration {
        self.health_check_stable_duration
            .unwrap_or(UpgradeDuration::from_millis(DEFAULT_HEALTH_CHECK_STABLE_MS))
    }

    pub fn effective_health_check_retry_timeout(&self) -> UpgradeDuration {
        self.health_check_retry_timeout
            .unwrap_or(UpgradeDuration::from_millis(DEFAULT_HEALTH_CHECK_RETRY_TIMEOUT_MS))
    }

    pub fn effective_upgrade_timeout(&self) -> UpgradeDuration {
        self.upgrade_timeout
            .unwrap_or(UpgradeDuration::from_millis(DEFAULT_UPGRADE_TIMEOUT_MS))
    }

    pub fn effective_upgrade_domain_timeout(&self) -> UpgradeDuration {
        self.upgrade_domain_timeout
            .unwrap_or(UpgradeDuration::from_millis(DEFAULT_UPGRADE_DOMAIN_TIMEOUT_MS))
    }
}
