use clap::Args;
use pkg_types::{
    ApplicationHealthPolicyInput, ClusterHealthPolicyInput, ClusterUpgradeInput, FailureAction,
    MonitoringPolicyInput, UpgradeKind, UpgradeMode, UpgradeSortOrder,
};

/// Arguments of `start-cluster-upgrade`.
///
/// Durations accept an ISO 8601 duration (`PT30M`) or a number of
/// milliseconds. Percentages are whole numbers between 0 and 100.
#[derive(Args, Debug, Default)]
pub struct StartClusterUpgradeArgs {
    /// The cluster code version
    #[arg(long)]
    pub code_version: Option<String>,

    /// The cluster configuration version
    #[arg(long)]
    pub config_version: Option<String>,

    /// Invalid | Rolling
    #[arg(long)]
    pub upgrade_kind: Option<UpgradeKind>,

    /// Invalid | UnmonitoredAuto | UnmonitoredManual | Monitored
    #[arg(long)]
    pub rolling_upgrade_mode: Option<UpgradeMode>,

    /// Seconds to block an upgrade domain on availability loss before
    /// proceeding anyway
    #[arg(long, allow_negative_numbers = true)]
    pub upgrade_replica_set_check_timeout: Option<i64>,

    /// Restart processes even when only configuration or data changes
    #[arg(long)]
    pub force_restart: Option<bool>,

    /// Invalid | Default | Numeric | Lexicographical | ReverseNumeric |
    /// ReverseLexicographical
    #[arg(long)]
    pub sort_order: Option<UpgradeSortOrder>,

    /// Invalid | Rollback | Manual
    #[arg(long)]
    pub failure_action: Option<FailureAction>,

    /// Wait after completing an upgrade domain before applying health policies
    #[arg(long, allow_hyphen_values = true)]
    pub health_check_wait_duration: Option<String>,

    /// How long the cluster must stay healthy before moving on
    #[arg(long, allow_hyphen_values = true)]
    pub health_check_stable_duration: Option<String>,

    /// How long to retry health evaluation before the failure action runs
    #[arg(long, allow_hyphen_values = true)]
    pub health_check_retry_timeout: Option<String>,

    /// Time the overall upgrade has to complete
    #[arg(long, allow_hyphen_values = true)]
    pub upgrade_timeout: Option<String>,

    /// Time each upgrade domain has to complete
    #[arg(long, allow_hyphen_values = true)]
    pub upgrade_domain_timeout: Option<String>,

    /// Treat health warnings with the same severity as errors
    #[arg(long)]
    pub consider_warning_as_error: Option<bool>,

    /// Maximum percentage of unhealthy nodes before reporting an error
    #[arg(long, allow_negative_numbers = true)]
    pub max_percent_unhealthy_nodes: Option<i64>,

    /// Maximum percentage of unhealthy applications before reporting an error
    #[arg(long, allow_negative_numbers = true)]
    pub max_percent_unhealthy_applications: Option<i64>,

    /// Per application type override, as TYPE=PERCENT (repeatable)
    #[arg(long = "application-type-health-policy", value_name = "TYPE=PERCENT", value_parser = parse_type_percent)]
    pub application_type_health_policies: Vec<(String, i64)>,

    /// Evaluate health deltas instead of absolute health after each upgrade domain
    #[arg(long)]
    pub enable_delta_health_evaluation: Option<bool>,

    /// Maximum node health degradation across the cluster (default 10)
    #[arg(long, allow_negative_numbers = true)]
    pub max_percent_delta_unhealthy_nodes: Option<i64>,

    /// Maximum node health degradation per upgrade domain (default 15)
    #[arg(long, allow_negative_numbers = true)]
    pub max_percent_upgrade_domain_delta_unhealthy_nodes: Option<i64>,

    /// Per application override, as APPLICATION=JSON (repeatable)
    #[arg(long = "application-health-policy", value_name = "APPLICATION=JSON", value_parser = parse_application_policy)]
    pub application_health_policies: Vec<(String, ApplicationHealthPolicyInput)>,

    /// Server-side timeout in seconds (default 60)
    #[arg(long)]
    pub server_timeout: Option<u64>,

    /// Inclusive upper bound for --upgrade-replica-set-check-timeout
    #[arg(long)]
    pub max_replica_set_check_timeout: Option<u64>,

    /// Validate and print the request body without sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl StartClusterUpgradeArgs {
    /// Move the raw upgrade fields into the engine's input shape.
    pub fn to_input(&self) -> ClusterUpgradeInput {
        ClusterUpgradeInput {
            code_version: self.code_version.clone(),
            config_version: self.config_version.clone(),
            upgrade_kind: self.upgrade_kind,
            rolling_upgrade_mode: self.rolling_upgrade_mode,
            upgrade_replica_set_check_timeout: self.upgrade_replica_set_check_timeout,
            force_restart: self.force_restart,
            sort_order: self.sort_order,
            monitoring: MonitoringPolicyInput {
                failure_action: self.failure_action,
                health_check_wait_duration: self.health_check_wait_duration.clone(),
                health_check_stable_duration: self.health_check_stable_duration.clone(),
                health_check_retry_timeout: self.health_check_retry_timeout.clone(),
                upgrade_timeout: self.upgrade_timeout.clone(),
                upgrade_domain_timeout: self.upgrade_domain_timeout.clone(),
            },
            cluster_health: ClusterHealthPolicyInput {
                consider_warning_as_error: self.consider_warning_as_error,
                max_percent_unhealthy_nodes: self.max_percent_unhealthy_nodes,
                max_percent_unhealthy_applications: self.max_percent_unhealthy_applications,
                application_type_health_policy_map: self.application_type_health_policies.clone(),
            },
            enable_delta_health_evaluation: self.enable_delta_health_evaluation,
            max_percent_delta_unhealthy_nodes: self.max_percent_delta_unhealthy_nodes,
            max_percent_upgrade_domain_delta_unhealthy_nodes: self
                .max_percent_upgrade_domain_delta_unhealthy_nodes,
            application_health_policies: self.application_health_policies.clone(),
        }
    }
}

/// `TYPE=PERCENT`. The type name may itself contain `=`; the last one splits.
fn parse_type_percent(s: &str) -> Result<(String, i64), String> {
    let (key, value) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected TYPE=PERCENT, got '{}'", s))?;
    let percent = value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid percentage '{}': {}", value, e))?;
    Ok((key.to_string(), percent))
}

/// `APPLICATION=JSON`. Split on the first `=`, since the JSON may hold more.
fn parse_application_policy(s: &str) -> Result<(String, ApplicationHealthPolicyInput), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected APPLICATION=JSON, got '{}'", s))?;
    let policy = serde_json::from_str(value)
        .map_err(|e| format!("invalid application health policy for '{}': {}", key, e))?;
    Ok((key.to_string(), policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: StartClusterUpgradeArgs,
    }

    fn parse(argv: &[&str]) -> StartClusterUpgradeArgs {
        let mut full = vec!["upgradectl"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn type_percent_pairs() {
        assert_eq!(parse_type_percent("CriticalType=0"), Ok(("CriticalType".to_string(), 0)));
        assert_eq!(parse_type_percent("A=B=20"), Ok(("A=B".to_string(), 20)));
        assert_eq!(parse_type_percent("=5"), Ok((String::new(), 5)));
        assert!(parse_type_percent("CriticalType").is_err());
        assert!(parse_type_percent("CriticalType=lots").is_err());
    }

    #[test]
    fn application_policy_pairs() {
        let (key, policy) = parse_application_policy(
            r#"fabric:/Shop={"MaxPercentUnhealthyDeployedApplications": 5}"#,
        )
        .unwrap();
        assert_eq!(key, "fabric:/Shop");
        assert_eq!(policy.max_percent_unhealthy_deployed_applications, Some(5));
        assert!(parse_application_policy("fabric:/Shop").is_err());
        assert!(parse_application_policy("fabric:/Shop={not json}").is_err());
    }

    #[test]
    fn flags_map_onto_engine_input() {
        let args = parse(&[
            "--code-version",
            "1.0.0",
            "--rolling-upgrade-mode",
            "monitored",
            "--failure-action",
            "Rollback",
            "--health-check-wait-duration",
            "PT30S",
            "--max-percent-unhealthy-nodes",
            "10",
            "--application-type-health-policy",
            "A=5",
            "--application-type-health-policy",
            "B=7",
            "--upgrade-replica-set-check-timeout",
            "-1",
            "--force-restart",
            "true",
        ]);
        let input = args.to_input();

        assert_eq!(input.code_version.as_deref(), Some("1.0.0"));
        assert_eq!(input.rolling_upgrade_mode, Some(UpgradeMode::Monitored));
        assert_eq!(input.monitoring.failure_action, Some(FailureAction::Rollback));
        assert_eq!(input.monitoring.health_check_wait_duration.as_deref(), Some("PT30S"));
        assert_eq!(input.cluster_health.max_percent_unhealthy_nodes, Some(10));
        assert_eq!(
            input.cluster_health.application_type_health_policy_map,
            vec![("A".to_string(), 5), ("B".to_string(), 7)]
        );
        assert_eq!(input.upgrade_replica_set_check_timeout, Some(-1));
        assert_eq!(input.force_restart, Some(true));
        assert_eq!(input.sort_order, None);
    }

    #[test]
    fn unknown_enum_value_is_a_usage_error() {
        let result = TestCli::try_parse_from(["upgradectl", "--sort-order", "Random"]);
        assert!(result.is_err());
    }
}
