//! Validation engine for cluster upgrade requests.
//!
//! Turns loosely typed caller input (strings, optional numbers, flat
//! key/value lists) into a [`ClusterUpgradeRequest`] whose nested health
//! policies have all been checked. Nothing here performs I/O.

pub mod builder;
pub mod config;
pub mod duration;
pub mod error;
pub mod health;
pub mod monitoring;
pub mod percentage;
pub mod policy_map;
pub mod request;
pub mod upgrade;
pub mod validate;

pub use builder::{ClusterUpgradeInput, UpgradeRequestBuilder};
pub use duration::UpgradeDuration;
pub use error::{ParseEnumError, ValidationError, ValidationErrorKind};
pub use health::{
    ApplicationHealthPolicies, ApplicationHealthPolicy, ApplicationHealthPolicyInput,
    ClusterHealthPolicy, ClusterHealthPolicyInput, ClusterUpgradeHealthPolicy,
    ServiceTypeHealthPolicy, ServiceTypeHealthPolicyInput,
};
pub use monitoring::{MonitoringPolicy, MonitoringPolicyInput};
pub use percentage::Percentage;
pub use policy_map::{HealthPolicyMap, PolicyEntry, PolicyMap};
pub use request::ClusterUpgradeRequest;
pub use upgrade::{FailureAction, UpgradeKind, UpgradeMode, UpgradeSortOrder};
