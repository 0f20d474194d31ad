//! Filesystem path constants.

/// Default config file path for `upgradectl`.
pub const DEFAULT_CLI_CONFIG: &str = "/etc/upgradectl/config.yaml";
