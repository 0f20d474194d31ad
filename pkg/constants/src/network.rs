//! Network-related constants.

/// Default cluster management endpoint (HTTP gateway).
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:19080";

/// Path of the start-cluster-upgrade operation.
pub const UPGRADE_PATH: &str = "/$/Upgrade";

/// REST API version sent with every upgrade request.
pub const API_VERSION: &str = "6.0";

/// Server-side timeout applied when the caller does not supply one.
pub const DEFAULT_SERVER_TIMEOUT_SECS: u64 = 60;
