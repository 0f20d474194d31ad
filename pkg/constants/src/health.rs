//! Health policy threshold constants.

/// Upper bound (inclusive) of every percentage threshold.
pub const MAX_PERCENTAGE: u8 = 100;

// ─── Cluster health policy ────────────────────────────────────────────────

pub const DEFAULT_MAX_PERCENT_UNHEALTHY_NODES: u8 = 0;

pub const DEFAULT_MAX_PERCENT_UNHEALTHY_APPLICATIONS: u8 = 0;

// ─── Cluster upgrade (delta) health policy ────────────────────────────────

/// Tolerated node health degradation across the whole cluster.
pub const DEFAULT_MAX_PERCENT_DELTA_UNHEALTHY_NODES: u8 = 10;

/// Tolerated node health degradation within completed upgrade domains.
pub const DEFAULT_MAX_PERCENT_UPGRADE_DOMAIN_DELTA_UNHEALTHY_NODES: u8 = 15;

// ─── Application health policy ────────────────────────────────────────────

pub const DEFAULT_MAX_PERCENT_UNHEALTHY_DEPLOYED_APPLICATIONS: u8 = 0;

pub const DEFAULT_MAX_PERCENT_UNHEALTHY_SERVICES: u8 = 0;

pub const DEFAULT_MAX_PERCENT_UNHEALTHY_PARTITIONS_PER_SERVICE: u8 = 0;

pub const DEFAULT_MAX_PERCENT_UNHEALTHY_REPLICAS_PER_PARTITION: u8 = 0;
