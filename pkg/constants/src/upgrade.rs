//! Upgrade request constants.

/// Largest accepted `UpgradeReplicaSetCheckTimeoutInSeconds` (u32::MAX).
pub const DEFAULT_MAX_REPLICA_SET_CHECK_TIMEOUT_SECS: u64 = u32::MAX as u64;

/// The bound as written in the REST API reference. It is ten times
/// larger than an unsigned 32-bit value can hold, so it is never used as
/// a default; callers may opt into it explicitly.
pub const DOCUMENTED_MAX_REPLICA_SET_CHECK_TIMEOUT_SECS: u64 = 42_949_672_925;

// ─── Orchestrator-side monitoring defaults ────────────────────────────────
//
// Applied by the cluster when a duration is left unset. Never sent on the
// wire; used only to report the effective value.

pub const DEFAULT_HEALTH_CHECK_WAIT_MS: u64 = 0;

/// Two minutes.
pub const DEFAULT_HEALTH_CHECK_STABLE_MS: u64 = 120_000;

/// Ten minutes.
pub const DEFAULT_HEALTH_CHECK_RETRY_TIMEOUT_MS: u64 = 600_000;

/// Largest timespan the orchestrator represents, in whole milliseconds.
pub const INFINITE_TIMEOUT_MS: u64 = 922_337_203_685_477;

pub const DEFAULT_UPGRADE_TIMEOUT_MS: u64 = INFINITE_TIMEOUT_MS;

pub const DEFAULT_UPGRADE_DOMAIN_TIMEOUT_MS: u64 = INFINITE_TIMEOUT_MS;
