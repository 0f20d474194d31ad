use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseEnumError;

fn parse_variant<T: Copy + fmt::Display>(
    kind: &'static str,
    all: &[T],
    s: &str,
) -> Result<T, ParseEnumError> {
    let s = s.trim();
    all.iter()
        .copied()
        .find(|v| v.to_string().eq_ignore_ascii_case(s))
        .ok_or_else(|| ParseEnumError {
            kind,
            value: s.to_string(),
            expected: all
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

// --- Upgrade kind ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum UpgradeKind {
    Invalid,
    #[default]
    Rolling,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 2] = [UpgradeKind::Invalid, UpgradeKind::Rolling];
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeKind::Invalid => write!(f, "Invalid"),
            UpgradeKind::Rolling => write!(f, "Rolling"),
        }
    }
}

impl FromStr for UpgradeKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("upgrade kind", &Self::ALL, s)
    }
}

// --- Rolling upgrade mode ---

/// How health is monitored while the upgrade walks upgrade domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum UpgradeMode {
    Invalid,
    /// Proceed through upgrade domains without health checks
    #[default]
    UnmonitoredAuto,
    /// Pause after every upgrade domain until resumed manually
    UnmonitoredManual,
    /// Evaluate health policies and apply the failure action on violation
    Monitored,
}

impl UpgradeMode {
    pub const ALL: [UpgradeMode; 4] = [
        UpgradeMode::Invalid,
        UpgradeMode::UnmonitoredAuto,
        UpgradeMode::UnmonitoredManual,
        UpgradeMode::Monitored,
    ];
}

impl fmt::Display for UpgradeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeMode::Invalid => write!(f, "Invalid"),
            UpgradeMode::UnmonitoredAuto => write!(f, "UnmonitoredAuto"),
            UpgradeMode::UnmonitoredManual => write!(f, "UnmonitoredManual"),
            UpgradeMode::Monitored => write!(f, "Monitored"),
        }
    }
}

impl FromStr for UpgradeMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("upgrade mode", &Self::ALL, s)
    }
}

// --- Upgrade sort order ---

/// Order in which the upgrade proceeds through upgrade domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum UpgradeSortOrder {
    Invalid,
    #[default]
    Default,
    Numeric,
    Lexicographical,
    ReverseNumeric,
    ReverseLexicographical,
}

impl UpgradeSortOrder {
    pub const ALL: [UpgradeSortOrder; 6] = [
        UpgradeSortOrder::Invalid,
        UpgradeSortOrder::Default,
        UpgradeSortOrder::Numeric,
        UpgradeSortOrder::Lexicographical,
        UpgradeSortOrder::ReverseNumeric,
        UpgradeSortOrder::ReverseLexicographical,
    ];
}

impl fmt::Display for UpgradeSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeSortOrder::Invalid => write!(f, "Invalid"),
            UpgradeSortOrder::Default => write!(f, "Default"),
            UpgradeSortOrder::Numeric => write!(f, "Numeric"),
            UpgradeSortOrder::Lexicographical => write!(f, "Lexicographical"),
            UpgradeSortOrder::ReverseNumeric => write!(f, "ReverseNumeric"),
            UpgradeSortOrder::ReverseLexicographical => write!(f, "ReverseLexicographical"),
        }
    }
}

impl FromStr for UpgradeSortOrder {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("sort order", &Self::ALL, s)
    }
}

// --- Failure action ---

/// Compensating action when a monitored upgrade violates its policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FailureAction {
    Invalid,
    /// Start rolling back automatically
    #[default]
    Rollback,
    /// Switch to `UnmonitoredManual` mode
    Manual,
}

impl FailureAction {
    pub const ALL: [FailureAction; 3] = [
        FailureAction::Invalid,
        FailureAction::Rollback,
        FailureAction::Manual,
    ];
}

impl fmt::Display for FailureAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureAction::Invalid => write!(f, "Invalid"),
            FailureAction::Rollback => write!(f, "Rollback"),
            FailureAction::Manual => write!(f, "Manual"),
        }
    }
}

impl FromStr for FailureAction {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("failure action", &Self::ALL, s)
    }
}
