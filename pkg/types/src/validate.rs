use crate::error::ValidationErrorKind;

/// Validate a health policy map key (application type, application or
/// service type name). Keys are opaque and case-sensitive; the only local
/// rule is that they are not empty.
pub fn validate_policy_key(key: &str) -> Result<(), ValidationErrorKind> {
    if key.is_empty() {
        return Err(ValidationErrorKind::EmptyPolicyKey);
    }
    Ok(())
}

/// Validate `UpgradeReplicaSetCheckTimeoutInSeconds` against `[0, max]`.
///
/// `max` is configurable because the published bound disagrees with the
/// unsigned 32-bit type the field is documented as; see
/// `pkg_constants::upgrade`.
pub fn validate_replica_set_check_timeout(value: i64, max: u64) -> Result<u64, ValidationErrorKind> {
    match u64::try_from(value) {
        Ok(v) if v <= max => Ok(v),
        _ => Err(ValidationErrorKind::TimeoutOutOfRange { value, max }),
    }
}
