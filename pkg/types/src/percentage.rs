use pkg_constants::health::MAX_PERCENTAGE;
use serde::Serialize;
use std::fmt;

use crate::error::ValidationErrorKind;

/// Tolerated unhealthy fraction, an exact integer in `[0, 100]`.
///
/// Stored as given. Rounding during health evaluation happens on the
/// cluster, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Build a threshold from a trusted constant. Panics on a value above 100.
    pub(crate) const fn of(value: u8) -> Self {
        assert!(value <= MAX_PERCENTAGE, "percentage above 100");
        Self(value)
    }

    pub fn new(value: i64) -> Result<Self, ValidationErrorKind> {
        match u8::try_from(value) {
            Ok(v) if v <= MAX_PERCENTAGE => Ok(Self(v)),
            _ => Err(ValidationErrorKind::PercentageOutOfRange(value)),
        }
    }

    /// Validate an optional caller value, falling back to `default` when
    /// unset.
    pub fn resolve(raw: Option<i64>, default: Percentage) -> Result<Self, ValidationErrorKind> {
        match raw {
            Some(v) => Self::new(v),
            None => Ok(default),
        }
    }

    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(Percentage::new(0).unwrap().value(), 0);
        assert_eq!(Percentage::new(100).unwrap().value(), 100);
        assert_eq!(
            Percentage::new(101),
            Err(ValidationErrorKind::PercentageOutOfRange(101))
        );
        assert_eq!(
            Percentage::new(-1),
            Err(ValidationErrorKind::PercentageOutOfRange(-1))
        );
        assert_eq!(
            Percentage::new(i64::MAX),
            Err(ValidationErrorKind::PercentageOutOfRange(i64::MAX))
        );
    }

    #[test]
    fn unset_uses_field_default() {
        let default = Percentage::of(15);
        assert_eq!(Percentage::resolve(None, default).unwrap().value(), 15);
        assert_eq!(Percentage::resolve(Some(0), default).unwrap().value(), 0);
        assert!(Percentage::resolve(Some(200), default).is_err());
    }

    #[test]
    fn unset_never_revalidates_the_default() {
        let default = Percentage::new(100).unwrap();
        assert_eq!(Percentage::resolve(None, default), Ok(default));
        assert_eq!(
            Percentage::resolve(Some(150), default),
            Err(ValidationErrorKind::PercentageOutOfRange(150))
        );
    }

    #[test]
    fn serializes_as_plain_integer() {
        assert_eq!(serde_json::to_string(&Percentage::of(42)).unwrap(), "42");
        assert_eq!(Percentage::of(42).to_string(), "42%");
    }
}
