use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::ValidationErrorKind;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;
const MS_PER_WEEK: u64 = 7 * MS_PER_DAY;
// Calendar units use the fixed lengths the orchestrator applies.
const MS_PER_MONTH: u64 = 30 * MS_PER_DAY;
const MS_PER_YEAR: u64 = 365 * MS_PER_DAY;

/// A non-negative span of time with millisecond resolution.
///
/// Serialized as a decimal millisecond string, which [`UpgradeDuration::parse`]
/// reads back to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UpgradeDuration(u64);

impl UpgradeDuration {
    pub const ZERO: UpgradeDuration = UpgradeDuration(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn to_std(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.0)
    }

    /// Parse a duration supplied either as an ISO 8601 literal (`PT30M`)
    /// or as a whole number of milliseconds (`1800000`).
    ///
    /// ISO 8601 is tried first. Only when the input is not ISO 8601 syntax
    /// is it read as milliseconds. Empty or blank input is `Ok(None)`:
    /// unset, which is distinct from zero.
    pub fn parse(raw: &str) -> Result<Option<Self>, ValidationErrorKind> {
        let s = raw.trim();
        if s.is_empty() {
            return Ok(None);
        }

        match parse_iso8601(s) {
            Ok(ms) => return Ok(Some(Self(ms))),
            Err(IsoError::Negative) => {
                return Err(ValidationErrorKind::NegativeDuration(raw.to_string()));
            }
            Err(IsoError::Overflow) => {
                return Err(ValidationErrorKind::DurationOverflow(raw.to_string()));
            }
            Err(IsoError::Syntax) => {}
        }

        parse_millis(s, raw).map(|ms| Some(Self(ms)))
    }

    /// Parse an optional raw value; `None` and blank input are both unset.
    pub fn parse_opt(raw: Option<&str>) -> Result<Option<Self>, ValidationErrorKind> {
        match raw {
            Some(s) => Self::parse(s),
            None => Ok(None),
        }
    }
}

impl fmt::Display for UpgradeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for UpgradeDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<UpgradeDuration> for std::time::Duration {
    fn from(d: UpgradeDuration) -> Self {
        d.to_std()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum IsoError {
    /// Not ISO 8601 duration syntax at all
    Syntax,
    Negative,
    Overflow,
}

/// Base-10 millisecond count with an optional sign.
fn parse_millis(s: &str, raw: &str) -> Result<u64, ValidationErrorKind> {
    let (negative, digits) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationErrorKind::InvalidDurationFormat(raw.to_string()));
    }

    // All digits, so the only possible parse failure is overflow.
    let value: u64 = digits
        .parse()
        .map_err(|_| ValidationErrorKind::DurationOverflow(raw.to_string()))?;
    if negative && value != 0 {
        return Err(ValidationErrorKind::NegativeDuration(raw.to_string()));
    }
    Ok(value)
}

/// `[-]P[nY][nM][nW][nD][T[nH][nM][n[.f]S]]`
///
/// Designators are case-sensitive and must appear in order, each at most
/// once. Only the seconds component may carry a fraction; digits past
/// millisecond precision are truncated.
fn parse_iso8601(s: &str) -> Result<u64, IsoError> {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s),
    };
    let rest = rest.strip_prefix('P').ok_or(IsoError::Syntax)?;

    let (date, time) = match rest.split_once('T') {
        Some((d, t)) => {
            if t.is_empty() {
                return Err(IsoError::Syntax);
            }
            (d, Some(t))
        }
        None => (rest, None),
    };

    let mut components = Vec::new();
    scan_components(date, &['Y', 'M', 'W', 'D'], false, &mut components)?;
    if let Some(t) = time {
        scan_components(t, &['H', 'M', 'S'], true, &mut components)?;
    }
    if components.is_empty() {
        return Err(IsoError::Syntax);
    }

    let mut total: u64 = 0;
    let mut any_negative = false;
    for c in &components {
        let ms = c.millis()?;
        if c.negative && ms != 0 {
            any_negative = true;
        }
        total = total.checked_add(ms).ok_or(IsoError::Overflow)?;
    }

    if (negative || any_negative) && total != 0 {
        return Err(IsoError::Negative);
    }
    Ok(total)
}

struct Component<'a> {
    negative: bool,
    whole: &'a str,
    fraction: &'a str,
    unit_ms: u64,
}

impl Component<'_> {
    fn millis(&self) -> Result<u64, IsoError> {
        let whole: u64 = self.whole.parse().map_err(|_| IsoError::Overflow)?;
        let mut ms = whole.checked_mul(self.unit_ms).ok_or(IsoError::Overflow)?;
        if !self.fraction.is_empty() {
            // Seconds only: first three fractional digits are milliseconds.
            let frac: String = self.fraction.chars().chain("000".chars()).take(3).collect();
            let frac_ms: u64 = frac.parse().map_err(|_| IsoError::Syntax)?;
            ms = ms.checked_add(frac_ms).ok_or(IsoError::Overflow)?;
        }
        Ok(ms)
    }
}

fn unit_millis(designator: char, time: bool) -> u64 {
    match (designator, time) {
        ('Y', false) => MS_PER_YEAR,
        ('M', false) => MS_PER_MONTH,
        ('W', false) => MS_PER_WEEK,
        ('D', false) => MS_PER_DAY,
        ('H', true) => MS_PER_HOUR,
        ('M', true) => MS_PER_MINUTE,
        _ => MS_PER_SECOND,
    }
}

fn scan_components<'a>(
    mut s: &'a str,
    designators: &[char],
    time: bool,
    out: &mut Vec<Component<'a>>,
) -> Result<(), IsoError> {
    // Index of the next designator allowed; enforces order and uniqueness.
    let mut next = 0;
    while !s.is_empty() {
        let (negative, body) = match s.strip_prefix('-') {
            Some(b) => (true, b),
            None => (false, s),
        };
        let end = body
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
            .ok_or(IsoError::Syntax)?;
        let number = &body[..end];
        let designator = body[end..].chars().next().ok_or(IsoError::Syntax)?;

        let pos = designators[next..]
            .iter()
            .position(|&d| d == designator)
            .ok_or(IsoError::Syntax)?;
        next += pos + 1;

        let (whole, fraction) = match number.split_once(['.', ',']) {
            Some((w, f)) => (w, Some(f)),
            None => (number, None),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IsoError::Syntax);
        }
        if let Some(f) = fraction {
            let is_seconds = time && designator == 'S';
            if !is_seconds || f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) {
                return Err(IsoError::Syntax);
            }
        }
        let fraction = fraction.unwrap_or_default();

        out.push(Component {
            negative,
            whole,
            fraction,
            unit_ms: unit_millis(designator, time),
        });
        s = &body[end + designator.len_utf8()..];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(raw: &str) -> u64 {
        UpgradeDuration::parse(raw).unwrap().unwrap().as_millis()
    }

    #[test]
    fn iso8601_time_components() {
        assert_eq!(ms("PT30S"), 30_000);
        assert_eq!(ms("PT30M"), 1_800_000);
        assert_eq!(ms("PT1H"), 3_600_000);
        assert_eq!(ms("PT0H2M0S"), 120_000);
        assert_eq!(ms("PT1H30M15S"), 5_415_000);
        assert_eq!(ms("PT1.5S"), 1_500);
        assert_eq!(ms("PT0.0015S"), 1);
        assert_eq!(ms("PT2,25S"), 2_250);
    }

    #[test]
    fn iso8601_date_components() {
        assert_eq!(ms("P1D"), 86_400_000);
        assert_eq!(ms("P1W"), 604_800_000);
        assert_eq!(ms("P1DT1H"), 90_000_000);
        assert_eq!(ms("P1M"), 30 * 86_400_000);
        assert_eq!(ms("P1Y"), 365 * 86_400_000);
        assert_eq!(ms("P10675199DT02H48M05.4775807S"), 922_337_203_685_477);
    }

    #[test]
    fn bare_integer_is_milliseconds() {
        assert_eq!(ms("0"), 0);
        assert_eq!(ms("30000"), 30_000);
        assert_eq!(ms("+15"), 15);
        assert_eq!(ms("  250  "), 250);
        assert_eq!(ms("-0"), 0);
    }

    #[test]
    fn empty_is_unset_not_zero() {
        assert_eq!(UpgradeDuration::parse("").unwrap(), None);
        assert_eq!(UpgradeDuration::parse("   ").unwrap(), None);
        assert_eq!(UpgradeDuration::parse_opt(None).unwrap(), None);
        assert_eq!(
            UpgradeDuration::parse("0").unwrap(),
            Some(UpgradeDuration::ZERO)
        );
    }

    #[test]
    fn malformed_input_is_rejected() {
        for raw in ["P", "PT", "PT5", "P5H", "PT5D", "pt5s", "5s", "abc", "PT1M1H", "P1DD", "P1.5D", "1.5", "PT.5S"] {
            assert_eq!(
                UpgradeDuration::parse(raw),
                Err(ValidationErrorKind::InvalidDurationFormat(raw.to_string())),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn negative_values_are_rejected() {
        for raw in ["-1", "-PT5S", "PT-5S", "P1DT-1H"] {
            assert_eq!(
                UpgradeDuration::parse(raw),
                Err(ValidationErrorKind::NegativeDuration(raw.to_string())),
                "input {raw:?}"
            );
        }
        assert_eq!(ms("-PT0S"), 0);
    }

    #[test]
    fn overflow_is_rejected() {
        for raw in ["18446744073709551616", "P999999999999999999Y", "PT99999999999999999999S"] {
            assert_eq!(
                UpgradeDuration::parse(raw),
                Err(ValidationErrorKind::DurationOverflow(raw.to_string())),
                "input {raw:?}"
            );
        }
        assert_eq!(ms("18446744073709551615"), u64::MAX);
    }

    #[test]
    fn serializes_as_millisecond_string() {
        let d = UpgradeDuration::parse("PT1M").unwrap().unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"60000\"");
        assert_eq!(d.to_std(), std::time::Duration::from_secs(60));
    }
}
