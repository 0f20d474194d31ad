//! Property tests for the input normalization rules.

use pkg_types::{
    HealthPolicyMap, Percentage, UpgradeDuration, UpgradeKind, UpgradeMode, UpgradeRequestBuilder,
    UpgradeSortOrder, ValidationErrorKind,
};
use proptest::prelude::*;

/// ISO 8601 durations whose total stays well inside u64 milliseconds.
fn iso8601_duration() -> impl Strategy<Value = String> {
    (
        proptest::option::of(0u64..100),
        proptest::option::of(0u64..1000),
        proptest::option::of(0u64..1000),
        proptest::option::of((0u64..100_000, proptest::option::of(0u32..1000))),
    )
        .prop_filter("at least one component", |(d, h, m, s)| {
            d.is_some() || h.is_some() || m.is_some() || s.is_some()
        })
        .prop_map(|(days, hours, minutes, seconds)| {
            let mut out = String::from("P");
            if let Some(d) = days {
                out.push_str(&format!("{}D", d));
            }
            if hours.is_some() || minutes.is_some() || seconds.is_some() {
                out.push('T');
                if let Some(h) = hours {
                    out.push_str(&format!("{}H", h));
                }
                if let Some(m) = minutes {
                    out.push_str(&format!("{}M", m));
                }
                match seconds {
                    Some((s, Some(frac))) => out.push_str(&format!("{}.{:03}S", s, frac)),
                    Some((s, None)) => out.push_str(&format!("{}S", s)),
                    None => {}
                }
            }
            out
        })
}

proptest! {
    #[test]
    fn valid_iso8601_parses_and_reparses_identically(raw in iso8601_duration()) {
        let parsed = UpgradeDuration::parse(&raw).unwrap().unwrap();
        let reparsed = UpgradeDuration::parse(&parsed.to_string()).unwrap().unwrap();
        prop_assert_eq!(parsed, reparsed);
    }

    #[test]
    fn bare_integer_is_exact_milliseconds(n in any::<u64>()) {
        let parsed = UpgradeDuration::parse(&n.to_string()).unwrap();
        prop_assert_eq!(parsed, Some(UpgradeDuration::from_millis(n)));
    }

    #[test]
    fn negative_integer_is_rejected(n in 1u64..=i64::MAX as u64) {
        let raw = format!("-{}", n);
        prop_assert_eq!(
            UpgradeDuration::parse(&raw),
            Err(ValidationErrorKind::NegativeDuration(raw.clone()))
        );
    }

    #[test]
    fn percentage_in_range_is_returned_unchanged(p in 0i64..=100) {
        prop_assert_eq!(Percentage::new(p).unwrap().value() as i64, p);
    }

    #[test]
    fn percentage_out_of_range_is_rejected(
        p in prop_oneof![i64::MIN..0i64, 101i64..=i64::MAX]
    ) {
        prop_assert_eq!(Percentage::new(p), Err(ValidationErrorKind::PercentageOutOfRange(p)));
    }

    #[test]
    fn distinct_keys_build_with_values_unchanged(
        entries in proptest::collection::btree_map("[A-Za-z][A-Za-z0-9]{0,12}", 0i64..=100, 0..16)
    ) {
        let raw: Vec<(String, i64)> = entries.clone().into_iter().collect();
        let map = HealthPolicyMap::build(raw).unwrap();
        prop_assert_eq!(map.len(), entries.len());
        for (key, value) in &entries {
            prop_assert_eq!(map.get(key).map(|p| p.value() as i64), Some(*value));
        }
    }

    #[test]
    fn repeated_key_is_always_rejected(
        key in "[A-Za-z][A-Za-z0-9]{0,12}",
        first in 0i64..=100,
        second in 0i64..=100,
    ) {
        let err = HealthPolicyMap::build(vec![(key.clone(), first), (key.clone(), second)])
            .unwrap_err();
        prop_assert_eq!(err.kind(), &ValidationErrorKind::DuplicateHealthPolicyKey(key));
    }

    #[test]
    fn replica_set_timeout_within_u32_is_accepted(secs in 0i64..=u32::MAX as i64) {
        let req = UpgradeRequestBuilder::new()
            .upgrade_replica_set_check_timeout(secs)
            .build()
            .unwrap();
        prop_assert_eq!(req.upgrade_replica_set_check_timeout(), Some(secs as u64));
    }
}

#[test]
fn all_defaults_hold_in_one_assembled_request() {
    let req = UpgradeRequestBuilder::new().build().unwrap();

    assert_eq!(req.upgrade_kind(), UpgradeKind::Rolling);
    assert_eq!(req.rolling_upgrade_mode(), UpgradeMode::UnmonitoredAuto);
    assert_eq!(req.sort_order(), UpgradeSortOrder::Default);
    assert_eq!(req.cluster_health_policy().max_percent_unhealthy_nodes.value(), 0);
    assert_eq!(
        req.cluster_health_policy()
            .max_percent_unhealthy_applications
            .value(),
        0
    );
    assert_eq!(
        req.cluster_upgrade_health_policy()
            .max_percent_delta_unhealthy_nodes
            .value(),
        10
    );
    assert_eq!(
        req.cluster_upgrade_health_policy()
            .max_percent_upgrade_domain_delta_unhealthy_nodes
            .value(),
        15
    );
}

#[test]
fn empty_duration_is_distinct_from_zero() {
    assert_eq!(UpgradeDuration::parse("").unwrap(), None);
    assert_eq!(
        UpgradeDuration::parse("0").unwrap(),
        Some(UpgradeDuration::ZERO)
    );
}
