// ABOUTME: Integration tests for type-safe identifiers and validated types.
// ABOUTME: Tests grace period parsing and ID semantics.

use skoupa::types::{ContainerId, GracePeriod, ImageId, NetworkId, VolumeId};

mod grace_period {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn parses_minutes() {
        let grace: GracePeriod = "60m".parse().unwrap();
        assert_eq!(grace.delta(), TimeDelta::minutes(60));
    }

    #[test]
    fn parses_hours() {
        let grace: GracePeriod = "24h".parse().unwrap();
        assert_eq!(grace.delta(), TimeDelta::hours(24));
    }

    #[test]
    fn parses_the_default_span() {
        let grace: GracePeriod = "720h".parse().unwrap();
        assert_eq!(grace.delta(), TimeDelta::hours(720));
    }

    #[test]
    fn zero_is_legal() {
        let grace: GracePeriod = "0m".parse().unwrap();
        assert_eq!(grace.delta(), TimeDelta::zero());
    }

    #[test]
    fn display_round_trips() {
        for input in ["60m", "24h", "720h", "0m"] {
            let grace: GracePeriod = input.parse().unwrap();
            assert_eq!(grace.to_string(), input);
        }
    }

    #[test]
    fn constructors_match_parsing() {
        assert_eq!("90m".parse::<GracePeriod>().unwrap(), GracePeriod::minutes(90));
        assert_eq!("6h".parse::<GracePeriod>().unwrap(), GracePeriod::hours(6));
    }

    #[test]
    fn rejects_empty() {
        assert!("".parse::<GracePeriod>().is_err());
    }

    #[test]
    fn rejects_missing_unit() {
        assert!("720".parse::<GracePeriod>().is_err());
    }

    #[test]
    fn rejects_unknown_unit() {
        assert!("10s".parse::<GracePeriod>().is_err());
        assert!("10d".parse::<GracePeriod>().is_err());
    }

    #[test]
    fn rejects_signs_and_whitespace() {
        assert!("-10m".parse::<GracePeriod>().is_err());
        assert!("+10m".parse::<GracePeriod>().is_err());
        assert!("10 m".parse::<GracePeriod>().is_err());
    }

    #[test]
    fn rejects_non_numeric_count() {
        assert!("abch".parse::<GracePeriod>().is_err());
        assert!("m".parse::<GracePeriod>().is_err());
    }

    #[test]
    fn rejects_overflowing_count() {
        assert!("99999999999999999999m".parse::<GracePeriod>().is_err());
    }
}

mod ids {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn display_matches_inner_value() {
        let id = ContainerId::new("abc123".to_string());
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(id.to_string(), "abc123");
    }

    #[test]
    fn equality_and_hashing_follow_the_value() {
        let a = ImageId::new("sha-aaa".to_string());
        let b = ImageId::new("sha-aaa".to_string());
        let c = ImageId::new("sha-bbb".to_string());
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(c);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn each_resource_kind_has_its_own_id_type() {
        // Different marker types are distinct at compile time; this just
        // exercises construction for all four kinds.
        let _ = ContainerId::new("c".to_string());
        let _ = ImageId::new("i".to_string());
        let _ = NetworkId::new("n".to_string());
        let _ = VolumeId::new("v".to_string());
    }
}
