//! Unit tests for the Temporal module
//!
//! Tests cover canonical zone configuration, stored timestamp parsing,
//! normalization of naive and aware timestamps, and day bounds.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use core_kernel::{CanonicalZone, CoreError, StoredTimestamp, TemporalError, normalize_timestamp};
use proptest::prelude::*;

fn saigon() -> CanonicalZone {
    CanonicalZone::from_config(Some("Asia/Ho_Chi_Minh")).unwrap()
}

fn new_york() -> CanonicalZone {
    CanonicalZone::from_config(Some("America/New_York")).unwrap()
}

fn naive(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
}

mod configuration {
    use super::*;

    #[test]
    fn test_from_config_known_zone() {
        let zone = saigon();
        assert_eq!(zone.name(), "Asia/Ho_Chi_Minh");
        assert_eq!(zone.to_string(), "Asia/Ho_Chi_Minh");
    }

    #[test]
    fn test_from_config_trims_name() {
        let zone = CanonicalZone::from_config(Some(" Europe/London ")).unwrap();
        assert_eq!(zone.name(), "Europe/London");
    }

    #[test]
    fn test_missing_zone_fails() {
        let result = CanonicalZone::from_config(None);
        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_unknown_zone_fails() {
        let result = CanonicalZone::from_config(Some("Mars/Olympus_Mons"));
        match result {
            Err(CoreError::Configuration(msg)) => assert!(msg.contains("Mars/Olympus_Mons")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_serde_by_name() {
        let zone = saigon();
        let json = serde_json::to_string(&zone).unwrap();
        assert_eq!(json, "\"Asia/Ho_Chi_Minh\"");
        let back: CanonicalZone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, zone);
        assert!(serde_json::from_str::<CanonicalZone>("\"Nowhere\"").is_err());
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_naive_space_separated() {
        let parsed = StoredTimestamp::parse("2024-03-01 09:30:00").unwrap();
        assert_eq!(parsed, StoredTimestamp::Naive(naive(2024, 3, 1, 9, 30, 0)));
    }

    #[test]
    fn test_parse_naive_minutes_only() {
        let expected = StoredTimestamp::Naive(naive(2024, 3, 1, 9, 30, 0));
        assert_eq!(StoredTimestamp::parse("2024-03-01T09:30").unwrap(), expected);
        assert_eq!(StoredTimestamp::parse("2024-03-01 09:30").unwrap(), expected);
    }

    #[test]
    fn test_parse_naive_with_fraction() {
        let parsed = StoredTimestamp::parse("2024-03-01T09:30:00.250").unwrap();
        match parsed {
            StoredTimestamp::Naive(value) => assert_eq!(value.nanosecond(), 250_000_000),
            other => panic!("Expected naive timestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        let parsed = StoredTimestamp::parse("2024-03-01").unwrap();
        assert_eq!(parsed, StoredTimestamp::Naive(naive(2024, 3, 1, 0, 0, 0)));
    }

    #[test]
    fn test_parse_rfc3339_is_aware() {
        let parsed = StoredTimestamp::parse("2024-03-01T09:30:00+07:00").unwrap();
        assert!(!parsed.is_naive());
        let parsed = StoredTimestamp::parse("2024-03-01T02:30:00Z").unwrap();
        assert!(!parsed.is_naive());
    }

    #[test]
    fn test_parse_space_separated_with_offset_is_aware() {
        let parsed = StoredTimestamp::parse("2024-03-01 09:30:00+07:00").unwrap();
        assert!(!parsed.is_naive());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            StoredTimestamp::parse("not a time"),
            Err(TemporalError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            StoredTimestamp::parse(""),
            Err(TemporalError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let naive_ts = StoredTimestamp::Naive(naive(2023, 12, 31, 23, 59, 59));
        assert_eq!(StoredTimestamp::parse(&naive_ts.to_string()).unwrap(), naive_ts);

        let aware_ts: StoredTimestamp = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap().into();
        assert_eq!(StoredTimestamp::parse(&aware_ts.to_string()).unwrap(), aware_ts);
    }

    #[test]
    fn test_json_uses_string_form() {
        let ts = StoredTimestamp::Naive(naive(2024, 1, 2, 3, 4, 5));
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-01-02T03:04:05\"");
    }
}

mod normalization {
    use super::*;

    #[test]
    fn test_naive_keeps_wall_clock() {
        let value = naive(2024, 3, 1, 9, 30, 0);
        let normalized = normalize_timestamp(&saigon(), &StoredTimestamp::Naive(value)).unwrap();

        assert_eq!(normalized.naive_local(), value);
        assert_eq!(normalized.with_timezone(&Utc).hour(), 2);
    }

    #[test]
    fn test_aware_utc_is_shifted_into_zone() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 1, 2, 30, 0).unwrap();
        let normalized = saigon().normalize(&StoredTimestamp::from(utc)).unwrap();

        assert_eq!(normalized.naive_local(), naive(2024, 3, 1, 9, 30, 0));
        assert_eq!(normalized.with_timezone(&Utc), utc);
    }

    #[test]
    fn test_aware_already_in_zone_is_unchanged() {
        let aware = DateTime::parse_from_rfc3339("2024-03-01T09:30:00+07:00").unwrap();
        let normalized = saigon().normalize(&StoredTimestamp::Aware(aware)).unwrap();

        assert_eq!(normalized.naive_local(), aware.naive_local());
    }

    #[test]
    fn test_naive_and_aware_same_wall_clock_agree() {
        let zone = saigon();
        let from_naive = zone.normalize(&StoredTimestamp::parse("2024-03-01 09:30:00").unwrap()).unwrap();
        let from_aware = zone.normalize(&StoredTimestamp::parse("2024-03-01T09:30:00+07:00").unwrap()).unwrap();

        assert_eq!(from_naive, from_aware);
    }

    #[test]
    fn test_naive_in_dst_gap_fails() {
        let gap = naive(2024, 3, 10, 2, 30, 0);
        let result = new_york().normalize(&StoredTimestamp::Naive(gap));

        assert!(matches!(result, Err(TemporalError::NonexistentLocalTime { .. })));
    }

    #[test]
    fn test_naive_in_dst_overlap_takes_earliest() {
        let overlap = naive(2024, 11, 3, 1, 30, 0);
        let normalized = new_york().normalize(&StoredTimestamp::Naive(overlap)).unwrap();

        // Earliest reading is still on daylight time (UTC-4)
        assert_eq!(normalized.with_timezone(&Utc), Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap());
    }

    #[test]
    fn test_normalize_utc() {
        let utc = Utc.with_ymd_and_hms(2024, 6, 30, 20, 0, 0).unwrap();
        let local = saigon().normalize_utc(utc);

        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    }
}

mod day_bounds {
    use super::*;

    #[test]
    fn test_local_day_bounds() {
        let (start, end) = saigon()
            .local_day_bounds(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .unwrap();

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 29, 17, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 1, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_local_day_bounds_across_dst_change() {
        let (start, end) = new_york()
            .local_day_bounds(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
            .unwrap();

        assert_eq!((end - start).num_hours(), 23);
    }

    #[test]
    fn test_local_day_bounds_when_midnight_is_skipped() {
        // Chile moves 00:00 to 01:00 on 8 September 2024
        let santiago = CanonicalZone::from_config(Some("America/Santiago")).unwrap();
        let (start, end) = santiago
            .local_day_bounds(NaiveDate::from_ymd_opt(2024, 9, 8).unwrap())
            .unwrap();

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 9, 8, 4, 0, 0).unwrap());
        assert_eq!((end - start).num_hours(), 23);

        let (_, previous_end) = santiago
            .local_day_bounds(NaiveDate::from_ymd_opt(2024, 9, 7).unwrap())
            .unwrap();
        assert_eq!(previous_end, start);
    }
}

proptest! {
    #[test]
    fn prop_naive_wall_clock_is_preserved(
        year in 1990i32..2040,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
    ) {
        let value = naive(year, month, day, hour, minute, second);
        let normalized = saigon().normalize(&StoredTimestamp::Naive(value)).unwrap();

        prop_assert_eq!(normalized.naive_local(), value);
        prop_assert_eq!(normalized.timezone(), saigon().tz());
    }

    #[test]
    fn prop_aware_instant_is_preserved(
        secs in 631_152_000i64..2_208_988_800i64,
        offset_minutes in -720i32..=840,
    ) {
        let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap();
        let aware = Utc.timestamp_opt(secs, 0).unwrap().with_timezone(&offset);
        let normalized = saigon().normalize(&StoredTimestamp::Aware(aware)).unwrap();

        prop_assert_eq!(normalized.with_timezone(&Utc), aware.with_timezone(&Utc));
        prop_assert_eq!(normalized.timezone(), saigon().tz());
    }
}
