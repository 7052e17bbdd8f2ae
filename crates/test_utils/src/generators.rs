//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains (or deliberately breaks) domain invariants.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for canonical mobile numbers
pub fn valid_phone_strategy() -> impl Strategy<Value = String> {
    "0[35789][0-9]{8}"
}

/// Strategy for strings that are never canonical mobile numbers
pub fn invalid_phone_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // wrong length
        "0[35789][0-9]{0,7}",
        "0[35789][0-9]{9,12}",
        // bad prefix
        "0[0-246][0-9]{8}",
        "[1-9][0-9]{9}",
        // spreadsheet float artifacts
        "[35789][0-9]{8}\\.0",
        "[1-9]\\.[0-9]{8}E8",
        // separators and letters
        "0[35789][0-9]{2}[ .-][0-9]{3}[ .-][0-9]{3}",
        "[a-z]{1,5}[0-9]{1,5}",
    ]
}

/// Strategy for naive datetimes between 1990 and 2040, whole seconds
pub fn naive_datetime_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (1990i32..2040, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(y, m, d, h, min, s)| {
            NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|date| date.and_hms_opt(h, min, s))
                .expect("generated components are in range")
        },
    )
}

/// Strategy for aware datetimes with arbitrary whole-minute offsets
pub fn aware_datetime_strategy() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (631_152_000i64..2_208_988_800i64, -720i32..=840).prop_map(|(secs, offset_minutes)| {
        let offset = FixedOffset::east_opt(offset_minutes * 60).expect("offset is within a day");
        Utc.timestamp_opt(secs, 0)
            .single()
            .expect("timestamp is in range")
            .with_timezone(&offset)
    })
}

/// Strategy for valid NAV values (typically 1,000.00 to 100,000.00)
pub fn nav_strategy() -> impl Strategy<Value = Decimal> {
    (100_000i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for positive money amounts up to one billion
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|n| Decimal::new(n, 0))
}
