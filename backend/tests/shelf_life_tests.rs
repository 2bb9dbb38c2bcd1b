//! Shelf-life monitoring tests
//!
//! Tests for the freshness classification applied to batches with remaining
//! stock and the days-left arithmetic behind the report.

use chrono::NaiveDate;
use proptest::prelude::*;
use shared::models::{freshness_status, FreshnessStatus};

fn day(month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, d).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_new_batch_is_fresh() {
        assert_eq!(freshness_status(0, 14), FreshnessStatus::Fresh);
    }

    /// Boundary: exactly half the shelf life left is a warning, just above
    /// half is still fresh
    #[test]
    fn test_warning_boundary() {
        assert_eq!(freshness_status(5, 10), FreshnessStatus::Warning);
        assert_eq!(freshness_status(4, 10), FreshnessStatus::Fresh);
    }

    /// Boundary: exactly 20% left is critical
    #[test]
    fn test_critical_boundary() {
        assert_eq!(freshness_status(8, 10), FreshnessStatus::Critical);
        assert_eq!(freshness_status(7, 10), FreshnessStatus::Warning);
    }

    #[test]
    fn test_expired_batch_is_critical() {
        assert_eq!(freshness_status(10, 10), FreshnessStatus::Critical);
        assert_eq!(freshness_status(30, 10), FreshnessStatus::Critical);
    }

    /// Degenerate shelf life never classifies as fresh
    #[test]
    fn test_non_positive_shelf_life_is_critical() {
        assert_eq!(freshness_status(0, 0), FreshnessStatus::Critical);
        assert_eq!(freshness_status(0, -1), FreshnessStatus::Critical);
    }

    /// Days-left arithmetic used by the report
    #[test]
    fn test_days_left_from_intake_date() {
        let intake = day(1, 10);
        let today = day(1, 17);
        let age_days = (today - intake).num_days();
        let shelf_life_days = 10i32;

        assert_eq!(age_days, 7);
        assert_eq!(shelf_life_days as i64 - age_days, 3);
        assert_eq!(freshness_status(age_days, shelf_life_days), FreshnessStatus::Warning);
    }

    /// A batch received with a long shelf life stays fresh across a month
    #[test]
    fn test_long_shelf_life_across_month_boundary() {
        let intake = day(1, 25);
        let today = day(2, 5);
        let age_days = (today - intake).num_days();

        assert_eq!(age_days, 11);
        assert_eq!(freshness_status(age_days, 60), FreshnessStatus::Fresh);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every batch classifies into exactly one bucket, and status only
    /// degrades as the batch ages
    #[test]
    fn prop_status_monotonic_in_age(shelf_life in 1i32..365, age in 0i64..400) {
        let today = freshness_status(age, shelf_life);
        let tomorrow = freshness_status(age + 1, shelf_life);

        let rank = |s: FreshnessStatus| match s {
            FreshnessStatus::Fresh => 0,
            FreshnessStatus::Warning => 1,
            FreshnessStatus::Critical => 2,
        };
        prop_assert!(rank(tomorrow) >= rank(today));
    }

    /// Anything at or past expiry is critical
    #[test]
    fn prop_expired_is_always_critical(shelf_life in 1i32..365, overshoot in 0i64..100) {
        let age = shelf_life as i64 + overshoot;
        prop_assert_eq!(freshness_status(age, shelf_life), FreshnessStatus::Critical);
    }

    /// A brand-new batch with a shelf life of at least 2 days is fresh
    #[test]
    fn prop_new_batch_fresh(shelf_life in 3i32..365) {
        prop_assert_eq!(freshness_status(0, shelf_life), FreshnessStatus::Fresh);
    }
}
