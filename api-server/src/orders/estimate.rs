//! Delivery time estimation
//!
//! Dishes are assumed to be prepared in parallel, so the kitchen component
//! is the slowest dish, not the sum. During the evening rush window a random
//! surcharge is added. The estimate is computed once at order creation and
//! never recalculated.

use chrono::{DateTime, Local, Timelike};
use rand::Rng;

/// Flat delivery time added to every estimate
const DELIVERY_FLAT_MINUTES: i32 = 10;

/// Rush window: [17:00, 19:00) local time
const RUSH_START_HOUR: u32 = 17;
const RUSH_END_HOUR: u32 = 19;

/// Rush surcharge range in minutes (5..=10)
const RUSH_SURCHARGE_MIN: i32 = 5;
const RUSH_SURCHARGE_MAX_EXCLUSIVE: i32 = 11;

/// Estimate delivery time in minutes for an order's dish cooking times
pub fn estimate_delivery_minutes(cooking_times: &[i32], now: DateTime<Local>) -> i32 {
    let base = cooking_times.iter().copied().max().unwrap_or(0);

    let rush_surcharge = if is_rush_hour(now) {
        rand::thread_rng().gen_range(RUSH_SURCHARGE_MIN..RUSH_SURCHARGE_MAX_EXCLUSIVE)
    } else {
        0
    };

    base + rush_surcharge + DELIVERY_FLAT_MINUTES
}

/// Whether `now` falls in the evening rush window
pub fn is_rush_hour(now: DateTime<Local>) -> bool {
    (RUSH_START_HOUR..RUSH_END_HOUR).contains(&now.hour())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_hour(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, hour, 30, 0).unwrap()
    }

    #[test]
    fn test_outside_rush_is_bottleneck_plus_flat() {
        // 2x dish A (15 min) + 1x dish B (20 min) -> max 20 + 10 flat
        let minutes = estimate_delivery_minutes(&[15, 15, 20], at_hour(12));
        assert_eq!(minutes, 30);
    }

    #[test]
    fn test_bottleneck_not_sum() {
        let minutes = estimate_delivery_minutes(&[30, 5, 5, 5], at_hour(10));
        assert_eq!(minutes, 40);
    }

    #[test]
    fn test_rush_hour_adds_five_to_ten_minutes() {
        for _ in 0..50 {
            let minutes = estimate_delivery_minutes(&[20], at_hour(18));
            assert!((35..=40).contains(&minutes), "got {minutes}");
        }
    }

    #[test]
    fn test_rush_window_bounds() {
        assert!(!is_rush_hour(at_hour(16)));
        assert!(is_rush_hour(at_hour(17)));
        assert!(is_rush_hour(at_hour(18)));
        assert!(!is_rush_hour(at_hour(19)));
        assert!(!is_rush_hour(at_hour(20)));
    }

    #[test]
    fn test_empty_cooking_times() {
        assert_eq!(estimate_delivery_minutes(&[], at_hour(12)), 10);
    }
}
