//! Tiered price calculator for parking spots.
//!
//! Used twice per reservation: at booking (estimated price from the
//! requested window) and at checkout (final price from the actual
//! entry/exit duration).

use crate::models::spot::SpotRates;

/// Hours in the monthly billing threshold (30 days).
const MONTH_HOURS: f64 = 720.0;

/// Hours in the daily billing threshold.
const DAY_HOURS: f64 = 24.0;

/// Computes the price for occupying a spot for `duration_hours`.
///
/// The hourly rate is the base. A stay of at least a day switches to the
/// daily rate when one is set, billed per started day; a stay of at least
/// 30 days switches to the monthly rate when one is set, billed per
/// started month. The highest applicable tier wins; thresholds compare
/// raw fractional hours, only the unit count is rounded up.
pub fn price_for_duration(rates: &SpotRates, duration_hours: f64) -> f64 {
    let mut price = rates.price_hour * duration_hours;

    if duration_hours >= DAY_HOURS {
        if let Some(day_rate) = rates.price_day {
            let days = (duration_hours / DAY_HOURS).ceil();
            price = day_rate * days;
        }
    }

    if duration_hours >= MONTH_HOURS {
        if let Some(month_rate) = rates.price_month {
            let months = (duration_hours / MONTH_HOURS).ceil();
            price = month_rate * months;
        }
    }

    price
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(hour: f64, day: Option<f64>, month: Option<f64>) -> SpotRates {
        SpotRates {
            price_minute: None,
            price_hour: hour,
            price_day: day,
            price_month: month,
        }
    }

    #[test]
    fn test_hourly_base() {
        assert_eq!(price_for_duration(&rates(10.0, None, None), 5.0), 50.0);
    }

    #[test]
    fn test_fractional_hours() {
        assert_eq!(price_for_duration(&rates(10.0, None, None), 1.5), 15.0);
    }

    #[test]
    fn test_day_rate_wins_over_hourly() {
        // 30h at 10/h would be 300; billed as 2 started days at 80.
        assert_eq!(price_for_duration(&rates(10.0, Some(80.0), None), 30.0), 160.0);
    }

    #[test]
    fn test_exactly_one_day() {
        assert_eq!(price_for_duration(&rates(10.0, Some(80.0), None), 24.0), 80.0);
    }

    #[test]
    fn test_no_day_rate_falls_back_to_hourly() {
        assert_eq!(price_for_duration(&rates(10.0, None, None), 30.0), 300.0);
    }

    #[test]
    fn test_month_rate_supersedes_day_rate() {
        // 800h is past the 720h threshold: 1 started month + change.
        assert_eq!(
            price_for_duration(&rates(5.0, Some(40.0), Some(600.0)), 800.0),
            1200.0
        );
    }

    #[test]
    fn test_exactly_one_month() {
        assert_eq!(
            price_for_duration(&rates(5.0, Some(40.0), Some(600.0)), 720.0),
            600.0
        );
    }

    #[test]
    fn test_month_threshold_without_month_rate_uses_day_rate() {
        assert_eq!(
            price_for_duration(&rates(5.0, Some(40.0), None), 720.0),
            40.0 * 30.0
        );
    }

    #[test]
    fn test_just_under_day_threshold_stays_hourly() {
        assert_eq!(
            price_for_duration(&rates(10.0, Some(80.0), None), 23.9),
            239.0
        );
    }
}
