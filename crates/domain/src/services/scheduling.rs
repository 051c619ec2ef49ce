//! Reservation scheduling helpers.

use chrono::{DateTime, Utc};

/// Closed-interval overlap test for reservation windows.
///
/// Touching endpoints count as overlap: a booking ending at 10:00 blocks
/// one starting at 10:00. Mirrors the SQL conflict check in the
/// reservation repository, which must stay in sync with this predicate.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Duration of a window in fractional hours, as fed to the price
/// calculator. Negative durations clamp to zero.
pub fn duration_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let millis = (end - start).num_milliseconds();
    (millis.max(0) as f64) / 3_600_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_disjoint_intervals() {
        assert!(!intervals_overlap(t(8), t(9), t(10), t(11)));
        assert!(!intervals_overlap(t(10), t(11), t(8), t(9)));
    }

    #[test]
    fn test_touching_endpoints_overlap() {
        assert!(intervals_overlap(t(8), t(10), t(10), t(12)));
        assert!(intervals_overlap(t(10), t(12), t(8), t(10)));
    }

    #[test]
    fn test_containment_both_directions() {
        assert!(intervals_overlap(t(8), t(14), t(10), t(11)));
        assert!(intervals_overlap(t(10), t(11), t(8), t(14)));
    }

    #[test]
    fn test_partial_overlap() {
        assert!(intervals_overlap(t(8), t(11), t(10), t(13)));
    }

    #[test]
    fn test_overlap_matches_brute_force_on_grid() {
        // Exhaustively check every hour pair on a small grid against the
        // definition "some instant lies in both closed intervals".
        for a_s in 0..8u32 {
            for a_e in a_s..8 {
                for b_s in 0..8 {
                    for b_e in b_s..8 {
                        let expected = a_s.max(b_s) <= a_e.min(b_e);
                        assert_eq!(
                            intervals_overlap(t(a_s), t(a_e), t(b_s), t(b_e)),
                            expected,
                            "a=[{},{}] b=[{},{}]",
                            a_s,
                            a_e,
                            b_s,
                            b_e
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_duration_hours() {
        let start = t(8);
        assert_eq!(duration_hours(start, start + Duration::hours(5)), 5.0);
        assert_eq!(duration_hours(start, start + Duration::minutes(90)), 1.5);
        assert_eq!(duration_hours(start, start - Duration::hours(1)), 0.0);
    }
}
