//! Pickup authorization policy.
//!
//! Decides whether a guardian may pick up a student given the guardian
//! link snapshot, and whether a user counts as school staff.

use chrono::{DateTime, Utc};

use crate::models::guardian::GuardianLink;
use crate::models::user::UserType;

/// Tunable policy for the guardian pickup check.
///
/// The deployed behavior only requires `can_pickup`; the `verified` flag
/// and the validity window on the link are opt-in checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickupPolicy {
    /// Require the guardian link to be verified.
    pub require_verified: bool,
    /// Enforce the link's start/end validity window.
    pub enforce_validity_window: bool,
}

/// Returns whether the guardian link authorizes a pickup under the policy.
pub fn may_pickup(policy: &PickupPolicy, link: &GuardianLink, now: DateTime<Utc>) -> bool {
    if !link.can_pickup {
        return false;
    }

    if policy.require_verified && !link.verified {
        return false;
    }

    if policy.enforce_validity_window {
        if now < link.start_date {
            return false;
        }
        if let Some(end) = link.end_date {
            if now > end {
                return false;
            }
        }
    }

    true
}

/// Returns whether a user type counts as school staff for releasing
/// students. Type-based only; membership at the specific school is not
/// checked.
pub fn is_staff(user_type: UserType) -> bool {
    matches!(user_type, UserType::Admin | UserType::School)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn link(can_pickup: bool, verified: bool, end_date: Option<DateTime<Utc>>) -> GuardianLink {
        GuardianLink {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            relation: "Mother".into(),
            is_primary: true,
            verified,
            can_pickup,
            start_date: Utc::now() - Duration::days(30),
            end_date,
            created_at: Utc::now() - Duration::days(30),
        }
    }

    #[test]
    fn test_default_policy_only_checks_can_pickup() {
        let policy = PickupPolicy::default();
        let now = Utc::now();

        assert!(may_pickup(&policy, &link(true, false, None), now));
        assert!(!may_pickup(&policy, &link(false, true, None), now));
        // Expired window is ignored by default
        let expired = link(true, false, Some(now - Duration::days(1)));
        assert!(may_pickup(&policy, &expired, now));
    }

    #[test]
    fn test_require_verified() {
        let policy = PickupPolicy {
            require_verified: true,
            ..Default::default()
        };
        let now = Utc::now();

        assert!(!may_pickup(&policy, &link(true, false, None), now));
        assert!(may_pickup(&policy, &link(true, true, None), now));
    }

    #[test]
    fn test_enforce_validity_window() {
        let policy = PickupPolicy {
            enforce_validity_window: true,
            ..Default::default()
        };
        let now = Utc::now();

        let open_ended = link(true, false, None);
        assert!(may_pickup(&policy, &open_ended, now));

        let expired = link(true, false, Some(now - Duration::hours(1)));
        assert!(!may_pickup(&policy, &expired, now));

        let mut future = link(true, false, None);
        future.start_date = now + Duration::days(1);
        assert!(!may_pickup(&policy, &future, now));
    }

    #[test]
    fn test_is_staff() {
        assert!(is_staff(UserType::Admin));
        assert!(is_staff(UserType::School));
        assert!(!is_staff(UserType::Parent));
        assert!(!is_staff(UserType::ParkingProvider));
    }
}
