//! Time- and participation-gated betting rules.
use std::time::SystemTime;

/// Whether a fixture's betting window has closed.
///
/// The window closes at the exact kickoff instant, not after it.
pub fn started(now: SystemTime, kickoff: SystemTime) -> bool {
    kickoff <= now
}

/// Whether a bet may be placed on a fixture.
///
/// Bets close at kickoff, and an unapproved tournament entry never bets.
pub fn may_place(now: SystemTime, kickoff: SystemTime, approved: bool) -> bool {
    approved && !started(now, kickoff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn closes_at_kickoff() {
        let kickoff = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert!(!may_place(kickoff, kickoff, true));
        assert!(may_place(kickoff - Duration::from_secs(1), kickoff, true));
        assert!(!may_place(kickoff + Duration::from_secs(1), kickoff, true));
    }

    #[test]
    fn requires_approved_entry() {
        let kickoff = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert!(!may_place(kickoff - Duration::from_secs(1), kickoff, false));
    }

    #[test]
    fn kickoff_instant_counts_as_started() {
        let kickoff = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert!(started(kickoff, kickoff));
        assert!(!started(kickoff - Duration::from_secs(1), kickoff));
    }
}
