use super::*;
use toto_core::ID;
use toto_core::Points;
use toto_core::Score;

/// Joined fixture view for listings: names resolved, and when listed
/// for a specific punter, their own bet attached.
#[derive(Debug, Clone)]
pub struct FixtureCard {
    pub id: ID<Fixture>,
    pub tournament: String,
    pub home: String,
    pub away: String,
    pub kickoff: std::time::SystemTime,
    pub score: (Option<Score>, Option<Score>),
    pub bet: Option<BetLine>,
}

/// A punter's own bet as shown on a fixture card.
#[derive(Debug, Clone)]
pub struct BetLine {
    pub score: (Score, Score),
    pub points: Option<Points>,
}

/// Entry awaiting admin approval, with names resolved for display.
#[derive(Debug, Clone)]
pub struct PendingEntry {
    pub id: ID<Entry>,
    pub punter: String,
    pub tournament: String,
}
