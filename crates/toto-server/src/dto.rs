//! Wire types for the book API.
//!
//! Request and response shapes, serializable via `serde`. Field names
//! follow the client contract (`match_id`, `team_1_name`, ...) while the
//! domain keeps its own vocabulary.
use serde::Deserialize;
use serde::Serialize;
use toto_core::Points;
use toto_core::Score;
use toto_core::Unique;

#[derive(Deserialize)]
pub struct NameRequest {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct AddFixtureRequest {
    pub tournament_id: Option<uuid::Uuid>,
    pub team_1_id: Option<uuid::Uuid>,
    pub team_2_id: Option<uuid::Uuid>,
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct ParticipateRequest {
    pub tournament_id: Option<uuid::Uuid>,
}

#[derive(Deserialize)]
pub struct ApproveRequest {
    pub participation_id: Option<uuid::Uuid>,
}

#[derive(Deserialize)]
pub struct PlaceBetRequest {
    pub match_id: Option<uuid::Uuid>,
    pub score_1: Option<Score>,
    pub score_2: Option<Score>,
}

#[derive(Serialize)]
pub struct TournamentDto {
    pub id: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct TeamDto {
    pub id: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct MatchDto {
    pub id: String,
    pub tournament_name: String,
    pub team_1_name: String,
    pub team_2_name: String,
    pub date: String,
    pub score_1: Option<Score>,
    pub score_2: Option<Score>,
    pub bet: Option<BetDto>,
}

#[derive(Serialize)]
pub struct BetDto {
    pub score_1: Score,
    pub score_2: Score,
    pub points: Option<Points>,
}

#[derive(Serialize)]
pub struct PendingDto {
    pub id: String,
    pub user_name: String,
    pub tournament_name: String,
}

impl From<toto_records::Tournament> for TournamentDto {
    fn from(tournament: toto_records::Tournament) -> Self {
        Self {
            id: tournament.id().to_string(),
            name: tournament.name().to_string(),
        }
    }
}

impl From<toto_records::Team> for TeamDto {
    fn from(team: toto_records::Team) -> Self {
        Self {
            id: team.id().to_string(),
            name: team.name().to_string(),
        }
    }
}

impl From<toto_records::FixtureCard> for MatchDto {
    fn from(card: toto_records::FixtureCard) -> Self {
        Self {
            id: card.id.to_string(),
            tournament_name: card.tournament,
            team_1_name: card.home,
            team_2_name: card.away,
            date: rfc3339(card.kickoff),
            score_1: card.score.0,
            score_2: card.score.1,
            bet: card.bet.map(|bet| BetDto {
                score_1: bet.score.0,
                score_2: bet.score.1,
                points: bet.points,
            }),
        }
    }
}

impl From<toto_records::PendingEntry> for PendingDto {
    fn from(entry: toto_records::PendingEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            user_name: entry.punter,
            tournament_name: entry.tournament,
        }
    }
}

/// RFC 3339 at the wire; the domain keeps `SystemTime`.
pub(crate) fn rfc3339(at: std::time::SystemTime) -> String {
    time::OffsetDateTime::from(at)
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_kickoff_as_rfc3339() {
        let at = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000);
        assert_eq!(rfc3339(at), "2023-11-14T22:13:20Z");
    }
}
