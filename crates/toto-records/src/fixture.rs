use super::*;
use toto_core::ID;
use toto_core::Score;
use toto_core::Unique;

/// Scheduled match between two teams within a tournament.
///
/// Betting closes at kickoff; the result columns stay empty until the
/// fixture is settled.
#[derive(Debug, Clone)]
pub struct Fixture {
    id: ID<Self>,
    tournament: ID<Tournament>,
    home: ID<Team>,
    away: ID<Team>,
    kickoff: std::time::SystemTime,
    score: (Option<Score>, Option<Score>),
    finished: bool,
}

impl Fixture {
    /// A freshly scheduled fixture with no result yet.
    pub fn new(
        id: ID<Self>,
        tournament: ID<Tournament>,
        home: ID<Team>,
        away: ID<Team>,
        kickoff: std::time::SystemTime,
    ) -> Self {
        Self {
            id,
            tournament,
            home,
            away,
            kickoff,
            score: (None, None),
            finished: false,
        }
    }
    /// Reconstructs a stored fixture, result columns included.
    pub fn hydrate(
        id: ID<Self>,
        tournament: ID<Tournament>,
        home: ID<Team>,
        away: ID<Team>,
        kickoff: std::time::SystemTime,
        score: (Option<Score>, Option<Score>),
        finished: bool,
    ) -> Self {
        Self {
            id,
            tournament,
            home,
            away,
            kickoff,
            score,
            finished,
        }
    }
    pub fn tournament(&self) -> ID<Tournament> {
        self.tournament
    }
    pub fn home(&self) -> ID<Team> {
        self.home
    }
    pub fn away(&self) -> ID<Team> {
        self.away
    }
    pub fn kickoff(&self) -> std::time::SystemTime {
        self.kickoff
    }
    pub fn score(&self) -> (Option<Score>, Option<Score>) {
        self.score
    }
    pub fn finished(&self) -> bool {
        self.finished
    }
}

impl Unique for Fixture {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use toto_pg::*;

    impl Schema for Fixture {
        fn name() -> &'static str {
            FIXTURES
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                FIXTURES,
                " (
                    id            UUID PRIMARY KEY,
                    tournament_id UUID NOT NULL REFERENCES ",
                TOURNAMENTS,
                "(id) ON DELETE CASCADE,
                    home_id       UUID NOT NULL REFERENCES ",
                TEAMS,
                "(id),
                    away_id       UUID NOT NULL REFERENCES ",
                TEAMS,
                "(id),
                    kickoff       TIMESTAMPTZ NOT NULL,
                    home_score    SMALLINT,
                    away_score    SMALLINT,
                    finished      BOOLEAN DEFAULT FALSE
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_fixtures_tournament ON ",
                FIXTURES,
                " (tournament_id);
                 CREATE INDEX IF NOT EXISTS idx_fixtures_kickoff ON ",
                FIXTURES,
                " (kickoff);"
            )
        }
    }
}
