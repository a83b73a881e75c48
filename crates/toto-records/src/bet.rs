use super::*;
use toto_core::ID;
use toto_core::Points;
use toto_core::Score;
use toto_core::Unique;

/// Score prediction for a fixture, one per (punter, fixture).
///
/// Placing again for the same pair overwrites the scores in place; the
/// uniqueness constraint makes the upsert atomic at the store.
#[derive(Debug, Clone)]
pub struct Bet {
    id: ID<Self>,
    punter: ID<Punter>,
    fixture: ID<Fixture>,
    score: (Score, Score),
    points: Option<Points>,
}

impl Bet {
    pub fn new(id: ID<Self>, punter: ID<Punter>, fixture: ID<Fixture>, score: (Score, Score)) -> Self {
        Self {
            id,
            punter,
            fixture,
            score,
            points: None,
        }
    }
    pub fn punter(&self) -> ID<Punter> {
        self.punter
    }
    pub fn fixture(&self) -> ID<Fixture> {
        self.fixture
    }
    pub fn score(&self) -> (Score, Score) {
        self.score
    }
    pub fn points(&self) -> Option<Points> {
        self.points
    }
}

impl Unique for Bet {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use toto_pg::*;

    impl Schema for Bet {
        fn name() -> &'static str {
            BETS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                BETS,
                " (
                    id          UUID PRIMARY KEY,
                    punter_id   UUID NOT NULL REFERENCES ",
                PUNTERS,
                "(id) ON DELETE CASCADE,
                    fixture_id  UUID NOT NULL REFERENCES ",
                FIXTURES,
                "(id) ON DELETE CASCADE,
                    home_score  SMALLINT NOT NULL,
                    away_score  SMALLINT NOT NULL,
                    points      DOUBLE PRECISION,
                    UNIQUE (punter_id, fixture_id)
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_bets_fixture ON ",
                BETS,
                " (fixture_id);
                 CREATE INDEX IF NOT EXISTS idx_bets_punter ON ",
                BETS,
                " (punter_id);"
            )
        }
    }
}
