use super::*;
use toto_core::ID;
use toto_core::Unique;

/// Tournament participation request.
///
/// Created unapproved; an admin flips the flag before the punter may
/// bet on the tournament's fixtures.
#[derive(Debug, Clone)]
pub struct Entry {
    id: ID<Self>,
    punter: ID<Punter>,
    tournament: ID<Tournament>,
    approved: bool,
}

impl Entry {
    pub fn new(id: ID<Self>, punter: ID<Punter>, tournament: ID<Tournament>) -> Self {
        Self {
            id,
            punter,
            tournament,
            approved: false,
        }
    }
    pub fn punter(&self) -> ID<Punter> {
        self.punter
    }
    pub fn tournament(&self) -> ID<Tournament> {
        self.tournament
    }
    pub fn approved(&self) -> bool {
        self.approved
    }
}

impl Unique for Entry {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use toto_pg::*;

    impl Schema for Entry {
        fn name() -> &'static str {
            ENTRIES
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                ENTRIES,
                " (
                    id            UUID PRIMARY KEY,
                    punter_id     UUID NOT NULL REFERENCES ",
                PUNTERS,
                "(id) ON DELETE CASCADE,
                    tournament_id UUID NOT NULL REFERENCES ",
                TOURNAMENTS,
                "(id) ON DELETE CASCADE,
                    approved      BOOLEAN DEFAULT FALSE,
                    UNIQUE (punter_id, tournament_id)
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_entries_tournament ON ",
                ENTRIES,
                " (tournament_id);
                 CREATE INDEX IF NOT EXISTS idx_entries_pending ON ",
                ENTRIES,
                " (id) WHERE NOT approved;"
            )
        }
    }
}
