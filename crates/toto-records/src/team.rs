use toto_core::ID;
use toto_core::Unique;

/// Competing side referenced by fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: ID<Self>,
    name: String,
}

impl Team {
    pub fn new(id: ID<Self>, name: String) -> Self {
        Self { id, name }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Unique for Team {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use toto_pg::*;

    impl Schema for Team {
        fn name() -> &'static str {
            TEAMS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                TEAMS,
                " (
                    id          UUID PRIMARY KEY,
                    name        VARCHAR(255) NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_teams_name ON ",
                TEAMS,
                " (name);"
            )
        }
    }
}
