use toto_core::ID;
use toto_core::Unique;

/// Competition whose fixtures share one betting pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tournament {
    id: ID<Self>,
    name: String,
}

impl Tournament {
    pub fn new(id: ID<Self>, name: String) -> Self {
        Self { id, name }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Unique for Tournament {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use toto_pg::*;

    impl Schema for Tournament {
        fn name() -> &'static str {
            TOURNAMENTS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                TOURNAMENTS,
                " (
                    id          UUID PRIMARY KEY,
                    name        VARCHAR(255) NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_tournaments_name ON ",
                TOURNAMENTS,
                " (name);"
            )
        }
    }
}
