use toto_core::ExternalId;
use toto_core::ID;
use toto_core::Unique;

/// Registered bettor, keyed by the platform-assigned identifier.
///
/// Created on demand the first time a verified identity requests
/// tournament participation; never created by an admin action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Punter {
    id: ID<Self>,
    external: ExternalId,
    name: String,
}

impl Punter {
    pub fn new(id: ID<Self>, external: ExternalId, name: String) -> Self {
        Self { id, external, name }
    }
    pub fn external(&self) -> ExternalId {
        self.external
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Unique for Punter {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use toto_pg::*;

    /// The external_id UNIQUE constraint backs idempotent find-or-create.
    impl Schema for Punter {
        fn name() -> &'static str {
            PUNTERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                PUNTERS,
                " (
                    id          UUID PRIMARY KEY,
                    external_id BIGINT UNIQUE NOT NULL,
                    name        VARCHAR(255) NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_punters_external ON ",
                PUNTERS,
                " (external_id);"
            )
        }
    }
}
