use super::*;
use toto_core::ExternalId;
use toto_core::ID;
use toto_core::Score;
use toto_core::Unique;
use toto_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;

/// Creates all tables and indices. Idempotent; runs once at startup.
pub async fn migrate(db: &Arc<Client>) -> Result<(), PgErr> {
    for ddl in [
        Tournament::creates(),
        Team::creates(),
        Punter::creates(),
        Fixture::creates(),
        Entry::creates(),
        Bet::creates(),
        Tournament::indices(),
        Team::indices(),
        Punter::indices(),
        Fixture::indices(),
        Entry::indices(),
        Bet::indices(),
    ] {
        db.batch_execute(ddl).await?;
    }
    Ok(())
}

/// Repository trait for betting book database operations.
/// Abstracts SQL from domain modules.
#[allow(async_fn_in_trait)]
pub trait BookRepository {
    async fn create_tournament(&self, tournament: &Tournament) -> Result<(), PgErr>;
    async fn tournaments(&self) -> Result<Vec<Tournament>, PgErr>;
    async fn tournament(&self, id: ID<Tournament>) -> Result<Option<Tournament>, PgErr>;
    async fn create_team(&self, team: &Team) -> Result<(), PgErr>;
    async fn teams(&self) -> Result<Vec<Team>, PgErr>;
    async fn team(&self, id: ID<Team>) -> Result<Option<Team>, PgErr>;
    async fn create_fixture(&self, fixture: &Fixture) -> Result<(), PgErr>;
    async fn fixture(&self, id: ID<Fixture>) -> Result<Option<Fixture>, PgErr>;
    /// Every fixture with names resolved, kickoff order.
    async fn slate(&self) -> Result<Vec<FixtureCard>, PgErr>;
    /// Fixtures in the punter's approved tournaments, their bets attached.
    async fn cards(&self, punter: ExternalId) -> Result<Vec<FixtureCard>, PgErr>;
    /// Idempotent registration-on-demand keyed by external id.
    async fn find_or_create(&self, external: ExternalId, name: &str) -> Result<Punter, PgErr>;
    async fn punter(&self, external: ExternalId) -> Result<Option<Punter>, PgErr>;
    /// Tournaments the punter has not yet entered.
    async fn open_tournaments(&self, punter: ID<Punter>) -> Result<Vec<Tournament>, PgErr>;
    async fn enroll(&self, entry: &Entry) -> Result<(), PgErr>;
    async fn entered(&self, punter: ID<Punter>, tournament: ID<Tournament>) -> Result<bool, PgErr>;
    async fn pending_entries(&self) -> Result<Vec<PendingEntry>, PgErr>;
    /// Returns false when no such entry exists.
    async fn approve(&self, entry: ID<Entry>) -> Result<bool, PgErr>;
    async fn approved(&self, punter: ID<Punter>, tournament: ID<Tournament>) -> Result<bool, PgErr>;
    /// Upserts on (punter, fixture): a repeat placement overwrites scores.
    async fn place(&self, bet: &Bet) -> Result<(), PgErr>;
}

impl BookRepository for Arc<Client> {
    async fn create_tournament(&self, tournament: &Tournament) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!("INSERT INTO ", TOURNAMENTS, " (id, name) VALUES ($1, $2)"),
            &[&tournament.id().inner(), &tournament.name()],
        )
        .await
        .map(|_| ())
    }

    async fn tournaments(&self) -> Result<Vec<Tournament>, PgErr> {
        self.query(
            const_format::concatcp!("SELECT id, name FROM ", TOURNAMENTS, " ORDER BY name"),
            &[],
        )
        .await
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    Tournament::new(
                        ID::from(row.get::<_, uuid::Uuid>(0)),
                        row.get::<_, String>(1),
                    )
                })
                .collect()
        })
    }

    async fn tournament(&self, id: ID<Tournament>) -> Result<Option<Tournament>, PgErr> {
        self.query_opt(
            const_format::concatcp!("SELECT id, name FROM ", TOURNAMENTS, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await
        .map(|opt| {
            opt.map(|row| {
                Tournament::new(
                    ID::from(row.get::<_, uuid::Uuid>(0)),
                    row.get::<_, String>(1),
                )
            })
        })
    }

    async fn create_team(&self, team: &Team) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!("INSERT INTO ", TEAMS, " (id, name) VALUES ($1, $2)"),
            &[&team.id().inner(), &team.name()],
        )
        .await
        .map(|_| ())
    }

    async fn teams(&self) -> Result<Vec<Team>, PgErr> {
        self.query(
            const_format::concatcp!("SELECT id, name FROM ", TEAMS, " ORDER BY name"),
            &[],
        )
        .await
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    Team::new(
                        ID::from(row.get::<_, uuid::Uuid>(0)),
                        row.get::<_, String>(1),
                    )
                })
                .collect()
        })
    }

    async fn team(&self, id: ID<Team>) -> Result<Option<Team>, PgErr> {
        self.query_opt(
            const_format::concatcp!("SELECT id, name FROM ", TEAMS, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await
        .map(|opt| {
            opt.map(|row| {
                Team::new(
                    ID::from(row.get::<_, uuid::Uuid>(0)),
                    row.get::<_, String>(1),
                )
            })
        })
    }

    async fn create_fixture(&self, fixture: &Fixture) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                FIXTURES,
                " (id, tournament_id, home_id, away_id, kickoff) VALUES ($1, $2, $3, $4, $5)"
            ),
            &[
                &fixture.id().inner(),
                &fixture.tournament().inner(),
                &fixture.home().inner(),
                &fixture.away().inner(),
                &fixture.kickoff(),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn fixture(&self, id: ID<Fixture>) -> Result<Option<Fixture>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, tournament_id, home_id, away_id, kickoff, home_score, away_score, finished FROM ",
                FIXTURES,
                " WHERE id = $1"
            ),
            &[&id.inner()],
        )
        .await
        .map(|opt| {
            opt.map(|row| {
                Fixture::hydrate(
                    ID::from(row.get::<_, uuid::Uuid>(0)),
                    ID::from(row.get::<_, uuid::Uuid>(1)),
                    ID::from(row.get::<_, uuid::Uuid>(2)),
                    ID::from(row.get::<_, uuid::Uuid>(3)),
                    row.get::<_, std::time::SystemTime>(4),
                    (
                        row.get::<_, Option<Score>>(5),
                        row.get::<_, Option<Score>>(6),
                    ),
                    row.get::<_, bool>(7),
                )
            })
        })
    }

    async fn slate(&self) -> Result<Vec<FixtureCard>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT f.id, t.name, h.name, a.name, f.kickoff, f.home_score, f.away_score FROM ",
                FIXTURES,
                " f JOIN ",
                TOURNAMENTS,
                " t ON t.id = f.tournament_id JOIN ",
                TEAMS,
                " h ON h.id = f.home_id JOIN ",
                TEAMS,
                " a ON a.id = f.away_id ORDER BY f.kickoff"
            ),
            &[],
        )
        .await
        .map(|rows| {
            rows.iter()
                .map(|row| FixtureCard {
                    id: ID::from(row.get::<_, uuid::Uuid>(0)),
                    tournament: row.get::<_, String>(1),
                    home: row.get::<_, String>(2),
                    away: row.get::<_, String>(3),
                    kickoff: row.get::<_, std::time::SystemTime>(4),
                    score: (
                        row.get::<_, Option<Score>>(5),
                        row.get::<_, Option<Score>>(6),
                    ),
                    bet: None,
                })
                .collect()
        })
    }

    async fn cards(&self, punter: ExternalId) -> Result<Vec<FixtureCard>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT f.id, t.name, h.name, a.name, f.kickoff, f.home_score, f.away_score, b.home_score, b.away_score, b.points FROM ",
                FIXTURES,
                " f JOIN ",
                TOURNAMENTS,
                " t ON t.id = f.tournament_id JOIN ",
                ENTRIES,
                " e ON e.tournament_id = f.tournament_id AND e.approved JOIN ",
                PUNTERS,
                " p ON p.id = e.punter_id AND p.external_id = $1 JOIN ",
                TEAMS,
                " h ON h.id = f.home_id JOIN ",
                TEAMS,
                " a ON a.id = f.away_id LEFT JOIN ",
                BETS,
                " b ON b.fixture_id = f.id AND b.punter_id = p.id ORDER BY f.kickoff"
            ),
            &[&punter],
        )
        .await
        .map(|rows| {
            rows.iter()
                .map(|row| FixtureCard {
                    id: ID::from(row.get::<_, uuid::Uuid>(0)),
                    tournament: row.get::<_, String>(1),
                    home: row.get::<_, String>(2),
                    away: row.get::<_, String>(3),
                    kickoff: row.get::<_, std::time::SystemTime>(4),
                    score: (
                        row.get::<_, Option<Score>>(5),
                        row.get::<_, Option<Score>>(6),
                    ),
                    bet: row
                        .get::<_, Option<Score>>(7)
                        .zip(row.get::<_, Option<Score>>(8))
                        .map(|score| BetLine {
                            score,
                            points: row.get::<_, Option<toto_core::Points>>(9),
                        }),
                })
                .collect()
        })
    }

    async fn find_or_create(&self, external: ExternalId, name: &str) -> Result<Punter, PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                PUNTERS,
                " (id, external_id, name) VALUES ($1, $2, $3) ON CONFLICT (external_id) DO NOTHING"
            ),
            &[&ID::<Punter>::default().inner(), &external, &name],
        )
        .await?;
        self.query_one(
            const_format::concatcp!(
                "SELECT id, external_id, name FROM ",
                PUNTERS,
                " WHERE external_id = $1"
            ),
            &[&external],
        )
        .await
        .map(|row| {
            Punter::new(
                ID::from(row.get::<_, uuid::Uuid>(0)),
                row.get::<_, ExternalId>(1),
                row.get::<_, String>(2),
            )
        })
    }

    async fn punter(&self, external: ExternalId) -> Result<Option<Punter>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, external_id, name FROM ",
                PUNTERS,
                " WHERE external_id = $1"
            ),
            &[&external],
        )
        .await
        .map(|opt| {
            opt.map(|row| {
                Punter::new(
                    ID::from(row.get::<_, uuid::Uuid>(0)),
                    row.get::<_, ExternalId>(1),
                    row.get::<_, String>(2),
                )
            })
        })
    }

    async fn open_tournaments(&self, punter: ID<Punter>) -> Result<Vec<Tournament>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT t.id, t.name FROM ",
                TOURNAMENTS,
                " t WHERE NOT EXISTS (SELECT 1 FROM ",
                ENTRIES,
                " e WHERE e.tournament_id = t.id AND e.punter_id = $1) ORDER BY t.name"
            ),
            &[&punter.inner()],
        )
        .await
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    Tournament::new(
                        ID::from(row.get::<_, uuid::Uuid>(0)),
                        row.get::<_, String>(1),
                    )
                })
                .collect()
        })
    }

    async fn enroll(&self, entry: &Entry) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                ENTRIES,
                " (id, punter_id, tournament_id, approved) VALUES ($1, $2, $3, $4)"
            ),
            &[
                &entry.id().inner(),
                &entry.punter().inner(),
                &entry.tournament().inner(),
                &entry.approved(),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn entered(&self, punter: ID<Punter>, tournament: ID<Tournament>) -> Result<bool, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT 1 FROM ",
                ENTRIES,
                " WHERE punter_id = $1 AND tournament_id = $2"
            ),
            &[&punter.inner(), &tournament.inner()],
        )
        .await
        .map(|opt| opt.is_some())
    }

    async fn pending_entries(&self) -> Result<Vec<PendingEntry>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT e.id, p.name, t.name FROM ",
                ENTRIES,
                " e JOIN ",
                PUNTERS,
                " p ON p.id = e.punter_id JOIN ",
                TOURNAMENTS,
                " t ON t.id = e.tournament_id WHERE NOT e.approved ORDER BY e.id"
            ),
            &[],
        )
        .await
        .map(|rows| {
            rows.iter()
                .map(|row| PendingEntry {
                    id: ID::from(row.get::<_, uuid::Uuid>(0)),
                    punter: row.get::<_, String>(1),
                    tournament: row.get::<_, String>(2),
                })
                .collect()
        })
    }

    async fn approve(&self, entry: ID<Entry>) -> Result<bool, PgErr> {
        self.execute(
            const_format::concatcp!("UPDATE ", ENTRIES, " SET approved = TRUE WHERE id = $1"),
            &[&entry.inner()],
        )
        .await
        .map(|updated| updated > 0)
    }

    async fn approved(&self, punter: ID<Punter>, tournament: ID<Tournament>) -> Result<bool, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT 1 FROM ",
                ENTRIES,
                " WHERE punter_id = $1 AND tournament_id = $2 AND approved"
            ),
            &[&punter.inner(), &tournament.inner()],
        )
        .await
        .map(|opt| opt.is_some())
    }

    async fn place(&self, bet: &Bet) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                BETS,
                " (id, punter_id, fixture_id, home_score, away_score) VALUES ($1, $2, $3, $4, $5)
                  ON CONFLICT (punter_id, fixture_id)
                  DO UPDATE SET home_score = EXCLUDED.home_score, away_score = EXCLUDED.away_score"
            ),
            &[
                &bet.id().inner(),
                &bet.punter().inner(),
                &bet.fixture().inner(),
                &bet.score().0,
                &bet.score().1,
            ],
        )
        .await
        .map(|_| ())
    }
}
