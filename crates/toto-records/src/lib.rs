//! Domain records for the betting book.
//!
//! Tournaments, teams, fixtures, and the punters betting on them.
//!
//! ## Entities
//!
//! - [`Tournament`] — Competition with a shared betting pool
//! - [`Team`] — Competing side
//! - [`Fixture`] — Scheduled match between two teams
//! - [`Punter`] — Registered bettor keyed by platform identity
//! - [`Entry`] — Tournament participation request and approval state
//! - [`Bet`] — Score prediction, one per (punter, fixture)
//!
//! ## Read Models
//!
//! - [`FixtureCard`] — Joined fixture view for listings
//! - [`PendingEntry`] — Entry awaiting admin approval
mod bet;
mod card;
mod entry;
mod fixture;
mod punter;
mod team;
mod tournament;

pub use bet::*;
pub use card::*;
pub use entry::*;
pub use fixture::*;
pub use punter::*;
pub use team::*;
pub use tournament::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;
