//! Tournament, team, and fixture management plus entry approval.
//!
//! Every handler here requires a valid token whose subject is on the
//! admin roster.
pub mod handlers;
