//! Listings, participation, and bet placement.
pub mod handlers;
