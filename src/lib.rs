//! Volunteer Match - volunteer-to-event matching service
//!
//! The core is a pure matcher that filters a roster of volunteer profiles down
//! to those eligible for an event (state, skills, availability). The rest of
//! the crate wires it to an Appwrite document store, a match cache and an
//! assignment history behind an HTTP API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{match_volunteers, validate_assignment, MatchError, MatchResult};
pub use crate::models::{CalendarDay, Event, Profile};
