use std::collections::BTreeSet;
use thiserror::Error;
use crate::core::filters::is_eligible;
use crate::models::{CalendarDay, Event, Profile};

/// Errors raised for an event that cannot be matched against
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Event {event_id} is missing required field {field}")]
    MissingField {
        event_id: String,
        field: &'static str,
    },

    #[error("Event {event_id} has invalid field {field}: {reason}")]
    InvalidField {
        event_id: String,
        field: &'static str,
        reason: String,
    },

    #[error("Event {event_id} has invalid state code {state:?}")]
    InvalidState { event_id: String, state: String },
}

/// Result of the matching process
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub matches: Vec<Profile>,
    pub total_candidates: usize,
}

/// The eligibility constraints of one event, checked for shape
#[derive(Debug, Clone, PartialEq)]
pub struct EventRequirements {
    state: String,
    skills_required: BTreeSet<String>,
    date: CalendarDay,
}

impl EventRequirements {
    pub fn from_event(event: &Event) -> Result<Self, MatchError> {
        if let Some(bad) = event.malformed.first() {
            return Err(MatchError::InvalidField {
                event_id: event.event_id.clone(),
                field: bad.field,
                reason: bad.reason.clone(),
            });
        }

        let missing = |field| MatchError::MissingField {
            event_id: event.event_id.clone(),
            field,
        };

        let raw_state = event.state.as_deref().ok_or_else(|| missing("state"))?;
        let skills_required = event
            .skills_required
            .clone()
            .ok_or_else(|| missing("skillsRequired"))?;
        let date = event.date.ok_or_else(|| missing("date"))?;

        let state = raw_state.trim();
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(MatchError::InvalidState {
                event_id: event.event_id.clone(),
                state: raw_state.to_string(),
            });
        }

        Ok(Self {
            state: state.to_ascii_uppercase(),
            skills_required,
            date,
        })
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn skills_required(&self) -> &BTreeSet<String> {
        &self.skills_required
    }

    pub fn date(&self) -> CalendarDay {
        self.date
    }
}

/// Select the volunteers eligible for an event
///
/// A volunteer is kept only when it passes the state, skill and availability
/// checks. Input order is preserved and nothing is ranked; capacity is left
/// to the assignment step.
pub fn match_volunteers(volunteers: &[Profile], event: &Event) -> Result<MatchResult, MatchError> {
    let requirements = EventRequirements::from_event(event)?;

    let matches: Vec<Profile> = volunteers
        .iter()
        .filter(|profile| is_eligible(profile, &requirements))
        .cloned()
        .collect();

    tracing::debug!(
        event_id = %event.event_id,
        candidates = volunteers.len(),
        matched = matches.len(),
        "matched volunteers"
    );

    Ok(MatchResult {
        matches,
        total_candidates: volunteers.len(),
    })
}
