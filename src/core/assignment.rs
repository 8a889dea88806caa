use thiserror::Error;
use crate::models::{Event, Profile};

/// Errors raised while selecting volunteers for an event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("No volunteers selected")]
    EmptySelection,

    #[error("Event allows at most {max_volunteers} volunteers")]
    CapacityReached { max_volunteers: u32 },

    #[error("Volunteer {0} is not a match for this event")]
    NotMatched(String),
}

/// Outcome of toggling one volunteer in a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected,
    Deselected,
}

/// Capacity-bounded working selection of volunteers for one event
#[derive(Debug, Clone)]
pub struct AssignmentSelection {
    max_volunteers: u32,
    selected: Vec<String>,
}

impl AssignmentSelection {
    pub fn new(max_volunteers: u32) -> Self {
        Self {
            max_volunteers,
            selected: Vec::new(),
        }
    }

    /// Add a volunteer; returns false when already selected
    pub fn select(&mut self, account_id: &str) -> Result<bool, AssignmentError> {
        if self.contains(account_id) {
            return Ok(false);
        }
        if self.is_max_reached() {
            return Err(AssignmentError::CapacityReached {
                max_volunteers: self.max_volunteers,
            });
        }
        self.selected.push(account_id.to_string());
        Ok(true)
    }

    pub fn deselect(&mut self, account_id: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| id != account_id);
        self.selected.len() != before
    }

    /// Select an unselected volunteer or undo a selected one
    pub fn toggle(&mut self, account_id: &str) -> Result<SelectionChange, AssignmentError> {
        if self.deselect(account_id) {
            Ok(SelectionChange::Deselected)
        } else {
            self.select(account_id).map(|_| SelectionChange::Selected)
        }
    }

    pub fn contains(&self, account_id: &str) -> bool {
        self.selected.iter().any(|id| id == account_id)
    }

    pub fn is_max_reached(&self) -> bool {
        self.selected.len() >= self.max_volunteers as usize
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn into_selected(self) -> Vec<String> {
        self.selected
    }
}

/// Build the final assignment for an event from the matcher's output
///
/// Repeated ids collapse onto their first occurrence. Every id must be one of
/// `matched`, and the selection must be non-empty and fit `max_volunteers`.
pub fn validate_assignment(
    event: &Event,
    matched: &[Profile],
    account_ids: &[String],
) -> Result<Vec<String>, AssignmentError> {
    let mut selection = AssignmentSelection::new(event.max_volunteers);

    for account_id in account_ids {
        if !matched.iter().any(|profile| &profile.account_id == account_id) {
            return Err(AssignmentError::NotMatched(account_id.clone()));
        }
        selection.select(account_id)?;
    }

    if selection.selected().is_empty() {
        return Err(AssignmentError::EmptySelection);
    }

    Ok(selection.into_selected())
}
