use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{Event, Profile};

/// Request to finalize the volunteers assigned to an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignVolunteersRequest {
    #[validate(length(min = 1), custom(function = "validate_account_ids"))]
    #[serde(alias = "account_ids", rename = "accountIds")]
    pub account_ids: Vec<String>,
}

/// Request to run the matcher over caller-supplied snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewMatchesRequest {
    #[serde(default)]
    pub volunteers: Vec<Profile>,
    pub event: Event,
}

fn validate_account_ids(ids: &[String]) -> Result<(), ValidationError> {
    if ids.iter().any(|id| id.trim().is_empty()) {
        return Err(ValidationError::new("empty_account_id"));
    }
    Ok(())
}
