use serde::{Deserialize, Serialize};
use crate::models::domain::{AssignmentRecord, Profile};

/// Response for the event matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchVolunteersResponse {
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub matches: Vec<Profile>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "maxVolunteers")]
    pub max_volunteers: u32,
    #[serde(rename = "assignedVolunteers")]
    pub assigned_volunteers: Vec<String>,
}

/// Response for a finalized assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignVolunteersResponse {
    pub success: bool,
    #[serde(rename = "assignmentId")]
    pub assignment_id: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "assignedVolunteers")]
    pub assigned_volunteers: Vec<String>,
    #[serde(rename = "historyRecorded")]
    pub history_recorded: bool,
}

/// A volunteer's assignment history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerHistoryResponse {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub assignments: Vec<AssignmentRecord>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
