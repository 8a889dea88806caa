// Route exports
pub mod history;
pub mod matches;

use actix_web::{http::StatusCode, web, HttpResponse};
use crate::core::{AssignmentError, MatchError};
use crate::models::ErrorResponse;
use crate::services::{AppwriteClient, AppwriteError, MatchCache, PostgresClient};
use std::fmt::Display;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    /// Absent when match caching is disabled
    pub cache: Option<Arc<MatchCache>>,
    pub postgres: Arc<PostgresClient>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(history::configure),
    );
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Display) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

/// Map a store failure onto the caller-facing status
pub(crate) fn appwrite_error_response(error: &str, e: &AppwriteError) -> HttpResponse {
    let status = match e {
        AppwriteError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    };
    error_response(status, error, e)
}

/// An event the matcher cannot work with is a data problem, not a bad request
pub(crate) fn match_error_response(e: &MatchError) -> HttpResponse {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, "Malformed event", e)
}

pub(crate) fn assignment_error_status(e: &AssignmentError) -> StatusCode {
    match e {
        AssignmentError::CapacityReached { .. } => StatusCode::CONFLICT,
        AssignmentError::EmptySelection | AssignmentError::NotMatched(_) => StatusCode::BAD_REQUEST,
    }
}

pub(crate) fn assignment_error_response(e: &AssignmentError) -> HttpResponse {
    error_response(assignment_error_status(e), "Invalid assignment", e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_errors_map_to_status() {
        assert_eq!(
            assignment_error_status(&AssignmentError::CapacityReached { max_volunteers: 2 }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            assignment_error_status(&AssignmentError::NotMatched("a9".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            assignment_error_status(&AssignmentError::EmptySelection),
            StatusCode::BAD_REQUEST
        );

        let response = assignment_error_response(&AssignmentError::CapacityReached { max_volunteers: 2 });
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_match_errors_are_unprocessable() {
        let missing = MatchError::MissingField { event_id: "e1".into(), field: "date" };
        assert_eq!(match_error_response(&missing).status(), StatusCode::UNPROCESSABLE_ENTITY);

        let invalid = MatchError::InvalidField {
            event_id: "e1".into(),
            field: "skillsRequired",
            reason: "invalid type".into(),
        };
        assert_eq!(match_error_response(&invalid).status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_store_errors_map_to_status() {
        let not_found = appwrite_error_response("x", &AppwriteError::NotFound("event e1".into()));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let unauthorized = appwrite_error_response("x", &AppwriteError::Unauthorized);
        assert_eq!(unauthorized.status(), StatusCode::BAD_GATEWAY);
    }
}
