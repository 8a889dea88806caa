use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{match_volunteers, validate_assignment};
use crate::models::{
    AssignVolunteersRequest, AssignVolunteersResponse, EventPatch, HealthResponse,
    MatchVolunteersResponse, PreviewMatchesRequest,
};
use crate::routes::{
    appwrite_error_response, assignment_error_response, error_response, match_error_response,
    AppState,
};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/events/{event_id}/matches", web::get().to(get_event_matches))
        .route("/events/{event_id}/assignments", web::post().to(assign_volunteers))
        .route("/matches/preview", web::post().to(preview_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Matched volunteers for an event
///
/// GET /api/v1/events/{eventId}/matches
async fn get_event_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let event_id = path.into_inner();

    if let Some(cache) = &state.cache {
        match cache.get(&event_id).await {
            Ok(Some(cached)) => {
                tracing::debug!("Serving cached matches for event {}", event_id);
                return HttpResponse::Ok().json(cached);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Cache lookup failed for event {}: {}", event_id, e),
        }
    }

    let (event, volunteers) = tokio::join!(
        state.appwrite.get_event(&event_id),
        state.appwrite.list_profiles(),
    );

    let event = match event {
        Ok(event) => event,
        Err(e) => {
            tracing::error!("Failed to fetch event {}: {}", event_id, e);
            return appwrite_error_response("Failed to fetch event", &e);
        }
    };

    let volunteers = match volunteers {
        Ok(volunteers) => volunteers,
        Err(e) => {
            tracing::error!("Failed to list profiles: {}", e);
            return appwrite_error_response("Failed to list profiles", &e);
        }
    };

    let result = match match_volunteers(&volunteers, &event) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Event {} cannot be matched: {}", event_id, e);
            return match_error_response(&e);
        }
    };

    let response = MatchVolunteersResponse {
        event_id: event_id.clone(),
        matches: result.matches,
        total_candidates: result.total_candidates,
        max_volunteers: event.max_volunteers,
        assigned_volunteers: event.assigned_volunteers,
    };

    tracing::info!(
        "Returning {} matches for event {} (from {} candidates)",
        response.matches.len(),
        event_id,
        response.total_candidates
    );

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.put(&response).await {
            tracing::warn!("Failed to cache matches for event {}: {}", event_id, e);
        }
    }

    HttpResponse::Ok().json(response)
}

/// Finalize the volunteers assigned to an event
///
/// POST /api/v1/events/{eventId}/assignments
///
/// Request body:
/// ```json
/// { "accountIds": ["string"] }
/// ```
async fn assign_volunteers(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<AssignVolunteersRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for assignment request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let event_id = path.into_inner();

    let (event, volunteers) = tokio::join!(
        state.appwrite.get_event(&event_id),
        state.appwrite.list_profiles(),
    );

    let event = match event {
        Ok(event) => event,
        Err(e) => {
            tracing::error!("Failed to fetch event {}: {}", event_id, e);
            return appwrite_error_response("Failed to fetch event", &e);
        }
    };

    let volunteers = match volunteers {
        Ok(volunteers) => volunteers,
        Err(e) => {
            tracing::error!("Failed to list profiles: {}", e);
            return appwrite_error_response("Failed to list profiles", &e);
        }
    };

    let matched = match match_volunteers(&volunteers, &event) {
        Ok(result) => result.matches,
        Err(e) => {
            tracing::warn!("Event {} cannot be matched: {}", event_id, e);
            return match_error_response(&e);
        }
    };

    let assigned = match validate_assignment(&event, &matched, &req.account_ids) {
        Ok(assigned) => assigned,
        Err(e) => {
            tracing::info!("Rejected assignment for event {}: {}", event_id, e);
            return assignment_error_response(&e);
        }
    };

    let patch = EventPatch {
        assigned_volunteers: Some(assigned.clone()),
    };

    if let Err(e) = state.appwrite.update_event(&event_id, &patch).await {
        tracing::error!("Failed to persist assignment for event {}: {}", event_id, e);
        return appwrite_error_response("Failed to update event", &e);
    }

    // The event store is the source of truth; history is best-effort
    let history_recorded = match event.date {
        Some(day) => match state
            .postgres
            .record_assignments(&event_id, &event.title, day, &assigned)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Assignment saved but history recording failed: {}", e);
                false
            }
        },
        None => false,
    };

    if let Some(cache) = &state.cache {
        match cache.invalidate(&event_id).await {
            Ok(true) => tracing::debug!("Invalidated cached matches for event {}", event_id),
            Ok(false) => {}
            Err(e) => tracing::warn!("Failed to invalidate cache: {}", e),
        }
    }

    tracing::info!(
        "Assigned {} volunteers to event {} (capacity {})",
        assigned.len(),
        event_id,
        event.max_volunteers
    );

    HttpResponse::Ok().json(AssignVolunteersResponse {
        success: true,
        assignment_id: uuid::Uuid::new_v4().to_string(),
        event_id,
        assigned_volunteers: assigned,
        history_recorded,
    })
}

/// Run the matcher over caller-supplied profiles and event
///
/// POST /api/v1/matches/preview
pub async fn preview_matches(req: web::Json<PreviewMatchesRequest>) -> impl Responder {
    let PreviewMatchesRequest { volunteers, event } = req.into_inner();

    match match_volunteers(&volunteers, &event) {
        Ok(result) => HttpResponse::Ok().json(MatchVolunteersResponse {
            event_id: event.event_id,
            matches: result.matches,
            total_candidates: result.total_candidates,
            max_volunteers: event.max_volunteers,
            assigned_volunteers: event.assigned_volunteers,
        }),
        Err(e) => match_error_response(&e),
    }
}
