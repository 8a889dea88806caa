use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use crate::models::VolunteerHistoryResponse;
use crate::routes::{error_response, AppState};

/// Configure volunteer history routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/volunteers/{account_id}/history", web::get().to(get_history));
}

/// Events a volunteer has been assigned to
///
/// GET /api/v1/volunteers/{accountId}/history
async fn get_history(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let account_id = path.into_inner();

    match state.postgres.get_history(&account_id).await {
        Ok(assignments) => HttpResponse::Ok().json(VolunteerHistoryResponse {
            account_id,
            count: assignments.len(),
            assignments,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch history for {}: {}", account_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch history", e)
        }
    }
}
